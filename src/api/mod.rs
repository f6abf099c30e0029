//! Form service client module for HTTP communication

mod client;
mod loader;
mod traits;

pub use client::ApiClient;
pub use loader::{fetch_schema, SchemaUnavailable};
pub use traits::FormApiTrait;

#[cfg(test)]
pub use traits::MockFormApiTrait;
