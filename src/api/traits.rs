//! Trait abstraction for the form service client to enable mocking in tests

use crate::state::UserRegistration;
use anyhow::Result;
use async_trait::async_trait;

/// Trait for form service operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FormApiTrait: Send + Sync {
    /// Register a user; returns the service's confirmation message.
    ///
    /// A refusal is an error whose message is the one the service sent.
    async fn create_user(&mut self, user: &UserRegistration) -> Result<String>;

    /// Fetch the raw schema document assigned to `roll_number`
    async fn get_form(&mut self, roll_number: &str) -> Result<serde_json::Value>;
}
