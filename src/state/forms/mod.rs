//! Form domain layer
//!
//! Schema-driven multi-section forms: schema model, value store, validation,
//! render selection and the section state machine, plus the registration
//! form shown before a schema is loaded.

mod field;
mod focus;
mod form_state;
mod progress;
mod registration;
mod render;
mod schema;
mod session;
mod store;
mod validator;

pub use field::{FieldValue, FormField};
pub use focus::{Form, SectionButton, SectionFocus};
pub use form_state::{SubmitPolicy, Transition, TransitionError};
pub use progress::{Progress, StepStatus};
pub use registration::{RegistrationForm, UserRegistration};
pub use render::{
    cycle_choice, edit_text, is_selected, select, toggle_choice, toggle_flag, InputWidget,
    TextEdit, ValueBinding,
};
pub use schema::{FieldDef, FieldKind, FormSchema};
pub use session::FormSession;
pub use store::ValueStore;
