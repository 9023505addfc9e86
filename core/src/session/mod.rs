//! Editor state machine: one session value, one transition function, and the
//! driver that turns requested effects into backend calls.

pub mod driver;
pub mod form;
pub mod overlay;
pub mod reducer;

pub use form::{DetectorForm, FormEdit, FormError, FormField, Submission};
pub use overlay::Overlay;
pub use reducer::{Action, Effect, EditorSession, Operation};
