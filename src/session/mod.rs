/// Session management module - Gateway

mod controller;
mod store;

pub use controller::{ConversationController, SubmitOutcome};
pub use store::{Entry, SessionError, SessionStore};
