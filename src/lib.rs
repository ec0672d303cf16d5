pub mod app;
pub mod cli;
pub mod constants;
pub mod models;
pub mod runtime;
pub mod session;
pub mod tui;
pub mod utils;

pub use app::{load_config, Config};
pub use models::{Generator, ModelFactory};
pub use session::{ConversationController, Entry, SessionStore, SubmitOutcome};
pub use tui::run_ui;
pub use utils::GenFinError;
