use crate::app::Config;
use crate::session::{ConversationController, SessionStore, SubmitOutcome};

/// Which pane receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Typing a question or a `:` command
    Input,
    /// Navigating the chat history sidebar
    History,
}

/// Application state
pub struct App {
    /// History, displayed entry and duplicate guard for this session
    pub session: SessionStore,
    /// Turns questions into entries
    controller: ConversationController,
    /// User input buffer
    pub input: String,
    /// Focused pane
    pub focus: Focus,
    /// Highlighted row in the history sidebar
    pub history_cursor: usize,
    /// Is the app running?
    pub running: bool,
    /// Is a question being answered right now?
    pub is_generating: bool,
    /// Scroll offset for the answer view
    pub scroll_offset: u16,
    /// Furthest the answer view can scroll, measured on the last draw
    pub max_scroll: u16,
    /// Show chat history sidebar
    pub show_sidebar: bool,
    /// Show the quotes band
    pub show_quotes: bool,
    /// Show key and command help in the main pane
    pub show_help: bool,
    /// Model name for display
    pub model_name: String,
    /// Status message
    pub status_message: Option<String>,
}

impl App {
    /// Create a new app instance
    pub fn new(config: &Config, controller: ConversationController) -> Self {
        Self {
            session: SessionStore::new(),
            controller,
            input: String::new(),
            focus: Focus::Input,
            history_cursor: 0,
            running: true,
            is_generating: false,
            scroll_offset: 0,
            max_scroll: 0,
            show_sidebar: config.ui.show_sidebar,
            show_quotes: config.ui.show_quotes,
            show_help: false,
            model_name: config.model.name.clone(),
            status_message: None,
        }
    }

    /// Submit the input buffer as a question
    ///
    /// Runs the whole turn; the caller redraws once this returns.
    pub async fn submit_input(&mut self) -> SubmitOutcome {
        let question = self.input.clone();
        self.is_generating = true;

        let outcome = self.controller.submit(&mut self.session, &question).await;

        self.is_generating = false;
        match outcome {
            SubmitOutcome::Answered(index) => {
                self.input.clear();
                self.history_cursor = index;
                self.scroll_offset = 0;
                self.show_help = false;
                self.clear_status();
            }
            SubmitOutcome::Duplicate => {
                self.input.clear();
                self.set_status("Same question as last time; not sent again");
            }
            SubmitOutcome::Ignored => {}
        }
        outcome
    }

    /// Display the highlighted history entry
    pub fn load_selected(&mut self) -> bool {
        self.load(self.history_cursor)
    }

    /// Display the entry at `index`
    pub fn load(&mut self, index: usize) -> bool {
        if self.session.select(index) {
            self.history_cursor = index;
            self.scroll_offset = 0;
            self.show_help = false;
            true
        } else {
            false
        }
    }

    /// Delete the highlighted history entry
    pub fn delete_selected(&mut self) -> bool {
        self.delete(self.history_cursor)
    }

    /// Delete the entry at `index`; the displayed answer stays on screen
    pub fn delete(&mut self, index: usize) -> bool {
        match self.session.delete_at(index) {
            Some(entry) => {
                self.clamp_cursor();
                self.set_status(format!("Deleted: {}", entry.question));
                true
            }
            None => false,
        }
    }

    /// Remove every history entry
    pub fn clear_history(&mut self) {
        self.session.clear_all();
        self.history_cursor = 0;
        self.set_status("Chat history cleared");
    }

    fn clamp_cursor(&mut self) {
        self.history_cursor = self
            .history_cursor
            .min(self.session.len().saturating_sub(1));
    }

    pub fn cursor_up(&mut self) {
        self.history_cursor = self.history_cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.history_cursor + 1 < self.session.len() {
            self.history_cursor += 1;
        }
    }

    /// Move focus between the input box and the history sidebar
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Input if self.show_sidebar => Focus::History,
            _ => Focus::Input,
        };
    }

    /// Toggle sidebar visibility
    pub fn toggle_sidebar(&mut self) {
        self.show_sidebar = !self.show_sidebar;
        if !self.show_sidebar {
            self.focus = Focus::Input;
        }
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Scroll the answer view towards its start
    pub fn scroll_up(&mut self, amount: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    /// Scroll the answer view towards its end
    ///
    /// Bounded by the wrapped height of the view as last rendered.
    pub fn scroll_down(&mut self, amount: u16) {
        self.scroll_offset = self
            .scroll_offset
            .saturating_add(amount)
            .min(self.max_scroll);
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Run a `:` command typed into the input box
    ///
    /// Entry numbers are 1-based, as shown in the sidebar.
    pub fn run_command(&mut self, command: &str) {
        let parts: Vec<&str> = command.trim_start_matches(':').split_whitespace().collect();
        let number = parts
            .get(1)
            .and_then(|n| n.parse::<usize>().ok())
            .and_then(|n| n.checked_sub(1));

        match parts.first().copied() {
            Some("quit") | Some("q") => self.quit(),
            Some("clear") => self.clear_history(),
            Some("sidebar") | Some("sb") => self.toggle_sidebar(),
            Some("quotes") => self.show_quotes = !self.show_quotes,
            Some("help") | Some("h") => self.show_help = !self.show_help,
            Some("load") | Some("l") => match number {
                Some(index) if self.load(index) => {}
                _ => self.set_status("Usage: :load N (N from the history list)"),
            },
            Some("delete") | Some("del") | Some("d") => match number {
                Some(index) if self.delete(index) => {}
                _ => self.set_status("Usage: :delete N (N from the history list)"),
            },
            _ => self.set_status(format!("Unknown command: {}", command)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MockGenerator;
    use pretty_assertions::assert_eq;

    fn test_app() -> App {
        let mut generator = MockGenerator::new();
        generator
            .expect_generate()
            .returning(|prompt| Ok(format!("answer for {prompt}")));
        App::new(
            &Config::default(),
            ConversationController::new(Box::new(generator)),
        )
    }

    async fn ask(app: &mut App, question: &str) -> SubmitOutcome {
        app.input = question.to_string();
        app.submit_input().await
    }

    #[tokio::test]
    async fn test_submit_clears_input_and_tracks_cursor() {
        let mut app = test_app();

        assert_eq!(ask(&mut app, "savings").await, SubmitOutcome::Answered(0));
        assert_eq!(ask(&mut app, "budget").await, SubmitOutcome::Answered(1));

        assert!(app.input.is_empty());
        assert_eq!(app.history_cursor, 1);
        assert!(!app.is_generating);
        assert_eq!(app.session.display().unwrap().question, "budget");
    }

    #[tokio::test]
    async fn test_duplicate_submit_sets_status() {
        let mut app = test_app();
        ask(&mut app, "savings").await;

        assert_eq!(ask(&mut app, "savings").await, SubmitOutcome::Duplicate);
        assert_eq!(app.session.len(), 1);
        assert!(app.status_message.is_some());
    }

    #[tokio::test]
    async fn test_trailing_space_is_a_different_question() {
        let mut app = test_app();
        ask(&mut app, "savings").await;

        assert_eq!(ask(&mut app, "savings ").await, SubmitOutcome::Answered(1));
        assert_eq!(app.session.get(1).unwrap().question, "savings ");
        assert_eq!(ask(&mut app, "   ").await, SubmitOutcome::Ignored);
    }

    #[test]
    fn test_scroll_down_respects_measured_limit() {
        let mut app = test_app();
        app.scroll_down(5);
        assert_eq!(app.scroll_offset, 0);

        app.max_scroll = 7;
        app.scroll_down(5);
        app.scroll_down(5);
        assert_eq!(app.scroll_offset, 7);
        app.scroll_up(3);
        assert_eq!(app.scroll_offset, 4);
    }

    #[tokio::test]
    async fn test_delete_clamps_cursor_and_keeps_display() {
        let mut app = test_app();
        for q in ["a", "b", "c"] {
            ask(&mut app, q).await;
        }

        assert!(app.delete_selected());
        assert_eq!(app.history_cursor, 1);
        assert_eq!(app.session.display().unwrap().question, "c");

        app.clear_history();
        assert!(app.session.is_empty());
        assert!(!app.delete_selected());
        assert!(!app.load_selected());
    }

    #[tokio::test]
    async fn test_commands() {
        let mut app = test_app();
        for q in ["a", "b"] {
            ask(&mut app, q).await;
        }

        app.run_command(":load 1");
        assert_eq!(app.session.display().unwrap().question, "a");

        app.run_command(":delete 2");
        assert_eq!(app.session.len(), 1);

        app.run_command(":load 0");
        assert!(app.status_message.as_deref().unwrap().starts_with("Usage"));

        app.run_command(":sb");
        assert!(!app.show_sidebar);

        app.run_command(":q");
        assert!(!app.running);
    }

    #[test]
    fn test_focus_needs_sidebar() {
        let mut app = test_app();

        app.toggle_focus();
        assert_eq!(app.focus, Focus::History);

        app.toggle_sidebar();
        assert_eq!(app.focus, Focus::Input);
        app.toggle_focus();
        assert_eq!(app.focus, Focus::Input);
    }

    #[test]
    fn test_cursor_bounds() {
        let mut app = test_app();
        app.session.append("a", "1").unwrap();
        app.session.append("b", "2").unwrap();

        app.cursor_up();
        assert_eq!(app.history_cursor, 0);
        app.cursor_down();
        app.cursor_down();
        assert_eq!(app.history_cursor, 1);
    }
}
