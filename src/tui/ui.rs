use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tracing::debug;

use crate::constants::{UI_PAGE_LINES, UI_REFRESH_INTERVAL_MS, UI_SCROLL_LINES};
use crate::tui::app::{App, Focus};
use crate::tui::render::render_ui;
use crate::utils::GenFinError;

/// Run the terminal UI
pub async fn run_ui(mut app: App) -> Result<()> {
    if !crossterm::tty::IsTty::is_tty(&io::stdout()) {
        eprintln!("❌ GenFin requires an interactive terminal.");
        eprintln!("   To ask a single question, use: genfin --prompt \"your question\"");
        return Err(GenFinError::UIError("No interactive terminal available".to_string()).into());
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| render_ui(f, app))?;

        if !event::poll(Duration::from_millis(UI_REFRESH_INTERVAL_MS))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            app.quit();
            break;
        }

        match app.focus {
            Focus::Input => {
                if handle_input_key(app, key) {
                    // One turn at a time: show the pending state, then wait for the answer
                    app.is_generating = true;
                    app.set_status(format!("Asking: {}", app.input.trim()));
                    terminal.draw(|f| render_ui(f, app))?;

                    let outcome = app.submit_input().await;
                    debug!(?outcome, "turn finished");
                    drain_pending_keys()?;
                }
            }
            Focus::History => handle_history_key(app, key),
        }
    }

    Ok(())
}

/// Handle a key while typing; returns true when a question should be sent
fn handle_input_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter => {
            let input = app.input.trim().to_string();
            if input.starts_with(':') {
                app.input.clear();
                app.run_command(&input);
                false
            } else {
                !input.is_empty()
            }
        }
        KeyCode::Esc => {
            app.input.clear();
            app.clear_status();
            false
        }
        KeyCode::Tab => {
            app.toggle_focus();
            false
        }
        KeyCode::Backspace => {
            app.input.pop();
            false
        }
        KeyCode::PageUp => {
            app.scroll_up(UI_PAGE_LINES);
            false
        }
        KeyCode::PageDown => {
            app.scroll_down(UI_PAGE_LINES);
            false
        }
        KeyCode::Up => {
            app.scroll_up(UI_SCROLL_LINES);
            false
        }
        KeyCode::Down => {
            app.scroll_down(UI_SCROLL_LINES);
            false
        }
        KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            app.input.push(c);
            false
        }
        _ => false,
    }
}

/// Handle a key while browsing the history sidebar
fn handle_history_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => app.cursor_down(),
        KeyCode::Enter | KeyCode::Char('l') => {
            app.load_selected();
        }
        KeyCode::Delete | KeyCode::Char('d') => {
            app.delete_selected();
        }
        KeyCode::Char('C') => app.clear_history(),
        KeyCode::PageUp => app.scroll_up(UI_PAGE_LINES),
        KeyCode::PageDown => app.scroll_down(UI_PAGE_LINES),
        KeyCode::Tab | KeyCode::Esc | KeyCode::Char('i') => app.toggle_focus(),
        KeyCode::Char('q') => app.quit(),
        _ => {}
    }
}

/// Drop keys typed while an answer was being generated
fn drain_pending_keys() -> Result<()> {
    while event::poll(Duration::from_millis(0))? {
        event::read()?;
    }
    Ok(())
}
