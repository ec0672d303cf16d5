use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::constants::{
    APP_SUBTITLE, APP_TITLE, FINANCIAL_QUOTES, INPUT_PLACEHOLDER, UI_SIDEBAR_PERCENT,
};
use crate::models::is_warning;
use crate::tui::app::{App, Focus};
use crate::tui::markdown::parse_markdown;

const USER_COLOR: Color = Color::Rgb(6, 95, 70);
const USER_BG: Color = Color::Rgb(209, 250, 229);
const AI_COLOR: Color = Color::Rgb(31, 41, 55);
const AI_BG: Color = Color::Rgb(229, 231, 235);
const ACCENT: Color = Color::Rgb(46, 90, 136);

/// Render the main UI
///
/// Also records how far the answer view can scroll at the current size.
pub fn render_ui(frame: &mut Frame, app: &mut App) {
    let quotes_height = if app.show_quotes {
        FINANCIAL_QUOTES.len() as u16 + 2
    } else {
        0
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Header
            Constraint::Length(quotes_height), // Quotes
            Constraint::Min(8),                // Main content
            Constraint::Length(3),             // Input
            Constraint::Length(1),             // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    if app.show_quotes {
        render_quotes(frame, chunks[1]);
    }

    let conversation_area = if app.show_sidebar {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(UI_SIDEBAR_PERCENT),
                Constraint::Percentage(100 - UI_SIDEBAR_PERCENT),
            ])
            .split(chunks[2]);
        render_sidebar(frame, content_chunks[0], app);
        content_chunks[1]
    } else {
        chunks[2]
    };

    render_conversation(frame, conversation_area, app);
    render_input(frame, chunks[3], app);
    render_status_bar(frame, chunks[4], app);
}

/// Render the header
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let header_text = vec![Line::from(vec![
        Span::styled("💰 ", Style::default().fg(Color::Yellow)),
        Span::styled(
            APP_TITLE,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(APP_SUBTITLE, Style::default().fg(Color::Gray)),
        Span::raw(" | Model: "),
        Span::styled(&app.model_name, Style::default().fg(Color::Green)),
    ])];

    let header = Paragraph::new(header_text)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(ACCENT)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(header, area);
}

/// Render the quotes band
fn render_quotes(frame: &mut Frame, area: Rect) {
    let lines: Vec<Line> = FINANCIAL_QUOTES
        .iter()
        .map(|(quote, author)| {
            Line::from(vec![
                Span::styled(
                    format!("\"{}\"", quote),
                    Style::default()
                        .fg(Color::Rgb(225, 245, 254))
                        .add_modifier(Modifier::ITALIC),
                ),
                Span::styled(format!(" – {}", author), Style::default().fg(Color::Gray)),
            ])
        })
        .collect();

    let quotes = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(quotes, area);
}

/// Render the chat history sidebar
fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::History;
    let border_color = if focused { Color::Yellow } else { Color::DarkGray };
    let block = Block::default()
        .title(format!(" 💬 Chat History [{}] ", app.session.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(block.inner(area));
    frame.render_widget(block, area);

    if app.session.is_empty() {
        let empty = Paragraph::new("No chat history yet.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner_rows[0]);
    } else {
        let items: Vec<ListItem> = app
            .session
            .history()
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let marker = if is_warning(&entry.answer) { "⚠️" } else { "📝" };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:>2}. ", i + 1), Style::default().fg(Color::DarkGray)),
                    Span::raw(format!("{} {}", marker, entry.question)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .bg(if focused { Color::Blue } else { Color::DarkGray })
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("");

        let mut state = ListState::default();
        state.select(Some(app.history_cursor));
        frame.render_stateful_widget(list, inner_rows[0], &mut state);
    }

    let hint = if focused {
        "Enter load • d delete • C clear all"
    } else {
        "Tab to browse"
    };
    frame.render_widget(
        Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
        inner_rows[1],
    );
}

/// Render the question/answer view
fn render_conversation(frame: &mut Frame, area: Rect, app: &mut App) {
    let mut lines = Vec::new();

    if app.show_help {
        lines.extend(help_lines());
    } else if let Some(entry) = app.session.display() {
        lines.push(Line::from(Span::styled(
            " You: ",
            Style::default()
                .fg(USER_COLOR)
                .bg(USER_BG)
                .add_modifier(Modifier::BOLD),
        )));
        for line in entry.question.lines() {
            lines.push(Line::from(Span::styled(
                line.to_string(),
                Style::default().fg(Color::Rgb(209, 250, 229)),
            )));
        }
        lines.push(Line::from(""));

        lines.push(Line::from(Span::styled(
            " AI: ",
            Style::default()
                .fg(AI_COLOR)
                .bg(AI_BG)
                .add_modifier(Modifier::BOLD),
        )));
        let answer_style = if is_warning(&entry.answer) {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        lines.extend(parse_markdown(&entry.answer, answer_style));
    } else {
        lines.push(Line::from(Span::styled(
            "Ask anything about budgeting, saving, investing or markets.",
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        )));
    }

    if app.is_generating {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "▋ Thinking...",
            Style::default().fg(Color::Green).add_modifier(Modifier::SLOW_BLINK),
        )));
    }

    let block = Block::default()
        .title(" Conversation ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));
    let inner = block.inner(area);

    // Wrapped height, so long single-line answers can be scrolled to their end
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    let rows = u16::try_from(paragraph.line_count(inner.width)).unwrap_or(u16::MAX);
    app.max_scroll = rows.saturating_sub(inner.height);
    app.scroll_offset = app.scroll_offset.min(app.max_scroll);

    let paragraph = paragraph.block(block).scroll((app.scroll_offset, 0));
    frame.render_widget(paragraph, area);
}

fn help_lines() -> Vec<Line<'static>> {
    let heading = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let key = |k: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(
                format!("  {:<16}", k),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(desc, Style::default().fg(Color::Gray)),
        ])
    };

    vec![
        Line::from(Span::styled("Keys", heading)),
        key("Enter", "Ask the question / run the command"),
        key("Tab", "Switch between input and history"),
        key("↑ ↓ / j k", "Move in history"),
        key("Enter (history)", "Load the highlighted chat"),
        key("d / Delete", "Delete the highlighted chat"),
        key("C", "Clear all chats"),
        key("PgUp / PgDn", "Scroll the answer"),
        key("Ctrl+C", "Quit"),
        Line::from(""),
        Line::from(Span::styled("Commands", heading)),
        key(":load N", "Load chat N"),
        key(":delete N", "Delete chat N"),
        key(":clear", "Clear all chats"),
        key(":sidebar / :sb", "Toggle history sidebar"),
        key(":quotes", "Toggle quotes"),
        key(":help / :h", "Toggle this help"),
        key(":quit / :q", "Quit"),
    ]
}

/// Render the input area
fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let is_command = app.input.starts_with(':');
    let focused = app.focus == Focus::Input;

    let (text, style) = if app.input.is_empty() {
        (INPUT_PLACEHOLDER.to_string(), Style::default().fg(Color::DarkGray))
    } else {
        (app.input.clone(), Style::default().fg(Color::White))
    };

    let title = if is_command {
        " Enter Command "
    } else {
        " Question (Enter to send • :help for commands) "
    };
    let border_color = match (focused, is_command) {
        (false, _) => Color::DarkGray,
        (true, true) => Color::Yellow,
        (true, false) => Color::Green,
    };

    let input = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(title),
    );
    frame.render_widget(input, area);

    if focused && !app.is_generating {
        let cursor_x = area.x + 1 + app.input.chars().count() as u16;
        let cursor_x = cursor_x.min(area.x + area.width.saturating_sub(2));
        frame.set_cursor_position((cursor_x, area.y + 1));
    }
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let (mode, mode_color) = match app.focus {
        Focus::Input => ("ASK", Color::Green),
        Focus::History => ("HISTORY", Color::Yellow),
    };

    let status_text = if app.is_generating {
        "Generating response...".to_string()
    } else if let Some(status) = &app.status_message {
        status.clone()
    } else {
        "Ready".to_string()
    };

    let spans = vec![
        Span::styled(
            format!(" {} ", mode),
            Style::default()
                .bg(mode_color)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::raw(status_text),
        Span::raw(" | "),
        Span::styled("Tab: switch pane", Style::default().fg(Color::DarkGray)),
        Span::raw(" | "),
        Span::styled("Ctrl+C: quit", Style::default().fg(Color::DarkGray)),
    ];

    let status_bar = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(Color::Black))
        .block(Block::default());

    frame.render_widget(status_bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Config;
    use crate::models::MockGenerator;
    use crate::session::ConversationController;
    use ratatui::{backend::TestBackend, Terminal};

    fn test_app() -> App {
        App::new(
            &Config::default(),
            ConversationController::new(Box::new(MockGenerator::new())),
        )
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_renders_history_and_display() {
        let mut app = test_app();
        app.session.append("What is a bond?", "A bond is debt.").unwrap();
        app.session.select(0);

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| render_ui(f, &mut app)).unwrap();
        let text = buffer_text(&terminal);

        assert!(text.contains("GenFin"));
        assert!(text.contains("What is a bond?"));
        assert!(text.contains("A bond is debt."));
        assert!(text.contains("Warren Buffett"));
    }

    #[test]
    fn test_renders_empty_history() {
        let mut app = test_app();

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| render_ui(f, &mut app)).unwrap();

        assert!(buffer_text(&terminal).contains("No chat history yet."));
    }

    #[test]
    fn test_long_answer_scrolls_to_its_last_word() {
        let mut app = test_app();
        let answer = format!("{}ENDMARKER", "Diversify across asset classes. ".repeat(56));
        app.session.append("How should I invest?", answer).unwrap();
        app.session.select(0);

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| render_ui(f, &mut app)).unwrap();
        assert!(!buffer_text(&terminal).contains("ENDMARKER"));
        assert!(app.max_scroll > 10);

        for _ in 0..100 {
            app.scroll_down(10);
        }
        assert_eq!(app.scroll_offset, app.max_scroll);

        terminal.draw(|f| render_ui(f, &mut app)).unwrap();
        assert!(buffer_text(&terminal).contains("ENDMARKER"));
    }

    #[test]
    fn test_short_answer_does_not_scroll() {
        let mut app = test_app();
        app.session.append("What is a bond?", "A bond is debt.").unwrap();
        app.session.select(0);
        app.scroll_offset = 50;

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| render_ui(f, &mut app)).unwrap();

        assert_eq!(app.max_scroll, 0);
        assert_eq!(app.scroll_offset, 0);
    }
}
