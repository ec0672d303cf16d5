use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Parse a markdown answer into styled ratatui lines
pub fn parse_markdown(input: &str, base: Style) -> Vec<Line<'static>> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let mut renderer = MarkdownRenderer::new(base);
    for event in Parser::new_ext(input, options) {
        renderer.handle(event);
    }
    renderer.finish()
}

struct MarkdownRenderer {
    base: Style,
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    styles: Vec<Style>,
    code_block: Option<String>,
    // one slot per open list: Some(next number) for ordered lists
    lists: Vec<Option<u64>>,
}

impl MarkdownRenderer {
    fn new(base: Style) -> Self {
        Self {
            base,
            lines: Vec::new(),
            spans: Vec::new(),
            styles: vec![base],
            code_block: None,
            lists: Vec::new(),
        }
    }

    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or(self.base)
    }

    fn flush(&mut self) {
        if !self.spans.is_empty() {
            self.lines.push(Line::from(std::mem::take(&mut self.spans)));
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => {
                let style = self.start(tag);
                self.styles.push(style);
            }
            Event::End(tag) => {
                self.styles.pop();
                self.end(tag);
            }
            Event::Text(text) => match self.code_block.as_mut() {
                Some(buffer) => buffer.push_str(&text),
                None => {
                    let style = self.style();
                    self.spans.push(Span::styled(text.to_string(), style));
                }
            },
            Event::Code(code) => {
                self.spans.push(Span::styled(
                    format!(" {} ", code),
                    Style::default().fg(Color::Yellow).bg(Color::Rgb(40, 40, 40)),
                ));
            }
            Event::SoftBreak | Event::HardBreak => self.flush(),
            Event::Rule => {
                self.flush();
                self.lines.push(Line::from(Span::styled(
                    "────────",
                    Style::default().fg(Color::DarkGray),
                )));
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) -> Style {
        let current = self.style();
        match tag {
            Tag::Heading { level, .. } => {
                self.flush();
                let color = match level {
                    HeadingLevel::H1 => Color::Cyan,
                    HeadingLevel::H2 => Color::Blue,
                    HeadingLevel::H3 => Color::Green,
                    _ => Color::Yellow,
                };
                Style::default().fg(color).add_modifier(Modifier::BOLD)
            }
            Tag::Emphasis => current.add_modifier(Modifier::ITALIC),
            Tag::Strong => current.add_modifier(Modifier::BOLD),
            Tag::Strikethrough => current.add_modifier(Modifier::CROSSED_OUT),
            Tag::CodeBlock(kind) => {
                self.flush();
                let lang = match kind {
                    CodeBlockKind::Fenced(lang) => lang.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                self.lines.push(Line::from(vec![
                    Span::styled("```", Style::default().fg(Color::DarkGray)),
                    Span::styled(lang, Style::default().fg(Color::Magenta)),
                ]));
                self.code_block = Some(String::new());
                Style::default().fg(Color::Gray)
            }
            Tag::List(first) => {
                self.flush();
                self.lists.push(first);
                current
            }
            Tag::Item => {
                let depth = self.lists.len().saturating_sub(1);
                self.spans.push(Span::raw("  ".repeat(depth)));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{}. ", n);
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.spans
                    .push(Span::styled(marker, Style::default().fg(Color::Yellow)));
                current
            }
            Tag::BlockQuote(_) => {
                self.flush();
                self.spans
                    .push(Span::styled("│ ", Style::default().fg(Color::DarkGray)));
                current.add_modifier(Modifier::ITALIC)
            }
            Tag::TableCell => {
                self.spans
                    .push(Span::styled("│ ", Style::default().fg(Color::DarkGray)));
                current
            }
            _ => current,
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_)
            | TagEnd::Paragraph
            | TagEnd::Item
            | TagEnd::BlockQuote(_)
            | TagEnd::TableHead
            | TagEnd::TableRow => self.flush(),
            TagEnd::TableCell => self.spans.push(Span::raw(" ")),
            TagEnd::CodeBlock => {
                if let Some(code) = self.code_block.take() {
                    for line in code.lines() {
                        self.lines.push(Line::from(Span::styled(
                            line.to_string(),
                            Style::default().fg(Color::Gray),
                        )));
                    }
                }
                self.lines.push(Line::from(Span::styled(
                    "```",
                    Style::default().fg(Color::DarkGray),
                )));
            }
            TagEnd::List(_) => {
                self.lists.pop();
            }
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush();
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plain(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_paragraphs_and_bold() {
        let lines = parse_markdown("A **bond** is debt.\nIt pays coupons.", Style::default());

        assert_eq!(plain(&lines), vec!["A bond is debt.", "It pays coupons."]);
        assert!(lines[0].spans[1].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_ordered_and_bulleted_lists() {
        let lines = parse_markdown("1. Save\n2. Invest\n\n- Stocks\n- Bonds", Style::default());

        assert_eq!(
            plain(&lines),
            vec!["1. Save", "2. Invest", "• Stocks", "• Bonds"]
        );
    }

    #[test]
    fn test_code_block() {
        let lines = parse_markdown("```text\nrate = 5%\n```", Style::default());
        assert_eq!(plain(&lines), vec!["```text", "rate = 5%", "```"]);
    }
}
