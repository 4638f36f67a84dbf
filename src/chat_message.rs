use crate::constants::USER_LABEL;
use crate::formatter::{format, Segment, SegmentKind};
use crate::models::Message;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Display adapter turning one [`Message`] into styled terminal lines.
#[derive(Debug, Clone, Copy)]
pub struct ChatMessage<'a> {
    message: &'a Message,
    bot_name: &'a str,
    selected: bool,
}

impl<'a> ChatMessage<'a> {
    pub fn new(message: &'a Message, bot_name: &'a str) -> Self {
        Self {
            message,
            bot_name,
            selected: false,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn render(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let base_style = self.get_base_style();

        self.render_header(&mut lines, base_style);
        self.render_content(&mut lines, base_style);
        self.render_footer(&mut lines, base_style);

        lines
    }

    fn get_base_style(&self) -> Style {
        if self.message.is_from_user() {
            Style::default().fg(Color::Rgb(255, 223, 128))
        } else {
            Style::default().fg(Color::Rgb(144, 238, 144))
        }
    }

    fn gutter(&self, style: Style) -> Span<'static> {
        if self.selected {
            Span::styled("┃ ", style.add_modifier(Modifier::BOLD))
        } else {
            Span::styled("│ ", style)
        }
    }

    fn render_header(&self, lines: &mut Vec<Line<'static>>, style: Style) {
        let (avatar, label) = if self.message.is_from_user() {
            ("●", USER_LABEL.to_string())
        } else {
            ("◆", self.bot_name.to_string())
        };
        let timestamp = self.message.timestamp.format("%H:%M").to_string();

        lines.push(Line::from(vec![
            Span::styled("┌─", style),
            Span::styled(format!("{} ", avatar), style),
            Span::styled(label, style.add_modifier(Modifier::BOLD)),
            Span::styled(" ", style),
            Span::styled(timestamp, style.add_modifier(Modifier::DIM)),
        ]));
    }

    fn render_content(&self, lines: &mut Vec<Line<'static>>, style: Style) {
        let text_style = Style::default().fg(Color::White);
        let mut current: Vec<Span<'static>> = vec![self.gutter(style)];

        for segment in format(&self.message.text) {
            if segment.kind == SegmentKind::CodeBlock {
                if current.len() > 1 {
                    lines.push(Line::from(std::mem::replace(
                        &mut current,
                        vec![self.gutter(style)],
                    )));
                }
                self.render_code_block(lines, &segment.content, style);
                continue;
            }

            let span_style = segment_style(&segment, text_style);
            let mut pieces = segment.content.split('\n').peekable();
            while let Some(piece) = pieces.next() {
                if !piece.is_empty() {
                    current.push(Span::styled(piece.to_string(), span_style));
                }
                if pieces.peek().is_some() {
                    lines.push(Line::from(std::mem::replace(
                        &mut current,
                        vec![self.gutter(style)],
                    )));
                }
            }
        }

        if current.len() > 1 || self.message.text.is_empty() {
            lines.push(Line::from(current));
        }
    }

    fn render_code_block(&self, lines: &mut Vec<Line<'static>>, code: &str, style: Style) {
        let code_style = Style::default()
            .fg(Color::Rgb(209, 154, 102))
            .bg(Color::Rgb(40, 40, 40));
        let label_style = Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC);

        let code = code.strip_suffix('\n').unwrap_or(code);
        let mut code_lines = code.split('\n').peekable();

        // A leading bare word after the opening fence is a language tag
        if let Some(first) = code_lines.peek() {
            let is_tag = !first.is_empty() && !first.contains(char::is_whitespace);
            if is_tag && code.contains('\n') {
                lines.push(Line::from(vec![
                    self.gutter(style),
                    Span::styled(first.to_string(), label_style),
                ]));
                code_lines.next();
            }
        }

        for code_line in code_lines {
            lines.push(Line::from(vec![
                self.gutter(style),
                Span::styled("▎", Style::default().fg(Color::DarkGray)),
                Span::styled(format!(" {}", code_line), code_style),
            ]));
        }
    }

    fn render_footer(&self, lines: &mut Vec<Line<'static>>, style: Style) {
        lines.push(Line::from(Span::styled("╰─", style)));
    }
}

fn segment_style(segment: &Segment, text_style: Style) -> Style {
    match segment.kind {
        SegmentKind::Plain | SegmentKind::CodeBlock => text_style,
        SegmentKind::InlineCode => Style::default()
            .fg(Color::White)
            .bg(Color::Rgb(60, 60, 60))
            .add_modifier(Modifier::BOLD),
        SegmentKind::Link => Style::default()
            .fg(Color::LightBlue)
            .add_modifier(Modifier::UNDERLINED),
        SegmentKind::Emphasis => Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sender;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn content_lines(message: &Message) -> Vec<String> {
        let lines = ChatMessage::new(message, "chatGPT").render();
        // Drop header and footer
        lines[1..lines.len() - 1].iter().map(line_text).collect()
    }

    #[test]
    fn test_header_labels() {
        let user = Message::new(Sender::User, "hi");
        let bot = Message::new(Sender::Bot, "hello");

        let user_header = line_text(&ChatMessage::new(&user, "chatGPT").render()[0]);
        let bot_header = line_text(&ChatMessage::new(&bot, "chatGPT").render()[0]);
        assert!(user_header.contains(USER_LABEL));
        assert!(bot_header.contains("chatGPT"));
    }

    #[test]
    fn test_markup_delimiters_are_hidden() {
        let message = Message::new(Sender::Bot, "use `ls` and **stop**");
        assert_eq!(content_lines(&message), vec!["│ use ls and stop"]);
    }

    #[test]
    fn test_newlines_split_lines() {
        let message = Message::new(Sender::Bot, "one\ntwo\n\nthree");
        assert_eq!(
            content_lines(&message),
            vec!["│ one", "│ two", "│ ", "│ three"]
        );
    }

    #[test]
    fn test_code_block_with_language_tag() {
        let message = Message::new(Sender::Bot, "See:\n```rust\nlet x = 1;\n```");
        assert_eq!(
            content_lines(&message),
            vec!["│ See:", "│ rust", "│ ▎ let x = 1;"]
        );
    }

    #[test]
    fn test_link_is_underlined() {
        let message = Message::new(Sender::Bot, "https://example.com");
        let lines = ChatMessage::new(&message, "chatGPT").render();
        let link = &lines[1].spans[1];
        assert_eq!(link.content, "https://example.com");
        assert!(link.style.add_modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_empty_message_still_has_body_line() {
        let message = Message::new(Sender::Bot, "");
        assert_eq!(content_lines(&message), vec!["│ "]);
    }

    #[test]
    fn test_selected_gutter() {
        let message = Message::new(Sender::User, "pick me");
        let lines = ChatMessage::new(&message, "chatGPT").selected(true).render();
        assert_eq!(line_text(&lines[1]), "┃ pick me");
    }
}
