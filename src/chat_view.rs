use crate::app::{App, AppState};
use crate::chat_message::ChatMessage;
use crate::models::Message;
use crate::ui::{
    footer::draw_footer, header::draw_header, loading_modal::draw_loading_modal,
    quit_confirm::draw_quit_confirm,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Draws the whole chat screen for one frame.
pub fn draw_chat(f: &mut Frame, app: &App, messages: &[Message], loading: bool) {
    let size = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(size);

    draw_header(f, chunks[0], &app.bot_name, &app.model);
    draw_messages(f, app, messages, chunks[1]);
    app.status_indicator.render(f, chunks[2]);
    draw_input(f, app, chunks[3]);
    draw_footer(f, chunks[4], app);

    if loading {
        draw_loading_modal(f, size);
    }
    if app.state == AppState::QuitConfirm {
        draw_quit_confirm(f, size);
    }
}

fn draw_messages(f: &mut Frame, app: &App, messages: &[Message], area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    for (idx, message) in messages.iter().enumerate() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        let view = ChatMessage::new(message, &app.bot_name).selected(app.selected == Some(idx));
        lines.extend(view.render());
    }

    let scroll = scroll_offset(&lines, area, app.scroll_back);
    let msgs_para = Paragraph::new(lines)
        .block(Block::default())
        .wrap(Wrap { trim: false });
    f.render_widget(msgs_para.scroll((scroll, 0)), area);
}

/// Estimated rows a line takes once wrapped to `width` columns.
fn wrapped_rows(line: &Line, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let line_width: usize = line.spans.iter().map(|s| s.content.width()).sum();
    line_width.div_ceil(width).max(1).try_into().unwrap_or(u16::MAX)
}

/// Top row to show so the newest message sits at the bottom, minus however
/// far the user scrolled back.
fn scroll_offset(lines: &[Line], area: Rect, scroll_back: u16) -> u16 {
    let total_rows = lines
        .iter()
        .fold(0u16, |acc, line| acc.saturating_add(wrapped_rows(line, area.width)));
    let max_scroll = total_rows.saturating_sub(area.height);
    max_scroll.saturating_sub(scroll_back)
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let separator = "─".repeat(area.width as usize);
    let separator_style = Style::default().fg(Color::DarkGray);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(separator.clone(), separator_style))),
        Rect { height: 1, ..area },
    );

    let (prefix, text, text_style) = if app.input.is_empty() {
        ("→ ", "Message", Style::default().fg(Color::DarkGray))
    } else {
        ("→ ", app.input.as_str(), Style::default().fg(Color::White))
    };

    let visible_width = area.width.saturating_sub(2);
    let text_width = u16::try_from(app.input.width()).unwrap_or(u16::MAX);
    let scroll_offset = text_width.saturating_sub(visible_width);

    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(prefix, Style::default().fg(Color::DarkGray)),
            Span::styled(text, text_style),
        ]))
        .scroll((0, scroll_offset)),
        Rect {
            y: area.y + 1,
            height: 1,
            ..area
        },
    );

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(separator, separator_style))),
        Rect {
            y: area.y + area.height.saturating_sub(1),
            height: 1,
            ..area
        },
    );

    if app.state == AppState::Chat {
        f.set_cursor_position((cursor_column(area, text_width), area.y + 1));
    }
}

/// Screen column just past the visible end of the input text.
fn cursor_column(area: Rect, text_width: u16) -> u16 {
    let visible = text_width.min(area.width.saturating_sub(2));
    area.x.saturating_add(2).saturating_add(visible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Generate;
    use crate::chat::ChatSession;
    use crate::constants::LOADING_TEXT;
    use crate::errors::ServiceError;
    use crate::models::Sender;
    use async_trait::async_trait;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::mpsc;

    struct Never;

    #[async_trait]
    impl Generate for Never {
        async fn generate(&self, _prompt: &str) -> Result<String, ServiceError> {
            Err(ServiceError::MissingContent)
        }
    }

    fn test_app() -> App {
        let session = Arc::new(ChatSession::new(Arc::new(Never), Duration::from_millis(1)));
        let (tx, _rx) = mpsc::unbounded_channel();
        App::new(session, "chatGPT", "gemini-1.5-flash", tx)
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_scroll_follows_newest() {
        let lines: Vec<Line> = (0..30).map(|i| Line::from(format!("line {}", i))).collect();
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(scroll_offset(&lines, area, 0), 20);
        assert_eq!(scroll_offset(&lines, area, 5), 15);
        assert_eq!(scroll_offset(&lines, area, 100), 0);
    }

    #[test]
    fn test_cursor_column_clamps_long_input() {
        let area = Rect::new(3, 0, 40, 3);
        assert_eq!(cursor_column(area, 5), 10);
        assert_eq!(cursor_column(area, 38), 43);
        assert_eq!(cursor_column(area, u16::MAX), 43);
    }

    #[test]
    fn test_wrapped_rows() {
        let line = Line::from("x".repeat(25));
        assert_eq!(wrapped_rows(&line, 10), 3);
        assert_eq!(wrapped_rows(&Line::from(""), 10), 1);
    }

    #[test]
    fn test_draws_messages_and_loading_modal() {
        let app = test_app();
        let messages = vec![
            Message::new(Sender::User, "what is **rust**?"),
            Message::new(Sender::Bot, "A language."),
        ];
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();

        terminal
            .draw(|f| draw_chat(f, &app, &messages, false))
            .unwrap();
        let screen = screen_text(&terminal);
        assert!(screen.contains("what is rust?"));
        assert!(screen.contains("A language."));
        assert!(!screen.contains(LOADING_TEXT));

        terminal
            .draw(|f| draw_chat(f, &app, &messages, true))
            .unwrap();
        assert!(screen_text(&terminal).contains(LOADING_TEXT));
    }
}
