use crate::constants::{LOADING_TEXT, SPINNER_FRAMES, TOAST_DURATION_MS};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::{Duration, Instant};

#[derive(Debug)]
struct Toast {
    text: String,
    expires_at: Instant,
}

/// One-line status bar: spinner while a request is in flight, plus
/// short-lived toasts such as the clipboard acknowledgment.
#[derive(Debug, Default)]
pub struct StatusIndicator {
    thinking: bool,
    spinner_idx: usize,
    toast: Option<Toast>,
}

impl StatusIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_thinking(&mut self, thinking: bool) {
        self.thinking = thinking;
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking
    }

    pub fn show_toast(&mut self, text: impl Into<String>) {
        self.toast = Some(Toast {
            text: text.into(),
            expires_at: Instant::now() + Duration::from_millis(TOAST_DURATION_MS),
        });
    }

    pub fn toast(&self) -> Option<&str> {
        self.toast.as_ref().map(|t| t.text.as_str())
    }

    /// Advances the spinner and drops an expired toast.
    pub fn tick(&mut self, now: Instant) {
        if self.thinking {
            self.spinner_idx = self.spinner_idx.wrapping_add(1);
        }
        if self.toast.as_ref().is_some_and(|t| now >= t.expires_at) {
            self.toast = None;
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let spinner = if self.thinking {
            SPINNER_FRAMES[self.spinner_idx % SPINNER_FRAMES.len()]
        } else {
            " "
        };

        // A toast wins over the thinking text
        let (text, color) = match (&self.toast, self.thinking) {
            (Some(toast), _) => (toast.text.as_str(), Color::Yellow),
            (None, true) => (LOADING_TEXT, Color::DarkGray),
            (None, false) => ("", Color::DarkGray),
        };

        let status = Line::from(vec![
            Span::styled(spinner, Style::default().fg(Color::Gray)),
            Span::raw(" "),
            Span::styled(text, Style::default().fg(color).add_modifier(Modifier::ITALIC)),
        ]);

        frame.render_widget(Paragraph::new(status).alignment(Alignment::Left), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_expires() {
        let mut status = StatusIndicator::new();
        status.show_toast("Copied to clipboard!");
        assert_eq!(status.toast(), Some("Copied to clipboard!"));

        status.tick(Instant::now());
        assert!(status.toast().is_some());

        status.tick(Instant::now() + Duration::from_millis(TOAST_DURATION_MS + 1));
        assert!(status.toast().is_none());
    }

    #[test]
    fn test_spinner_only_moves_while_thinking() {
        let mut status = StatusIndicator::new();
        status.tick(Instant::now());
        assert_eq!(status.spinner_idx, 0);

        status.set_thinking(true);
        status.tick(Instant::now());
        status.tick(Instant::now());
        assert_eq!(status.spinner_idx, 2);
        assert!(status.is_thinking());
    }
}
