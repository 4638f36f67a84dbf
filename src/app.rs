use crate::chat::ChatSession;
use crate::clipboard::ClipboardSink;
use crate::status_indicator::StatusIndicator;
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Chat,
    QuitConfirm,
    Quit,
}

pub struct App {
    pub state: AppState,
    pub session: Arc<ChatSession>,
    pub input: String,
    /// Rows scrolled up from the newest message; 0 follows the conversation.
    pub scroll_back: u16,
    pub selected: Option<usize>,
    pub status_indicator: StatusIndicator,
    pub clipboard: Option<Box<dyn ClipboardSink>>,
    pub bot_name: String,
    pub model: String,
    /// Notices from background submissions (errors worth a toast).
    pub notices: mpsc::UnboundedSender<String>,
}

impl App {
    pub fn new(
        session: Arc<ChatSession>,
        bot_name: impl Into<String>,
        model: impl Into<String>,
        notices: mpsc::UnboundedSender<String>,
    ) -> App {
        App {
            state: AppState::Chat,
            session,
            input: String::new(),
            scroll_back: 0,
            selected: None,
            status_indicator: StatusIndicator::new(),
            clipboard: None,
            bot_name: bot_name.into(),
            model: model.into(),
            notices,
        }
    }

    pub fn with_clipboard(mut self, clipboard: Box<dyn ClipboardSink>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    pub fn scroll_up(&mut self) {
        self.scroll_back = self.scroll_back.saturating_add(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_back = self.scroll_back.saturating_sub(1);
    }

    /// Moves the selection one message up, starting from the newest.
    pub fn select_previous(&mut self, message_count: usize) {
        if message_count == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i > 0 => i.min(message_count - 1) - 1,
            Some(_) => 0,
            None => message_count - 1,
        });
    }

    /// Moves the selection one message down; past the newest clears it.
    pub fn select_next(&mut self, message_count: usize) {
        self.selected = match self.selected {
            Some(i) if i + 1 < message_count => Some(i + 1),
            _ => None,
        };
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input)
    }
}
