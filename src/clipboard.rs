use crate::errors::{ChatError, ChatResult};
use crate::models::Message;
use copypasta::{ClipboardContext, ClipboardProvider};
use log::debug;

/// Destination for copied message text.
pub trait ClipboardSink {
    fn set_text(&mut self, text: String) -> ChatResult<()>;
}

/// The system clipboard.
pub struct SystemClipboard {
    ctx: ClipboardContext,
}

impl SystemClipboard {
    pub fn new() -> ChatResult<Self> {
        let ctx = ClipboardContext::new()
            .map_err(|e| ChatError::clipboard_error(format!("Clipboard unavailable: {}", e)))?;
        Ok(Self { ctx })
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: String) -> ChatResult<()> {
        self.ctx
            .set_contents(text)
            .map_err(|e| ChatError::clipboard_error(format!("Failed to copy: {}", e)))
    }
}

/// Copies the raw, unformatted text of a message.
pub fn copy_message(sink: &mut dyn ClipboardSink, message: &Message) -> ChatResult<()> {
    debug!("copying {} chars to clipboard", message.text.chars().count());
    sink.set_text(message.text.clone())
}
