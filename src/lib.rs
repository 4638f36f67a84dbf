// src/lib.rs

pub mod api;
pub mod app;
pub mod chat;
pub mod chat_message;
pub mod chat_view;
pub mod clipboard;
pub mod config;
pub mod constants;
pub mod errors;
pub mod formatter;
pub mod key_handlers;
pub mod logging;
pub mod message_store;
pub mod models;
pub mod status_indicator;
pub mod typing;
pub mod ui;

pub use api::{GeminiClient, Generate};
pub use chat::ChatSession;
pub use errors::{ChatError, ChatResult, ServiceError};
pub use formatter::{format, Segment, SegmentKind};
pub use message_store::MessageStore;
pub use models::{Message, MessageRef, Sender};
pub use typing::{TypingEffect, TypingHandle};
