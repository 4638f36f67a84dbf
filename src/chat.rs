use crate::api::Generate;
use crate::errors::{ChatError, ChatResult};
use crate::message_store::MessageStore;
use crate::models::{MessageRef, Sender};
use crate::typing::{TypingEffect, TypingHandle};
use log::{info, warn};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use std::time::Duration;
use tokio::sync::{watch, Mutex};

/// Sequences one user submission: validate, append, call the generator,
/// type the reply. Shared by the UI loop and the tasks it spawns.
pub struct ChatSession {
    store: Arc<Mutex<MessageStore>>,
    generator: Arc<dyn Generate>,
    typing_interval: Duration,
    loading: watch::Sender<bool>,
    typing: Mutex<Option<TypingHandle>>,
    epoch: AtomicU64,
}

impl ChatSession {
    pub fn new(generator: Arc<dyn Generate>, typing_interval: Duration) -> Self {
        let (loading, _) = watch::channel(false);
        Self {
            store: Arc::new(Mutex::new(MessageStore::new())),
            generator,
            typing_interval,
            loading,
            typing: Mutex::new(None),
            epoch: AtomicU64::new(0),
        }
    }

    pub fn store(&self) -> Arc<Mutex<MessageStore>> {
        Arc::clone(&self.store)
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    /// Sends `input` to the generator and types out the reply.
    ///
    /// Returns the bot message being typed. Empty input is rejected without
    /// touching the store. A reply that arrives after a newer submission has
    /// started is dropped with [`ChatError::Superseded`].
    pub async fn submit(&self, input: &str) -> ChatResult<MessageRef> {
        let prompt = input.trim();
        if prompt.is_empty() {
            return Err(ChatError::EmptyInput);
        }

        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        self.cancel_typing().await;

        self.store.lock().await.append_message(Sender::User, prompt);
        self.loading.send_replace(true);
        info!("request #{} sent ({} chars)", epoch, prompt.chars().count());

        let outcome = self.generator.generate(prompt).await;

        let mut typing = self.typing.lock().await;
        if self.epoch.load(Ordering::SeqCst) != epoch {
            info!("request #{} superseded; dropping its reply", epoch);
            return Err(ChatError::Superseded);
        }
        self.loading.send_replace(false);

        let reply = match outcome {
            Ok(reply) => reply,
            Err(e) => {
                warn!("request #{} failed: {}", epoch, e);
                return Err(e.into());
            }
        };

        let handle =
            TypingEffect::start(Arc::clone(&self.store), reply, self.typing_interval).await;
        let target = handle.target();
        *typing = Some(handle);
        Ok(target)
    }

    /// Stops the active typing sequence, if any. The partially typed message
    /// stays in the store.
    pub async fn cancel_typing(&self) {
        if let Some(handle) = self.typing.lock().await.take() {
            handle.cancel().await;
        }
    }

    pub async fn typing_active(&self) -> bool {
        self.typing
            .lock()
            .await
            .as_ref()
            .is_some_and(TypingHandle::is_active)
    }

    /// Waits for the current typing sequence to end. Returns `true` if it
    /// revealed the whole reply.
    pub async fn wait_for_typing(&self) -> bool {
        let handle = self.typing.lock().await.clone();
        match handle {
            Some(handle) => handle.wait().await,
            None => false,
        }
    }
}
