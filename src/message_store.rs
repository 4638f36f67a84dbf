use crate::errors::{ChatError, ChatResult};
use crate::models::{Message, MessageRef, Sender};
use tokio::sync::watch;

/// Append-only, chronologically ordered list of chat messages.
///
/// Every mutation bumps a revision number that observers can wait on via
/// [`MessageStore::subscribe`].
#[derive(Debug)]
pub struct MessageStore {
    messages: Vec<Message>,
    revision: watch::Sender<u64>,
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageStore {
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            messages: Vec::new(),
            revision,
        }
    }

    pub fn append_message(&mut self, sender: Sender, text: impl Into<String>) -> MessageRef {
        self.messages.push(Message::new(sender, text));
        self.notify();
        MessageRef(self.messages.len() - 1)
    }

    /// Concatenates `delta` onto the most recently appended message.
    pub fn append_to_last(&mut self, delta: &str) -> ChatResult<()> {
        let last = self.messages.last_mut().ok_or(ChatError::EmptyStore)?;
        last.text.push_str(delta);
        self.notify();
        Ok(())
    }

    pub fn get(&self, message: MessageRef) -> Option<&Message> {
        self.messages.get(message.0)
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn last_ref(&self) -> Option<MessageRef> {
        self.messages.len().checked_sub(1).map(MessageRef)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Receiver that wakes once per mutation (coalesced if the observer lags).
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn notify(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut store = MessageStore::new();
        let first = store.append_message(Sender::User, "hello");
        let second = store.append_message(Sender::Bot, "");

        assert_eq!(first.index(), 0);
        assert_eq!(second.index(), 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(first).unwrap().text, "hello");
        assert_eq!(store.last().unwrap().sender, Sender::Bot);
        assert_eq!(store.last_ref(), Some(second));
    }

    #[test]
    fn test_append_to_last_concatenates() {
        let mut store = MessageStore::new();
        store.append_message(Sender::User, "question");
        store.append_message(Sender::Bot, "");
        store.append_to_last("ab").unwrap();
        store.append_to_last("c").unwrap();

        assert_eq!(store.messages()[0].text, "question");
        assert_eq!(store.last().unwrap().text, "abc");
    }

    #[test]
    fn test_append_to_last_on_empty_store_fails() {
        let mut store = MessageStore::new();
        assert!(matches!(
            store.append_to_last("x"),
            Err(ChatError::EmptyStore)
        ));
        assert!(store.is_empty());
        assert_eq!(store.revision(), 0);
    }

    #[tokio::test]
    async fn test_mutations_notify_observers() {
        let mut store = MessageStore::new();
        let mut rx = store.subscribe();

        store.append_message(Sender::User, "hi");
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 1);

        store.append_to_last("!").unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 2);
        assert_eq!(store.revision(), 2);
    }
}
