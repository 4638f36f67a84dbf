use crate::message_store::MessageStore;
use crate::models::{MessageRef, Sender};
use log::{debug, warn};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::AbortHandle;
use tokio::time::{interval, MissedTickBehavior};

/// Reveals a finished reply one character per tick, as if it were being
/// typed live.
pub struct TypingEffect;

impl TypingEffect {
    /// Appends an empty bot message and spawns the task that fills it in.
    pub async fn start(
        store: Arc<Mutex<MessageStore>>,
        full_text: String,
        tick: Duration,
    ) -> TypingHandle {
        let target = store.lock().await.append_message(Sender::Bot, String::new());
        let cancelled = Arc::new(AtomicBool::new(false));
        let (done_tx, done_rx) = watch::channel(false);

        debug!(
            "typing {} chars into message #{}",
            full_text.chars().count(),
            target.index()
        );

        let task = tokio::spawn(type_out(
            Arc::clone(&store),
            full_text,
            tick,
            target,
            Arc::clone(&cancelled),
            done_tx,
        ));

        TypingHandle {
            store,
            target,
            cancelled,
            done: done_rx,
            abort: task.abort_handle(),
        }
    }
}

async fn type_out(
    store: Arc<Mutex<MessageStore>>,
    full_text: String,
    tick: Duration,
    target: MessageRef,
    cancelled: Arc<AtomicBool>,
    done: watch::Sender<bool>,
) {
    let mut ticker = interval(tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick of an interval completes immediately.
    ticker.tick().await;

    let mut buf = [0u8; 4];
    for ch in full_text.chars() {
        ticker.tick().await;

        let mut store = store.lock().await;
        // Checked under the lock, which cancel() also takes: once it returns,
        // no tick can append.
        if cancelled.load(Ordering::SeqCst) {
            return;
        }
        if store.last_ref() != Some(target) {
            warn!(
                "typing target #{} is no longer the last message; stopping",
                target.index()
            );
            return;
        }
        if let Err(e) = store.append_to_last(ch.encode_utf8(&mut buf)) {
            warn!("typing effect stopped: {}", e);
            return;
        }
    }

    let _ = done.send(true);
}

/// Handle to one running typing sequence.
#[derive(Debug, Clone)]
pub struct TypingHandle {
    store: Arc<Mutex<MessageStore>>,
    target: MessageRef,
    cancelled: Arc<AtomicBool>,
    done: watch::Receiver<bool>,
    abort: AbortHandle,
}

impl TypingHandle {
    /// The bot message this sequence writes into.
    pub fn target(&self) -> MessageRef {
        self.target
    }

    /// Stops the sequence. The text typed so far stays in the store.
    pub async fn cancel(&self) {
        let _store = self.store.lock().await;
        if !self.cancelled.swap(true, Ordering::SeqCst) && !self.is_complete() {
            debug!("typing into message #{} cancelled", self.target.index());
        }
        self.abort.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn is_complete(&self) -> bool {
        *self.done.borrow()
    }

    pub fn is_active(&self) -> bool {
        !self.is_cancelled() && !self.is_complete() && !self.abort.is_finished()
    }

    /// Waits until the sequence ends. Returns `true` if the whole reply was
    /// revealed, `false` if it was cancelled or stopped early.
    pub async fn wait(&self) -> bool {
        let mut done = self.done.clone();
        let finished = done.wait_for(|finished| *finished).await.is_ok();
        finished
    }
}
