//! Cross-thread action queue.
//!
//! Other threads never touch the control tree. They post closures here and
//! the loop runs them on its own thread at the start of the next iteration.

use tokio::sync::mpsc;

use crate::app::AppContext;

/// Deferred work run against the application context.
pub type Action = Box<dyn FnOnce(&mut AppContext) + Send>;

/// Sending half of the action queue.
///
/// Clone-able, can be sent to other threads.
#[derive(Clone)]
pub struct ActionSender {
    tx: mpsc::UnboundedSender<Action>,
}

impl ActionSender {
    /// Queue `action` for the loop thread.
    ///
    /// Returns false when the application is gone.
    pub fn post(&self, action: impl FnOnce(&mut AppContext) + Send + 'static) -> bool {
        self.tx.send(Box::new(action)).is_ok()
    }
}

impl std::fmt::Debug for ActionSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionSender").finish_non_exhaustive()
    }
}

/// Receiving half, owned by the application context.
pub(crate) struct ActionQueue {
    rx: mpsc::UnboundedReceiver<Action>,
}

impl ActionQueue {
    /// Next queued action, without waiting.
    pub(crate) fn try_next(&mut self) -> Option<Action> {
        self.rx.try_recv().ok()
    }
}

pub(crate) fn channel() -> (ActionSender, ActionQueue) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ActionSender { tx }, ActionQueue { rx })
}
