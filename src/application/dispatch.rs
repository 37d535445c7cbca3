//! Message queue into the page loop
//!
//! Worker contexts (permission probes, the stdin reader, signal handlers)
//! never touch the controller. They post a [`PageEvent`] and the page loop,
//! which owns the controller, handles it.

use tokio::sync::mpsc;

/// Events consumed by the page loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// A line typed by the user
    Input(String),
    /// Answer to a pending microphone permission request
    PermissionResolved { granted: bool },
    /// Stop recording and leave the page
    Shutdown,
}

/// Cloneable sender half of the page queue
#[derive(Debug, Clone)]
pub struct PageDispatcher {
    tx: mpsc::UnboundedSender<PageEvent>,
}

impl PageDispatcher {
    /// Create the dispatcher and the receiver the page loop drains
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<PageEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Post an event. Returns false once the page loop is gone.
    pub fn post(&self, event: PageEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}
