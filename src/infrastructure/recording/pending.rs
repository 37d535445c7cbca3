//! Tracks recordings that are stopped but still being written

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

#[derive(Default)]
struct Inner {
    count: AtomicUsize,
    idle: Notify,
}

/// Counter of in-flight finalizations shared by a factory and its recorders
#[derive(Clone, Default)]
pub struct PendingWrites {
    inner: Arc<Inner>,
}

impl PendingWrites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a finalization as started; it ends when the guard is dropped
    pub fn begin(&self) -> PendingGuard {
        self.inner.count.fetch_add(1, Ordering::SeqCst);
        PendingGuard {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn in_flight(&self) -> usize {
        self.inner.count.load(Ordering::SeqCst)
    }

    /// Wait until no finalization is in flight
    pub async fn wait_idle(&self) {
        loop {
            // Registered before the check so a drop in between is not missed
            let notified = self.inner.idle.notified();
            if self.in_flight() == 0 {
                return;
            }
            notified.await;
        }
    }
}

/// Held by a finalization task for as long as it writes
pub struct PendingGuard {
    inner: Arc<Inner>,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        if self.inner.count.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.inner.idle.notify_waiters();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn idle_when_nothing_pending() {
        let pending = PendingWrites::new();
        pending.wait_idle().await;
        assert_eq!(pending.in_flight(), 0);
    }

    #[tokio::test]
    async fn waits_for_guards_dropped_on_other_threads() {
        let pending = PendingWrites::new();
        let first = pending.begin();
        let second = pending.begin();
        assert_eq!(pending.in_flight(), 2);

        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            drop(first);
            std::thread::sleep(Duration::from_millis(20));
            drop(second);
        });

        tokio::time::timeout(Duration::from_secs(5), pending.wait_idle())
            .await
            .expect("pending writes never drained");
        assert_eq!(pending.in_flight(), 0);
    }
}
