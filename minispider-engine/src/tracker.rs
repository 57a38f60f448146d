use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;
use tracing::error;

/// Counts outstanding tasks; `wait` returns once the count drops to zero.
///
/// Every task is added before it becomes visible to a worker and marked done
/// only after its children were added, so the count reaches zero exactly
/// when no work is left.
#[derive(Debug, Default)]
pub struct CompletionTracker {
    outstanding: AtomicUsize,
    drained: Notify,
}

impl CompletionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, n: usize) {
        self.outstanding.fetch_add(n, Ordering::AcqRel);
    }

    pub fn done(&self) {
        let previous = self
            .outstanding
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1));

        match previous {
            Ok(1) => self.drained.notify_waiters(),
            Ok(_) => {}
            Err(_) => error!("CompletionTracker::done() called with no outstanding tasks"),
        }
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Acquire)
    }

    pub async fn wait(&self) {
        loop {
            let drained = self.drained.notified();
            tokio::pin!(drained);
            // Register before checking so a notify between the check and the
            // await is not lost.
            drained.as_mut().enable();

            if self.outstanding() == 0 {
                return;
            }
            drained.await;
        }
    }
}
