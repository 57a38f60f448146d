//! Bounded FIFO of crawl tasks shared by every worker.
//!
//! Workers are both consumers and producers of the frontier, so a worker must
//! never block on a full queue. Tasks discovered mid-crawl are `submit`ted to
//! an unbounded staging channel instead, and a single [`Stager`] moves them
//! into the bounded queue as capacity frees up.

use crate::task::Task;
use tokio::sync::{Mutex, mpsc};
use tracing::debug;

/// Default bound on queued tasks.
pub const DEFAULT_CAPACITY: usize = 10_000;

pub struct Frontier {
    sender: mpsc::Sender<Task>,
    receiver: Mutex<mpsc::Receiver<Task>>,
    staging: mpsc::UnboundedSender<Task>,
    capacity: usize,
}

/// Drains the staging channel into the bounded queue.
pub struct Stager {
    staging: mpsc::UnboundedReceiver<Task>,
    sender: mpsc::Sender<Task>,
}

impl Frontier {
    /// Creates a frontier holding at most `capacity` tasks (minimum 1), with
    /// the stager that feeds it. The stager must be spawned for submitted
    /// tasks to ever reach a worker.
    pub fn new(capacity: usize) -> (Self, Stager) {
        let capacity = capacity.max(1);
        let (sender, receiver) = mpsc::channel(capacity);
        let (staging_tx, staging_rx) = mpsc::unbounded_channel();

        let frontier = Self {
            sender: sender.clone(),
            receiver: Mutex::new(receiver),
            staging: staging_tx,
            capacity,
        };
        let stager = Stager {
            staging: staging_rx,
            sender,
        };
        (frontier, stager)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Inserts without waiting; hands the task back when the queue is full.
    pub fn try_enqueue(&self, task: Task) -> Result<(), Task> {
        self.sender.try_send(task).map_err(|e| match e {
            mpsc::error::TrySendError::Full(task) | mpsc::error::TrySendError::Closed(task) => task,
        })
    }

    /// Inserts, waiting for free capacity.
    pub async fn enqueue(&self, task: Task) {
        if let Err(e) = self.sender.send(task).await {
            debug!("Frontier closed, dropping {}", e.0.url);
        }
    }

    /// Hands the task to the stager. Never blocks the caller.
    pub fn submit(&self, task: Task) {
        if let Err(e) = self.staging.send(task) {
            debug!("Stager gone, dropping {}", e.0.url);
        }
    }

    /// Waits for the next task. Workers queue up fairly on the receiver lock.
    pub async fn dequeue(&self) -> Option<Task> {
        let mut receiver = self.receiver.lock().await;
        receiver.recv().await
    }

    /// Number of tasks currently sitting in the bounded queue.
    pub fn len(&self) -> usize {
        self.capacity - self.sender.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Stager {
    pub async fn run(mut self) {
        while let Some(task) = self.staging.recv().await {
            if self.sender.send(task).await.is_err() {
                break;
            }
        }
        debug!("Stager finished");
    }
}
