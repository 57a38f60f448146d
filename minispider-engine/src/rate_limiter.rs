//! Per-host politeness.
//!
//! Each host gets a single-slot token bucket, created on first use. A refill
//! task owned by the bucket hands out one token, waits for it to be taken,
//! sleeps `interval`, and repeats, so two fetch starts against the same host
//! are always at least `interval` apart no matter how many workers ask.
//! Hosts never wait on each other.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, mpsc};
use tracing::debug;

pub struct HostRateLimiter {
    interval: Duration,
    buckets: DashMap<String, Arc<HostBucket>>,
}

struct HostBucket {
    tokens: Mutex<mpsc::Receiver<()>>,
}

impl HostBucket {
    fn spawn(host: String, interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel(1);
        tokio::spawn(refill(host, tx, interval));
        Self {
            tokens: Mutex::new(rx),
        }
    }
}

/// Runs until the bucket (and with it the receiver) is dropped.
async fn refill(host: String, tx: mpsc::Sender<()>, interval: Duration) {
    let Ok(mut slot) = tx.reserve().await else {
        return;
    };
    loop {
        slot.send(());
        // Reserving again only succeeds once the token has been taken.
        slot = match tx.reserve().await {
            Ok(slot) => slot,
            Err(_) => break,
        };
        tokio::time::sleep(interval).await;
    }
    debug!("Refill loop for {} stopped", host);
}

impl HostRateLimiter {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            buckets: DashMap::new(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Waits until `host` may be fetched again, consuming its token.
    pub async fn acquire(&self, host: &str) {
        let bucket = self.bucket(host);
        let mut tokens = bucket.tokens.lock().await;
        // The refill task outlives every acquire on a live bucket.
        let _ = tokens.recv().await;
    }

    /// Number of hosts seen so far.
    pub fn hosts(&self) -> usize {
        self.buckets.len()
    }

    fn bucket(&self, host: &str) -> Arc<HostBucket> {
        if let Some(bucket) = self.buckets.get(host) {
            return bucket.clone();
        }
        // entry() holds the shard lock, so only one refill task per host.
        self.buckets
            .entry(host.to_string())
            .or_insert_with(|| {
                debug!("Creating token bucket for {}", host);
                Arc::new(HostBucket::spawn(host.to_string(), self.interval))
            })
            .clone()
    }
}
