use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// What a finished run did. Task-level failures land here instead of
/// failing the run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlSummary {
    pub seeds_accepted: usize,
    pub seeds_rejected: usize,
    pub pages_fetched: usize,
    pub fetch_failures: usize,
    pub output_failures: usize,
    pub parse_failures: usize,
    pub links_admitted: usize,
    pub hosts_seen: usize,
    pub elapsed: Duration,
}

#[derive(Debug, Default)]
pub(crate) struct RunStats {
    pub seeds_accepted: AtomicUsize,
    pub seeds_rejected: AtomicUsize,
    pub pages_fetched: AtomicUsize,
    pub fetch_failures: AtomicUsize,
    pub output_failures: AtomicUsize,
    pub parse_failures: AtomicUsize,
    pub links_admitted: AtomicUsize,
}

impl RunStats {
    pub fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn summary(&self, hosts_seen: usize, elapsed: Duration) -> CrawlSummary {
        CrawlSummary {
            seeds_accepted: self.seeds_accepted.load(Ordering::Relaxed),
            seeds_rejected: self.seeds_rejected.load(Ordering::Relaxed),
            pages_fetched: self.pages_fetched.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            output_failures: self.output_failures.load(Ordering::Relaxed),
            parse_failures: self.parse_failures.load(Ordering::Relaxed),
            links_admitted: self.links_admitted.load(Ordering::Relaxed),
            hosts_seen,
            elapsed,
        }
    }
}
