use dashmap::DashSet;
use url::Url;

/// Every URL ever admitted to the frontier during a run.
///
/// `admit` is the single dedup point of the crawl: only the caller that gets
/// `true` back may create a task for the URL.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: DashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `url` if absent. Returns whether this call was the first.
    pub fn admit(&self, url: &Url) -> bool {
        self.urls.insert(url.as_str().to_string())
    }

    pub fn contains(&self, url: &Url) -> bool {
        self.urls.contains(url.as_str())
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
