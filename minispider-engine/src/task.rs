use url::Url;

/// A URL waiting to be crawled, paired with how many more link hops may be
/// followed from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub url: Url,
    pub remaining_depth: i32,
}

impl Task {
    pub fn new(url: Url, remaining_depth: i32) -> Self {
        Self {
            url,
            remaining_depth,
        }
    }

    /// Depth handed to links discovered on this page, `None` once the budget
    /// is spent.
    pub fn child_depth(&self) -> Option<i32> {
        let depth = self.remaining_depth - 1;
        (depth >= 0).then_some(depth)
    }

    /// Rate-limiting key: `host[:port]`.
    pub fn host_key(&self) -> String {
        host_key(&self.url)
    }
}

pub fn host_key(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}
