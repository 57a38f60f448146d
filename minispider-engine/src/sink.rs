use crate::error::Result;
use async_trait::async_trait;
use url::Url;

/// Receives every successfully fetched page. A failing write is logged by
/// the crawler and otherwise ignored.
#[async_trait]
pub trait OutputSink: Send + Sync {
    async fn write(&self, name: &str, body: &[u8]) -> Result<()>;
}

/// Name a page is stored under: the URL, form-encoded.
pub fn escape(url: &Url) -> String {
    urlencoding::encode(url.as_str()).into_owned()
}
