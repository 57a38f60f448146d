pub mod crawler;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod frontier;
pub mod rate_limiter;
pub mod result;
pub mod sink;
pub mod task;
pub mod tracker;
pub mod visited;

pub use crawler::{Crawler, ProgressCallback, RunState};
pub use error::ScanError;
pub use extractor::{HtmlLinkExtractor, LinkExtractor};
pub use fetcher::{Fetcher, HttpFetcher};
pub use result::CrawlSummary;
pub use sink::{OutputSink, escape};
