use crate::config::Config;
use crate::outputer::FileOutputer;
use indicatif::{ProgressBar, ProgressStyle};
use minispider_engine::error::Result;
use minispider_engine::{CrawlSummary, Crawler, HtmlLinkExtractor, HttpFetcher, ProgressCallback};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Options for configuring a crawl operation
pub struct CrawlOptions {
    pub seeds: Vec<String>,
    pub show_progress_bars: bool,
}

/// Builds the fetcher, link extractor and crawler described by `config` and
/// runs one crawl over `options.seeds`, saving pages through `outputer`.
pub async fn execute_crawl(
    config: &Config,
    outputer: Arc<FileOutputer>,
    options: CrawlOptions,
) -> Result<CrawlSummary> {
    let CrawlOptions {
        seeds,
        show_progress_bars,
    } = options;

    let fetcher = HttpFetcher::new(config.fetcher.crawl_timeout())?;

    let mut crawler = Crawler::new(
        Arc::new(fetcher),
        Arc::new(HtmlLinkExtractor::new()),
        outputer,
    )
    .with_max_depth(config.crawler.max_depth)
    .with_crawl_interval(config.crawler.crawl_interval())
    .with_thread_count(config.crawler.thread_count());

    // Single spinner for overall progress (only if enabled)
    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Starting crawl...");
        Some(Arc::new(pb))
    } else {
        None
    };

    if let Some(ref pb) = progress_bar {
        let pb_clone = pb.clone();
        let count = Arc::new(AtomicUsize::new(0));
        let callback: ProgressCallback = Arc::new(move |_worker_id: usize, url: String| {
            let n = count.fetch_add(1, Ordering::Relaxed) + 1;
            pb_clone.set_message(format!("Crawling... {} URLs processed, now {}", n, url));
        });
        crawler = crawler.with_progress_callback(callback);
    }

    let result = crawler.run_once(&seeds).await;

    if let Some(ref pb) = progress_bar {
        pb.finish_and_clear();
    }

    result
}

/// Generate a plain-text report from a run summary
pub fn generate_crawl_report(summary: &CrawlSummary) -> String {
    let mut report = String::new();
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str("# Summary:\n");
    report.push_str(&format!(
        "  Seeds accepted: {} ({} rejected)\n",
        summary.seeds_accepted, summary.seeds_rejected
    ));
    report.push_str(&format!("  Pages fetched: {}\n", summary.pages_fetched));
    report.push_str(&format!("  Fetch failures: {}\n", summary.fetch_failures));
    report.push_str(&format!("  Output failures: {}\n", summary.output_failures));
    report.push_str(&format!("  Parse failures: {}\n", summary.parse_failures));
    report.push_str(&format!("  Links followed: {}\n", summary.links_admitted));
    report.push_str(&format!("  Hosts: {}\n", summary.hosts_seen));
    report.push_str(&format!(
        "  Elapsed: {:.1}s\n",
        summary.elapsed.as_secs_f64()
    ));
    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    report
}
