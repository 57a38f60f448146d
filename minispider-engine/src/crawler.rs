use crate::error::{Result, ScanError};
use crate::extractor::LinkExtractor;
use crate::fetcher::Fetcher;
use crate::frontier::{DEFAULT_CAPACITY, Frontier};
use crate::rate_limiter::HostRateLimiter;
use crate::result::{CrawlSummary, RunStats};
use crate::sink::{OutputSink, escape};
use crate::task::Task;
use crate::tracker::CompletionTracker;
use crate::visited::VisitedSet;
use futures::FutureExt;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};
use url::Url;

pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

/// Lifecycle of a single `run_once` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Seeding,
    Running,
    Draining,
    Terminated,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Idle => "idle",
            RunState::Seeding => "seeding",
            RunState::Running => "running",
            RunState::Draining => "draining",
            RunState::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

pub struct Crawler {
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn LinkExtractor>,
    sink: Arc<dyn OutputSink>,
    max_depth: i32,
    crawl_interval: Duration,
    thread_count: usize,
    queue_capacity: usize,
    progress_callback: Option<ProgressCallback>,
}

/// Shared state of one run. Built fresh by every `run_once`.
struct CrawlRun {
    frontier: Frontier,
    visited: VisitedSet,
    limiter: HostRateLimiter,
    tracker: CompletionTracker,
    stats: RunStats,
    max_depth: i32,
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn LinkExtractor>,
    sink: Arc<dyn OutputSink>,
    progress_callback: Option<ProgressCallback>,
}

impl Crawler {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn LinkExtractor>,
        sink: Arc<dyn OutputSink>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            sink,
            max_depth: 1,
            crawl_interval: Duration::from_secs(1),
            thread_count: 8,
            queue_capacity: DEFAULT_CAPACITY,
            progress_callback: None,
        }
    }

    /// Link hops followed from a seed. Zero crawls the seeds only.
    pub fn with_max_depth(mut self, depth: i32) -> Self {
        self.max_depth = depth;
        self
    }

    /// Minimum spacing between two fetch starts against the same host.
    pub fn with_crawl_interval(mut self, interval: Duration) -> Self {
        self.crawl_interval = interval;
        self
    }

    pub fn with_thread_count(mut self, workers: usize) -> Self {
        self.thread_count = workers;
        self
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Crawls everything reachable from `seeds` within the depth budget and
    /// returns once no task is left. Task failures are counted in the summary;
    /// only a bad configuration fails the run.
    pub async fn run_once(&self, seeds: &[String]) -> Result<CrawlSummary> {
        let started = Instant::now();
        let mut state = RunState::Idle;

        if self.max_depth < 0 {
            return Err(ScanError::InvalidDepth(self.max_depth));
        }
        if self.thread_count == 0 {
            return Err(ScanError::NoWorkers);
        }

        let (frontier, stager) = Frontier::new(self.queue_capacity);
        let run = Arc::new(CrawlRun {
            frontier,
            visited: VisitedSet::new(),
            limiter: HostRateLimiter::new(self.crawl_interval),
            tracker: CompletionTracker::new(),
            stats: RunStats::default(),
            max_depth: self.max_depth,
            fetcher: self.fetcher.clone(),
            extractor: self.extractor.clone(),
            sink: self.sink.clone(),
            progress_callback: self.progress_callback.clone(),
        });

        transition(&mut state, RunState::Seeding);
        run.seed(seeds);

        transition(&mut state, RunState::Running);
        info!(
            "Starting crawl of {} seeds with {} workers, max depth {}",
            run.tracker.outstanding(),
            self.thread_count,
            self.max_depth
        );

        let mut workers = JoinSet::new();
        workers.spawn(stager.run());
        for worker_id in 0..self.thread_count {
            workers.spawn(work(worker_id, run.clone()));
        }

        run.tracker.wait().await;

        // Every worker is parked on an empty frontier by now.
        transition(&mut state, RunState::Draining);
        workers.shutdown().await;

        transition(&mut state, RunState::Terminated);
        let summary = run
            .stats
            .summary(run.limiter.hosts(), started.elapsed());
        info!(
            "Crawl complete. Fetched {} pages ({} failed) across {} hosts",
            summary.pages_fetched, summary.fetch_failures, summary.hosts_seen
        );
        Ok(summary)
    }
}

fn transition(state: &mut RunState, next: RunState) {
    debug!("Crawl run {} -> {}", state, next);
    *state = next;
}

impl CrawlRun {
    fn seed(&self, seeds: &[String]) {
        let mut valid = Vec::with_capacity(seeds.len());
        for seed in seeds {
            match Url::parse(seed) {
                Ok(url) if self.visited.admit(&url) => valid.push(url),
                Ok(url) => debug!("Skipping duplicate seed {}", url),
                Err(e) => {
                    warn!(seed = %seed, "Dropping invalid seed: {}", e);
                    RunStats::bump(&self.stats.seeds_rejected);
                }
            }
        }

        let capacity = self.frontier.capacity();
        if valid.len() > capacity {
            warn!(
                "{} valid seeds exceed the frontier capacity of {}, staging the rest",
                valid.len(),
                capacity
            );
        }

        self.tracker.add(valid.len());
        self.stats
            .seeds_accepted
            .store(valid.len(), Ordering::Relaxed);

        // Workers are not running yet: fill the queue directly and let the
        // stager insert whatever does not fit.
        for url in valid {
            if let Err(task) = self.frontier.try_enqueue(Task::new(url, self.max_depth)) {
                self.frontier.submit(task);
            }
        }
    }

    async fn process(&self, worker_id: usize, task: &Task) {
        let url = &task.url;
        info!(worker = worker_id, "Start crawling {}", url);

        self.limiter.acquire(&task.host_key()).await;

        let body = match self.fetcher.fetch(url).await {
            Ok(body) => body,
            Err(e) => {
                error!(worker = worker_id, "Fetch failed for {}: {}", url, e);
                RunStats::bump(&self.stats.fetch_failures);
                return;
            }
        };
        RunStats::bump(&self.stats.pages_fetched);

        if let Err(e) = self.sink.write(&escape(url), &body).await {
            warn!(worker = worker_id, "Writing {} failed: {}", url, e);
            RunStats::bump(&self.stats.output_failures);
        }

        let Some(child_depth) = task.child_depth() else {
            return;
        };

        let links = match self.extractor.extract(&body, url) {
            Ok(links) => links,
            Err(e) => {
                error!(worker = worker_id, "Parsing {} failed: {}", url, e);
                RunStats::bump(&self.stats.parse_failures);
                Vec::new()
            }
        };

        let mut admitted = 0;
        for link in links {
            if self.visited.admit(&link) {
                self.tracker.add(1);
                self.frontier.submit(Task::new(link, child_depth));
                admitted += 1;
            }
        }
        if admitted > 0 {
            debug!(worker = worker_id, "Queued {} new links from {}", admitted, url);
            self.stats
                .links_admitted
                .fetch_add(admitted, Ordering::Relaxed);
        }
    }
}

async fn work(worker_id: usize, run: Arc<CrawlRun>) {
    debug!("Worker {} started", worker_id);
    while let Some(task) = run.frontier.dequeue().await {
        if let Some(ref callback) = run.progress_callback {
            callback(worker_id, task.url.to_string());
        }

        let outcome = AssertUnwindSafe(run.process(worker_id, &task))
            .catch_unwind()
            .await;
        if outcome.is_err() {
            error!(worker = worker_id, "Worker panicked while crawling {}", task.url);
        }

        run.tracker.done();
    }
    debug!("Worker {} finished", worker_id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::HtmlLinkExtractor;
    use crate::fetcher::HttpFetcher;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::AtomicUsize;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    enum Page {
        Html(String),
        Fail,
        Panic,
    }

    /// In-memory web: pages are HTML documents whose links are the given URLs.
    #[derive(Default)]
    struct MockWeb {
        pages: HashMap<String, Page>,
        log: StdMutex<Vec<(String, Instant)>>,
    }

    fn key(url: &str) -> String {
        Url::parse(url).unwrap().to_string()
    }

    impl MockWeb {
        fn page(mut self, url: &str, links: &[&str]) -> Self {
            let anchors: String = links
                .iter()
                .map(|link| format!(r#"<a href="{}">link</a>"#, link))
                .collect();
            let html = format!("<html><body>{}</body></html>", anchors);
            self.pages.insert(key(url), Page::Html(html));
            self
        }

        fn failing(mut self, url: &str) -> Self {
            self.pages.insert(key(url), Page::Fail);
            self
        }

        fn panicking(mut self, url: &str) -> Self {
            self.pages.insert(key(url), Page::Panic);
            self
        }

        fn fetches(&self, url: &str) -> usize {
            let url = key(url);
            self.log.lock().unwrap().iter().filter(|(u, _)| *u == url).count()
        }

        fn total_fetches(&self) -> usize {
            self.log.lock().unwrap().len()
        }

        fn fetch_times(&self, host: &str) -> Vec<Instant> {
            self.log
                .lock()
                .unwrap()
                .iter()
                .filter(|(u, _)| Url::parse(u).unwrap().host_str() == Some(host))
                .map(|(_, at)| *at)
                .collect()
        }
    }

    #[async_trait]
    impl Fetcher for MockWeb {
        async fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
            self.log
                .lock()
                .unwrap()
                .push((url.to_string(), Instant::now()));
            tokio::time::sleep(Duration::from_millis(10)).await;

            match self.pages.get(url.as_str()) {
                Some(Page::Html(html)) => Ok(html.clone().into_bytes()),
                Some(Page::Panic) => panic!("fetcher blew up on {}", url),
                Some(Page::Fail) | None => Err(ScanError::Status {
                    url: url.to_string(),
                    status: 500,
                }),
            }
        }
    }

    #[derive(Default)]
    struct MemorySink {
        names: StdMutex<Vec<String>>,
        fail: bool,
    }

    impl MemorySink {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn names(&self) -> Vec<String> {
            let mut names = self.names.lock().unwrap().clone();
            names.sort();
            names
        }
    }

    #[async_trait]
    impl OutputSink for MemorySink {
        async fn write(&self, name: &str, _body: &[u8]) -> Result<()> {
            if self.fail {
                return Err(ScanError::Output("disk full".to_string()));
            }
            self.names.lock().unwrap().push(name.to_string());
            Ok(())
        }
    }

    fn crawler(web: &Arc<MockWeb>, sink: &Arc<MemorySink>) -> Crawler {
        Crawler::new(web.clone(), Arc::new(HtmlLinkExtractor::new()), sink.clone())
            .with_crawl_interval(Duration::from_secs(1))
            .with_thread_count(8)
    }

    fn seeds(urls: &[&str]) -> Vec<String> {
        urls.iter().map(|u| u.to_string()).collect()
    }

    fn name(url: &str) -> String {
        escape(&Url::parse(url).unwrap())
    }

    fn simple_web() -> MockWeb {
        MockWeb::default()
            .page("http://a.com", &["http://b.com", "http://c.com"])
            .page("http://b.com", &[])
            .page("http://c.com", &[])
    }

    #[tokio::test(start_paused = true)]
    async fn test_depth_one_crawls_seed_and_children() {
        let web = Arc::new(simple_web());
        let sink = Arc::new(MemorySink::default());

        let summary = crawler(&web, &sink)
            .with_max_depth(1)
            .run_once(&seeds(&["http://a.com"]))
            .await
            .unwrap();

        for url in ["http://a.com", "http://b.com", "http://c.com"] {
            assert_eq!(web.fetches(url), 1, "{} should be fetched once", url);
        }
        assert_eq!(web.total_fetches(), 3);

        let mut expected = vec![name("http://a.com"), name("http://b.com"), name("http://c.com")];
        expected.sort();
        assert_eq!(sink.names(), expected);

        assert_eq!(summary.seeds_accepted, 1);
        assert_eq!(summary.pages_fetched, 3);
        assert_eq!(summary.links_admitted, 2);
        assert_eq!(summary.hosts_seen, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_depth_zero_crawls_seeds_only() {
        let web = Arc::new(simple_web());
        let sink = Arc::new(MemorySink::default());

        let summary = crawler(&web, &sink)
            .with_max_depth(0)
            .run_once(&seeds(&["http://a.com"]))
            .await
            .unwrap();

        assert_eq!(web.fetches("http://a.com"), 1);
        assert_eq!(web.total_fetches(), 1);
        assert_eq!(sink.names(), vec![name("http://a.com")]);
        assert_eq!(summary.links_admitted, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shared_target_fetched_once() {
        let web = Arc::new(
            MockWeb::default()
                .page("http://a.com", &["http://b.com", "http://c.com", "http://a.com"])
                .page("http://b.com", &["http://d.com", "http://d.com", "http://a.com"])
                .page("http://c.com", &["http://d.com", "http://b.com"])
                .page("http://d.com", &["http://a.com"]),
        );
        let sink = Arc::new(MemorySink::default());

        crawler(&web, &sink)
            .with_max_depth(3)
            .run_once(&seeds(&["http://a.com"]))
            .await
            .unwrap();

        for url in ["http://a.com", "http://b.com", "http://c.com", "http://d.com"] {
            assert_eq!(web.fetches(url), 1, "{} should be fetched once", url);
        }
        assert_eq!(sink.names().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_chain_longer_than_depth_is_cut() {
        let web = Arc::new(
            MockWeb::default()
                .page("http://a.com", &["http://b.com"])
                .page("http://b.com", &["http://c.com"])
                .page("http://c.com", &["http://d.com"])
                .page("http://d.com", &[]),
        );
        let sink = Arc::new(MemorySink::default());

        crawler(&web, &sink)
            .with_max_depth(2)
            .run_once(&seeds(&["http://a.com"]))
            .await
            .unwrap();

        assert_eq!(web.fetches("http://c.com"), 1);
        assert_eq!(web.fetches("http://d.com"), 0);
        assert_eq!(web.total_fetches(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_host_fetches_are_spaced() {
        let web = Arc::new(
            MockWeb::default()
                .page(
                    "http://a.com/1",
                    &["http://a.com/2", "http://a.com/3", "http://other.com/"],
                )
                .page("http://a.com/2", &[])
                .page("http://a.com/3", &[])
                .page("http://other.com/", &[]),
        );
        let sink = Arc::new(MemorySink::default());

        let summary = crawler(&web, &sink)
            .with_max_depth(1)
            .with_crawl_interval(Duration::from_secs(2))
            .run_once(&seeds(&["http://a.com/1"]))
            .await
            .unwrap();

        let mut same_host = web.fetch_times("a.com");
        same_host.sort();
        assert_eq!(same_host.len(), 3);
        for pair in same_host.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_secs(2));
        }

        // The other host is not held back by a.com's bucket.
        let other = web.fetch_times("other.com");
        assert_eq!(other.len(), 1);
        assert!(other[0] - same_host[0] < Duration::from_secs(2));

        assert!(summary.elapsed >= Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failing_host_does_not_block_the_run() {
        let web = Arc::new(
            MockWeb::default()
                .failing("http://bad.com")
                .failing("http://bad.com/x")
                .page("http://a.com", &["http://bad.com/x", "http://b.com"])
                .page("http://b.com", &[]),
        );
        let sink = Arc::new(MemorySink::default());

        let summary = crawler(&web, &sink)
            .with_max_depth(1)
            .run_once(&seeds(&["http://bad.com", "http://a.com"]))
            .await
            .unwrap();

        assert_eq!(web.fetches("http://b.com"), 1);
        assert_eq!(summary.fetch_failures, 2);
        assert_eq!(summary.pages_fetched, 2);

        let mut expected = vec![name("http://a.com"), name("http://b.com")];
        expected.sort();
        assert_eq!(sink.names(), expected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_output_failure_does_not_stop_discovery() {
        let web = Arc::new(simple_web());
        let sink = Arc::new(MemorySink::failing());

        let summary = crawler(&web, &sink)
            .with_max_depth(1)
            .run_once(&seeds(&["http://a.com"]))
            .await
            .unwrap();

        assert_eq!(web.total_fetches(), 3);
        assert_eq!(summary.output_failures, 3);
        assert!(sink.names().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_panicking_fetch_is_contained() {
        let web = Arc::new(
            MockWeb::default()
                .page("http://a.com", &["http://boom.com", "http://b.com"])
                .panicking("http://boom.com")
                .page("http://b.com", &[]),
        );
        let sink = Arc::new(MemorySink::default());

        let summary = crawler(&web, &sink)
            .with_max_depth(1)
            .with_thread_count(1)
            .run_once(&seeds(&["http://a.com"]))
            .await
            .unwrap();

        // The single worker survived the panic and went on to b.com.
        assert_eq!(web.fetches("http://b.com"), 1);
        assert_eq!(summary.pages_fetched, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_seed_overflow_and_small_queue() {
        let mut web = MockWeb::default();
        let mut seed_urls = Vec::new();
        for i in 0..20 {
            let url = format!("http://host{}.com/", i);
            let child = format!("http://child{}.com/", i);
            web = web
                .page(&url, &[child.as_str(), "http://shared.com/"])
                .page(&child, &[]);
            seed_urls.push(url);
        }
        let web = Arc::new(web.page("http://shared.com/", &[]));
        let sink = Arc::new(MemorySink::default());

        let summary = crawler(&web, &sink)
            .with_max_depth(1)
            .with_thread_count(3)
            .with_queue_capacity(1)
            .run_once(&seed_urls)
            .await
            .unwrap();

        assert_eq!(summary.seeds_accepted, 20);
        assert_eq!(web.total_fetches(), 41);
        assert_eq!(web.fetches("http://shared.com/"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_and_duplicate_seeds() {
        let web = Arc::new(simple_web());
        let sink = Arc::new(MemorySink::default());

        let summary = crawler(&web, &sink)
            .with_max_depth(0)
            .run_once(&seeds(&["not a url", "http://a.com", "http://a.com/", "://"]))
            .await
            .unwrap();

        assert_eq!(summary.seeds_rejected, 2);
        assert_eq!(summary.seeds_accepted, 1);
        assert_eq!(web.fetches("http://a.com"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_seed_linked_again_is_not_refetched() {
        let web = Arc::new(
            MockWeb::default()
                .page("http://a.com", &["http://b.com"])
                .page("http://b.com", &["http://a.com"]),
        );
        let sink = Arc::new(MemorySink::default());

        crawler(&web, &sink)
            .with_max_depth(5)
            .run_once(&seeds(&["http://a.com", "http://b.com"]))
            .await
            .unwrap();

        assert_eq!(web.fetches("http://a.com"), 1);
        assert_eq!(web.fetches("http://b.com"), 1);
    }

    #[tokio::test]
    async fn test_no_seeds_terminates_immediately() {
        let web = Arc::new(simple_web());
        let sink = Arc::new(MemorySink::default());

        let summary = tokio::time::timeout(
            Duration::from_secs(5),
            crawler(&web, &sink).run_once(&[]),
        )
        .await
        .expect("empty run should finish")
        .unwrap();

        assert_eq!(summary.pages_fetched, 0);
        assert_eq!(web.total_fetches(), 0);
    }

    #[tokio::test]
    async fn test_negative_depth_is_fatal() {
        let web = Arc::new(simple_web());
        let sink = Arc::new(MemorySink::default());

        let result = crawler(&web, &sink)
            .with_max_depth(-1)
            .run_once(&seeds(&["http://a.com"]))
            .await;

        assert!(matches!(result, Err(ScanError::InvalidDepth(-1))));
        assert_eq!(web.total_fetches(), 0);
    }

    #[tokio::test]
    async fn test_zero_workers_is_fatal() {
        let web = Arc::new(simple_web());
        let sink = Arc::new(MemorySink::default());

        let result = crawler(&web, &sink)
            .with_thread_count(0)
            .run_once(&seeds(&["http://a.com"]))
            .await;

        assert!(matches!(result, Err(ScanError::NoWorkers)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_crawler_can_run_again() {
        let web = Arc::new(simple_web());
        let sink = Arc::new(MemorySink::default());
        let crawler = crawler(&web, &sink).with_max_depth(1);

        crawler.run_once(&seeds(&["http://a.com"])).await.unwrap();
        crawler.run_once(&seeds(&["http://a.com"])).await.unwrap();

        // Each run has its own visited set.
        assert_eq!(web.fetches("http://a.com"), 2);
        assert_eq!(web.total_fetches(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_callback_sees_every_task() {
        let web = Arc::new(simple_web());
        let sink = Arc::new(MemorySink::default());
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = seen.clone();

        crawler(&web, &sink)
            .with_max_depth(1)
            .with_progress_callback(Arc::new(move |_worker_id, _url| {
                seen_clone.fetch_add(1, Ordering::SeqCst);
            }))
            .run_once(&seeds(&["http://a.com"]))
            .await
            .unwrap();

        assert_eq!(seen.load(Ordering::SeqCst), 3);
    }

    /// End to end against a live server with the real fetcher and extractor.
    #[tokio::test]
    async fn test_crawl_mock_server() {
        let mock_server = MockServer::start().await;

        let root_html = format!(
            r#"<html><body>
                <a href="{}/page1">Page 1</a>
                <a href="/page2">Page 2</a>
                <a href="/page1">Page 1 again</a>
            </body></html>"#,
            mock_server.uri()
        );

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html")
                    .set_body_bytes(root_html.as_bytes()),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/page1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html")
                    .set_body_bytes(b"<html><body><a href='/'>home</a><a href='/page3'>3</a></body></html>"),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/page2"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/page3"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let sink = Arc::new(MemorySink::default());
        let crawler = Crawler::new(
            Arc::new(HttpFetcher::new(Duration::from_secs(5)).unwrap()),
            Arc::new(HtmlLinkExtractor::new()),
            sink.clone(),
        )
        .with_max_depth(1)
        .with_crawl_interval(Duration::from_millis(50))
        .with_thread_count(4);

        let summary = crawler
            .run_once(&seeds(&[mock_server.uri().as_str()]))
            .await
            .unwrap();

        assert_eq!(summary.pages_fetched, 2);
        assert_eq!(summary.fetch_failures, 1);
        assert_eq!(sink.names().len(), 2);
        // Dropping the server verifies the `expect` counts.
    }
}
