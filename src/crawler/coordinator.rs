//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that ties everything together:
//! - Seeding one index request per target domain
//! - Fetching pages under the per-host concurrency limit and timeout
//! - Saving each page to the ledger and content store
//! - Classifying the links of index pages and queueing follow-ups
//! - Enforcing the per-domain page budget and duplicate suppression
//! - Flushing the ledger once no work is left

use crate::classify::Classifier;
use crate::config::{validate, Config, CrawlerConfig};
use crate::crawler::context::{FetchRequest, RequestContext};
use crate::crawler::fetcher::{FetchResult, Fetcher, HttpFetcher};
use crate::crawler::limiter::HostLimiter;
use crate::crawler::parser::{extract_anchors, is_html};
use crate::storage::{ContentStore, Ledger, StorageResult, VisitQueries, VisitRecord};
use crate::url::{
    extract_domain, is_external, is_followable_text, resolve_link, sanitize_text, seed_url,
};
use crate::CrawlError;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use url::Url;

/// Totals reported at the end of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Seed domains with at least one saved page
    pub domains: usize,

    /// Saved pages
    pub pages: usize,
}

/// State shared by all fetch tasks
struct Shared {
    config: CrawlerConfig,
    ledger: Arc<Ledger>,
    content: ContentStore,
    fetcher: Arc<dyn Fetcher>,
    limiter: HostLimiter,
    classifier: Classifier,
}

/// What a finished fetch task hands back to the dispatcher
struct TaskOutcome {
    context: RequestContext,
    result: Result<Vec<FetchRequest>, CrawlError>,
}

/// Bookkeeping owned by the dispatch loop
#[derive(Default)]
struct DispatchState {
    /// Every URL handed to a task in this run
    requested: HashSet<String>,

    /// Unfinished tasks per seed domain
    in_flight: HashMap<String, usize>,
}

impl DispatchState {
    fn in_flight(&self, domain: &str) -> usize {
        self.in_flight.get(domain).copied().unwrap_or(0)
    }

    fn start(&mut self, domain: &str) {
        *self.in_flight.entry(domain.to_string()).or_insert(0) += 1;
    }

    fn finish(&mut self, domain: &str) {
        if let Some(count) = self.in_flight.get_mut(domain) {
            *count = count.saturating_sub(1);
        }
    }
}

/// Main crawler coordinator structure
pub struct Coordinator {
    shared: Arc<Shared>,
}

impl Coordinator {
    /// Creates a coordinator around an existing ledger and fetcher
    ///
    /// Page bodies are written below `config.output.directory`.
    pub fn new(config: &Config, ledger: Arc<Ledger>, fetcher: Arc<dyn Fetcher>) -> Self {
        let crawler = config.crawler.clone();
        let shared = Shared {
            limiter: HostLimiter::new(crawler.parallelism as usize),
            classifier: Classifier::new(crawler.classify_by_href),
            content: ContentStore::new(&config.output.directory),
            config: crawler,
            ledger,
            fetcher,
        };

        Self {
            shared: Arc::new(shared),
        }
    }

    /// Creates a fresh ledger and an HTTP fetcher from the configuration
    ///
    /// Fails if the configuration is invalid or the output directory or the
    /// empty ledger cannot be written.
    pub fn from_config(config: &Config) -> Result<Self, CrawlError> {
        validate(config)?;
        let ledger = Ledger::create(config.ledger_path())?;
        let fetcher = HttpFetcher::from_config(&config.user_agent, &config.crawler)?;
        Ok(Self::new(config, Arc::new(ledger), Arc::new(fetcher)))
    }

    /// The ledger this coordinator records into
    pub fn ledger(&self) -> Arc<Ledger> {
        Arc::clone(&self.shared.ledger)
    }

    /// Crawls the given seed domains until no work is left
    ///
    /// Per-page failures are logged and skipped. A storage failure aborts
    /// the remaining work; the ledger is flushed either way.
    pub async fn run(&self, targets: &[String]) -> Result<CrawlSummary, CrawlError> {
        let start_time = Instant::now();
        let mut tasks = JoinSet::new();
        let mut state = DispatchState::default();

        tracing::info!("Starting crawl of {} domains", targets.len());

        for target in targets {
            let target = target.trim();
            match seed_url(target) {
                Ok(url) => self.dispatch(
                    &mut tasks,
                    &mut state,
                    FetchRequest::new(url, RequestContext::seed(target)),
                ),
                Err(e) => tracing::warn!("Skipping domain {:?}: {}", target, e),
            }
        }

        let mut fatal = None;
        while let Some(joined) = tasks.join_next().await {
            let outcome = match joined {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!("Crawl task failed: {}", e);
                    fatal = Some(CrawlError::from(e));
                    tasks.abort_all();
                    break;
                }
            };
            state.finish(&outcome.context.original_domain);

            match outcome.result {
                Ok(follow_ups) => {
                    for request in follow_ups {
                        self.dispatch(&mut tasks, &mut state, request);
                    }
                }
                Err(e) => {
                    tracing::error!("Aborting crawl: {}", e);
                    fatal = Some(e);
                    tasks.abort_all();
                    break;
                }
            }
        }
        drop(tasks);

        let ledger = &self.shared.ledger;
        if let Err(e) = ledger.flush() {
            tracing::error!("Failed to flush ledger {}: {}", ledger.path().display(), e);
            if fatal.is_none() {
                fatal = Some(e.into());
            }
        }
        if let Some(e) = fatal {
            return Err(e);
        }

        let summary = CrawlSummary {
            domains: ledger.count_domains(),
            pages: ledger.count_pages(),
        };
        tracing::info!(
            "Crawl completed: {} domains, {} pages in {:?}",
            summary.domains,
            summary.pages,
            start_time.elapsed()
        );

        Ok(summary)
    }

    /// Spawns a fetch task unless the request is a duplicate or over budget
    fn dispatch(
        &self,
        tasks: &mut JoinSet<TaskOutcome>,
        state: &mut DispatchState,
        request: FetchRequest,
    ) {
        let url = request.url.as_str();
        if !state.requested.insert(url.to_string()) {
            tracing::debug!("Already requested {}, skipping", url);
            return;
        }

        if self.shared.ledger.already_visited(url) {
            tracing::debug!("Already stored {}, skipping", url);
            return;
        }

        let domain = request.context.original_domain.clone();
        if !request.is_seed() {
            let budget = self.shared.config.page_budget as usize;
            let committed =
                self.shared.ledger.count_pages_for_domain(&domain) + state.in_flight(&domain);
            if committed >= budget {
                tracing::debug!(
                    "Page budget of {} reached for {}, dropping {}",
                    budget,
                    domain,
                    url
                );
                return;
            }
        }

        state.start(&domain);
        let shared = Arc::clone(&self.shared);
        tasks.spawn(async move {
            let context = request.context.clone();
            let result = shared.process(request).await;
            TaskOutcome { context, result }
        });
    }
}

impl Shared {
    /// Fetches one page, saves it, and returns the follow-ups it yields
    async fn process(&self, request: FetchRequest) -> Result<Vec<FetchRequest>, CrawlError> {
        let FetchRequest { url, context } = request;
        let host = extract_domain(&url).unwrap_or_default();

        let permit = self.limiter.acquire(&host).await;
        tracing::info!(
            "Visiting {} ({}, {})",
            url,
            context.original_domain,
            context.page_type.as_str()
        );
        let fetched =
            match tokio::time::timeout(self.config.request_timeout(), self.fetcher.fetch(&url))
                .await
            {
                Ok(result) => result,
                Err(_) => FetchResult::Timeout,
            };
        drop(permit);

        match fetched {
            FetchResult::Success {
                final_url,
                content_type,
                body,
                ..
            } => {
                let record = self.store_page(&context, &final_url, &body)?;
                tracing::debug!("Saved {} to {}", record.url, record.content_path);

                if !context.discovers_links() || !is_html(content_type.as_deref()) {
                    return Ok(Vec::new());
                }
                Ok(self.discover_links(&context, &final_url, &body))
            }

            FetchResult::HttpError { status_code } => {
                tracing::warn!(
                    "Error visiting {} for {}: HTTP {}",
                    url,
                    context.original_domain,
                    status_code
                );
                Ok(Vec::new())
            }

            FetchResult::NetworkError { error } => {
                tracing::warn!(
                    "Error visiting {} for {}: {}",
                    url,
                    context.original_domain,
                    error
                );
                Ok(Vec::new())
            }

            FetchResult::Timeout => {
                tracing::warn!(
                    "Error visiting {} for {}: timed out after {:?}",
                    url,
                    context.original_domain,
                    self.config.request_timeout()
                );
                Ok(Vec::new())
            }
        }
    }

    /// Writes the body and appends the ledger record in one step
    fn store_page(
        &self,
        context: &RequestContext,
        url: &Url,
        body: &[u8],
    ) -> StorageResult<VisitRecord> {
        self.ledger
            .record_with(&context.original_domain, url, context.page_type, |ordinal| {
                self.content
                    .save(&context.original_domain, context.page_type, ordinal, body)
            })
    }

    /// Turns the classified, internal anchors of a page into follow-up requests
    fn discover_links(
        &self,
        context: &RequestContext,
        page_url: &Url,
        body: &[u8],
    ) -> Vec<FetchRequest> {
        let html = String::from_utf8_lossy(body);
        let budget = self.config.page_budget as usize;
        let mut follow_ups = Vec::new();

        for anchor in extract_anchors(&html) {
            match is_external(page_url, &anchor.href) {
                Ok(false) => {}
                Ok(true) => continue,
                Err(e) => {
                    tracing::warn!("Skipping link on {}: {}", page_url, e);
                    continue;
                }
            }

            if !is_followable_text(&anchor.href, &anchor.text) {
                continue;
            }

            let page_type = self
                .classifier
                .classify(&sanitize_text(&anchor.text), &anchor.href);
            if !page_type.is_followable() {
                continue;
            }

            let mut url = match resolve_link(page_url, &anchor.href, self.config.relative_links) {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!("Skipping {} link on {}: {}", page_type.as_str(), page_url, e);
                    continue;
                }
            };
            url.set_fragment(None);

            // Racy by nature: concurrent pages of one domain may overshoot
            if self.ledger.count_pages_for_domain(&context.original_domain) >= budget {
                tracing::debug!(
                    "Page budget of {} reached for {}, skipping {}",
                    budget,
                    context.original_domain,
                    url
                );
                continue;
            }

            tracing::debug!("Found {} link {} on {}", page_type.as_str(), url, page_url);
            follow_ups.push(FetchRequest::new(url, context.follow_up(page_type)));
        }

        follow_ups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::PageType;
    use crate::url::RelativeLinkStrategy;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;
    use tempfile::TempDir;

    enum FakePage {
        Html(String),
        Redirect { to: &'static str, body: String },
        Binary(&'static str),
        Status(u16),
        Slow,
    }

    /// In-memory fetcher keyed by absolute URL
    #[derive(Default)]
    struct FakeFetcher {
        pages: HashMap<String, FakePage>,
        requests: Mutex<Vec<String>>,
    }

    impl FakeFetcher {
        fn page(mut self, url: &str, body: &str) -> Self {
            self.pages
                .insert(url.to_string(), FakePage::Html(body.to_string()));
            self
        }

        fn with(mut self, url: &str, page: FakePage) -> Self {
            self.pages.insert(url.to_string(), page);
            self
        }

        fn requested(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    fn success(final_url: &str, content_type: &str, body: &str) -> FetchResult {
        FetchResult::Success {
            final_url: Url::parse(final_url).unwrap(),
            status_code: 200,
            content_type: Some(content_type.to_string()),
            body: body.as_bytes().to_vec(),
        }
    }

    #[async_trait]
    impl Fetcher for FakeFetcher {
        async fn fetch(&self, url: &Url) -> FetchResult {
            self.requests.lock().unwrap().push(url.to_string());
            match self.pages.get(url.as_str()) {
                Some(FakePage::Html(body)) => success(url.as_str(), "text/html", body),
                Some(FakePage::Redirect { to, body }) => success(to, "text/html", body),
                Some(FakePage::Binary(body)) => success(url.as_str(), "application/pdf", body),
                Some(FakePage::Status(code)) => FetchResult::HttpError {
                    status_code: *code,
                },
                Some(FakePage::Slow) => {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    success(url.as_str(), "text/html", "late")
                }
                None => FetchResult::NetworkError {
                    error: "no such host".to_string(),
                },
            }
        }
    }

    fn test_config(dir: &TempDir) -> Config {
        let mut config = Config::default();
        config.crawler.parallelism = 1;
        config.output.directory = dir.path().to_path_buf();
        config
    }

    async fn crawl(
        config: &Config,
        fetcher: FakeFetcher,
        targets: &[&str],
    ) -> (Result<CrawlSummary, CrawlError>, Arc<Ledger>, Arc<FakeFetcher>) {
        let ledger = Arc::new(Ledger::create(config.ledger_path()).unwrap());
        let fetcher = Arc::new(fetcher);
        let coordinator = Coordinator::new(config, Arc::clone(&ledger), fetcher.clone());
        let targets: Vec<String> = targets.iter().map(|t| t.to_string()).collect();
        let result = coordinator.run(&targets).await;
        (result, ledger, fetcher)
    }

    #[tokio::test]
    async fn test_follows_privacy_link() {
        let dir = TempDir::new().unwrap();
        let fetcher = FakeFetcher::default()
            .page(
                "http://example.com/",
                r#"<html><body><a href="/datenschutz">Datenschutz</a></body></html>"#,
            )
            .page("http://example.com/datenschutz", "<html>privacy</html>");

        let (result, ledger, _) = crawl(&test_config(&dir), fetcher, &["example.com"]).await;

        assert_eq!(result.unwrap(), CrawlSummary { domains: 1, pages: 2 });
        let privacy: Vec<VisitRecord> = ledger
            .records()
            .into_iter()
            .filter(|r| r.page_type == PageType::Privacy)
            .collect();
        assert_eq!(privacy.len(), 1);
        assert_eq!(privacy[0].url, "http://example.com/datenschutz");
        assert_eq!(privacy[0].original_domain, "example.com");
        assert_eq!(privacy[0].content_path, "example.com/privacy/index.html");

        let saved = std::fs::read_to_string(dir.path().join(&privacy[0].content_path)).unwrap();
        assert_eq!(saved, "<html>privacy</html>");
    }

    #[tokio::test]
    async fn test_index_page_recorded() {
        let dir = TempDir::new().unwrap();
        let fetcher = FakeFetcher::default().page("http://example.com/", "<html></html>");

        let (_, ledger, _) = crawl(&test_config(&dir), fetcher, &["example.com"]).await;

        let records = ledger.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].page_type, PageType::Index);
        assert_eq!(records[0].content_path, "example.com/index/index.html");
        assert!(dir.path().join("example.com/index/index.html").exists());
    }

    #[tokio::test]
    async fn test_follow_ups_do_not_discover_links() {
        let dir = TempDir::new().unwrap();
        let fetcher = FakeFetcher::default()
            .page("http://a.com/", r#"<a href="/privacy">Privacy</a>"#)
            .page("http://a.com/privacy", r#"<a href="/impressum">Impressum</a>"#)
            .page("http://a.com/impressum", "imprint");

        let (_, ledger, fetcher) = crawl(&test_config(&dir), fetcher, &["a.com"]).await;

        assert_eq!(ledger.count_pages(), 2);
        assert!(!fetcher
            .requested()
            .contains(&"http://a.com/impressum".to_string()));
    }

    #[tokio::test]
    async fn test_follows_link_with_escaped_markup_in_text() {
        let dir = TempDir::new().unwrap();
        let fetcher = FakeFetcher::default()
            .page(
                "http://a.com/",
                r#"<a href="/datenschutz">&lt;&lt; Datenschutz</a>"#,
            )
            .page("http://a.com/datenschutz", "p");

        let (_, ledger, _) = crawl(&test_config(&dir), fetcher, &["a.com"]).await;

        assert_eq!(
            ledger.count_pages_for_domain_of_type("a.com", PageType::Privacy),
            1
        );
    }

    #[tokio::test]
    async fn test_skips_unfollowable_links() {
        let dir = TempDir::new().unwrap();
        let fetcher = FakeFetcher::default()
            .page(
                "http://a.com/",
                r##"
                <a href="https://b.com/privacy">Privacy</a>
                <a href="/about">About us</a>
                <a href="#kontakt">Kontakt</a>
                <a href="javascript:void(0)">Impressum</a>
                <a href="/agb"><img src="agb.png"></a>
                <a href="mailto:info@a.com">Contact</a>
                "##,
            )
            .page("http://a.com/about", "about");

        let (_, ledger, fetcher) = crawl(&test_config(&dir), fetcher, &["a.com"]).await;

        assert_eq!(ledger.count_pages(), 1);
        assert_eq!(fetcher.requested(), vec!["http://a.com/".to_string()]);
    }

    #[tokio::test]
    async fn test_classifies_each_type() {
        let dir = TempDir::new().unwrap();
        let fetcher = FakeFetcher::default()
            .page(
                "http://a.com/",
                r#"
                <a href="privacy.html">Privacy Policy</a>
                <a href="/legal/impressum">Impressum</a>
                <a href="/agb">AGB</a>
                <a href="/kontakt">Kontakt</a>
                "#,
            )
            .page("http://a.com/privacy.html", "p")
            .page("http://a.com/legal/impressum", "i")
            .page("http://a.com/agb", "t")
            .page("http://a.com/kontakt", "c");

        let (_, ledger, _) = crawl(&test_config(&dir), fetcher, &["a.com"]).await;

        for page_type in [
            PageType::Index,
            PageType::Privacy,
            PageType::Imprint,
            PageType::Terms,
            PageType::Contact,
        ] {
            assert_eq!(
                ledger.count_pages_for_domain_of_type("a.com", page_type),
                1,
                "{:?}",
                page_type
            );
        }
    }

    #[tokio::test]
    async fn test_root_relative_rewrite_applies() {
        let dir = TempDir::new().unwrap();
        let fetcher = FakeFetcher::default()
            .with(
                "http://a.com/",
                FakePage::Redirect {
                    to: "http://a.com/de/start/",
                    body: r#"<a href="datenschutz">Datenschutz</a>"#.to_string(),
                }
            )
            .page("http://a.com/datenschutz", "p");

        let (_, ledger, fetcher) = crawl(&test_config(&dir), fetcher, &["a.com"]).await;

        assert!(ledger.already_visited("http://a.com/datenschutz"));
        assert_eq!(fetcher.requested().len(), 2);
    }

    #[tokio::test]
    async fn test_literal_resolution_when_configured() {
        let dir = TempDir::new().unwrap();
        let mut config = test_config(&dir);
        config.crawler.relative_links = RelativeLinkStrategy::Literal;
        let fetcher = FakeFetcher::default()
            .with(
                "http://a.com/",
                FakePage::Redirect {
                    to: "http://a.com/de/start/",
                    body: r#"<a href="datenschutz">Datenschutz</a>"#.to_string(),
                }
            )
            .page("http://a.com/de/start/datenschutz", "p");

        let (_, ledger, _) = crawl(&config, fetcher, &["a.com"]).await;

        assert!(ledger.already_visited("http://a.com/de/start/datenschutz"));
    }

    #[tokio::test]
    async fn test_page_budget_enforced() {
        let dir = TempDir::new().unwrap();
        let mut config = test_config(&dir);
        config.crawler.page_budget = 3;
        let fetcher = FakeFetcher::default()
            .page(
                "http://a.com/",
                r#"
                <a href="/privacy">Privacy</a>
                <a href="/impressum">Impressum</a>
                <a href="/agb">AGB</a>
                <a href="/kontakt">Kontakt</a>
                <a href="/datenschutz">Datenschutz</a>
                "#,
            )
            .page("http://a.com/privacy", "p")
            .page("http://a.com/impressum", "i")
            .page("http://a.com/agb", "t")
            .page("http://a.com/kontakt", "c")
            .page("http://a.com/datenschutz", "d")
            .page("http://b.com/", r#"<a href="/agb">AGB</a>"#)
            .page("http://b.com/agb", "t");

        let (_, ledger, fetcher) = crawl(&config, fetcher, &["a.com", "b.com"]).await;

        assert_eq!(ledger.count_pages_for_domain("a.com"), 3);
        assert_eq!(ledger.count_pages_for_domain("b.com"), 2);
        let fetched_a = fetcher
            .requested()
            .into_iter()
            .filter(|url| url.starts_with("http://a.com"))
            .count();
        assert_eq!(fetched_a, 3);
    }

    #[tokio::test]
    async fn test_budget_of_one_keeps_index_only() {
        let dir = TempDir::new().unwrap();
        let mut config = test_config(&dir);
        config.crawler.page_budget = 1;
        let fetcher = FakeFetcher::default()
            .page("http://a.com/", r#"<a href="/privacy">Privacy</a>"#)
            .page("http://a.com/privacy", "p");

        let (_, ledger, fetcher) = crawl(&config, fetcher, &["a.com"]).await;

        assert_eq!(ledger.count_pages(), 1);
        assert_eq!(fetcher.requested().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicates_fetched_once() {
        let dir = TempDir::new().unwrap();
        let fetcher = FakeFetcher::default()
            .page(
                "http://a.com/",
                r#"
                <a href="/privacy">Privacy</a>
                <a href="/privacy#cookies">Privacy &amp; Cookies</a>
                <a href="http://a.com/privacy">Datenschutz</a>
                <a href="/">Kontakt</a>
                "#,
            )
            .page("http://a.com/privacy", "p");

        let (_, ledger, fetcher) = crawl(&test_config(&dir), fetcher, &["a.com", "a.com"]).await;

        assert_eq!(ledger.count_pages(), 2);
        assert_eq!(
            fetcher.requested(),
            vec!["http://a.com/".to_string(), "http://a.com/privacy".to_string()]
        );
    }

    #[tokio::test]
    async fn test_original_domain_survives_redirect() {
        let dir = TempDir::new().unwrap();
        let fetcher = FakeFetcher::default()
            .with(
                "http://a.com/",
                FakePage::Redirect {
                    to: "https://www.a.com/",
                    body: r#"<a href="https://www.a.com/impressum">Impressum</a>"#.to_string(),
                }
            )
            .page("https://www.a.com/impressum", "i");

        let (_, ledger, _) = crawl(&test_config(&dir), fetcher, &["a.com"]).await;

        let records = ledger.records();
        assert_eq!(records.len(), 2);
        for record in &records {
            assert_eq!(record.original_domain, "a.com");
            assert_eq!(record.actual_host, "www.a.com");
        }
    }

    #[tokio::test]
    async fn test_fetch_failures_are_not_fatal() {
        let dir = TempDir::new().unwrap();
        let fetcher = FakeFetcher::default()
            .page(
                "http://a.com/",
                r#"<a href="/privacy">Privacy</a><a href="/kontakt">Kontakt</a>"#,
            )
            .with("http://a.com/privacy", FakePage::Status(404))
            .page("http://a.com/kontakt", "c");

        let (result, ledger, _) =
            crawl(&test_config(&dir), fetcher, &["a.com", "unreachable.example"]).await;

        assert_eq!(result.unwrap(), CrawlSummary { domains: 1, pages: 2 });
        assert!(!ledger.already_visited("http://a.com/privacy"));
        assert!(ledger.already_visited("http://a.com/kontakt"));
    }

    #[tokio::test]
    async fn test_timeout_is_transient() {
        let dir = TempDir::new().unwrap();
        let mut config = test_config(&dir);
        config.crawler.request_timeout = 100;
        let fetcher = FakeFetcher::default()
            .page("http://a.com/", r#"<a href="/agb">AGB</a>"#)
            .with("http://a.com/agb", FakePage::Slow);

        let (result, ledger, _) = crawl(&config, fetcher, &["a.com"]).await;

        assert!(result.is_ok());
        assert_eq!(ledger.count_pages(), 1);
    }

    #[tokio::test]
    async fn test_non_html_not_parsed() {
        let dir = TempDir::new().unwrap();
        let fetcher = FakeFetcher::default()
            .with("http://a.com/", FakePage::Binary(r#"<a href="/privacy">Privacy</a>"#))
            .page("http://a.com/privacy", "p");

        let (_, ledger, _) = crawl(&test_config(&dir), fetcher, &["a.com"]).await;

        assert_eq!(ledger.count_pages(), 1);
    }

    #[tokio::test]
    async fn test_invalid_target_skipped() {
        let dir = TempDir::new().unwrap();
        let fetcher = FakeFetcher::default().page("http://a.com/", "home");

        let (result, ledger, fetcher) =
            crawl(&test_config(&dir), fetcher, &["exa mple.com", "a.com"]).await;

        assert!(result.is_ok());
        assert_eq!(ledger.count_pages(), 1);
        assert_eq!(fetcher.requested(), vec!["http://a.com/".to_string()]);
    }

    #[tokio::test]
    async fn test_storage_failure_is_fatal() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let config = test_config(&dir);
        let ledger = Arc::new(Ledger::create(config.ledger_path()).unwrap());
        let mut content_config = config.clone();
        content_config.output.directory = blocker;

        let fetcher = Arc::new(FakeFetcher::default().page("http://a.com/", "home"));
        let coordinator = Coordinator::new(&content_config, Arc::clone(&ledger), fetcher);

        let result = coordinator.run(&["a.com".to_string()]).await;

        assert!(matches!(result, Err(CrawlError::Storage(_))));
        assert_eq!(ledger.count_pages(), 0);
    }

    #[tokio::test]
    async fn test_ledger_flushed_at_end() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let fetcher = FakeFetcher::default()
            .page("http://a.com/", r#"<a href="/kontakt">Kontakt</a>"#)
            .page("http://a.com/kontakt", "c");

        let (_, ledger, _) = crawl(&config, fetcher, &["a.com"]).await;

        let reloaded = Ledger::open(config.ledger_path()).unwrap();
        assert_eq!(reloaded.records(), ledger.records());
    }
}
