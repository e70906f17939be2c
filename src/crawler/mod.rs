//! Crawler module for fetching and processing compliance pages
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `Fetcher` seam
//! - HTML anchor extraction
//! - Per-host concurrency limiting
//! - Overall crawl coordination

mod context;
mod coordinator;
mod fetcher;
mod limiter;
mod parser;

pub use context::{FetchRequest, RequestContext, MAX_DEPTH};
pub use coordinator::{Coordinator, CrawlSummary};
pub use fetcher::{build_http_client, fetch_url, FetchResult, Fetcher, HttpFetcher};
pub use limiter::HostLimiter;
pub use parser::{extract_anchors, is_html, Anchor};

use crate::config::Config;
use crate::CrawlError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Create the output directory and an empty ledger
/// 2. Build the HTTP client
/// 3. Fetch the index page of every target
/// 4. Follow the classified links found there
/// 5. Flush the ledger and report totals
pub async fn crawl(config: &Config, targets: &[String]) -> Result<CrawlSummary, CrawlError> {
    Coordinator::from_config(config)?.run(targets).await
}
