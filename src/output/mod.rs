//! Output module for reporting crawl results
//!
//! This module handles:
//! - Computing statistics over a visit ledger
//! - Printing them for the `--stats` mode

pub mod stats;

pub use stats::{load_statistics, print_statistics, CrawlStatistics};
