//! Statistics generation from a visit ledger
//!
//! This module provides functionality for extracting and displaying
//! crawl statistics from the storage layer.

use crate::classify::PageType;
use crate::storage::VisitQueries;
use std::collections::{BTreeMap, BTreeSet};

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Total number of saved pages
    pub total_pages: usize,

    /// Number of seed domains with at least one saved page
    pub unique_domains: usize,

    /// Count of pages by type
    pub pages_by_type: BTreeMap<PageType, usize>,

    /// Seed domains for which no privacy statement was saved
    pub domains_without_privacy: Vec<String>,
}

/// Loads statistics from a ledger
pub fn load_statistics(ledger: &dyn VisitQueries) -> CrawlStatistics {
    let records = ledger.records();

    let mut pages_by_type = BTreeMap::new();
    for record in &records {
        *pages_by_type.entry(record.page_type).or_insert(0) += 1;
    }

    let domains: BTreeSet<&str> = records
        .iter()
        .map(|r| r.original_domain.as_str())
        .collect();
    let domains_without_privacy = domains
        .iter()
        .filter(|domain| ledger.count_pages_for_domain_of_type(domain, PageType::Privacy) == 0)
        .map(|domain| domain.to_string())
        .collect();

    CrawlStatistics {
        total_pages: records.len(),
        unique_domains: domains.len(),
        pages_by_type,
        domains_without_privacy,
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Total pages saved: {}", stats.total_pages);
    println!("  Unique domains: {}", stats.unique_domains);
    println!();

    println!("Pages by Type:");
    for page_type in PageType::ALL {
        let count = stats.pages_by_type.get(&page_type).copied().unwrap_or(0);
        if count == 0 {
            continue;
        }
        let percentage = if stats.total_pages > 0 {
            (count as f64 / stats.total_pages as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}: {} ({:.1}%)", page_type, count, percentage);
    }
    println!();

    if !stats.domains_without_privacy.is_empty() {
        println!(
            "Domains Without Privacy Statement ({}):",
            stats.domains_without_privacy.len()
        );
        for domain in &stats.domains_without_privacy {
            println!("  - {}", domain);
        }
        println!();
    }

    let covered = stats.unique_domains - stats.domains_without_privacy.len();
    let coverage = if stats.unique_domains > 0 {
        (covered as f64 / stats.unique_domains as f64) * 100.0
    } else {
        0.0
    };

    println!(
        "Privacy Coverage: {:.1}% ({} / {} domains)",
        coverage, covered, stats.unique_domains
    );
}
