//! Configuration module
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file, and reading the seed domain list.
//!
//! # Example
//!
//! ```no_run
//! use compliance_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawler.toml")).unwrap();
//! println!("Pages per domain: {}", config.crawler.page_budget);
//! ```

mod parser;
mod targets;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use targets::{collect_targets, load_targets, parse_targets};
pub use validation::validate;
