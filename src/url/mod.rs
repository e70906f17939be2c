//! URL handling module
//!
//! This module turns the hrefs found on a fetched page into crawlable URLs
//! and decides which anchors are worth looking at:
//! - href cleanup and resolution (with the root-relative rewrite)
//! - external-link detection
//! - anchor text sanitizing and followability
//! - seed URL construction and host extraction

mod domain;
mod resolve;
mod text;

// Re-export main functions
pub use domain::{extract_domain, seed_url};
pub use resolve::{is_external, resolve_link, RelativeLinkStrategy};
pub use text::{is_followable_text, sanitize_text};
