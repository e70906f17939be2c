//! Storage traits and error types
//!
//! This module defines the read-side interface shared by ledger
//! implementations and the error type of the storage layer.

use crate::classify::PageType;
use crate::storage::VisitRecord;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Read-only queries over the pages visited in a run
///
/// All counts are consistent with completed writes.
pub trait VisitQueries {
    /// Total number of recorded pages
    fn count_pages(&self) -> usize;

    /// Number of distinct seed domains with at least one recorded page
    fn count_domains(&self) -> usize;

    /// Number of pages recorded for a seed domain
    fn count_pages_for_domain(&self, domain: &str) -> usize;

    /// Number of pages of one type recorded for a seed domain
    fn count_pages_for_domain_of_type(&self, domain: &str, page_type: PageType) -> usize;

    /// Returns true if `url` was already recorded
    fn already_visited(&self, url: &str) -> bool;

    /// Snapshot of all records, in append order
    fn records(&self) -> Vec<VisitRecord>;
}
