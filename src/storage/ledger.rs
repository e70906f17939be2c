//! Visit ledger
//!
//! The ledger is the durable list of every page saved during a run. It is
//! shared by all fetch tasks: appends take the write lock for the whole
//! ordinal + content + append + persist sequence, queries take the read lock.

use crate::classify::PageType;
use crate::storage::content::content_path;
use crate::storage::{write_atomically, StorageError, StorageResult, VisitQueries};
use crate::url::extract_domain;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use url::Url;

/// One saved page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    /// Seed domain the page was requested for
    #[serde(rename = "originalDomain")]
    pub original_domain: String,

    /// Host the page was actually served from (differs after redirects)
    #[serde(rename = "actualDomain")]
    pub actual_host: String,

    #[serde(rename = "pageType")]
    pub page_type: PageType,

    /// Absolute URL of the page
    pub url: String,

    /// Path of the saved body, relative to the output directory
    #[serde(rename = "htmlFilePath")]
    pub content_path: String,
}

/// On-disk shape of the ledger
#[derive(Debug, Serialize, Deserialize)]
struct LedgerDocument<R> {
    #[serde(rename = "crawledPages")]
    crawled_pages: R,
}

/// Durable, append-only record of the pages visited in a run
#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    records: RwLock<Vec<VisitRecord>>,
}

impl Ledger {
    /// Creates an empty ledger for a new run
    ///
    /// The parent directory is created and an empty document is written
    /// immediately, replacing any ledger a previous run left at `path`.
    pub fn create(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StorageError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let ledger = Self {
            path,
            records: RwLock::new(Vec::new()),
        };
        ledger.flush()?;
        Ok(ledger)
    }

    /// Loads a ledger a previous run persisted
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        let content = std::fs::read(&path).map_err(|source| StorageError::Read {
            path: path.clone(),
            source,
        })?;
        let document: LedgerDocument<Vec<VisitRecord>> = serde_json::from_slice(&content)?;

        Ok(Self {
            path,
            records: RwLock::new(document.crawled_pages),
        })
    }

    /// Location of the persisted document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends a record and persists the ledger
    ///
    /// The content path is derived from the number of pages of this type
    /// already recorded for the domain; nothing is written besides the ledger.
    pub fn record(
        &self,
        original_domain: &str,
        url: &Url,
        page_type: PageType,
    ) -> StorageResult<VisitRecord> {
        self.record_with(original_domain, url, page_type, |ordinal| {
            Ok(content_path(original_domain, page_type, ordinal))
        })
    }

    /// Appends a record whose content is written by `write_content`
    ///
    /// `write_content` receives the 1-based ordinal of the page within its
    /// (domain, type) group and returns the relative content path. It runs
    /// under the write lock, so ordinals never collide. If it fails nothing
    /// is recorded.
    ///
    /// Once the record is appended it stays in memory even if persisting the
    /// ledger fails; the error is logged and returned.
    ///
    /// The body write and the ledger persist both sync to disk while the
    /// lock is held, so appends are serialized across all domains. Per-host
    /// fetch concurrency is unaffected; only the storage step queues.
    pub fn record_with<F>(
        &self,
        original_domain: &str,
        url: &Url,
        page_type: PageType,
        write_content: F,
    ) -> StorageResult<VisitRecord>
    where
        F: FnOnce(u32) -> StorageResult<String>,
    {
        let mut records = self.write_records();

        let ordinal = count_of_type(&records, original_domain, page_type) as u32 + 1;
        let content_path = write_content(ordinal)?;

        let record = VisitRecord {
            original_domain: original_domain.to_string(),
            actual_host: extract_domain(url).unwrap_or_default(),
            page_type,
            url: url.to_string(),
            content_path,
        };
        records.push(record.clone());

        if let Err(e) = self.persist(&records) {
            tracing::error!(
                "Failed to persist ledger {} after recording {}: {}",
                self.path.display(),
                record.url,
                e
            );
            return Err(e);
        }

        Ok(record)
    }

    /// Writes the current records to disk
    pub fn flush(&self) -> StorageResult<()> {
        let records = self.write_records();
        self.persist(&records)
    }

    fn persist(&self, records: &[VisitRecord]) -> StorageResult<()> {
        let document = LedgerDocument {
            crawled_pages: records,
        };
        let json = serde_json::to_vec_pretty(&document)?;
        write_atomically(&self.path, &json)
    }

    fn read_records(&self) -> RwLockReadGuard<'_, Vec<VisitRecord>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_records(&self) -> RwLockWriteGuard<'_, Vec<VisitRecord>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn count_of_type(records: &[VisitRecord], domain: &str, page_type: PageType) -> usize {
    records
        .iter()
        .filter(|r| r.original_domain == domain && r.page_type == page_type)
        .count()
}

impl VisitQueries for Ledger {
    fn count_pages(&self) -> usize {
        self.read_records().len()
    }

    fn count_domains(&self) -> usize {
        self.read_records()
            .iter()
            .map(|r| r.original_domain.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    fn count_pages_for_domain(&self, domain: &str) -> usize {
        self.read_records()
            .iter()
            .filter(|r| r.original_domain == domain)
            .count()
    }

    fn count_pages_for_domain_of_type(&self, domain: &str, page_type: PageType) -> usize {
        count_of_type(&self.read_records(), domain, page_type)
    }

    fn already_visited(&self, url: &str) -> bool {
        self.read_records().iter().any(|r| r.url == url)
    }

    fn records(&self) -> Vec<VisitRecord> {
        self.read_records().clone()
    }
}
