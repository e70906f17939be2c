//! Storage module for persisting crawl results
//!
//! This module handles everything written to disk during a crawl:
//! - The visit ledger (`crawler.json`) listing every saved page
//! - The content store holding one HTML file per saved page

mod content;
mod ledger;
mod traits;

pub use content::{content_path, ContentStore};
pub use ledger::{Ledger, VisitRecord};
pub use traits::{StorageError, StorageResult, VisitQueries};

use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Writes `bytes` to a temporary sibling of `path` and renames it into place
///
/// Readers see either the previous file or the complete new one.
pub(crate) fn write_atomically(path: &Path, bytes: &[u8]) -> StorageResult<()> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_path = path.with_file_name(format!(
        ".{}.{}.{}.tmp",
        file_name,
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));

    let write_err = |source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    };

    let result = std::fs::File::create(&temp_path)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .and_then(|()| std::fs::rename(&temp_path, path));

    if let Err(e) = result {
        let _ = std::fs::remove_file(&temp_path);
        return Err(write_err(e));
    }

    Ok(())
}
