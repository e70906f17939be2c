use crate::classify::PageType;
use crate::storage::{write_atomically, StorageError, StorageResult};
use std::path::{Path, PathBuf};

/// File name of every saved page
const PAGE_FILE: &str = "index.html";

/// Makes an operator-supplied string usable as a single path component
fn path_component(raw: &str) -> String {
    let component: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | ':') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if component.chars().all(|c| c == '.') {
        "_".to_string()
    } else {
        component
    }
}

/// Builds the relative content path of a page
///
/// `ordinal` is 1-based; the first page of a type has no ordinal directory.
///
/// # Examples
///
/// ```
/// use compliance_crawler::classify::PageType;
/// use compliance_crawler::storage::content_path;
///
/// assert_eq!(content_path("a.com", PageType::Privacy, 1), "a.com/privacy/index.html");
/// assert_eq!(content_path("a.com", PageType::Privacy, 2), "a.com/privacy/2/index.html");
/// ```
pub fn content_path(domain: &str, page_type: PageType, ordinal: u32) -> String {
    let domain = path_component(domain);
    if ordinal <= 1 {
        format!("{}/{}/{}", domain, page_type.as_str(), PAGE_FILE)
    } else {
        format!("{}/{}/{}/{}", domain, page_type.as_str(), ordinal, PAGE_FILE)
    }
}

/// Writes fetched page bodies below an output directory
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Saves a page body and returns its path relative to the root
    ///
    /// Parent directories are created as needed. Writing the same path twice
    /// silently replaces the earlier file.
    pub fn save(
        &self,
        domain: &str,
        page_type: PageType,
        ordinal: u32,
        body: &[u8],
    ) -> StorageResult<String> {
        let relative = content_path(domain, page_type, ordinal);
        let file_path = self.root.join(&relative);

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StorageError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        write_atomically(&file_path, body)?;
        tracing::debug!("Saved {} bytes to {}", body.len(), file_path.display());

        Ok(relative)
    }
}
