use crate::classify::PageType;
use url::Url;

/// Link discovery only runs on pages shallower than this
pub const MAX_DEPTH: u32 = 1;

/// Metadata that travels with a request and comes back with its response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Seed domain this request is budgeted against
    pub original_domain: String,

    /// What the page is expected to be
    pub page_type: PageType,

    /// Hops from the seed page
    pub depth: u32,
}

impl RequestContext {
    /// Context of the index request for a seed domain
    pub fn seed(original_domain: impl Into<String>) -> Self {
        Self {
            original_domain: original_domain.into(),
            page_type: PageType::Index,
            depth: 0,
        }
    }

    /// Context of a request for a link found on this context's page
    pub fn follow_up(&self, page_type: PageType) -> Self {
        Self {
            original_domain: self.original_domain.clone(),
            page_type,
            depth: self.depth + 1,
        }
    }

    /// Whether links on this context's page should be inspected
    pub fn discovers_links(&self) -> bool {
        self.depth < MAX_DEPTH
    }
}

/// A URL to fetch plus its context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: Url,
    pub context: RequestContext,
}

impl FetchRequest {
    pub fn new(url: Url, context: RequestContext) -> Self {
        Self { url, context }
    }

    pub fn is_seed(&self) -> bool {
        self.context.depth == 0
    }
}
