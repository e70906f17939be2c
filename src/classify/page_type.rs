use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Well-known page types a crawl looks for
///
/// The identifier (`as_str`) is what ends up in content paths and in the
/// ledger's `pageType` field; the label is for humans.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    #[default]
    Unknown,
    Index,
    Privacy,
    Terms,
    Contact,
    Imprint,
}

impl PageType {
    /// All page types, in declaration order
    pub const ALL: [PageType; 6] = [
        Self::Unknown,
        Self::Index,
        Self::Privacy,
        Self::Terms,
        Self::Contact,
        Self::Imprint,
    ];

    /// Stable machine-readable identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Index => "index",
            Self::Privacy => "privacy",
            Self::Terms => "terms",
            Self::Contact => "contact",
            Self::Imprint => "imprint",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown page",
            Self::Index => "Index page",
            Self::Privacy => "Privacy statement",
            Self::Terms => "Terms page",
            Self::Contact => "Contact page",
            Self::Imprint => "Imprint",
        }
    }

    /// Returns true for the types that are worth following from an index page
    pub fn is_followable(&self) -> bool {
        !matches!(self, Self::Unknown | Self::Index)
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|page_type| page_type.as_str() == s)
            .ok_or_else(|| format!("unknown page type identifier '{}'", s))
    }
}
