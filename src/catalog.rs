//! Slide catalog: the fixed, ordered onboarding pages.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize, Serializer};
use std::fs;
use std::path::Path;
use tracing::debug;

/// A single onboarding page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlidePage {
    /// Opaque reference to the animation or image shown on the page
    pub asset: String,
    /// Page title
    pub title: String,
    /// Page body text
    pub description: String,
}

impl SlidePage {
    /// Create a page from its parts
    #[must_use]
    pub fn new(
        asset: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            asset: asset.into(),
            title: title.into(),
            description: description.into(),
        }
    }
}

const BUILTIN_FIRST: (&str, &str, &str) = (
    "intro_welcome.json",
    "Welcome",
    "A fast, private browser that puts you in control.",
);

const BUILTIN_REST: &[(&str, &str, &str)] = &[
    (
        "intro_privacy.json",
        "Private by default",
        "Trackers are blocked automatically while you browse.",
    ),
    (
        "intro_sync.json",
        "Pick up where you left off",
        "Sync tabs, bookmarks and passwords across your devices.",
    ),
    (
        "intro_toolbar.json",
        "Make it yours",
        "Move the toolbar and choose a theme that suits you.",
    ),
    (
        "intro_ready.json",
        "You're all set",
        "Start browsing. You can revisit these tips from Settings.",
    ),
];

/// Immutable, non-empty ordered list of [`SlidePage`]s.
///
/// The first page is held apart from the rest so a catalog can never be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideCatalog {
    first: SlidePage,
    rest: Vec<SlidePage>,
}

impl SlideCatalog {
    /// Build a catalog from pages
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCatalog`] if `pages` is empty
    pub fn new(pages: Vec<SlidePage>) -> Result<Self> {
        let mut pages = pages.into_iter();
        let first = pages.next().ok_or(Error::EmptyCatalog)?;
        Ok(Self {
            first,
            rest: pages.collect(),
        })
    }

    /// The catalog shipped with the application
    #[must_use]
    pub fn builtin() -> Self {
        let (asset, title, description) = BUILTIN_FIRST;
        Self {
            first: SlidePage::new(asset, title, description),
            rest: BUILTIN_REST
                .iter()
                .map(|(asset, title, description)| SlidePage::new(*asset, *title, *description))
                .collect(),
        }
    }

    /// Load a catalog from a JSON array of pages
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or holds no pages
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog from {}", path.display()))?;
        let pages: Vec<SlidePage> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse catalog from {}", path.display()))?;
        debug!(pages = pages.len(), path = %path.display(), "Loaded slide catalog");
        Ok(Self::new(pages)?)
    }

    /// Number of pages, always at least one
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.rest.len() + 1
    }

    /// Index of the final page
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.rest.len()
    }

    /// The first page, which always exists
    #[must_use]
    pub const fn first(&self) -> &SlidePage {
        &self.first
    }

    /// Look up a page by index
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `index >= page_count()`
    pub fn page_at(&self, index: usize) -> Result<&SlidePage> {
        let page = match index.checked_sub(1) {
            None => Some(&self.first),
            Some(rest_index) => self.rest.get(rest_index),
        };
        page.ok_or(Error::OutOfRange {
            index,
            page_count: self.page_count(),
        })
    }

    /// Iterate over pages in order
    pub fn iter(&self) -> impl Iterator<Item = &SlidePage> {
        std::iter::once(&self.first).chain(self.rest.iter())
    }
}

impl Serialize for SlideCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl Default for SlideCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
