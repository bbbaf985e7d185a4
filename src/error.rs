//! Error types for the onboarding controller.

use std::path::PathBuf;

/// Errors raised by the catalog, the flag store and the navigator.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An index outside `[0, page_count)` was requested.
    #[error("Page index {index} is out of range for a catalog of {page_count} pages")]
    OutOfRange {
        /// The rejected index.
        index: usize,
        /// Number of pages in the catalog.
        page_count: usize,
    },

    /// The persisted flag store could not be read or written.
    #[error("Flag store unavailable at {}", .path.display())]
    StoreUnavailable {
        /// Location of the store that failed.
        path: PathBuf,
        /// Underlying I/O or parse failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A catalog was built with no pages.
    #[error("Slide catalog must contain at least one page")]
    EmptyCatalog,

    /// An input token could not be parsed.
    #[error("Invalid input '{0}': expected next, back, skip or page=<n>")]
    InvalidInput(String),
}

impl Error {
    pub(crate) fn store(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::StoreUnavailable {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Whether this error came from the persisted flag store.
    #[must_use]
    pub const fn is_store_unavailable(&self) -> bool {
        matches!(self, Self::StoreUnavailable { .. })
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
