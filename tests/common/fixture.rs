//! Test fixture for an isolated preferences file

use std::path::{Path, PathBuf};

use firstrun::{JsonFileStore, SlideCatalog, SlidePage};
use tempfile::TempDir;

/// Build a catalog with `pages` numbered slides.
pub fn catalog_of(pages: usize) -> Result<SlideCatalog, firstrun::Error> {
    SlideCatalog::new(
        (0..pages)
            .map(|i| {
                SlidePage::new(
                    format!("slide_{i}.json"),
                    format!("Slide {i}"),
                    format!("Description {i}"),
                )
            })
            .collect(),
    )
}

/// Temporary directory holding a preferences file, removed on drop.
pub struct TestFixture {
    /// Temporary directory containing the preferences file
    temp_dir: TempDir,
    /// Path to the preferences file
    pub store_path: PathBuf,
}

impl TestFixture {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let store_path = temp_dir.path().join("prefs").join("preferences.json");
        Ok(Self {
            temp_dir,
            store_path,
        })
    }

    /// A fresh handle on the preferences file, as a newly started process would open it.
    pub fn store(&self) -> JsonFileStore {
        JsonFileStore::new(&self.store_path)
    }

    /// Root of the temporary directory
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }
}
