use std::path::{Path, PathBuf};

use metascoop_catalog::{CatalogError, harvest_from_git};

/// Source of a package's screenshots.
pub trait ScreenshotHarvester {
    /// Replace the contents of `dest` with the screenshots of `source_url`.
    fn harvest(&self, source_url: &str, dest: &Path) -> Result<Vec<PathBuf>, CatalogError>;
}

/// Harvests from a shallow git clone of the upstream repository.
pub struct GitHarvester;

impl ScreenshotHarvester for GitHarvester {
    fn harvest(&self, source_url: &str, dest: &Path) -> Result<Vec<PathBuf>, CatalogError> {
        harvest_from_git(source_url, dest)
    }
}
