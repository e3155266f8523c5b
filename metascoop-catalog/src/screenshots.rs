//! Harvesting screenshots from an app's upstream source tree.

use std::io;
use std::path::{Component, Path, PathBuf};

use git2::build::RepoBuilder;
use git2::{AutotagOption, FetchOptions};
use serde::Deserialize;
use tempfile::TempDir;

use crate::error::CatalogError;

/// Files at the clone root that may declare screenshots, in lookup order.
pub const DECLARATION_FILES: &[&str] = &[".metascoop.yml", "metascoop.yml"];

/// Screenshot directory used by fastlane-structured Android projects.
pub const FASTLANE_SCREENSHOTS: &str = "fastlane/metadata/android/en-US/images/phoneScreenshots";

/// A shallow clone in a temporary directory. Removed on drop.
pub struct SourceClone {
    dir: TempDir,
}

impl SourceClone {
    /// Clone `url` at depth 1.
    pub fn shallow(url: &str) -> Result<Self, CatalogError> {
        let dir = tempfile::Builder::new()
            .prefix("metascoop-clone-")
            .tempdir()
            .map_err(|e| CatalogError::io(&std::env::temp_dir(), e))?;

        let mut fetch_options = FetchOptions::new();
        fetch_options.download_tags(AutotagOption::None);
        fetch_options.depth(1);

        let mut builder = RepoBuilder::new();
        builder.fetch_options(fetch_options);
        builder
            .clone(url, dir.path())
            .map_err(|e| CatalogError::git(format!("cloning {url}"), e))?;

        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

#[derive(Debug, Default, Deserialize)]
struct Declaration {
    #[serde(default)]
    screenshots: Vec<String>,
}

/// Find the screenshots declared in a source tree.
///
/// A declaration file at the root wins. Without one, the fastlane phone
/// screenshot directory is listed in file-name order. Declared paths that
/// are absolute or climb out of `root` are skipped.
pub fn discover_screenshots(root: &Path) -> Result<Vec<PathBuf>, CatalogError> {
    for name in DECLARATION_FILES {
        let path = root.join(name);
        if !path.is_file() {
            continue;
        }
        let text = std::fs::read_to_string(&path).map_err(|e| CatalogError::io(&path, e))?;
        let decl: Declaration = if text.trim().is_empty() {
            Declaration::default()
        } else {
            serde_yml::from_str(&text).map_err(|e| CatalogError::stub(&path, e))?
        };

        log::debug!("Using screenshot declaration {}", path.display());
        return Ok(decl
            .screenshots
            .iter()
            .filter_map(|entry| match contained_path(entry) {
                Some(rel) => Some(root.join(rel)),
                None => {
                    log::warn!("Invalid: screenshot path {:?} leaves the source tree", entry);
                    None
                }
            })
            .collect());
    }

    let fastlane = root.join(FASTLANE_SCREENSHOTS);
    if !fastlane.is_dir() {
        return Ok(Vec::new());
    }
    let mut entries: Vec<_> = std::fs::read_dir(&fastlane)
        .map_err(|e| CatalogError::io(&fastlane, e))?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_ok_and(|t| t.is_file()))
        .collect();
    entries.sort_by_key(|e| e.file_name());
    Ok(entries.into_iter().map(|e| e.path()).collect())
}

/// Relative path with no root, prefix, or `..` components.
fn contained_path(entry: &str) -> Option<&Path> {
    let path = Path::new(entry);
    let ok = !entry.is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    ok.then_some(path)
}

/// `<metadata>/<package>/en-US/phoneScreenshots`
pub fn screenshot_dir(metadata_dir: &Path, package: &str) -> PathBuf {
    metadata_dir
        .join(package)
        .join("en-US")
        .join("phoneScreenshots")
}

/// Replace `dest` with the given files, numbered `1.<ext>`, `2.<ext>`, ...
///
/// Entries without an extension are skipped and do not consume a number.
/// Any existing contents of `dest` are removed first. Returns the written
/// paths in order.
pub fn place_screenshots(sources: &[PathBuf], dest: &Path) -> Result<Vec<PathBuf>, CatalogError> {
    match std::fs::remove_dir_all(dest) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(CatalogError::io(dest, e)),
    }

    let mut written = Vec::new();
    for source in sources {
        let Some(ext) = source.extension().and_then(|e| e.to_str()) else {
            log::warn!(
                "Invalid: screenshot file extension is empty for {}",
                source.display()
            );
            continue;
        };

        let target = dest.join(format!("{}.{}", written.len() + 1, ext));
        std::fs::create_dir_all(dest).map_err(|e| CatalogError::io(dest, e))?;
        move_file(source, &target).map_err(|e| {
            CatalogError::screenshot(format!(
                "moving {} to {}: {e}",
                source.display(),
                target.display()
            ))
        })?;

        log::info!("Wrote screenshot to {}", target.display());
        written.push(target);
    }
    Ok(written)
}

/// Clone `source_url`, discover its screenshots, and place them in `dest`.
///
/// The clone is removed before this returns, whatever the outcome.
pub fn harvest_from_git(source_url: &str, dest: &Path) -> Result<Vec<PathBuf>, CatalogError> {
    log::info!("Cloning git repository to search for screenshots");
    let clone = SourceClone::shallow(source_url)?;

    let declared = discover_screenshots(clone.path())?;
    log::info!("Found {} screenshots", declared.len());

    place_screenshots(&declared, dest)
}

/// Rename, falling back to copy-and-delete across filesystems.
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match std::fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            std::fs::copy(from, to)?;
            std::fs::remove_file(from)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
#[path = "tests/screenshots_tests.rs"]
mod tests;
