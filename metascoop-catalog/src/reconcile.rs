//! Merging upstream facts into metadata stubs.

use std::path::{Path, PathBuf};

use metascoop_core::util::truncate_chars;
use metascoop_core::{ArtifactRecord, ArtifactRecords};
use serde_yml::Value;

use crate::error::CatalogError;
use crate::index::{CatalogIndex, PackageVersion};
use crate::stub::MetadataStub;

/// Placeholder the catalog tool writes for fields nobody has filled in.
pub const UNKNOWN: &str = "Unknown";

/// Longest summary the catalog accepts.
pub const MAX_SUMMARY_CHARS: usize = 80;

/// Set `key` to `value` if the value is non-empty or the stub still holds
/// the [`UNKNOWN`] placeholder. Returns whether the stub was changed.
pub fn set_conservative(stub: &mut MetadataStub, key: &str, value: &str) -> bool {
    if value.is_empty() && stub.get_str(key) != Some(UNKNOWN) {
        return false;
    }
    stub.set(key, Value::String(value.to_string()));
    log::info!("Set {} to {:?}", key, value);
    true
}

/// Apply a record's upstream facts and the latest published version to a stub.
pub fn apply_upstream(stub: &mut MetadataStub, record: &ArtifactRecord, latest: &PackageVersion) {
    set_conservative(stub, "AuthorName", &record.author);
    set_conservative(stub, "Name", record.display_name());
    set_conservative(stub, "SourceCode", &record.source_url);
    set_conservative(stub, "License", &record.license);
    set_conservative(stub, "Description", &record.description);

    let summary = truncate_chars(&record.summary, MAX_SUMMARY_CHARS);
    if summary != record.summary {
        log::info!("Truncated summary to {} characters", MAX_SUMMARY_CHARS);
    }
    set_conservative(stub, "Summary", &summary);

    if !record.categories.is_empty() {
        stub.set(
            "Categories",
            Value::Sequence(record.categories.iter().cloned().map(Value::String).collect()),
        );
    }
    if !record.anti_features.is_empty() {
        stub.set("AntiFeatures", Value::String(record.anti_features.join(",")));
    }

    stub.set("CurrentVersion", Value::String(latest.version_name.clone()));
    stub.set("CurrentVersionCode", Value::Number(latest.version_code.into()));
    log::info!(
        "Set current version info to versionName={:?}, versionCode={}",
        latest.version_name,
        latest.version_code
    );
}

/// What a stub can be reconciled against.
#[derive(Debug)]
pub enum StubState<'a> {
    /// The package is not in the index.
    NoIndexEntry,
    /// The package is published but this run did not produce its artifact.
    NoArtifactRecord { latest: &'a PackageVersion },
    Ready {
        latest: &'a PackageVersion,
        record: &'a ArtifactRecord,
    },
}

/// Look up the index entry and artifact record for `package`.
pub fn classify<'a>(
    package: &str,
    index: &'a CatalogIndex,
    records: &'a ArtifactRecords,
) -> StubState<'a> {
    let Some(latest) = index.find_latest_package(package) else {
        return StubState::NoIndexEntry;
    };
    match records.get(&latest.artifact_filename) {
        Some(record) => StubState::Ready { latest, record },
        None => StubState::NoArtifactRecord { latest },
    }
}

/// `<metadata>/<package>/en-US/changelogs/<versionCode>.txt`
pub fn changelog_path(metadata_dir: &Path, package: &str, version_code: u64) -> PathBuf {
    metadata_dir
        .join(package)
        .join("en-US")
        .join("changelogs")
        .join(format!("{version_code}.txt"))
}

/// Write release notes verbatim. Returns the path, or `None` when there are
/// no notes to write.
pub fn write_changelog(
    metadata_dir: &Path,
    package: &str,
    version_code: u64,
    notes: &str,
) -> Result<Option<PathBuf>, CatalogError> {
    if notes.is_empty() {
        return Ok(None);
    }
    let path = changelog_path(metadata_dir, package, version_code);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| CatalogError::io(parent, e))?;
    }
    std::fs::write(&path, notes).map_err(|e| CatalogError::io(&path, e))?;
    Ok(Some(path))
}

/// Merge upstream facts into the stub at `stub_path`, write it, then write
/// the changelog.
pub fn reconcile_stub(
    stub_path: &Path,
    metadata_dir: &Path,
    latest: &PackageVersion,
    record: &ArtifactRecord,
) -> Result<(), CatalogError> {
    let mut stub = MetadataStub::read(stub_path)?;
    apply_upstream(&mut stub, record, latest);
    stub.write()?;
    log::info!("Updated metadata file {}", stub_path.display());

    if let Some(path) = write_changelog(
        metadata_dir,
        &latest.package_name,
        latest.version_code,
        &record.release_notes,
    )? {
        log::info!("Wrote release notes to {}", path.display());
    }
    Ok(())
}
