//! Idempotent, atomic artifact download.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use metascoop_provider::ProviderError;

/// What happened when an artifact was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A file already exists at the target path; nothing was fetched.
    AlreadyPresent,
    Downloaded { bytes: u64 },
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Writing {path}: {source}")]
    Write { path: String, source: io::Error },
}

/// Temporary sibling used while a download is in flight.
pub fn temp_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Materialize an artifact at `target` unless something is already there.
///
/// `open` is only called when a download is needed.
pub fn fetch_artifact<F>(target: &Path, open: F) -> Result<FetchOutcome, FetchError>
where
    F: FnOnce() -> Result<Box<dyn Read + Send>, ProviderError>,
{
    if target.exists() {
        return Ok(FetchOutcome::AlreadyPresent);
    }

    let mut body = open()?;
    let bytes = write_atomically(target, &mut body).map_err(|e| FetchError::Write {
        path: target.display().to_string(),
        source: e,
    })?;
    Ok(FetchOutcome::Downloaded { bytes })
}

/// Stream `reader` into `target + ".tmp"`, then rename onto `target`.
///
/// On any failure the temporary file is removed and `target` is untouched.
pub fn write_atomically(target: &Path, reader: &mut dyn Read) -> io::Result<u64> {
    let tmp = temp_path(target);
    let result = stream_to(&tmp, reader).and_then(|n| std::fs::rename(&tmp, target).map(|()| n));
    if result.is_err() {
        let _ = std::fs::remove_file(&tmp);
    }
    result
}

fn stream_to(path: &Path, reader: &mut dyn Read) -> io::Result<u64> {
    let mut file = File::create(path)?;
    let written = io::copy(reader, &mut file)?;
    file.flush()?;
    file.sync_all()?;
    Ok(written)
}

#[cfg(test)]
#[path = "tests/fetch_tests.rs"]
mod tests;
