//! Release filtering and asset selection.

use std::fmt;

use crate::artifact::artifact_filename;
use crate::release::{Asset, Release};

/// File extension of an installable artifact.
pub const ARTIFACT_EXTENSION: &str = ".apk";

/// Why a release was not taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Prerelease,
    Draft,
    EmptyTag,
    NoMatchingAsset,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Prerelease => "prerelease",
            Self::Draft => "draft",
            Self::EmptyTag => "empty tag",
            Self::NoMatchingAsset => "no matching asset",
        })
    }
}

/// The asset chosen from a qualifying release and its local file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<'a> {
    pub asset: &'a Asset,
    pub artifact_name: String,
}

/// Decide whether `release` yields an artifact for `app_name`.
///
/// Prerelease, draft and empty-tag releases are rejected in that order.
/// Otherwise the first asset (in provider order) whose name ends with
/// [`ARTIFACT_EXTENSION`] is selected.
pub fn select_release<'a>(app_name: &str, release: &'a Release) -> Result<Selection<'a>, Rejection> {
    if release.prerelease {
        return Err(Rejection::Prerelease);
    }
    if release.draft {
        return Err(Rejection::Draft);
    }
    if release.tag.is_empty() {
        return Err(Rejection::EmptyTag);
    }

    let asset = release
        .assets
        .iter()
        .find(|a| a.name.ends_with(ARTIFACT_EXTENSION))
        .ok_or(Rejection::NoMatchingAsset)?;

    Ok(Selection {
        asset,
        artifact_name: artifact_filename(app_name, &release.tag),
    })
}

#[cfg(test)]
#[path = "tests/selector_tests.rs"]
mod tests;
