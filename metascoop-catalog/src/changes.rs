//! Deciding whether a run changed the catalog in a publishable way.

use std::path::Path;

use git2::{Repository, StatusOptions};
use serde_json::Value;

use crate::error::CatalogError;
use crate::index::CatalogIndex;

/// Paths the catalog tool rewrites on every run.
const VOLATILE_PATHS: &[&str] = &["$.repo.timestamp"];

/// Marker for generated index files in the working tree.
const INDEX_MARKER: &str = "index";

/// Outcome of the end-of-run significance check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Significance {
    /// The index content differs at `path`.
    Index { path: String },
    /// The index is unchanged but `file` changed in the working tree.
    Files { file: String },
    None,
}

impl Significance {
    pub fn is_significant(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// First JSON path at which `before` and `after` differ.
///
/// Object keys are walked in `before`'s order, then keys only present in
/// `after`. Volatile paths such as `$.repo.timestamp` are ignored.
pub fn first_difference(before: &Value, after: &Value) -> Option<String> {
    diff_at("$".to_string(), before, after)
}

fn diff_at(path: String, before: &Value, after: &Value) -> Option<String> {
    if VOLATILE_PATHS.contains(&path.as_str()) {
        return None;
    }

    match (before, after) {
        (Value::Object(a), Value::Object(b)) => {
            for (key, va) in a {
                let child = object_path(&path, key);
                match b.get(key) {
                    Some(vb) => {
                        if let Some(found) = diff_at(child, va, vb) {
                            return Some(found);
                        }
                    }
                    None if !VOLATILE_PATHS.contains(&child.as_str()) => return Some(child),
                    None => {}
                }
            }
            b.keys()
                .filter(|key| !a.contains_key(*key))
                .map(|key| object_path(&path, key))
                .find(|child| !VOLATILE_PATHS.contains(&child.as_str()))
        }
        (Value::Array(a), Value::Array(b)) => {
            for (i, (va, vb)) in a.iter().zip(b).enumerate() {
                if let Some(found) = diff_at(format!("{path}[{i}]"), va, vb) {
                    return Some(found);
                }
            }
            (a.len() != b.len()).then(|| format!("{path}[{}]", a.len().min(b.len())))
        }
        _ => (before != after).then_some(path),
    }
}

fn object_path(parent: &str, key: &str) -> String {
    let plain = !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if plain {
        format!("{parent}.{key}")
    } else {
        format!("{parent}[{key:?}]")
    }
}

/// First changed file that is not a generated index file.
pub fn first_significant_file(changed: &[String]) -> Option<&str> {
    changed
        .iter()
        .map(String::as_str)
        .find(|f| !f.contains(INDEX_MARKER))
}

/// Changed and untracked files under `dir`, relative to the repository root.
pub fn worktree_changes(dir: &Path) -> Result<Vec<String>, CatalogError> {
    let repo = Repository::discover(dir)
        .map_err(|e| CatalogError::git(format!("opening repository at {}", dir.display()), e))?;
    let workdir = repo
        .workdir()
        .ok_or_else(|| {
            CatalogError::git(
                "listing working tree changes",
                git2::Error::from_str("bare repository has no working tree"),
            )
        })?;

    let mut opts = StatusOptions::new();
    opts.include_untracked(true)
        .recurse_untracked_dirs(true)
        .include_ignored(false);

    let canonical = dir.canonicalize().map_err(|e| CatalogError::io(dir, e))?;
    let workdir = workdir.canonicalize().map_err(|e| CatalogError::io(workdir, e))?;
    if let Ok(rel) = canonical.strip_prefix(&workdir)
        && !rel.as_os_str().is_empty()
    {
        opts.pathspec(rel);
    }

    let statuses = repo
        .statuses(Some(&mut opts))
        .map_err(|e| CatalogError::git("listing working tree changes", e))?;

    Ok(statuses
        .iter()
        .filter(|s| !s.status().is_ignored())
        .filter_map(|s| s.path().map(str::to_string))
        .collect())
}

/// Decide significance from index snapshots, consulting the working tree
/// only when the index content is unchanged.
pub fn assess(
    before: &CatalogIndex,
    after: &CatalogIndex,
    changed_files: impl FnOnce() -> Result<Vec<String>, CatalogError>,
) -> Result<Significance, CatalogError> {
    if let Some(path) = first_difference(before.raw(), after.raw()) {
        return Ok(Significance::Index { path });
    }
    let changed = changed_files()?;
    Ok(match first_significant_file(&changed) {
        Some(file) => Significance::Files {
            file: file.to_string(),
        },
        None => Significance::None,
    })
}

#[cfg(test)]
#[path = "tests/changes_tests.rs"]
mod tests;
