use std::path::{Path, PathBuf};

use crate::error::PipelineError;

/// Directories to delete once the final catalog pass has run.
#[derive(Debug, Default)]
pub struct PendingCleanup {
    paths: Vec<PathBuf>,
}

impl PendingCleanup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if !self.paths.contains(&path) {
            self.paths.push(path);
        }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Remove every staged directory. Paths that are already gone are fine;
    /// any other failure stops the run.
    pub fn run(self) -> Result<usize, PipelineError> {
        let mut removed = 0;
        for path in &self.paths {
            if remove_tree(path)? {
                removed += 1;
            }
        }
        Ok(removed)
    }
}

fn remove_tree(path: &Path) -> Result<bool, PipelineError> {
    match std::fs::remove_dir_all(path) {
        Ok(()) => {
            log::debug!("Removed {}", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(PipelineError::io(path, e)),
    }
}
