//! The external catalog tool (`fdroid update`).

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::PipelineError;

/// Arguments for the pass that creates stubs for new artifacts.
pub const CREATE_STUBS_ARGS: &[&str] = &["update", "--pretty", "--create-metadata", "--delete-unknown"];

/// Arguments for the pass that regenerates the final index.
pub const FINALIZE_ARGS: &[&str] = &["update", "--pretty", "--delete-unknown"];

/// The two catalog-generation passes of a run.
pub trait CatalogTool {
    /// Create metadata stubs for new artifacts and drop stale ones.
    fn create_stubs(&self) -> Result<(), PipelineError>;

    /// Regenerate the index from the reconciled stubs.
    fn finalize(&self) -> Result<(), PipelineError>;
}

/// Runs `fdroid` (or a configured replacement) as a subprocess.
pub struct FdroidTool {
    command: String,
    work_dir: PathBuf,
}

impl FdroidTool {
    /// The tool runs in the directory that contains `repo_dir`.
    pub fn new(command: impl Into<String>, repo_dir: &Path) -> Self {
        Self {
            command: command.into(),
            work_dir: parent_dir(repo_dir),
        }
    }

    fn run(&self, args: &[&str]) -> Result<(), PipelineError> {
        let display = format!("{} {}", self.command, args.join(" "));
        log::info!("Running {:?} in {}", display, self.work_dir.display());

        let status = Command::new(&self.command)
            .args(args)
            .current_dir(&self.work_dir)
            .status()
            .map_err(|e| PipelineError::tool_spawn(&display, e))?;

        if !status.success() {
            return Err(PipelineError::tool_failed(display, status));
        }
        Ok(())
    }
}

impl CatalogTool for FdroidTool {
    fn create_stubs(&self) -> Result<(), PipelineError> {
        self.run(CREATE_STUBS_ARGS)
    }

    fn finalize(&self) -> Result<(), PipelineError> {
        self.run(FINALIZE_ARGS)
    }
}

/// Stands in for the catalog tool in debug runs.
pub struct SkippedTool;

impl CatalogTool for SkippedTool {
    fn create_stubs(&self) -> Result<(), PipelineError> {
        log::warn!("Debug mode: not creating metadata stubs");
        Ok(())
    }

    fn finalize(&self) -> Result<(), PipelineError> {
        log::warn!("Debug mode: not regenerating the index");
        Ok(())
    }
}

/// Parent of `path`, or `.` when it has none.
pub(crate) fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
