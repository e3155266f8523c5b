//! One complete sync run.

use std::path::{Path, PathBuf};

use metascoop_catalog::{
    CatalogIndex, INDEX_FILE_NAME, Significance, StubState, assess, classify, list_stubs,
    reconcile_stub, regenerate_readme, screenshot_dir, worktree_changes,
};
use metascoop_core::{ArtifactRecords, load_apps};
use metascoop_provider::ProviderRegistry;

use crate::acquire::acquire_all;
use crate::cleanup::PendingCleanup;
use crate::error::PipelineError;
use crate::group::LogGroup;
use crate::harvest::ScreenshotHarvester;
use crate::tool::{CatalogTool, parent_dir};

/// Paths for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub apps_file: PathBuf,
    /// The catalog's `repo` directory holding artifacts and the index
    pub repo_dir: PathBuf,
    pub readme_path: PathBuf,
}

impl RunConfig {
    /// Config with the README at `<repo_dir>/../../README.md`.
    pub fn new(apps_file: impl Into<PathBuf>, repo_dir: impl Into<PathBuf>) -> Self {
        let repo_dir = repo_dir.into();
        let readme_path = parent_dir(&parent_dir(&repo_dir)).join("README.md");
        Self {
            apps_file: apps_file.into(),
            repo_dir,
            readme_path,
        }
    }

    pub fn with_readme(mut self, readme_path: impl Into<PathBuf>) -> Self {
        self.readme_path = readme_path.into();
        self
    }

    /// Directory containing `repo/` and `metadata/`.
    pub fn catalog_dir(&self) -> PathBuf {
        parent_dir(&self.repo_dir)
    }

    pub fn index_path(&self) -> PathBuf {
        self.repo_dir.join(INDEX_FILE_NAME)
    }

    pub fn metadata_dir(&self) -> PathBuf {
        self.catalog_dir().join("metadata")
    }
}

/// Result of a run that was not aborted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Whether any per-item error occurred
    pub had_errors: bool,
    pub significance: Significance,
}

impl RunOutcome {
    /// `1` if anything failed, else `2` if nothing significant changed,
    /// else `0`.
    pub fn exit_code(&self) -> u8 {
        if self.had_errors {
            1
        } else if !self.significance.is_significant() {
            2
        } else {
            0
        }
    }
}

/// Everything a run talks to.
pub struct Pipeline<'a> {
    pub config: &'a RunConfig,
    pub providers: &'a dyn ProviderRegistry,
    pub tool: &'a dyn CatalogTool,
    pub harvester: &'a dyn ScreenshotHarvester,
}

impl Pipeline<'_> {
    /// Run all stages. Per-item failures are logged and reflected in
    /// [`RunOutcome::had_errors`]; anything returned as `Err` aborted the run.
    pub fn run(&self) -> Result<RunOutcome, PipelineError> {
        let config = self.config;
        let index_path = config.index_path();

        let (apps, initial_index) = {
            let _group = LogGroup::start("Initializing");
            let apps = load_apps(&config.apps_file)?;
            log::info!("Loaded {} apps from {}", apps.len(), config.apps_file.display());

            std::fs::create_dir_all(&config.repo_dir)
                .map_err(|e| PipelineError::io(&config.repo_dir, e))?;
            let index = CatalogIndex::read(&index_path)?;
            (apps, index)
        };

        let mut records = ArtifactRecords::new();
        let report = acquire_all(&apps, self.providers, &config.repo_dir, &mut records);
        log::info!(
            "Accepted {} releases: {} downloaded, {} already present",
            report.accepted,
            report.downloaded,
            report.already_present
        );
        let mut had_errors = report.had_errors;

        {
            let _group = LogGroup::start("F-Droid: Creating metadata stubs");
            self.tool.create_stubs()?;
        }

        println!("Filling in metadata");
        let index = CatalogIndex::read(&index_path)?;
        let mut cleanup = PendingCleanup::new();
        had_errors |= self.reconcile_all(&index, &records, &mut cleanup)?;

        {
            let _group = LogGroup::start("F-Droid: Reading updated metadata");
            self.tool.finalize()?;
        }

        let _group = LogGroup::start("Assessing changes");
        let final_index = CatalogIndex::read(&index_path)?;

        let removed = cleanup.run()?;
        log::debug!("Removed {} staged directories", removed);

        regenerate_readme(&config.readme_path, &final_index)?;

        let catalog_dir = config.catalog_dir();
        let significance = assess(&initial_index, &final_index, || worktree_changes(&catalog_dir))?;
        match &significance {
            Significance::Index { path } => log::info!(
                "The index {} had a significant change at JSON path {:?}",
                index_path.display(),
                path
            ),
            Significance::Files { file } => {
                log::info!("The index files didn't change significantly");
                log::info!("File {:?} is a significant change", file);
            }
            Significance::None => log::info!(
                "It doesn't look like there were any relevant changes, neither to the index file nor any file tracked by git"
            ),
        }

        Ok(RunOutcome {
            had_errors,
            significance,
        })
    }

    /// Stage 2 over every stub. Returns whether any package failed.
    fn reconcile_all(
        &self,
        index: &CatalogIndex,
        records: &ArtifactRecords,
        cleanup: &mut PendingCleanup,
    ) -> Result<bool, PipelineError> {
        let metadata_dir = self.config.metadata_dir();
        let mut had_errors = false;

        for stub_path in list_stubs(&metadata_dir)? {
            let package = package_of(&stub_path);
            let _group = LogGroup::start(package);
            log::info!("Working on {:?}", package);

            let (latest, record) = match classify(package, index, records) {
                StubState::NoIndexEntry => {
                    log::debug!("{} is not in the index", package);
                    continue;
                }
                StubState::NoArtifactRecord { latest } => {
                    log::info!("Cannot find artifact info for {:?}", latest.artifact_filename);
                    continue;
                }
                StubState::Ready { latest, record } => (latest, record),
            };
            log::info!(
                "The latest version is {:?} with versionCode {}",
                latest.version_name,
                latest.version_code
            );

            if let Err(e) = reconcile_stub(&stub_path, &metadata_dir, latest, record) {
                log::error!("Reconciling {}: {}", stub_path.display(), e);
                had_errors = true;
                continue;
            }

            let dest = screenshot_dir(&metadata_dir, &latest.package_name);
            cleanup.stage(&dest);
            if let Err(e) = self.harvester.harvest(&record.source_url, &dest) {
                log::error!("Harvesting screenshots from {:?}: {}", record.source_url, e);
                had_errors = true;
            }
        }

        Ok(had_errors)
    }
}

fn package_of(stub_path: &Path) -> &str {
    stub_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
}
