//! Stage 1: discover releases and download their artifacts.

use std::path::Path;

use metascoop_core::util::format_bytes_approx;
use metascoop_core::{ArtifactRecord, ArtifactRecords, RepoIdentity, TrackedApp, select_release};
use metascoop_provider::{ProviderRegistry, ReleaseProvider};

use crate::fetch::{FetchOutcome, fetch_artifact};
use crate::group::LogGroup;

/// Tally of one acquisition pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcquireReport {
    pub had_errors: bool,
    pub accepted: usize,
    pub downloaded: usize,
    pub already_present: usize,
}

/// Run acquisition for every tracked app, in order.
pub fn acquire_all(
    apps: &[TrackedApp],
    providers: &dyn ProviderRegistry,
    repo_dir: &Path,
    records: &mut ArtifactRecords,
) -> AcquireReport {
    let mut report = AcquireReport::default();

    for app in apps {
        println!("App: {}/{}", app.author(), app.name());

        let repo = match RepoIdentity::from_url(&app.git_url) {
            Ok(repo) => repo,
            Err(e) => {
                log::error!("Error while getting repo info from URL {:?}: {}", app.git_url, e);
                report.had_errors = true;
                continue;
            }
        };

        acquire_app(app, providers.provider(repo.host), &repo, repo_dir, records, &mut report);
    }

    report
}

/// Acquire every qualifying release of one app.
///
/// Errors are logged and recorded in `report`; they never stop the pass.
pub fn acquire_app(
    app: &TrackedApp,
    provider: &dyn ReleaseProvider,
    repo: &RepoIdentity,
    repo_dir: &Path,
    records: &mut ArtifactRecords,
    report: &mut AcquireReport,
) {
    log::info!("Looking up {}", repo);
    let app = match provider.repository(repo) {
        Ok(None) => {
            log::warn!("Repository {} not found on {}", repo.full_name(), repo.host);
            app.clone()
        }
        Ok(Some(facts)) => {
            let app = app.with_repository_facts(&facts);
            log::info!(
                "Data from {}: summary={:?}, license={:?}",
                repo.host,
                app.summary,
                app.license
            );
            app
        }
        Err(e) => {
            log::error!("Error while looking up repo {}: {}", repo.full_name(), e);
            report.had_errors = true;
            return;
        }
    };

    let releases = match provider.releases(repo) {
        Ok(releases) => releases,
        Err(e) => {
            log::error!("Error while listing repo releases for {:?}: {}", app.git_url, e);
            report.had_errors = true;
            return;
        }
    };
    log::info!("Received {} releases", releases.len());

    for release in &releases {
        let _group = LogGroup::start(format_args!("Release {}", release.tag));

        let selection = match select_release(app.name(), release) {
            Ok(selection) => selection,
            Err(reason) => {
                log::info!("Skipping release {:?}: {}", release.tag, reason);
                continue;
            }
        };

        log::info!("Working on release with tag name {:?}", release.tag);
        log::info!("Target artifact name: {}", selection.artifact_name);

        let record = ArtifactRecord::new(&app, &selection.artifact_name, release);
        if !record.release_notes.is_empty() {
            log::info!("Release notes: {}", record.release_notes);
        }
        records.insert(record);
        report.accepted += 1;

        let target = repo_dir.join(&selection.artifact_name);
        match fetch_artifact(&target, || provider.download_asset(repo, selection.asset)) {
            Ok(FetchOutcome::AlreadyPresent) => {
                log::info!(
                    "Already have artifact for version {:?} at {}",
                    release.tag,
                    target.display()
                );
                report.already_present += 1;
            }
            Ok(FetchOutcome::Downloaded { bytes }) => {
                log::info!(
                    "Downloaded {:?} from release {:?} to {} ({})",
                    selection.asset.name,
                    release.tag,
                    target.display(),
                    format_bytes_approx(bytes)
                );
                report.downloaded += 1;
            }
            Err(e) => {
                log::error!(
                    "Error while downloading {:?} (asset id {}) from release {:?} to {}: {}",
                    app.git_url,
                    selection.asset.id,
                    release.tag,
                    target.display(),
                    e
                );
                report.had_errors = true;
            }
        }
    }
}
