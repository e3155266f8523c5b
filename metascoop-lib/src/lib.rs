//! Orchestration for metascoop runs.
//!
//! A run acquires release artifacts from upstream hosts, drives the catalog
//! tool, reconciles metadata stubs, and reports whether anything worth
//! publishing changed.

pub mod acquire;
pub mod cleanup;
pub mod error;
pub mod fetch;
pub mod group;
pub mod harvest;
pub mod pipeline;
pub mod settings;
pub mod tool;

pub use acquire::{AcquireReport, acquire_all, acquire_app};
pub use cleanup::PendingCleanup;
pub use error::PipelineError;
pub use fetch::{FetchError, FetchOutcome, fetch_artifact};
pub use group::LogGroup;
pub use harvest::{GitHarvester, ScreenshotHarvester};
pub use pipeline::{Pipeline, RunConfig, RunOutcome};
pub use settings::Settings;
pub use tool::{CatalogTool, FdroidTool, SkippedTool};
