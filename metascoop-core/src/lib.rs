//! Shared data model for metascoop.
//!
//! Tracked apps, repository identities, normalized releases, the release
//! selector, and the artifact record map that links downloaded files back to
//! the app and release that produced them.

pub mod app;
pub mod artifact;
pub mod error;
pub mod release;
pub mod repo;
pub mod selector;
pub mod util;

pub use app::{TrackedApp, load_apps};
pub use artifact::{ArtifactRecord, ArtifactRecords, artifact_filename};
pub use error::CoreError;
pub use release::{Asset, Release, RepositoryFacts};
pub use repo::{Host, RepoIdentity};
pub use selector::{ARTIFACT_EXTENSION, Rejection, Selection, select_release};
