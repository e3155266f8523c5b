//! Catalog-side half of metascoop.
//!
//! Reads the published index, reconciles per-package metadata stubs with
//! upstream facts, harvests screenshots from source trees, regenerates the
//! README listing, and decides whether a run produced a publishable change.

pub mod changes;
pub mod error;
pub mod index;
pub mod listing;
pub mod reconcile;
pub mod screenshots;
pub mod stub;

pub use changes::{Significance, assess, first_difference, worktree_changes};
pub use error::CatalogError;
pub use index::{CatalogIndex, INDEX_FILE_NAME, IndexApp, PackageVersion};
pub use listing::regenerate_readme;
pub use reconcile::{StubState, classify, reconcile_stub, set_conservative};
pub use screenshots::{
    SourceClone, discover_screenshots, harvest_from_git, place_screenshots, screenshot_dir,
};
pub use stub::{MetadataStub, list_stubs};
