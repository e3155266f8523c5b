//! Hosting-provider clients for metascoop.
//!
//! Each supported host (GitHub, GitLab, Codeberg) implements
//! [`ReleaseProvider`], normalizing its native API responses into the shared
//! release model from `metascoop-core`.

pub mod client;
pub mod codeberg;
pub mod credentials;
pub mod error;
pub mod github;
pub mod gitlab;
pub mod provider;
pub mod types;

pub use client::{API_TIMEOUT, ApiClient, DEFAULT_DOWNLOAD_TIMEOUT};
pub use credentials::{TokenSource, resolve_token};
pub use error::ProviderError;
pub use provider::{Provider, ProviderRegistry, Providers, ReleaseProvider};
