use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Facts about an upstream repository that feed catalog metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryFacts {
    pub description: String,
    /// SPDX-style license identifier, empty when unknown
    pub license: String,
}

/// One downloadable file attached to a release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: u64,
    pub name: String,
    pub download_count: u64,
    /// Direct download URL; providers that download by id may leave this empty
    pub download_url: String,
}

/// One upstream release or tag, normalized across providers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub tag: String,
    pub title: String,
    /// Release notes
    pub body: String,
    pub prerelease: bool,
    pub draft: bool,
    pub published_at: Option<DateTime<Utc>>,
    /// Assets in the order the provider returned them
    pub assets: Vec<Asset>,
}
