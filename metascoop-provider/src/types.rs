//! Native provider response shapes and their normalization into the shared
//! [`Release`] / [`Asset`] model.

use chrono::{DateTime, Utc};
use metascoop_core::{Asset, Release, RepositoryFacts};
use serde::Deserialize;

// -- GitHub and Gitea share the same release schema --

#[derive(Debug, Deserialize)]
pub struct HostedRelease {
    #[serde(default)]
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub prerelease: bool,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assets: Vec<HostedAsset>,
}

#[derive(Debug, Deserialize)]
pub struct HostedAsset {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub download_count: u64,
    #[serde(default)]
    pub browser_download_url: String,
}

impl From<HostedRelease> for Release {
    fn from(r: HostedRelease) -> Self {
        Release {
            tag: r.tag_name,
            title: r.name.unwrap_or_default(),
            body: r.body.unwrap_or_default(),
            prerelease: r.prerelease,
            draft: r.draft,
            published_at: r.published_at,
            assets: r.assets.into_iter().map(Asset::from).collect(),
        }
    }
}

impl From<HostedAsset> for Asset {
    fn from(a: HostedAsset) -> Self {
        Asset {
            id: a.id,
            name: a.name,
            download_count: a.download_count,
            download_url: a.browser_download_url,
        }
    }
}

// -- GitHub --

#[derive(Debug, Deserialize)]
pub struct GitHubRepo {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub license: Option<GitHubLicense>,
}

#[derive(Debug, Deserialize)]
pub struct GitHubLicense {
    #[serde(default)]
    pub spdx_id: Option<String>,
}

impl From<GitHubRepo> for RepositoryFacts {
    fn from(r: GitHubRepo) -> Self {
        // GitHub reports unrecognised licenses as NOASSERTION
        let license = r
            .license
            .and_then(|l| l.spdx_id)
            .filter(|id| id != "NOASSERTION")
            .unwrap_or_default();
        RepositoryFacts {
            description: r.description.unwrap_or_default(),
            license,
        }
    }
}

// -- Gitea / Codeberg --

#[derive(Debug, Deserialize)]
pub struct GiteaRepo {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub licenses: Vec<String>,
}

impl From<GiteaRepo> for RepositoryFacts {
    fn from(r: GiteaRepo) -> Self {
        RepositoryFacts {
            description: r.description,
            license: r.licenses.into_iter().next().unwrap_or_default(),
        }
    }
}

// -- GitLab --

#[derive(Debug, Deserialize)]
pub struct GitLabProject {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub license: Option<GitLabLicense>,
}

#[derive(Debug, Deserialize)]
pub struct GitLabLicense {
    #[serde(default)]
    pub key: String,
}

impl From<GitLabProject> for RepositoryFacts {
    fn from(p: GitLabProject) -> Self {
        RepositoryFacts {
            description: p.description.unwrap_or_default(),
            license: p
                .license
                .map(|l| spdx_from_gitlab_key(&l.key))
                .unwrap_or_default(),
        }
    }
}

/// GitLab reports lowercase license keys; map the common ones to SPDX.
pub fn spdx_from_gitlab_key(key: &str) -> String {
    let spdx = match key {
        "mit" => "MIT",
        "apache-2.0" => "Apache-2.0",
        "gpl-2.0" => "GPL-2.0-only",
        "gpl-3.0" => "GPL-3.0-only",
        "agpl-3.0" => "AGPL-3.0-only",
        "lgpl-2.1" => "LGPL-2.1-only",
        "lgpl-3.0" => "LGPL-3.0-only",
        "mpl-2.0" => "MPL-2.0",
        "bsd-2-clause" => "BSD-2-Clause",
        "bsd-3-clause" => "BSD-3-Clause",
        "isc" => "ISC",
        "unlicense" => "Unlicense",
        "other" => "",
        other => other,
    };
    spdx.to_string()
}

#[derive(Debug, Deserialize)]
pub struct GitLabTag {
    pub name: String,
    #[serde(default)]
    pub commit: Option<GitLabCommit>,
    #[serde(default)]
    pub release: Option<GitLabTagRelease>,
}

#[derive(Debug, Deserialize)]
pub struct GitLabCommit {
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct GitLabTagRelease {
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GitLabRelease {
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub released_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub upcoming_release: bool,
    #[serde(default)]
    pub assets: GitLabAssets,
}

#[derive(Debug, Default, Deserialize)]
pub struct GitLabAssets {
    #[serde(default)]
    pub links: Vec<GitLabLink>,
}

#[derive(Debug, Deserialize)]
pub struct GitLabLink {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub direct_asset_url: Option<String>,
}

/// Join GitLab tags with their release records.
///
/// Tags drive the order. A tag without a release record becomes a release
/// with no assets, which the selector rejects later.
pub fn merge_gitlab_tags(tags: Vec<GitLabTag>, mut releases: Vec<GitLabRelease>) -> Vec<Release> {
    tags.into_iter()
        .map(|tag| {
            let record = releases
                .iter()
                .position(|r| r.tag_name == tag.name)
                .map(|i| releases.swap_remove(i));
            let tag_created = tag.commit.and_then(|c| c.created_at);
            let tag_notes = tag.release.and_then(|r| r.description);

            match record {
                Some(r) => Release {
                    title: r.name.unwrap_or_else(|| tag.name.clone()),
                    body: r.description.or(tag_notes).unwrap_or_default(),
                    prerelease: r.upcoming_release,
                    draft: false,
                    published_at: r.released_at.or(tag_created),
                    assets: r
                        .assets
                        .links
                        .into_iter()
                        .map(|link| Asset {
                            id: link.id,
                            name: link.name,
                            download_count: 0,
                            download_url: link.direct_asset_url.unwrap_or(link.url),
                        })
                        .collect(),
                    tag: tag.name,
                },
                None => Release {
                    title: tag.name.clone(),
                    body: tag_notes.unwrap_or_default(),
                    published_at: tag_created,
                    tag: tag.name,
                    ..Default::default()
                },
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
