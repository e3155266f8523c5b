use std::io::Read;

use metascoop_core::{Asset, Host, Release, RepoIdentity, RepositoryFacts};

use crate::client::ApiClient;
use crate::codeberg::CodebergProvider;
use crate::error::ProviderError;
use crate::github::GitHubProvider;
use crate::gitlab::GitLabProvider;

/// Read-only access to a hosting provider's repository and release data.
pub trait ReleaseProvider {
    /// Which host this provider serves.
    fn host(&self) -> Host;

    /// Repository description and license. A repository the host does not
    /// know yields `Ok(None)`.
    fn repository(&self, repo: &RepoIdentity) -> Result<Option<RepositoryFacts>, ProviderError>;

    /// All releases in provider order. A missing listing yields an empty list.
    fn releases(&self, repo: &RepoIdentity) -> Result<Vec<Release>, ProviderError>;

    /// Open the asset body for streaming.
    fn download_asset(
        &self,
        repo: &RepoIdentity,
        asset: &Asset,
    ) -> Result<Box<dyn Read + Send>, ProviderError>;
}

/// A provider selected by host.
pub enum Provider {
    GitHub(GitHubProvider),
    GitLab(GitLabProvider),
    Codeberg(CodebergProvider),
}

impl Provider {
    pub fn for_host(host: Host, client: ApiClient) -> Self {
        match host {
            Host::GitHub => Self::GitHub(GitHubProvider::new(client)),
            Host::GitLab => Self::GitLab(GitLabProvider::new(client)),
            Host::Codeberg => Self::Codeberg(CodebergProvider::new(client)),
        }
    }

    fn inner(&self) -> &dyn ReleaseProvider {
        match self {
            Self::GitHub(p) => p,
            Self::GitLab(p) => p,
            Self::Codeberg(p) => p,
        }
    }
}

impl ReleaseProvider for Provider {
    fn host(&self) -> Host {
        self.inner().host()
    }

    fn repository(&self, repo: &RepoIdentity) -> Result<Option<RepositoryFacts>, ProviderError> {
        self.inner().repository(repo)
    }

    fn releases(&self, repo: &RepoIdentity) -> Result<Vec<Release>, ProviderError> {
        self.inner().releases(repo)
    }

    fn download_asset(
        &self,
        repo: &RepoIdentity,
        asset: &Asset,
    ) -> Result<Box<dyn Read + Send>, ProviderError> {
        self.inner().download_asset(repo, asset)
    }
}

/// Maps a host to the provider that serves it.
pub trait ProviderRegistry {
    fn provider(&self, host: Host) -> &dyn ReleaseProvider;
}

/// One provider per host, built on a shared client.
pub struct Providers {
    github: Provider,
    gitlab: Provider,
    codeberg: Provider,
}

impl Providers {
    pub fn new(client: ApiClient) -> Self {
        Self {
            github: Provider::for_host(Host::GitHub, client.clone()),
            gitlab: Provider::for_host(Host::GitLab, client.clone()),
            codeberg: Provider::for_host(Host::Codeberg, client),
        }
    }
}

impl ProviderRegistry for Providers {
    fn provider(&self, host: Host) -> &dyn ReleaseProvider {
        match host {
            Host::GitHub => &self.github,
            Host::GitLab => &self.gitlab,
            Host::Codeberg => &self.codeberg,
        }
    }
}
