use std::io::Read;

use metascoop_core::{Asset, Host, Release, RepoIdentity, RepositoryFacts};

use crate::client::ApiClient;
use crate::error::ProviderError;
use crate::provider::ReleaseProvider;
use crate::types::{GitHubRepo, HostedRelease};

const API_BASE: &str = "https://api.github.com";
const PAGE_SIZE: usize = 100;

/// GitHub REST v3 releases.
pub struct GitHubProvider {
    client: ApiClient,
    api_base: String,
}

impl GitHubProvider {
    pub fn new(client: ApiClient) -> Self {
        Self::with_api_base(client, API_BASE)
    }

    /// Point the provider at another API root, such as a self-hosted instance.
    pub fn with_api_base(client: ApiClient, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    fn repo_url(&self, repo: &RepoIdentity) -> String {
        format!("{}/repos/{}/{}", self.api_base, repo.author, repo.name)
    }
}

impl ReleaseProvider for GitHubProvider {
    fn host(&self) -> Host {
        Host::GitHub
    }

    fn repository(&self, repo: &RepoIdentity) -> Result<Option<RepositoryFacts>, ProviderError> {
        let facts = self.client.get_json::<GitHubRepo>(&self.repo_url(repo), true)?;
        Ok(facts.map(RepositoryFacts::from))
    }

    fn releases(&self, repo: &RepoIdentity) -> Result<Vec<Release>, ProviderError> {
        let url = format!("{}/releases", self.repo_url(repo));
        let native: Vec<HostedRelease> = self.client.get_all_pages(&url, "per_page", PAGE_SIZE, true)?;
        Ok(native.into_iter().map(Release::from).collect())
    }

    fn download_asset(
        &self,
        repo: &RepoIdentity,
        asset: &Asset,
    ) -> Result<Box<dyn Read + Send>, ProviderError> {
        let url = format!("{}/releases/assets/{}", self.repo_url(repo), asset.id);
        let resp = self
            .client
            .download(&url, Some("application/octet-stream"), true)?;
        Ok(Box::new(resp))
    }
}
