use std::io::Read;

use metascoop_core::{Asset, Host, Release, RepoIdentity, RepositoryFacts};

use crate::client::ApiClient;
use crate::error::ProviderError;
use crate::provider::ReleaseProvider;
use crate::types::{GiteaRepo, HostedRelease};

const API_BASE: &str = "https://codeberg.org/api/v1";
const PAGE_SIZE: usize = 50;

/// Codeberg (Gitea v1 API) releases.
pub struct CodebergProvider {
    client: ApiClient,
    api_base: String,
}

impl CodebergProvider {
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

impl ReleaseProvider for CodebergProvider {
    fn host(&self) -> Host {
        Host::Codeberg
    }

    fn repository(&self, repo: &RepoIdentity) -> Result<Option<RepositoryFacts>, ProviderError> {
        let facts = self.client.get_json::<GiteaRepo>(&self.repo_url(repo), false)?;
        Ok(facts.map(RepositoryFacts::from))
    }

    fn releases(&self, repo: &RepoIdentity) -> Result<Vec<Release>, ProviderError> {
        let url = format!("{}/releases", self.repo_url(repo));
        let native: Vec<HostedRelease> = self.client.get_all_pages(&url, "limit", PAGE_SIZE, false)?;
        Ok(native.into_iter().map(Release::from).collect())
    }

    fn download_asset(
        &self,
        _repo: &RepoIdentity,
        asset: &Asset,
    ) -> Result<Box<dyn Read + Send>, ProviderError> {
        if asset.download_url.is_empty() {
            return Err(ProviderError::MissingDownloadUrl(asset.name.clone()));
        }
        let resp = self.client.download(&asset.download_url, None, false)?;
        Ok(Box::new(resp))
    }
}
