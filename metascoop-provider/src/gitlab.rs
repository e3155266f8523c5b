use std::io::Read;

use metascoop_core::{Asset, Host, Release, RepoIdentity, RepositoryFacts};

use crate::client::ApiClient;
use crate::error::ProviderError;
use crate::provider::ReleaseProvider;
use crate::types::{GitLabProject, GitLabRelease, GitLabTag, merge_gitlab_tags};

const API_BASE: &str = "https://gitlab.com/api/v4";
const PAGE_SIZE: usize = 100;

/// GitLab v4: tags joined with release records.
pub struct GitLabProvider {
    client: ApiClient,
    api_base: String,
}

impl GitLabProvider {
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

    /// Project URL with the `owner/name` path percent-encoded as one segment.
    fn project_url(&self, repo: &RepoIdentity) -> String {
        format!(
            "{}/projects/{}",
            self.api_base,
            urlencoding::encode(&repo.full_name())
        )
    }
}

impl ReleaseProvider for GitLabProvider {
    fn host(&self) -> Host {
        Host::GitLab
    }

    fn repository(&self, repo: &RepoIdentity) -> Result<Option<RepositoryFacts>, ProviderError> {
        let url = format!("{}?license=true", self.project_url(repo));
        let facts = self.client.get_json::<GitLabProject>(&url, false)?;
        Ok(facts.map(RepositoryFacts::from))
    }

    fn releases(&self, repo: &RepoIdentity) -> Result<Vec<Release>, ProviderError> {
        let base = self.project_url(repo);
        let tags: Vec<GitLabTag> = self.client.get_all_pages(
            &format!("{base}/repository/tags"),
            "per_page",
            PAGE_SIZE,
            false,
        )?;
        if tags.is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<GitLabRelease> = self.client.get_all_pages(
            &format!("{base}/releases"),
            "per_page",
            PAGE_SIZE,
            false,
        )?;
        Ok(merge_gitlab_tags(tags, records))
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
