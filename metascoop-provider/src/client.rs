use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;

use crate::error::ProviderError;

/// Timeout for API (metadata) requests.
pub const API_TIMEOUT: Duration = Duration::from_secs(30);

/// Default timeout for a single asset download.
pub const DEFAULT_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Upper bound on pages fetched from one listing.
const MAX_PAGES: usize = 50;

const USER_AGENT: &str = concat!("metascoop/", env!("CARGO_PKG_VERSION"));

/// Shared blocking HTTP client used by every provider.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    token: Option<String>,
    download_timeout: Duration,
}

impl ApiClient {
    /// Build a client. `token` is sent only on requests that ask for it.
    pub fn new(token: Option<String>, download_timeout: Duration) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(API_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            token: token.filter(|t| !t.is_empty()),
            download_timeout,
        })
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// GET a JSON document. A 404 yields `Ok(None)`.
    pub fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        authenticated: bool,
    ) -> Result<Option<T>, ProviderError> {
        log::debug!("GET {}", url);
        let resp = self
            .request(url, authenticated)
            .header(ACCEPT, "application/json")
            .send()?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ProviderError::status(url, status));
        }

        let text = resp.text()?;
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| ProviderError::decode(url, e))
    }

    /// Collect every page of a JSON array endpoint.
    ///
    /// `size_param` names the page-size query parameter (`per_page` on GitHub
    /// and GitLab, `limit` on Gitea). Paging stops at the first short or empty
    /// page. A 404 on any page ends the listing with what was gathered so far.
    pub fn get_all_pages<T: DeserializeOwned>(
        &self,
        base_url: &str,
        size_param: &str,
        page_size: usize,
        authenticated: bool,
    ) -> Result<Vec<T>, ProviderError> {
        let sep = if base_url.contains('?') { '&' } else { '?' };
        let mut items = Vec::new();

        for page in 1..=MAX_PAGES {
            let url = format!("{base_url}{sep}{size_param}={page_size}&page={page}");
            let Some(batch) = self.get_json::<Vec<T>>(&url, authenticated)? else {
                break;
            };
            let count = batch.len();
            items.extend(batch);
            if count < page_size {
                break;
            }
        }

        Ok(items)
    }

    /// Start a streaming download. The returned response is read by the caller.
    pub fn download(
        &self,
        url: &str,
        accept: Option<&str>,
        authenticated: bool,
    ) -> Result<Response, ProviderError> {
        log::debug!("Downloading {}", url);
        let mut req = self
            .request(url, authenticated)
            .timeout(self.download_timeout);
        if let Some(accept) = accept {
            req = req.header(ACCEPT, accept);
        }

        let resp = req.send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ProviderError::status(url, status));
        }
        Ok(resp)
    }

    fn request(&self, url: &str, authenticated: bool) -> RequestBuilder {
        let req = self.http.get(url);
        match (&self.token, authenticated) {
            (Some(token), true) => req.header(AUTHORIZATION, format!("Bearer {token}")),
            _ => req,
        }
    }
}
