use std::fmt;

use url::Url;

use crate::error::CoreError;

/// Source-hosting providers that metascoop knows how to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Host {
    GitHub,
    GitLab,
    Codeberg,
}

/// All host variants in lookup order.
const ALL_HOSTS: &[Host] = &[Host::GitHub, Host::GitLab, Host::Codeberg];

impl Host {
    /// Canonical domain name for the host.
    pub fn domain(&self) -> &'static str {
        match self {
            Self::GitHub => "github.com",
            Self::GitLab => "gitlab.com",
            Self::Codeberg => "codeberg.org",
        }
    }

    /// Human-readable provider name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::GitHub => "GitHub",
            Self::GitLab => "GitLab",
            Self::Codeberg => "Codeberg",
        }
    }

    pub fn all() -> &'static [Host] {
        ALL_HOSTS
    }

    /// Resolve a URL host component to a provider.
    ///
    /// Matching is case-insensitive and tolerates a leading `www.`.
    pub fn from_host_str(host: &str) -> Option<Host> {
        let lower = host.to_ascii_lowercase();
        let bare = lower.strip_prefix("www.").unwrap_or(&lower);
        ALL_HOSTS.iter().copied().find(|h| h.domain() == bare)
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A resolved provider + author + project name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoIdentity {
    pub host: Host,
    /// Owner path. For GitLab this may contain nested groups (`group/sub`).
    pub author: String,
    pub name: String,
}

impl RepoIdentity {
    /// Resolve a source URL such as `https://github.com/user/project`.
    pub fn from_url(source: &str) -> Result<Self, CoreError> {
        let url = Url::parse(source.trim())
            .map_err(|e| CoreError::invalid_url(source, e.to_string()))?;

        let host_str = url
            .host_str()
            .ok_or_else(|| CoreError::invalid_url(source, "URL has no host"))?;
        let host = Host::from_host_str(host_str)
            .ok_or_else(|| CoreError::unsupported_host(host_str))?;

        let (author, name) = split_owner_and_name(url.path())
            .ok_or_else(|| CoreError::invalid_url(source, "expected /<author>/<name>"))?;

        Ok(Self {
            host,
            author: author.to_string(),
            name: name.to_string(),
        })
    }

    /// `author/name`, used for logging and API paths.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.author, self.name)
    }
}

impl fmt::Display for RepoIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} on {}", self.author, self.name, self.host)
    }
}

/// Split a repository URL path into owner path and project name.
///
/// Trailing slashes and a `.git` suffix are ignored. Returns `None` when the
/// path has fewer than two segments.
pub(crate) fn split_owner_and_name(path: &str) -> Option<(&str, &str)> {
    let trimmed = path.trim_matches('/');
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);
    let (owner, name) = trimmed.rsplit_once('/')?;
    if owner.is_empty() || name.is_empty() {
        return None;
    }
    Some((owner, name))
}

#[cfg(test)]
#[path = "tests/repo_tests.rs"]
mod tests;
