use thiserror::Error;

/// Errors raised while loading configuration or resolving source URLs.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },

    /// The source URL could not be parsed into an author/name pair
    #[error("Invalid source URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The source URL points at a host no provider handles
    #[error("Unsupported host: {0}")]
    UnsupportedHost(String),
}

impl CoreError {
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn unsupported_host(host: impl Into<String>) -> Self {
        Self::UnsupportedHost(host.into())
    }
}
