use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Index parse error in {path}: {source}")]
    Index {
        path: String,
        source: serde_json::Error,
    },

    #[error("Metadata stub error in {path}: {source}")]
    Stub {
        path: String,
        source: serde_yml::Error,
    },

    #[error("Metadata stub {0} is not a key/value document")]
    StubShape(String),

    #[error("Git error while {context}: {source}")]
    Git {
        context: String,
        source: git2::Error,
    },

    #[error("Screenshot error: {0}")]
    Screenshot(String),
}

impl CatalogError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn index(path: &Path, source: serde_json::Error) -> Self {
        Self::Index {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn stub(path: &Path, source: serde_yml::Error) -> Self {
        Self::Stub {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn git(context: impl Into<String>, source: git2::Error) -> Self {
        Self::Git {
            context: context.into(),
            source,
        }
    }

    pub fn screenshot(msg: impl Into<String>) -> Self {
        Self::Screenshot(msg.into())
    }
}
