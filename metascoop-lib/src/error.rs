use std::path::Path;

use metascoop_catalog::CatalogError;
use metascoop_core::CoreError;
use metascoop_provider::ProviderError;
use thiserror::Error;

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to start {command}: {source}")]
    ToolSpawn {
        command: String,
        source: std::io::Error,
    },

    #[error("{command} exited with {status}")]
    ToolFailed { command: String, status: String },

    #[error("Settings error in {path}: {message}")]
    Settings { path: String, message: String },
}

impl PipelineError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn tool_spawn(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::ToolSpawn {
            command: command.into(),
            source,
        }
    }

    pub fn tool_failed(command: impl Into<String>, status: impl ToString) -> Self {
        Self::ToolFailed {
            command: command.into(),
            status: status.to_string(),
        }
    }

    pub fn settings(path: &Path, message: impl Into<String>) -> Self {
        Self::Settings {
            path: path.display().to_string(),
            message: message.into(),
        }
    }
}
