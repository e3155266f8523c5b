//! The tracked-app list (`apps.yaml`).
//!
//! Each entry names an upstream repository plus the catalog metadata that
//! should accompany its releases:
//!
//! ```yaml
//! - git: https://github.com/user/project
//!   name: Friendly Name
//!   summary: One-line summary
//!   description: |
//!     Longer description.
//!   categories:
//!     - Development
//!   anti_features:
//!     - NonFreeNet
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::release::RepositoryFacts;
use crate::repo::split_owner_and_name;

/// One configured upstream project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackedApp {
    /// Source repository URL
    #[serde(rename = "git")]
    pub git_url: String,
    /// Display name override; the repository name is used when empty
    #[serde(default, rename = "name")]
    pub friendly_name: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    /// SPDX license identifier
    #[serde(default)]
    pub license: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub anti_features: Vec<String>,
}

impl TrackedApp {
    /// Repository owner taken from the source URL path.
    pub fn author(&self) -> &str {
        self.url_segments().map(|(author, _)| author).unwrap_or("")
    }

    /// Canonical app name: the repository name from the source URL.
    pub fn name(&self) -> &str {
        self.url_segments().map(|(_, name)| name).unwrap_or("")
    }

    /// Friendly name if configured, otherwise the canonical name.
    pub fn display_name(&self) -> &str {
        if self.friendly_name.is_empty() {
            self.name()
        } else {
            &self.friendly_name
        }
    }

    /// A copy of this app with upstream repository facts applied.
    ///
    /// A non-empty description replaces the summary and a non-empty license
    /// replaces the license.
    pub fn with_repository_facts(&self, facts: &RepositoryFacts) -> TrackedApp {
        let mut app = self.clone();
        if !facts.description.is_empty() {
            app.summary = facts.description.clone();
        }
        if !facts.license.is_empty() {
            app.license = facts.license.clone();
        }
        app
    }

    fn url_segments(&self) -> Option<(&str, &str)> {
        let without_scheme = self
            .git_url
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.git_url);
        let path = without_scheme
            .split_once('/')
            .map(|(_, path)| path)
            .unwrap_or("");
        split_owner_and_name(path)
    }
}

/// Load the tracked-app list from a YAML file.
pub fn load_apps(path: &Path) -> Result<Vec<TrackedApp>, CoreError> {
    let contents = std::fs::read_to_string(path).map_err(|e| CoreError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_yml::from_str(&contents).map_err(|e| CoreError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}
