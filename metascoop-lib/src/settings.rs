//! Optional user settings (`~/.config/metascoop/settings.toml`).
//!
//! ```toml
//! [catalog]
//! tool = "fdroid"
//! readme = "../README.md"
//!
//! [download]
//! timeout_secs = 300
//!
//! [github]
//! token = "..."
//! ```
//!
//! Every key is optional. Command-line flags and environment variables take
//! precedence over anything set here.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::PipelineError;

/// Catalog tool used when nothing else is configured.
pub const DEFAULT_CATALOG_TOOL: &str = "fdroid";

/// Environment override for the catalog tool command.
pub const CATALOG_TOOL_ENV: &str = "METASCOOP_CATALOG_TOOL";

/// Environment override for the per-download timeout, in seconds.
pub const DOWNLOAD_TIMEOUT_ENV: &str = "METASCOOP_DOWNLOAD_TIMEOUT";

const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 5 * 60;

/// Canonical path to the settings file: `~/.config/metascoop/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("metascoop").join("settings.toml")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub download: DownloadSettings,
    #[serde(default)]
    pub github: GitHubSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogSettings {
    pub tool: Option<String>,
    pub readme: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DownloadSettings {
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GitHubSettings {
    pub token: Option<String>,
}

impl Settings {
    /// Load from [`settings_path`]. A missing file yields defaults.
    pub fn load() -> Result<Self, PipelineError> {
        Self::load_from(&settings_path())
    }

    /// Load from `path`. A missing file yields defaults; a malformed one is
    /// an error.
    pub fn load_from(path: &Path) -> Result<Self, PipelineError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(PipelineError::io(path, e)),
        };
        toml::from_str(&contents).map_err(|e| PipelineError::settings(path, e.to_string()))
    }

    /// Catalog tool command: env > settings > default.
    pub fn catalog_tool(&self, env: impl Fn(&str) -> Option<String>) -> String {
        env(CATALOG_TOOL_ENV)
            .filter(|t| !t.trim().is_empty())
            .or_else(|| self.catalog.tool.clone().filter(|t| !t.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_CATALOG_TOOL.to_string())
    }

    /// Per-download timeout: env > settings > 5 minutes.
    pub fn download_timeout(&self, env: impl Fn(&str) -> Option<String>) -> Duration {
        let secs = env(DOWNLOAD_TIMEOUT_ENV)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .or(self.download.timeout_secs)
            .filter(|&s| s > 0)
            .unwrap_or(DEFAULT_DOWNLOAD_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn missing_file_is_default() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load_from(&tmp.path().join("settings.toml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.catalog_tool(no_env), "fdroid");
        assert_eq!(settings.download_timeout(no_env), Duration::from_secs(300));
    }

    #[test]
    fn file_values_are_used() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.toml");
        fs::write(
            &path,
            "[catalog]\ntool = \"/opt/fdroidserver/fdroid\"\nreadme = \"docs/README.md\"\n\n[download]\ntimeout_secs = 60\n\n[github]\ntoken = \"abc\"\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.catalog_tool(no_env), "/opt/fdroidserver/fdroid");
        assert_eq!(settings.download_timeout(no_env), Duration::from_secs(60));
        assert_eq!(settings.catalog.readme.as_deref(), Some(Path::new("docs/README.md")));
        assert_eq!(settings.github.token.as_deref(), Some("abc"));
    }

    #[test]
    fn env_overrides_file() {
        let settings = Settings {
            catalog: CatalogSettings {
                tool: Some("from-file".to_string()),
                readme: None,
            },
            download: DownloadSettings {
                timeout_secs: Some(60),
            },
            ..Default::default()
        };
        let env = |var: &str| match var {
            CATALOG_TOOL_ENV => Some("from-env".to_string()),
            DOWNLOAD_TIMEOUT_ENV => Some("10".to_string()),
            _ => None,
        };
        assert_eq!(settings.catalog_tool(env), "from-env");
        assert_eq!(settings.download_timeout(env), Duration::from_secs(10));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.toml");
        fs::write(&path, "[download]\ntimeout_secs = \"soon\"\n").unwrap();
        assert!(matches!(
            Settings::load_from(&path),
            Err(PipelineError::Settings { .. })
        ));
    }
}
