//! Reading the published catalog index (`index-v1.json`).

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CatalogError;

/// File name of the catalog index inside the repo directory.
pub const INDEX_FILE_NAME: &str = "index-v1.json";

/// One published version of a package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageVersion {
    #[serde(default)]
    pub package_name: String,
    #[serde(default)]
    pub version_name: String,
    #[serde(default)]
    pub version_code: u64,
    /// Artifact file name inside the repo directory
    #[serde(default, alias = "apkName")]
    pub artifact_filename: String,
}

/// App-level entry from the index, used for listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexApp {
    #[serde(default)]
    pub package_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub source_code: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    localized: serde_json::Map<String, Value>,
}

impl IndexApp {
    /// Name, preferring the top-level field over the `en-US` localization.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or_else(|| self.localized_str("name"))
            .unwrap_or(&self.package_name)
    }

    pub fn display_summary(&self) -> &str {
        self.summary
            .as_deref()
            .or_else(|| self.localized_str("summary"))
            .unwrap_or("")
    }

    fn localized_str(&self, key: &str) -> Option<&str> {
        self.localized.get("en-US")?.get(key)?.as_str()
    }
}

/// A snapshot of the catalog index.
///
/// Keeps the raw document (in its original key order) for structural
/// diffing alongside the typed package list.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogIndex {
    raw: Value,
    packages: Vec<PackageVersion>,
    apps: Vec<IndexApp>,
}

impl CatalogIndex {
    /// Read and parse the index at `path`.
    pub fn read(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        Self::parse(&text).map_err(|e| CatalogError::index(path, e))
    }

    /// Parse an index document.
    ///
    /// `packages` may be a flat list of versions or the grouped form keyed by
    /// package name. In the grouped form the key supplies `packageName`.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let raw: Value = serde_json::from_str(text)?;

        let packages = match raw.get("packages") {
            Some(Value::Array(_)) => Vec::<PackageVersion>::deserialize(&raw["packages"])?,
            Some(Value::Object(groups)) => {
                let mut all = Vec::new();
                for (name, versions) in groups {
                    let mut versions = Vec::<PackageVersion>::deserialize(versions)?;
                    for v in &mut versions {
                        if v.package_name.is_empty() {
                            v.package_name = name.clone();
                        }
                    }
                    all.extend(versions);
                }
                all
            }
            _ => Vec::new(),
        };

        let apps = match raw.get("apps") {
            Some(apps @ Value::Array(_)) => Vec::<IndexApp>::deserialize(apps)?,
            _ => Vec::new(),
        };

        Ok(Self {
            raw,
            packages,
            apps,
        })
    }

    /// The highest-versionCode entry for `package_name`.
    pub fn find_latest_package(&self, package_name: &str) -> Option<&PackageVersion> {
        self.packages
            .iter()
            .filter(|p| p.package_name == package_name)
            .max_by_key(|p| p.version_code)
    }

    pub fn packages(&self) -> &[PackageVersion] {
        &self.packages
    }

    pub fn apps(&self) -> &[IndexApp] {
        &self.apps
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }
}
