//! Artifact naming and the per-run artifact record map.

use std::collections::HashMap;

use crate::app::TrackedApp;
use crate::release::Release;
use crate::selector::ARTIFACT_EXTENSION;

/// Deterministic local file name for an app's release artifact.
///
/// The name is `<app>_<tag>.apk` with both parts percent-encoded, `_`
/// included, so the separator is unambiguous and distinct tags never share
/// a name. `release/1.0` becomes `release%2F1.0`.
pub fn artifact_filename(app_name: &str, tag: &str) -> String {
    format!(
        "{}_{}{}",
        encode_component(app_name),
        encode_component(tag),
        ARTIFACT_EXTENSION
    )
}

fn encode_component(part: &str) -> String {
    urlencoding::encode(part).replace('_', "%5F")
}

/// Links a downloaded artifact back to the app and release it came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtifactRecord {
    pub artifact_name: String,
    pub author: String,
    /// Canonical app name (repository name)
    pub name: String,
    pub friendly_name: String,
    pub source_url: String,
    pub license: String,
    pub summary: String,
    pub description: String,
    pub categories: Vec<String>,
    pub anti_features: Vec<String>,
    pub release_notes: String,
}

impl ArtifactRecord {
    /// Build a record from the app's current metadata and an accepted release.
    pub fn new(app: &TrackedApp, artifact_name: impl Into<String>, release: &Release) -> Self {
        Self {
            artifact_name: artifact_name.into(),
            author: app.author().to_string(),
            name: app.name().to_string(),
            friendly_name: app.friendly_name.clone(),
            source_url: app.git_url.clone(),
            license: app.license.clone(),
            summary: app.summary.clone(),
            description: app.description.clone(),
            categories: app.categories.clone(),
            anti_features: app.anti_features.clone(),
            release_notes: release.body.clone(),
        }
    }

    /// Friendly name if set, otherwise the canonical name.
    pub fn display_name(&self) -> &str {
        if self.friendly_name.is_empty() {
            &self.name
        } else {
            &self.friendly_name
        }
    }
}

/// Artifact records for one run, keyed by artifact file name.
///
/// Filled during acquisition and only read afterwards.
#[derive(Debug, Default)]
pub struct ArtifactRecords {
    records: HashMap<String, ArtifactRecord>,
}

impl ArtifactRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any previous record with the same name.
    pub fn insert(&mut self, record: ArtifactRecord) {
        self.records.insert(record.artifact_name.clone(), record);
    }

    pub fn get(&self, artifact_name: &str) -> Option<&ArtifactRecord> {
        self.records.get(artifact_name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_is_deterministic() {
        assert_eq!(artifact_filename("Collect", "v1.0.0"), "Collect_v1.0.0.apk");
        assert_eq!(
            artifact_filename("Collect", "v1.0.0"),
            artifact_filename("Collect", "v1.0.0")
        );
    }

    #[test]
    fn distinct_tags_do_not_collide() {
        assert_ne!(artifact_filename("app", "v1.0"), artifact_filename("app", "v1.1"));
    }

    #[test]
    fn path_separators_are_encoded() {
        assert_eq!(
            artifact_filename("my app", "release/2.0"),
            "my%20app_release%2F2.0.apk"
        );
    }

    #[test]
    fn encoded_and_literal_characters_stay_distinct() {
        let slash = artifact_filename("Collect", "v1/0");
        let underscore = artifact_filename("Collect", "v1_0");
        let escaped = artifact_filename("Collect", "v1%2F0");
        assert_eq!(slash, "Collect_v1%2F0.apk");
        assert_eq!(underscore, "Collect_v1%5F0.apk");
        assert_eq!(escaped, "Collect_v1%252F0.apk");
        assert_ne!(slash, underscore);
        assert_ne!(slash, escaped);
    }

    #[test]
    fn separator_is_unambiguous_across_app_and_tag() {
        assert_ne!(artifact_filename("a_b", "c"), artifact_filename("a", "b_c"));
    }

    #[test]
    fn record_carries_release_notes_and_app_metadata() {
        let app = TrackedApp {
            git_url: "https://github.com/someone/thing".to_string(),
            summary: "Does things".to_string(),
            categories: vec!["System".to_string()],
            ..Default::default()
        };
        let release = Release {
            tag: "v3".to_string(),
            body: "Fixed a bug".to_string(),
            ..Default::default()
        };
        let record = ArtifactRecord::new(&app, "thing_v3.apk", &release);
        assert_eq!(record.author, "someone");
        assert_eq!(record.display_name(), "thing");
        assert_eq!(record.release_notes, "Fixed a bug");
        assert_eq!(record.categories, vec!["System"]);
    }

    #[test]
    fn insert_overwrites_same_key() {
        let mut records = ArtifactRecords::new();
        records.insert(ArtifactRecord {
            artifact_name: "a_v1.apk".to_string(),
            summary: "old".to_string(),
            ..Default::default()
        });
        records.insert(ArtifactRecord {
            artifact_name: "a_v1.apk".to_string(),
            summary: "new".to_string(),
            ..Default::default()
        });
        assert_eq!(records.len(), 1);
        assert_eq!(records.get("a_v1.apk").unwrap().summary, "new");
        assert!(records.get("missing.apk").is_none());
    }
}
