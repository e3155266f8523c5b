//! Per-package metadata stubs (`metadata/<package>.yml`).

use std::path::{Path, PathBuf};

use serde_yml::{Mapping, Value};

use crate::error::CatalogError;

/// One package's editable metadata document.
///
/// Keys keep their original order; unknown keys are preserved as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataStub {
    path: PathBuf,
    fields: Mapping,
}

impl MetadataStub {
    /// Read a stub. An empty file is an empty document.
    pub fn read(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        let fields = match serde_yml::from_str::<Value>(&text)
            .map_err(|e| CatalogError::stub(path, e))?
        {
            Value::Mapping(m) => m,
            Value::Null => Mapping::new(),
            _ => return Err(CatalogError::StubShape(path.display().to_string())),
        };
        Ok(Self {
            path: path.to_path_buf(),
            fields,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Package name, taken from the file stem.
    pub fn package_name(&self) -> &str {
        package_name_of(&self.path).unwrap_or("")
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Set `key`, keeping its position if it already exists.
    pub fn set(&mut self, key: &str, value: Value) {
        self.fields.insert(Value::String(key.to_string()), value);
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().filter_map(Value::as_str)
    }

    /// Write the stub back to its path via a temporary sibling and rename.
    pub fn write(&self) -> Result<(), CatalogError> {
        let text = serde_yml::to_string(&self.fields).map_err(|e| CatalogError::stub(&self.path, e))?;

        let tmp = self.path.with_extension("yml.tmp");
        std::fs::write(&tmp, text).map_err(|e| CatalogError::io(&tmp, e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp);
            CatalogError::io(&self.path, e)
        })
    }
}

fn package_name_of(path: &Path) -> Option<&str> {
    path.file_stem()?.to_str()
}

/// List stub files (`*.yml`) directly inside `metadata_dir`, sorted by name.
///
/// A missing directory has no stubs.
pub fn list_stubs(metadata_dir: &Path) -> Result<Vec<PathBuf>, CatalogError> {
    let dir = match std::fs::read_dir(metadata_dir) {
        Ok(dir) => dir,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(CatalogError::io(metadata_dir, e)),
    };
    let mut entries: Vec<_> = dir
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_ok_and(|t| t.is_file()))
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "yml"))
        .collect();
    entries.sort_by_key(|e| e.file_name());

    Ok(entries.into_iter().map(|e| e.path()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn round_trip_preserves_unknown_keys_in_order() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("com.example.app.yml");
        fs::write(
            &path,
            "Categories:\n  - Internet\nCustomKey: keep me\nSummary: Unknown\nWebSite: https://example.com\n",
        )
        .unwrap();

        let mut stub = MetadataStub::read(&path).unwrap();
        assert_eq!(stub.package_name(), "com.example.app");
        stub.set("Summary", Value::String("A tool".to_string()));
        stub.set("AuthorName", Value::String("someone".to_string()));
        stub.write().unwrap();

        let reread = MetadataStub::read(&path).unwrap();
        let keys: Vec<_> = reread.keys().collect();
        assert_eq!(
            keys,
            vec!["Categories", "CustomKey", "Summary", "WebSite", "AuthorName"]
        );
        assert_eq!(reread.get_str("CustomKey"), Some("keep me"));
        assert_eq!(reread.get_str("Summary"), Some("A tool"));
        assert!(!tmp.path().join("com.example.app.yml.tmp").exists());
    }

    #[test]
    fn empty_file_is_empty_stub() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("empty.yml");
        fs::write(&path, "").unwrap();
        let stub = MetadataStub::read(&path).unwrap();
        assert_eq!(stub.keys().count(), 0);
    }

    #[test]
    fn non_mapping_document_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("list.yml");
        fs::write(&path, "- a\n- b\n").unwrap();
        assert!(matches!(
            MetadataStub::read(&path),
            Err(CatalogError::StubShape(_))
        ));
    }

    #[test]
    fn list_stubs_sorted_and_filtered() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("com.b.yml"), "").unwrap();
        fs::write(tmp.path().join("com.a.yml"), "").unwrap();
        fs::write(tmp.path().join("notes.txt"), "").unwrap();
        fs::create_dir(tmp.path().join("com.a")).unwrap();

        let stubs = list_stubs(tmp.path()).unwrap();
        let names: Vec<_> = stubs
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["com.a.yml", "com.b.yml"]);
    }

    #[test]
    fn list_stubs_missing_dir_is_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(list_stubs(&tmp.path().join("metadata")).unwrap().is_empty());
    }

    #[test]
    fn list_stubs_on_a_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("metadata");
        fs::write(&path, "").unwrap();
        assert!(matches!(list_stubs(&path), Err(CatalogError::Io { .. })));
    }
}
