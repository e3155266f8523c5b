//! README app listing generated from the catalog index.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::CatalogError;
use crate::index::CatalogIndex;

pub const TABLE_START: &str = "<!-- This table is auto-generated. Do not edit -->";
pub const TABLE_END: &str = "<!-- end apps table -->";

/// Render the Markdown table of apps, sorted by name.
pub fn render_table(index: &CatalogIndex) -> String {
    let mut apps: Vec<_> = index.apps().iter().collect();
    apps.sort_by_key(|a| a.display_name().to_lowercase());

    let mut out = String::new();
    out.push_str("| Name | Package | Summary | Version | Source |\n");
    out.push_str("| --- | --- | --- | --- | --- |\n");
    for app in apps {
        let version = index
            .find_latest_package(&app.package_name)
            .map(|p| p.version_name.as_str())
            .unwrap_or("");
        let source = match app.source_code.as_deref() {
            Some(url) if !url.is_empty() => format!("[Source]({url})"),
            _ => String::new(),
        };
        let _ = writeln!(
            out,
            "| {} | `{}` | {} | {} | {} |",
            cell(app.display_name()),
            app.package_name,
            cell(app.display_summary()),
            cell(version),
            source
        );
    }
    out
}

fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Put `table` between the listing markers of `existing`.
///
/// When the markers are missing the result is just the marked table.
pub fn splice_table(existing: &str, table: &str) -> String {
    let block = format!("{TABLE_START}\n{table}{TABLE_END}");

    let Some(start) = existing.find(TABLE_START) else {
        return format!("{block}\n");
    };
    let Some(end_rel) = existing[start..].find(TABLE_END) else {
        return format!("{block}\n");
    };
    let end = start + end_rel + TABLE_END.len();

    format!("{}{}{}", &existing[..start], block, &existing[end..])
}

/// Regenerate the listing in the README at `path`.
pub fn regenerate_readme(path: &Path, index: &CatalogIndex) -> Result<(), CatalogError> {
    let existing = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(CatalogError::io(path, e)),
    };

    let updated = splice_table(&existing, &render_table(index));
    if updated != existing {
        std::fs::write(path, updated).map_err(|e| CatalogError::io(path, e))?;
        log::info!("Regenerated app listing in {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_index() -> CatalogIndex {
        CatalogIndex::parse(
            r#"{
              "apps": [
                {"packageName": "com.z", "name": "Zeta", "summary": "Last | first", "sourceCode": "https://github.com/a/zeta"},
                {"packageName": "com.a", "localized": {"en-US": {"name": "alpha", "summary": "First"}}}
              ],
              "packages": {
                "com.z": [{"versionName": "2.0", "versionCode": 2}],
                "com.a": [{"versionName": "0.9", "versionCode": 9}]
              }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn table_rows_are_sorted_and_escaped() {
        let table = render_table(&sample_index());
        let rows: Vec<_> = table.lines().skip(2).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], "| alpha | `com.a` | First | 0.9 |  |");
        assert_eq!(
            rows[1],
            "| Zeta | `com.z` | Last \\| first | 2.0 | [Source](https://github.com/a/zeta) |"
        );
    }

    #[test]
    fn splice_keeps_surrounding_text() {
        let existing = format!("# Title\n\nIntro\n{TABLE_START}\nold table\n{TABLE_END}\n\nFooter\n");
        let spliced = splice_table(&existing, "new table\n");
        assert_eq!(
            spliced,
            format!("# Title\n\nIntro\n{TABLE_START}\nnew table\n{TABLE_END}\n\nFooter\n")
        );
    }

    #[test]
    fn splice_without_markers_replaces_everything() {
        let spliced = splice_table("just text\n", "t\n");
        assert_eq!(spliced, format!("{TABLE_START}\nt\n{TABLE_END}\n"));
    }

    #[test]
    fn regenerate_creates_missing_readme() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("README.md");
        regenerate_readme(&path, &sample_index()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with(TABLE_START));
        assert!(text.contains("`com.z`"));
    }

    #[test]
    fn regenerate_into_missing_directory_fails() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing").join("README.md");
        assert!(regenerate_readme(&path, &sample_index()).is_err());
    }
}
