use super::*;

const GITHUB_RELEASES: &str = r#"[
  {
    "tag_name": "v1.4.0",
    "name": "Version 1.4.0",
    "body": "Fixes and improvements",
    "prerelease": false,
    "draft": false,
    "published_at": "2024-03-01T10:00:00Z",
    "assets": [
      {"id": 11, "name": "checksums.txt", "download_count": 3, "browser_download_url": "https://github.com/o/r/releases/download/v1.4.0/checksums.txt"},
      {"id": 12, "name": "app-release.apk", "download_count": 42, "browser_download_url": "https://github.com/o/r/releases/download/v1.4.0/app-release.apk"}
    ]
  },
  {
    "tag_name": "v1.5.0-rc1",
    "name": null,
    "body": null,
    "prerelease": true,
    "draft": false,
    "published_at": null,
    "assets": []
  }
]"#;

#[test]
fn github_releases_normalize_in_order() {
    let native: Vec<HostedRelease> = serde_json::from_str(GITHUB_RELEASES).unwrap();
    let releases: Vec<Release> = native.into_iter().map(Release::from).collect();

    assert_eq!(releases.len(), 2);
    assert_eq!(releases[0].tag, "v1.4.0");
    assert_eq!(releases[0].title, "Version 1.4.0");
    assert_eq!(releases[0].body, "Fixes and improvements");
    assert!(releases[0].published_at.is_some());
    assert_eq!(releases[0].assets[1].id, 12);
    assert_eq!(releases[0].assets[1].download_count, 42);

    assert!(releases[1].prerelease);
    assert_eq!(releases[1].title, "");
    assert_eq!(releases[1].body, "");
    assert!(releases[1].published_at.is_none());
}

#[test]
fn github_repo_license_uses_spdx_id() {
    let repo: GitHubRepo = serde_json::from_str(
        r#"{"description": "A tool", "license": {"key": "mit", "spdx_id": "MIT"}}"#,
    )
    .unwrap();
    let facts = RepositoryFacts::from(repo);
    assert_eq!(facts.description, "A tool");
    assert_eq!(facts.license, "MIT");
}

#[test]
fn github_noassertion_license_is_empty() {
    let repo: GitHubRepo = serde_json::from_str(
        r#"{"description": null, "license": {"spdx_id": "NOASSERTION"}}"#,
    )
    .unwrap();
    let facts = RepositoryFacts::from(repo);
    assert_eq!(facts, RepositoryFacts::default());
}

#[test]
fn gitea_repo_takes_first_license() {
    let repo: GiteaRepo = serde_json::from_str(
        r#"{"full_name": "o/r", "description": "Codeberg app", "licenses": ["GPL-3.0-or-later", "MIT"]}"#,
    )
    .unwrap();
    let facts = RepositoryFacts::from(repo);
    assert_eq!(facts.license, "GPL-3.0-or-later");
}

#[test]
fn gitlab_license_keys_map_to_spdx() {
    assert_eq!(spdx_from_gitlab_key("gpl-3.0"), "GPL-3.0-only");
    assert_eq!(spdx_from_gitlab_key("apache-2.0"), "Apache-2.0");
    assert_eq!(spdx_from_gitlab_key("other"), "");
    assert_eq!(spdx_from_gitlab_key("wtfpl"), "wtfpl");

    let project: GitLabProject = serde_json::from_str(
        r#"{"description": "Lab app", "license": {"key": "mit", "name": "MIT License", "nickname": null}}"#,
    )
    .unwrap();
    assert_eq!(RepositoryFacts::from(project).license, "MIT");
}

#[test]
fn gitlab_tags_join_release_records() {
    let tags: Vec<GitLabTag> = serde_json::from_str(
        r#"[
          {"name": "v2.0", "commit": {"created_at": "2024-05-01T09:00:00.000+02:00"}, "release": {"tag_name": "v2.0", "description": "Notes from tag"}},
          {"name": "v1.9", "commit": {"created_at": "2024-04-01T09:00:00.000+02:00"}, "release": null}
        ]"#,
    )
    .unwrap();
    let releases: Vec<GitLabRelease> = serde_json::from_str(
        r#"[
          {
            "tag_name": "v2.0",
            "name": "Two point oh",
            "description": "Release notes",
            "released_at": "2024-05-02T09:00:00Z",
            "upcoming_release": true,
            "assets": {"links": [
              {"id": 7, "name": "app.apk", "url": "https://gitlab.com/o/r/-/releases/v2.0/downloads/app.apk", "direct_asset_url": "https://gitlab.com/direct/app.apk"}
            ]}
          }
        ]"#,
    )
    .unwrap();

    let merged = merge_gitlab_tags(tags, releases);
    assert_eq!(merged.len(), 2);

    assert_eq!(merged[0].tag, "v2.0");
    assert_eq!(merged[0].title, "Two point oh");
    assert_eq!(merged[0].body, "Release notes");
    assert!(merged[0].prerelease);
    assert_eq!(merged[0].assets[0].download_url, "https://gitlab.com/direct/app.apk");

    assert_eq!(merged[1].tag, "v1.9");
    assert!(merged[1].assets.is_empty());
    assert!(!merged[1].prerelease);
    assert!(merged[1].published_at.is_some());
}
