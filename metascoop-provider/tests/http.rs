use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

use metascoop_core::{Host, RepoIdentity};
use metascoop_provider::codeberg::CodebergProvider;
use metascoop_provider::github::GitHubProvider;
use metascoop_provider::gitlab::GitLabProvider;
use metascoop_provider::{ApiClient, DEFAULT_DOWNLOAD_TIMEOUT, ProviderError, ReleaseProvider};
use serde_json::Value;

type Route = dyn Fn(&str) -> (u16, String) + Send + Sync;

/// A request the local server received.
#[derive(Debug, Clone)]
struct Hit {
    path: String,
    authorization: Option<String>,
}

/// Minimal HTTP/1.1 server on a loopback port. Each connection gets one
/// response chosen by `route` from the request path (query included).
struct Server {
    base: String,
    hits: Arc<Mutex<Vec<Hit>>>,
}

impl Server {
    fn start(route: impl Fn(&str) -> (u16, String) + Send + Sync + 'static) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let hits = Arc::new(Mutex::new(Vec::new()));
        let route: Arc<Route> = Arc::new(route);

        let seen = Arc::clone(&hits);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                let mut reader = BufReader::new(stream.try_clone().unwrap());

                let mut request_line = String::new();
                reader.read_line(&mut request_line).unwrap();
                let path = request_line
                    .split_whitespace()
                    .nth(1)
                    .unwrap_or("/")
                    .to_string();

                let mut authorization = None;
                loop {
                    let mut line = String::new();
                    if reader.read_line(&mut line).unwrap() == 0 || line.trim().is_empty() {
                        break;
                    }
                    if let Some((name, value)) = line.split_once(':')
                        && name.eq_ignore_ascii_case("authorization")
                    {
                        authorization = Some(value.trim().to_string());
                    }
                }

                seen.lock().unwrap().push(Hit {
                    path: path.clone(),
                    authorization,
                });

                let (status, body) = route(&path);
                let response = format!(
                    "HTTP/1.1 {status} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });

        Self { base, hits }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    fn hits(&self) -> Vec<Hit> {
        self.hits.lock().unwrap().clone()
    }
}

fn client(token: Option<&str>) -> ApiClient {
    ApiClient::new(token.map(str::to_string), DEFAULT_DOWNLOAD_TIMEOUT).unwrap()
}

fn not_found() -> (u16, String) {
    (404, r#"{"message": "Not Found"}"#.to_string())
}

fn repo(host: Host) -> RepoIdentity {
    RepoIdentity {
        host,
        author: "someone".to_string(),
        name: "thing".to_string(),
    }
}

/// `count` GitHub-style releases numbered from `start`.
fn release_page(start: usize, count: usize) -> String {
    let items: Vec<String> = (start..start + count)
        .map(|i| format!(r#"{{"tag_name": "v{i}", "assets": []}}"#))
        .collect();
    format!("[{}]", items.join(","))
}

fn page_of(path: &str) -> usize {
    path.split(['?', '&'])
        .find_map(|kv| kv.strip_prefix("page="))
        .and_then(|n| n.parse().ok())
        .unwrap_or(1)
}

#[test]
fn get_json_not_found_is_none() {
    let server = Server::start(|_| not_found());
    let got: Option<Value> = client(None).get_json(&server.url("/missing"), false).unwrap();
    assert!(got.is_none());
}

#[test]
fn get_json_other_status_is_an_error() {
    let server = Server::start(|_| (500, "{}".to_string()));
    let err = client(None)
        .get_json::<Value>(&server.url("/broken"), false)
        .unwrap_err();
    assert!(matches!(err, ProviderError::Status { status: 500, .. }));
}

#[test]
fn get_json_undecodable_body_is_an_error() {
    let server = Server::start(|_| (200, "not json".to_string()));
    let err = client(None)
        .get_json::<Value>(&server.url("/garbled"), false)
        .unwrap_err();
    assert!(matches!(err, ProviderError::Decode { .. }));
}

#[test]
fn pagination_stops_at_short_page() {
    let server = Server::start(|path| match page_of(path) {
        1 => (200, release_page(0, 2)),
        2 => (200, release_page(2, 1)),
        _ => (200, release_page(100, 2)),
    });
    let items: Vec<Value> = client(None)
        .get_all_pages(&server.url("/list"), "per_page", 2, false)
        .unwrap();

    assert_eq!(items.len(), 3);
    let paths: Vec<_> = server.hits().into_iter().map(|h| h.path).collect();
    assert_eq!(
        paths,
        vec!["/list?per_page=2&page=1", "/list?per_page=2&page=2"]
    );
}

#[test]
fn pagination_stops_at_empty_page() {
    let server = Server::start(|path| match page_of(path) {
        1 => (200, release_page(0, 2)),
        _ => (200, "[]".to_string()),
    });
    let items: Vec<Value> = client(None)
        .get_all_pages(&server.url("/list"), "limit", 2, false)
        .unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(server.hits().len(), 2);
}

#[test]
fn pagination_keeps_what_it_has_on_not_found() {
    let server = Server::start(|path| match page_of(path) {
        1 => (200, release_page(0, 2)),
        _ => not_found(),
    });
    let items: Vec<Value> = client(None)
        .get_all_pages(&server.url("/list?state=all"), "per_page", 2, false)
        .unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(server.hits()[0].path, "/list?state=all&per_page=2&page=1");
}

#[test]
fn pagination_fails_on_server_error() {
    let server = Server::start(|path| match page_of(path) {
        1 => (200, release_page(0, 2)),
        _ => (502, "{}".to_string()),
    });
    let err = client(None)
        .get_all_pages::<Value>(&server.url("/list"), "per_page", 2, false)
        .unwrap_err();
    assert!(matches!(err, ProviderError::Status { status: 502, .. }));
}

#[test]
fn token_is_only_sent_when_asked() {
    let server = Server::start(|_| (200, "{}".to_string()));
    let client = client(Some("secret"));
    client.get_json::<Value>(&server.url("/a"), true).unwrap();
    client.get_json::<Value>(&server.url("/b"), false).unwrap();

    let hits = server.hits();
    assert_eq!(hits[0].authorization.as_deref(), Some("Bearer secret"));
    assert_eq!(hits[1].authorization, None);
}

#[test]
fn github_unknown_repository_has_no_facts_and_no_releases() {
    let server = Server::start(|_| not_found());
    let provider = GitHubProvider::with_api_base(client(None), &server.base);
    let repo = repo(Host::GitHub);

    assert_eq!(provider.repository(&repo).unwrap(), None);
    assert!(provider.releases(&repo).unwrap().is_empty());

    let paths: Vec<_> = server.hits().into_iter().map(|h| h.path).collect();
    assert_eq!(
        paths,
        vec![
            "/repos/someone/thing",
            "/repos/someone/thing/releases?per_page=100&page=1"
        ]
    );
}

#[test]
fn github_repository_facts_are_normalized() {
    let server = Server::start(|_| {
        (
            200,
            r#"{"description": "Does a thing", "license": {"spdx_id": "NOASSERTION"}}"#.to_string(),
        )
    });
    let provider = GitHubProvider::with_api_base(client(None), &server.base);
    let facts = provider.repository(&repo(Host::GitHub)).unwrap().unwrap();
    assert_eq!(facts.description, "Does a thing");
    assert_eq!(facts.license, "");
}

#[test]
fn github_server_error_is_not_treated_as_missing() {
    let server = Server::start(|_| (503, "{}".to_string()));
    let provider = GitHubProvider::with_api_base(client(None), &server.base);
    assert!(matches!(
        provider.repository(&repo(Host::GitHub)),
        Err(ProviderError::Status { status: 503, .. })
    ));
}

#[test]
fn codeberg_unknown_repository_has_no_releases() {
    let server = Server::start(|_| not_found());
    let provider = CodebergProvider::with_api_base(client(None), format!("{}/", server.base));
    let repo = repo(Host::Codeberg);

    assert_eq!(provider.repository(&repo).unwrap(), None);
    assert!(provider.releases(&repo).unwrap().is_empty());
    assert_eq!(
        server.hits()[1].path,
        "/repos/someone/thing/releases?limit=50&page=1"
    );
}

#[test]
fn gitlab_unknown_project_has_no_releases() {
    let server = Server::start(|_| not_found());
    let provider = GitLabProvider::with_api_base(client(None), &server.base);
    let repo = repo(Host::GitLab);

    assert_eq!(provider.repository(&repo).unwrap(), None);
    assert!(provider.releases(&repo).unwrap().is_empty());

    let paths: Vec<_> = server.hits().into_iter().map(|h| h.path).collect();
    assert_eq!(
        paths,
        vec![
            "/projects/someone%2Fthing?license=true",
            "/projects/someone%2Fthing/repository/tags?per_page=100&page=1"
        ]
    );
}
