//! Latest-release lookup against the GitHub releases API.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Repository whose releases are checked.
const RELEASES_REPO: &str = "cli-scaffold/cli-scaffold";

/// Production GitHub API endpoint.
const GITHUB_API_BASE_URL: &str = "https://api.github.com";

/// HTTP request timeout; the check is advisory and must not hang the CLI.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// GitHub rejects requests without a User-Agent.
const USER_AGENT: &str = concat!("cli-scaffold/", env!("CARGO_PKG_VERSION"));

/// Release feed errors.
#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("release request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("release endpoint returned status {0}")]
    Http(StatusCode),

    #[error("malformed release response: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct LatestRelease {
    tag_name: String,
}

/// Client for the "latest release" endpoint of a fixed repository.
pub struct ReleaseChecker {
    client: Client,
    base_url: String,
}

impl ReleaseChecker {
    pub fn new() -> Self {
        Self::with_base_url(GITHUB_API_BASE_URL)
    }

    /// Points the checker at an alternative API base, e.g. a local mock.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .expect("failed to build http client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetches the tag of the latest published release, verbatim.
    pub fn latest_release(&self) -> Result<String, ReleaseError> {
        let url = format!("{}/repos/{}/releases/latest", self.base_url, RELEASES_REPO);
        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .map_err(ReleaseError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReleaseError::Http(status));
        }

        let body = response.text().map_err(ReleaseError::Network)?;
        let release: LatestRelease = serde_json::from_str(&body)?;
        Ok(release.tag_name)
    }

    /// Whether `version` is at least as new as the latest published
    /// release. Any fetch failure answers `false`: for an advisory check,
    /// "possibly out of date" is the safe default and never worth an error.
    pub fn is_latest_release(&self, version: &str) -> bool {
        match self.latest_release() {
            Ok(latest) => up_to_date(version, &latest),
            Err(err) => {
                tracing::debug!("release check failed: {err}");
                false
            }
        }
    }
}

impl Default for ReleaseChecker {
    fn default() -> Self {
        Self::new()
    }
}

/// Semantic-version comparison of two `v`-prefixed tags: true when
/// `version` >= `latest`. Tags that do not parse as semver fall back to
/// exact string equality.
pub(crate) fn up_to_date(version: &str, latest: &str) -> bool {
    match (parse_tag(version), parse_tag(latest)) {
        (Some(current), Some(latest)) => current >= latest,
        _ => version == latest,
    }
}

fn parse_tag(tag: &str) -> Option<semver::Version> {
    semver::Version::parse(tag.trim().trim_start_matches('v')).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// One-shot HTTP server answering the next request with a canned
    /// response, returning the base URL to point the checker at.
    fn serve_response(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("local addr");
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 2048];
                let _ = stream.read(&mut buf);
                let response = format!(
                    "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{addr}")
    }

    const LATEST_IS_V002: &str = r#"{"tag_name": "v0.0.2", "name": "v0.0.2", "draft": false}"#;

    #[test]
    fn latest_release_returns_tag_verbatim() {
        let checker = ReleaseChecker::with_base_url(serve_response("200 OK", LATEST_IS_V002));
        assert_eq!(checker.latest_release().expect("fetch"), "v0.0.2");
    }

    #[test]
    fn non_success_status_is_an_http_error() {
        let checker = ReleaseChecker::with_base_url(serve_response("404 Not Found", "{}"));
        let err = checker.latest_release().expect_err("404");
        assert!(
            matches!(err, ReleaseError::Http(status) if status == StatusCode::NOT_FOUND),
            "{err}"
        );
    }

    #[test]
    fn malformed_body_is_a_parse_error() {
        let checker = ReleaseChecker::with_base_url(serve_response("200 OK", "not json"));
        let err = checker.latest_release().expect_err("garbage body");
        assert!(matches!(err, ReleaseError::Parse(_)), "{err}");
    }

    #[test]
    fn missing_tag_field_is_a_parse_error() {
        let checker =
            ReleaseChecker::with_base_url(serve_response("200 OK", r#"{"name": "v0.0.2"}"#));
        let err = checker.latest_release().expect_err("no tag_name");
        assert!(matches!(err, ReleaseError::Parse(_)), "{err}");
    }

    #[test]
    fn older_version_is_not_latest() {
        let checker = ReleaseChecker::with_base_url(serve_response("200 OK", LATEST_IS_V002));
        assert!(!checker.is_latest_release("v0.0.0"));
    }

    #[test]
    fn matching_version_is_latest() {
        let checker = ReleaseChecker::with_base_url(serve_response("200 OK", LATEST_IS_V002));
        assert!(checker.is_latest_release("v0.0.2"));
    }

    #[test]
    fn fetch_failure_reports_not_latest() {
        // Nothing listens on port 9 on loopback; connection is refused.
        let checker = ReleaseChecker::with_base_url("http://127.0.0.1:9");
        assert!(!checker.is_latest_release("v0.0.2"));
    }

    #[test]
    fn ordering_handles_multi_digit_segments() {
        assert!(up_to_date("v0.0.10", "v0.0.9"));
        assert!(!up_to_date("v0.0.9", "v0.0.10"));
    }

    #[test]
    fn ordering_is_semantic_not_lexical() {
        assert!(up_to_date("v0.0.2", "v0.0.2"));
        assert!(up_to_date("0.0.2", "v0.0.2"), "missing v prefix still matches");
        assert!(up_to_date("v1.0.0", "v0.9.9"));
        assert!(!up_to_date("v0.9.9", "v1.0.0"));
    }

    #[test]
    fn unparseable_tags_fall_back_to_string_equality() {
        assert!(up_to_date("dev", "dev"));
        assert!(!up_to_date("dev", "nightly"));
    }
}
