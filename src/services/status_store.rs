//! Status store - read-modify-write of status.json through the GitHub Contents API
//!
//! Reads are best-effort: any transport error, non-success response, or parse
//! failure falls back to `Absent` and the caller defaults the record. Writes
//! are strict: they carry the prior file SHA as an optimistic-concurrency
//! precondition and fail outright on anything but 200/201. No retries.

use crate::config::{ConfigError, StoreConfig};
use crate::models::{Status, StatusRecord};
use crate::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("statusctl/", env!("CARGO_PKG_VERSION"));

/// Result of a raw read: either the published record or nothing usable.
#[derive(Debug)]
pub enum FetchOutcome {
    Found(StatusRecord),
    Absent,
}

/// Precondition for a write: the SHA of the file being replaced, or nothing
/// when the file does not exist yet.
#[derive(Debug, PartialEq, Eq)]
enum WritePrecondition {
    Sha(String),
    None,
}

#[derive(Deserialize)]
struct ContentsMetadata {
    sha: String,
}

/// PUT body for the Contents API. `sha` is omitted entirely when creating
/// the file for the first time.
#[derive(Debug, Serialize)]
struct ContentsWriteRequest {
    message: String,
    content: String,
    branch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<String>,
}

impl ContentsWriteRequest {
    fn for_record(
        record: &StatusRecord,
        branch: &str,
        precondition: WritePrecondition,
    ) -> Result<Self> {
        Ok(Self {
            message: format!("Update status to {}", record.status.as_str().to_uppercase()),
            content: STANDARD.encode(record.to_pretty_json()?),
            branch: branch.to_string(),
            sha: match precondition {
                WritePrecondition::Sha(sha) => Some(sha),
                WritePrecondition::None => None,
            },
        })
    }
}

pub struct StatusStore {
    config: StoreConfig,
    http: Client,
}

impl StatusStore {
    pub fn new(config: StoreConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { config, http })
    }

    /// Unauthenticated read of the raw file. The payload is trusted as-is;
    /// anything that cannot be read or parsed is `Absent`, never an error.
    pub fn fetch(&self) -> FetchOutcome {
        let response = match self
            .http
            .get(self.config.raw_url())
            .timeout(FETCH_TIMEOUT)
            .send()
        {
            Ok(response) => response,
            Err(_) => return FetchOutcome::Absent,
        };
        if !response.status().is_success() {
            return FetchOutcome::Absent;
        }
        match response.json::<StatusRecord>() {
            Ok(record) => FetchOutcome::Found(record),
            Err(_) => FetchOutcome::Absent,
        }
    }

    /// Apply a status transition and write the record back. Returns the
    /// record as written. Fails before any network call when no token is
    /// configured.
    pub fn update(
        &self,
        status: Status,
        reason: &str,
        message: Option<&str>,
    ) -> Result<StatusRecord> {
        let token = self
            .config
            .token
            .as_deref()
            .ok_or(ConfigError::MissingToken)?;

        let mut record = match self.fetch() {
            FetchOutcome::Found(record) => record,
            FetchOutcome::Absent => StatusRecord::default(),
        };
        record.apply(status, reason, message);

        let precondition = self.current_sha(token);
        let request =
            ContentsWriteRequest::for_record(&record, &self.config.branch, precondition)?;

        let response = self
            .http
            .put(self.config.contents_url())
            .header(AUTHORIZATION, format!("token {}", token))
            .header(ACCEPT, GITHUB_ACCEPT)
            .json(&request)
            .send()
            .context("status store write failed")?;

        let code = response.status();
        if code == StatusCode::OK || code == StatusCode::CREATED {
            Ok(record)
        } else {
            let detail = response.text().unwrap_or_default();
            anyhow::bail!("{} - {}", code.as_u16(), detail)
        }
    }

    /// Authenticated metadata read to learn the current file SHA. Anything
    /// but a parseable 200 means "no precondition" and the write goes out
    /// as a create.
    fn current_sha(&self, token: &str) -> WritePrecondition {
        let response = match self
            .http
            .get(self.config.contents_url())
            .header(AUTHORIZATION, format!("token {}", token))
            .header(ACCEPT, GITHUB_ACCEPT)
            .send()
        {
            Ok(response) => response,
            Err(_) => return WritePrecondition::None,
        };
        if response.status() != StatusCode::OK {
            return WritePrecondition::None;
        }
        match response.json::<ContentsMetadata>() {
            Ok(metadata) => WritePrecondition::Sha(metadata.sha),
            Err(_) => WritePrecondition::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn test_config(server: &mockito::ServerGuard) -> StoreConfig {
        StoreConfig {
            token: Some("tok".to_string()),
            repo: "acme/status".to_string(),
            branch: "main".to_string(),
            api_base: server.url(),
            raw_base: server.url(),
        }
    }

    const RAW_PATH: &str = "/acme/status/main/status.json";
    const CONTENTS_PATH: &str = "/repos/acme/status/contents/status.json";

    fn remote_record() -> serde_json::Value {
        json!({
            "status": "on",
            "reason": "",
            "last_updated": "2026-01-01T00:00:00+00:00",
            "version": "v6.0",
            "maintenance": false,
            "message": "scheduled window at 22:00"
        })
    }

    #[test]
    fn test_fetch_found() {
        let mut server = mockito::Server::new();
        let _raw = server
            .mock("GET", RAW_PATH)
            .with_status(200)
            .with_body(remote_record().to_string())
            .create();

        let store = StatusStore::new(test_config(&server)).unwrap();
        match store.fetch() {
            FetchOutcome::Found(record) => {
                assert_eq!(record.status, Status::On);
                assert_eq!(record.message, "scheduled window at 22:00");
            }
            FetchOutcome::Absent => panic!("expected Found"),
        }
    }

    #[test]
    fn test_fetch_absent_on_error_status() {
        let mut server = mockito::Server::new();
        let _raw = server.mock("GET", RAW_PATH).with_status(404).create();

        let store = StatusStore::new(test_config(&server)).unwrap();
        assert!(matches!(store.fetch(), FetchOutcome::Absent));
    }

    #[test]
    fn test_fetch_absent_on_unparseable_body() {
        let mut server = mockito::Server::new();
        let _raw = server
            .mock("GET", RAW_PATH)
            .with_status(200)
            .with_body("<html>not json</html>")
            .create();

        let store = StatusStore::new(test_config(&server)).unwrap();
        assert!(matches!(store.fetch(), FetchOutcome::Absent));
    }

    #[test]
    fn test_update_defaults_record_when_absent() {
        let mut server = mockito::Server::new();
        let _raw = server.mock("GET", RAW_PATH).with_status(404).create();
        let _meta = server.mock("GET", CONTENTS_PATH).with_status(404).create();
        let put = server
            .mock("PUT", CONTENTS_PATH)
            .match_header("authorization", "token tok")
            .match_body(Matcher::PartialJson(json!({
                "message": "Update status to OFF",
                "branch": "main"
            })))
            .with_status(201)
            .with_body("{}")
            .create();

        let store = StatusStore::new(test_config(&server)).unwrap();
        let record = store.update(Status::Off, "maintenance", None).unwrap();

        put.assert();
        assert_eq!(record.status, Status::Off);
        assert_eq!(record.version, "v6.0");
        assert_eq!(record.reason, "maintenance");
        assert!(record.maintenance);
        assert!(record.message.is_empty());
    }

    #[test]
    fn test_update_carries_sha_precondition_and_preserves_message() {
        let mut server = mockito::Server::new();
        let _raw = server
            .mock("GET", RAW_PATH)
            .with_status(200)
            .with_body(remote_record().to_string())
            .create();
        let _meta = server
            .mock("GET", CONTENTS_PATH)
            .with_status(200)
            .with_body(json!({"sha": "abc123"}).to_string())
            .create();
        let put = server
            .mock("PUT", CONTENTS_PATH)
            .match_body(Matcher::PartialJson(json!({"sha": "abc123"})))
            .with_status(200)
            .with_body("{}")
            .create();

        let store = StatusStore::new(test_config(&server)).unwrap();
        let record = store.update(Status::Off, "deploy", None).unwrap();

        put.assert();
        assert_eq!(record.message, "scheduled window at 22:00");
        assert!(record.maintenance);
    }

    #[test]
    fn test_update_failure_carries_response_detail() {
        let mut server = mockito::Server::new();
        let _raw = server.mock("GET", RAW_PATH).with_status(404).create();
        let _meta = server.mock("GET", CONTENTS_PATH).with_status(404).create();
        let _put = server
            .mock("PUT", CONTENTS_PATH)
            .with_status(422)
            .with_body("Validation Failed")
            .create();

        let store = StatusStore::new(test_config(&server)).unwrap();
        let err = store.update(Status::On, "", None).unwrap_err();
        let detail = err.to_string();
        assert!(detail.contains("422"));
        assert!(detail.contains("Validation Failed"));
    }

    #[test]
    fn test_update_without_token_makes_no_network_calls() {
        let mut server = mockito::Server::new();
        let raw = server.mock("GET", RAW_PATH).with_status(200).expect(0).create();
        let put = server.mock("PUT", CONTENTS_PATH).with_status(200).expect(0).create();

        let mut config = test_config(&server);
        config.token = None;
        let store = StatusStore::new(config).unwrap();

        let err = store.update(Status::Off, "", None).unwrap_err();
        assert!(err.to_string().contains("GITHUB_TOKEN"));
        raw.assert();
        put.assert();
    }

    #[test]
    fn test_write_request_omits_sha_on_create() {
        let record = StatusRecord::default();
        let request =
            ContentsWriteRequest::for_record(&record, "main", WritePrecondition::None).unwrap();
        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("sha").is_none());
        assert_eq!(body["branch"], "main");
    }

    #[test]
    fn test_write_request_content_is_base64_of_pretty_json() {
        let mut record = StatusRecord::default();
        record.apply(Status::Off, "outage", Some("back soon"));
        let request = ContentsWriteRequest::for_record(
            &record,
            "main",
            WritePrecondition::Sha("abc123".to_string()),
        )
        .unwrap();

        let decoded = STANDARD.decode(&request.content).unwrap();
        let text = String::from_utf8(decoded).unwrap();
        assert!(text.contains("\n  \"status\": \"off\""));

        let round_trip: StatusRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(round_trip.status, Status::Off);
        assert!(round_trip.maintenance);
        assert_eq!(round_trip.message, "back soon");
        assert_eq!(request.sha.as_deref(), Some("abc123"));
        assert_eq!(request.message, "Update status to OFF");
    }
}
