//! Configuration - explicit values built once from the environment
//!
//! Credentials are read into a `StoreConfig` at startup and handed to the
//! client constructor; nothing reads ambient process state afterwards. The
//! endpoint bases are plain fields so tests can point the clients at a local
//! mock server.

use thiserror::Error;

pub const STATUS_FILE: &str = "status.json";

const DEFAULT_API_BASE: &str = "https://api.github.com";
const DEFAULT_RAW_BASE: &str = "https://raw.githubusercontent.com";
const DEFAULT_BRANCH: &str = "main";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("GITHUB_TOKEN is not configured")]
    MissingToken,
    #[error("GITHUB_REPO is not configured (expected \"owner/repo\")")]
    MissingRepo,
}

/// Where the status record lives and how to authenticate writes to it.
/// The token is optional at construction time; the store demands it before
/// any write, so read-only commands work without one.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub token: Option<String>,
    /// "owner/repo"
    pub repo: String,
    pub branch: String,
    pub api_base: String,
    pub raw_base: String,
}

impl StoreConfig {
    /// Build from GITHUB_TOKEN / GITHUB_REPO / GITHUB_BRANCH.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::build(
            std::env::var("GITHUB_TOKEN").ok(),
            std::env::var("GITHUB_REPO").ok(),
            std::env::var("GITHUB_BRANCH").ok(),
        )
    }

    fn build(
        token: Option<String>,
        repo: Option<String>,
        branch: Option<String>,
    ) -> Result<Self, ConfigError> {
        let repo = repo.filter(|r| !r.is_empty()).ok_or(ConfigError::MissingRepo)?;
        Ok(Self {
            token: token.filter(|t| !t.is_empty()),
            repo,
            branch: branch
                .filter(|b| !b.is_empty())
                .unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
            api_base: DEFAULT_API_BASE.to_string(),
            raw_base: DEFAULT_RAW_BASE.to_string(),
        })
    }

    /// Contents API URL for the status file (authenticated reads and writes).
    pub fn contents_url(&self) -> String {
        format!("{}/repos/{}/contents/{}", self.api_base, self.repo, STATUS_FILE)
    }

    /// Raw-content URL for the status file (unauthenticated reads).
    pub fn raw_url(&self) -> String {
        format!("{}/{}/{}/{}", self.raw_base, self.repo, self.branch, STATUS_FILE)
    }
}

/// Webhook target for the Discord announcement. The URL is a secret, so it
/// comes from the environment; notification is skipped when unset.
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    pub webhook_url: Option<String>,
}

impl NotifyConfig {
    pub fn from_env() -> Self {
        Self {
            webhook_url: std::env::var("STATUS_WEBHOOK_URL")
                .ok()
                .filter(|u| !u.is_empty()),
        }
    }
}
