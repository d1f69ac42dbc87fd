// Statusctl - GitHub-hosted status toggle
// Flips a status.json record between on/off through the GitHub Contents API
// and announces the transition on a Discord webhook.

pub mod cli;
pub mod config;
pub mod models;
pub mod services;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use config::{ConfigError, NotifyConfig, StoreConfig};
pub use models::{Status, StatusRecord};
pub use services::{FetchOutcome, Notifier, StatusStore};
