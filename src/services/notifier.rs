//! Notifier - fire-and-forget Discord announcement of a status transition
//!
//! Delivery never affects the outcome of the store update: every failure is
//! printed as a warning and swallowed.

use crate::config::NotifyConfig;
use crate::models::Status;
use crate::{Context, Result};
use colored::Colorize;
use reqwest::blocking::Client;
use serde_json::{json, Value};
use std::time::Duration;

const NOTIFY_TIMEOUT: Duration = Duration::from_secs(5);

const COLOR_ONLINE: u32 = 0x00FF00;
const COLOR_OFFLINE: u32 = 0xFF0000;

pub struct Notifier {
    webhook_url: Option<String>,
    http: Client,
}

/// Embed payload keyed by the new status, with the reason appended to the
/// description when present.
fn build_embed(status: Status, reason: &str) -> Value {
    let (color, title, description) = match status {
        Status::On => (
            COLOR_ONLINE,
            "✅ Status: ONLINE",
            "The application is now operational.",
        ),
        Status::Off => (
            COLOR_OFFLINE,
            "⛔ Status: OFFLINE",
            "The application has been taken offline.",
        ),
    };

    let mut description = description.to_string();
    if !reason.is_empty() {
        description.push_str(&format!("\n\n**Reason:** {}", reason));
    }

    json!({
        "title": title,
        "description": description,
        "color": color,
        "fields": [
            {"name": "Source", "value": "GitHub Status System", "inline": true},
            {
                "name": "Updated",
                "value": chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
                "inline": true
            }
        ],
        "footer": {"text": "Automated status update"}
    })
}

impl Notifier {
    pub fn new(config: NotifyConfig) -> Result<Self> {
        let http = Client::builder()
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            webhook_url: config.webhook_url,
            http,
        })
    }

    /// Post the transition announcement once. Never returns an error.
    pub fn notify(&self, status: Status, reason: &str) {
        let Some(url) = self.webhook_url.as_deref() else {
            println!(
                "{}",
                "⚠️ STATUS_WEBHOOK_URL not set, skipping notification".yellow()
            );
            return;
        };

        let body = json!({"embeds": [build_embed(status, reason)]});
        let result = self
            .http
            .post(url)
            .timeout(NOTIFY_TIMEOUT)
            .json(&body)
            .send();

        match result {
            Ok(response) if response.status().is_success() => {
                println!("{}", "📨 Discord notification sent".cyan());
            }
            Ok(response) => {
                println!(
                    "{}",
                    format!(
                        "⚠️ Failed to send Discord notification: HTTP {}",
                        response.status().as_u16()
                    )
                    .yellow()
                );
            }
            Err(e) => {
                println!(
                    "{}",
                    format!("⚠️ Failed to send Discord notification: {}", e).yellow()
                );
            }
        }
    }
}
