//! `statusctl set` - flip the published status and announce it

use crate::config::{NotifyConfig, StoreConfig};
use crate::models::Status;
use crate::services::{Notifier, StatusStore};
use colored::Colorize;

/// Run the set command. All detail is printed here; the caller only learns
/// whether the store write went through.
pub fn run(status: Status, reason: &str, message: Option<&str>) -> bool {
    let config = match StoreConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            println!("{}", format!("❌ ERROR: {}", e).red());
            return false;
        }
    };

    let store = match StatusStore::new(config) {
        Ok(store) => store,
        Err(e) => {
            println!("{}", format!("❌ ERROR: {}", e).red());
            return false;
        }
    };

    match store.update(status, reason, message) {
        Ok(_) => {
            println!(
                "{}",
                format!("✅ Status updated to '{}' on GitHub", status).green()
            );
            send_notification(status, reason);
            true
        }
        Err(e) => {
            println!("{}", format!("❌ Failed to update: {}", e).red());
            false
        }
    }
}

// Fire-and-forget; the update outcome is already decided.
fn send_notification(status: Status, reason: &str) {
    match Notifier::new(NotifyConfig::from_env()) {
        Ok(notifier) => notifier.notify(status, reason),
        Err(e) => {
            println!(
                "{}",
                format!("⚠️ Failed to send Discord notification: {}", e).yellow()
            );
        }
    }
}
