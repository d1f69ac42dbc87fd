//! `statusctl show` - print the currently published status record

use crate::config::StoreConfig;
use crate::models::Status;
use crate::services::{FetchOutcome, StatusStore};
use colored::Colorize;

pub fn run() -> bool {
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

    match store.fetch() {
        FetchOutcome::Found(record) => {
            let status_line = match record.status {
                Status::On => format!("✅ {}", record.status).green(),
                Status::Off => format!("⛔ {}", record.status).red(),
            };
            println!("   Status:      {}", status_line);
            println!("   Maintenance: {}", record.maintenance);
            if !record.reason.is_empty() {
                println!("   Reason:      {}", record.reason);
            }
            if !record.message.is_empty() {
                println!("   Message:     {}", record.message);
            }
            if !record.last_updated.is_empty() {
                println!("   Updated:     {}", record.last_updated);
            }
            println!("   Version:     {}", record.version);
            true
        }
        FetchOutcome::Absent => {
            println!("{}", "📭 No status record published".yellow());
            true
        }
    }
}
