//! Service layer for statusctl
//!
//! The two collaborators of the tool: the status store client (GitHub
//! Contents API) and the webhook notifier (Discord). CLI commands compose
//! these; neither knows about the other.

pub mod notifier;
pub mod status_store;

// Re-export commonly used types
pub use notifier::Notifier;
pub use status_store::{FetchOutcome, StatusStore};
