//! Update check module
//!
//! Polls the package version endpoint, caches what it learns in the
//! preference store and raises a notification when a newer release is
//! available and has not been snoozed or skipped.

mod config;
mod error;
mod manager;
mod message;
mod notifier;
mod types;
mod version;


pub use config::UpdateCheckConfig;
pub use error::*;
pub use manager::{UpdateManager, VersionFetcher};
pub use message::{parse_server_message, ServerMessage};
pub use notifier::{ChannelNotifier, LogNotifier, UpdateNotifier};
pub use types::*;
pub use version::parse_version;
