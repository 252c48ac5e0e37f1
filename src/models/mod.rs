// src/models/mod.rs

//! Domain models for the notifier.
//!
//! Archive data (years, shows), push payloads, and configuration.

mod config;
mod notification;
mod show;
mod year;

// Re-export all public types
pub use config::{
    ApiKey, ArchiveConfig, Config, HttpConfig, LoggingConfig, PollConfig, PushConfig, env_keys,
    http_url,
};
pub use notification::{DeliveryReceipt, NotificationPayload, PushData, PushMessage, PushResponse};
pub use show::ShowRecord;
pub use year::{Snapshot, YearSummary};

use serde::Deserialize;

/// Envelope every archive listing is wrapped in.
#[derive(Debug, Deserialize)]
pub struct ArchiveResponse<T> {
    pub data: Vec<T>,
}
