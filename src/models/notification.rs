// src/models/notification.rs

//! Push notification payloads and their wire format.

use serde::{Deserialize, Serialize};

use super::ShowRecord;

/// One notification announcing one show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationPayload {
    /// Topic the message is broadcast to (e.g. "/topics/global")
    pub target_topic: String,

    /// Venue name
    pub title: String,

    /// Show date
    pub subtitle: String,

    /// Show id rendered as a string
    pub media_id: String,
}

impl NotificationPayload {
    /// Build the notification for a show.
    pub fn for_show(show: &ShowRecord, topic: &str) -> Self {
        Self {
            target_topic: topic.to_string(),
            title: show.venue_name.clone(),
            subtitle: show.date.clone(),
            media_id: show.id.to_string(),
        }
    }

    /// Message body in the push service's format.
    pub fn to_message(&self) -> PushMessage<'_> {
        PushMessage {
            to: &self.target_topic,
            data: PushData {
                title: &self.title,
                subtitle: &self.subtitle,
                mediaid: &self.media_id,
            },
        }
    }

    /// Serialize the message body to JSON bytes.
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(&self.to_message())
    }
}

/// Top-level push request body.
#[derive(Debug, Serialize)]
pub struct PushMessage<'a> {
    pub to: &'a str,
    pub data: PushData<'a>,
}

/// Data block delivered to the client app.
#[derive(Debug, Serialize)]
pub struct PushData<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub mediaid: &'a str,
}

/// Push service response for a topic message.
///
/// Topic sends answer with either `message_id` or `error`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PushResponse {
    #[serde(default)]
    pub message_id: Option<serde_json::Value>,

    #[serde(default)]
    pub error: Option<String>,
}

/// Record of a delivery the push service accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// HTTP status code of the push response
    pub status: u16,

    /// Message id assigned by the push service, if it returned one
    pub message_id: Option<String>,
}
