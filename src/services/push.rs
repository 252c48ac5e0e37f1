// src/services/push.rs

//! Push notification client.
//!
//! Sends topic messages to the push service's legacy HTTP endpoint,
//! authenticated with `Authorization: key=<server key>`.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{
    ApiKey, DeliveryReceipt, NotificationPayload, PushConfig, PushResponse, http_url,
};
use crate::utils::http::truncate;

/// Delivery of one notification.
#[async_trait]
pub trait PushNotifier: Send + Sync {
    async fn deliver(&self, payload: &NotificationPayload) -> Result<DeliveryReceipt>;
}

/// HTTP client for the push service.
pub struct PushClient {
    client: Client,
    endpoint: Url,
    api_key: ApiKey,
}

impl PushClient {
    /// Create a push client. Fails when no server key is configured.
    pub fn new(config: &PushConfig, client: Client) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| AppError::config("push.api_key is missing"))?;
        Ok(Self {
            client,
            endpoint: http_url("push.endpoint", &config.endpoint)?,
            api_key,
        })
    }

    fn authorization(&self) -> String {
        format!("key={}", self.api_key.expose())
    }
}

#[async_trait]
impl PushNotifier for PushClient {
    async fn deliver(&self, payload: &NotificationPayload) -> Result<DeliveryReceipt> {
        let media_id = payload.media_id.as_str();
        let body = payload.to_json()?;

        log::debug!("POST {} (show {})", self.endpoint, media_id);
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(AUTHORIZATION, self.authorization())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| AppError::dispatch(media_id, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::dispatch(media_id, e))?;
        log::debug!("Push response {}: {}", status, truncate(&text, 200));

        interpret_response(media_id, status.as_u16(), &text)
    }
}

/// Turn a push service response into a receipt or a dispatch error.
pub fn interpret_response(media_id: &str, status: u16, body: &str) -> Result<DeliveryReceipt> {
    if !(200..300).contains(&status) {
        return Err(AppError::dispatch(
            media_id,
            format!("status {}: {}", status, truncate(body, 200)),
        ));
    }

    // Non-JSON bodies on a 2xx are accepted; the status is all we can check.
    let parsed: PushResponse = serde_json::from_str(body).unwrap_or_default();
    if let Some(error) = parsed.error {
        return Err(AppError::dispatch(media_id, error));
    }

    let message_id = parsed.message_id.map(|id| match id {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    });
    Ok(DeliveryReceipt { status, message_id })
}
