// src/pipeline/dispatch.rs

//! Notification dispatch for newly discovered shows.

use crate::models::{NotificationPayload, ShowRecord};
use crate::services::PushNotifier;

/// A show whose notification could not be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchFailure {
    pub media_id: String,
    pub reason: String,
}

/// Summary of one dispatch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub attempted: usize,
    pub delivered: usize,
    pub failures: Vec<DispatchFailure>,
}

impl DispatchReport {
    pub fn all_delivered(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Send one notification per show to the broadcast topic.
///
/// Deliveries run one after another. A failed delivery is logged and
/// recorded, then the next show is attempted.
pub async fn dispatch_shows(
    notifier: &dyn PushNotifier,
    topic: &str,
    shows: &[ShowRecord],
) -> DispatchReport {
    let mut report = DispatchReport::default();

    for show in shows {
        let payload = NotificationPayload::for_show(show, topic);
        report.attempted += 1;
        log::info!(
            "Sending show {} ({} @ {}) to {}",
            payload.media_id,
            payload.subtitle,
            payload.title,
            payload.target_topic
        );

        match notifier.deliver(&payload).await {
            Ok(receipt) => {
                report.delivered += 1;
                log::info!(
                    "Delivered show {}: status {}, message id {}",
                    payload.media_id,
                    receipt.status,
                    receipt.message_id.as_deref().unwrap_or("-")
                );
            }
            Err(error) => {
                log::error!("Failed to deliver show {}: {}", payload.media_id, error);
                report.failures.push(DispatchFailure {
                    media_id: payload.media_id,
                    reason: error.to_string(),
                });
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::testing::RecordingNotifier;

    fn shows() -> Vec<ShowRecord> {
        vec![
            ShowRecord::new(3, "2024-08-04", "Bethel Woods"),
            ShowRecord::new(2, "2024-08-03", "Bethel Woods"),
            ShowRecord::new(1, "2024-08-02", "Dick's Sporting Goods Park"),
        ]
    }

    #[tokio::test]
    async fn test_one_payload_per_show() {
        let notifier = RecordingNotifier::default();
        let report = dispatch_shows(&notifier, "/topics/global", &shows()).await;

        assert_eq!(report.attempted, 3);
        assert_eq!(report.delivered, 3);
        assert!(report.all_delivered());

        let sent = notifier.sent();
        for (payload, show) in sent.iter().zip(shows().iter()) {
            assert_eq!(payload.media_id, show.id.to_string());
            assert_eq!(payload.title, show.venue_name);
            assert_eq!(payload.subtitle, show.date);
            assert_eq!(payload.target_topic, "/topics/global");
        }
    }

    #[tokio::test]
    async fn test_failure_does_not_block_later_shows() {
        let notifier = RecordingNotifier::failing(&["3"]);
        let report = dispatch_shows(&notifier, "/topics/global", &shows()).await;

        assert_eq!(report.attempted, 3);
        assert_eq!(report.delivered, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].media_id, "3");
        assert_eq!(notifier.sent().len(), 3);
    }

    #[tokio::test]
    async fn test_no_shows_no_calls() {
        let notifier = RecordingNotifier::default();
        let report = dispatch_shows(&notifier, "/topics/global", &[]).await;

        assert_eq!(report, DispatchReport::default());
        assert!(notifier.sent().is_empty());
    }
}
