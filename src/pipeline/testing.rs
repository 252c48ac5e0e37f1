//! In-memory archive and notifier used by pipeline tests.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::{DeliveryReceipt, NotificationPayload, ShowRecord, Snapshot, YearSummary};
use crate::services::{PushNotifier, ShowArchive};

pub fn snapshot(years: &[(&str, u64)]) -> Snapshot {
    Snapshot::new(
        years
            .iter()
            .map(|(label, count)| YearSummary::new(*label, *count))
            .collect(),
    )
}

/// Archive that replays queued snapshot responses.
#[derive(Default)]
pub struct FakeArchive {
    snapshots: Mutex<VecDeque<std::result::Result<Snapshot, String>>>,
    shows: Vec<ShowRecord>,
    fail_shows: bool,
    pub requested_counts: Mutex<Vec<usize>>,
}

impl FakeArchive {
    pub fn new(shows: Vec<ShowRecord>) -> Self {
        Self {
            shows,
            ..Self::default()
        }
    }

    pub fn failing_show_lookup(mut self) -> Self {
        self.fail_shows = true;
        self
    }

    pub fn push_snapshot(&self, snapshot: Snapshot) {
        self.snapshots.lock().unwrap().push_back(Ok(snapshot));
    }

    pub fn push_failure(&self, reason: &str) {
        self.snapshots
            .lock()
            .unwrap()
            .push_back(Err(reason.to_string()));
    }

    pub fn requested(&self) -> Vec<usize> {
        self.requested_counts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ShowArchive for FakeArchive {
    async fn fetch_snapshot(&self) -> Result<Snapshot> {
        match self.snapshots.lock().unwrap().pop_front() {
            Some(Ok(snapshot)) => Ok(snapshot),
            Some(Err(reason)) => Err(AppError::fetch("years", reason)),
            None => Err(AppError::fetch("years", "no response queued")),
        }
    }

    async fn fetch_latest_shows(&self, count: usize) -> Result<Vec<ShowRecord>> {
        self.requested_counts.lock().unwrap().push(count);
        if self.fail_shows {
            return Err(AppError::fetch("shows", "status 503"));
        }
        Ok(self.shows.iter().take(count).cloned().collect())
    }
}

/// Notifier that records every payload and fails the listed media ids.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<NotificationPayload>>,
    pub failing: HashSet<String>,
}

impl RecordingNotifier {
    pub fn failing(ids: &[&str]) -> Self {
        Self {
            failing: ids.iter().map(|id| id.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<NotificationPayload> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl PushNotifier for RecordingNotifier {
    async fn deliver(&self, payload: &NotificationPayload) -> Result<DeliveryReceipt> {
        self.sent.lock().unwrap().push(payload.clone());
        if self.failing.contains(&payload.media_id) {
            return Err(AppError::dispatch(&payload.media_id, "connection reset"));
        }
        Ok(DeliveryReceipt {
            status: 200,
            message_id: Some(format!("msg-{}", payload.media_id)),
        })
    }
}
