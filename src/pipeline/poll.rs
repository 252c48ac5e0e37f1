// src/pipeline/poll.rs

//! The poll loop.
//!
//! Fetches the year table on a fixed interval, compares it with the retained
//! snapshot and announces new shows. The retained snapshot only ever holds
//! the result of a complete, successful fetch.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::{self, MissedTickBehavior};

use crate::models::{Config, Snapshot};
use crate::services::{PushNotifier, ShowArchive};

use super::detect::{Change, ChangeDetector};
use super::dispatch::{DispatchReport, dispatch_shows};

/// Poll loop settings taken from configuration.
#[derive(Debug, Clone)]
pub struct PollSettings {
    pub interval: Duration,
    pub topic: String,
    pub max_shows_per_tick: usize,
}

impl PollSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            interval: Duration::from_secs(config.poll.interval_secs),
            topic: config.push.topic.clone(),
            max_shows_per_tick: config.poll.max_shows_per_tick,
        }
    }
}

/// State carried from one tick to the next.
#[derive(Debug, Clone, Default)]
pub struct PollState {
    /// Snapshot of the last successful fetch, absent until the first one
    pub retained: Option<Snapshot>,
    /// When `retained` was fetched
    pub last_success: Option<DateTime<Utc>>,
    /// Ticks run so far, including the startup fetch
    pub ticks: u64,
}

impl PollState {
    fn retain(&mut self, snapshot: Snapshot) {
        self.retained = Some(snapshot);
        self.last_success = Some(Utc::now());
    }
}

/// What a single tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// First successful fetch; stored without announcing anything
    Baseline { years: usize },
    /// Nothing new
    Idle,
    /// New shows were looked up and dispatched
    Notified { change: Change, report: DispatchReport },
    /// A read failed; the retained snapshot is unchanged
    FetchFailed { reason: String },
}

/// Drives fetch, detect, and dispatch on a timer.
pub struct Poller<A, N> {
    archive: A,
    notifier: N,
    settings: PollSettings,
    detector: ChangeDetector,
    state: PollState,
}

impl<A: ShowArchive, N: PushNotifier> Poller<A, N> {
    pub fn new(archive: A, notifier: N, settings: PollSettings) -> Self {
        Self {
            archive,
            notifier,
            settings,
            detector: ChangeDetector::new(),
            state: PollState::default(),
        }
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    pub fn archive(&self) -> &A {
        &self.archive
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Run forever: startup fetch, then one tick per interval.
    pub async fn run(&mut self) {
        log::info!(
            "Polling every {}s, announcing to {}",
            self.settings.interval.as_secs(),
            self.settings.topic
        );
        self.start().await;

        let mut ticker = time::interval(self.settings.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; the startup fetch covers it.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            self.tick().await;
        }
    }

    /// Startup fetch. Whatever it returns becomes the baseline.
    pub async fn start(&mut self) -> TickOutcome {
        self.state.ticks += 1;
        match self.archive.fetch_snapshot().await {
            Ok(snapshot) => self.baseline(snapshot),
            Err(error) => {
                log::error!("Initial fetch failed, retrying next tick: {}", error);
                TickOutcome::FetchFailed {
                    reason: error.to_string(),
                }
            }
        }
    }

    /// One poll: fetch, compare, and announce if needed.
    pub async fn tick(&mut self) -> TickOutcome {
        self.state.ticks += 1;
        let current = match self.archive.fetch_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(error) => {
                log::warn!(
                    "Poll {} failed, keeping previous snapshot: {}",
                    self.state.ticks,
                    error
                );
                return TickOutcome::FetchFailed {
                    reason: error.to_string(),
                };
            }
        };

        let Some(previous) = self.state.retained.as_ref() else {
            return self.baseline(current);
        };

        let change = self.detector.detect(previous, &current);
        if let Change::NewYear { show_count: 0, year } = &change {
            log::info!("New year {} has no shows yet", year);
            self.state.retain(current);
            return TickOutcome::Idle;
        }
        match &change {
            Change::Unchanged => {
                log::debug!("No new shows ({} years)", current.len());
                self.state.retain(current);
                return TickOutcome::Idle;
            }
            Change::Decreased {
                year,
                previous,
                current: now,
            } => {
                log::warn!(
                    "Show count for {} dropped from {} to {}; nothing to announce",
                    year,
                    previous,
                    now
                );
                self.state.retain(current);
                return TickOutcome::Idle;
            }
            Change::NewYear { year, show_count } => {
                log::info!("We have a new year! {} with {} shows", year, show_count);
            }
            Change::NewShows {
                year,
                previous,
                current: now,
            } => {
                log::info!("New show! Year={}, old={}, new={}", year, previous, now);
            }
        }

        let wanted = usize::try_from(change.new_show_count()).unwrap_or(usize::MAX);
        let count = wanted.min(self.settings.max_shows_per_tick);
        if count < wanted {
            log::warn!(
                "{} new shows exceed the per-tick limit; announcing the latest {}",
                wanted,
                count
            );
        }

        let shows = match self.archive.fetch_latest_shows(count).await {
            Ok(shows) => shows,
            Err(error) => {
                // Keep the old snapshot so the change is detected again.
                log::warn!("Show lookup failed, retrying next tick: {}", error);
                return TickOutcome::FetchFailed {
                    reason: error.to_string(),
                };
            }
        };
        if shows.len() < count {
            log::warn!("Requested {} shows, archive returned {}", count, shows.len());
        }

        self.state.retain(current);
        let report = dispatch_shows(&self.notifier, &self.settings.topic, &shows).await;
        log::info!(
            "Dispatched {}/{} notifications",
            report.delivered,
            report.attempted
        );

        TickOutcome::Notified { change, report }
    }

    fn baseline(&mut self, snapshot: Snapshot) -> TickOutcome {
        log::info!(
            "Baseline: {} years, {} shows",
            snapshot.len(),
            snapshot.total_shows()
        );
        for year in snapshot.years() {
            log::info!("    {}: {}", year.year_label, year.show_count);
        }
        let years = snapshot.len();
        self.state.retain(snapshot);
        TickOutcome::Baseline { years }
    }
}
