//! Change detection between two year snapshots.
//!
//! Decides whether new shows appeared since the previous poll and how many
//! of the most recent shows must be announced.
//!
//! - A different number of years means a new year began: every show of the
//!   most recent year is new.
//! - Otherwise the most recent year's count is compared with the count the
//!   previous snapshot had for the same year label.

use crate::models::{Snapshot, YearSummary};

/// Outcome of comparing two snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// Nothing to announce
    Unchanged,
    /// A year appeared; all of its shows are new
    NewYear { year: String, show_count: u64 },
    /// The most recent year gained shows
    NewShows {
        year: String,
        previous: u64,
        current: u64,
    },
    /// The most recent year lost shows; nothing is announced
    Decreased {
        year: String,
        previous: u64,
        current: u64,
    },
}

impl Change {
    /// Number of most recent shows to look up and announce.
    pub fn new_show_count(&self) -> u64 {
        match self {
            Change::NewYear { show_count, .. } => *show_count,
            Change::NewShows {
                previous, current, ..
            } => current - previous,
            Change::Unchanged | Change::Decreased { .. } => 0,
        }
    }

    /// Whether any downstream call is needed.
    pub fn has_new_shows(&self) -> bool {
        self.new_show_count() > 0
    }
}

/// Detector for new shows between successive snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangeDetector;

impl ChangeDetector {
    pub fn new() -> Self {
        Self
    }

    /// Compare the previous snapshot with the current one.
    pub fn detect(&self, previous: &Snapshot, current: &Snapshot) -> Change {
        let Some(latest) = current.latest() else {
            return Change::Unchanged;
        };

        if current.len() != previous.len() {
            return Self::new_year(latest);
        }

        match previous.show_count_for(&latest.year_label) {
            None => Self::new_year(latest),
            Some(prev) if latest.show_count > prev => Change::NewShows {
                year: latest.year_label.clone(),
                previous: prev,
                current: latest.show_count,
            },
            Some(prev) if latest.show_count < prev => Change::Decreased {
                year: latest.year_label.clone(),
                previous: prev,
                current: latest.show_count,
            },
            Some(_) => Change::Unchanged,
        }
    }

    fn new_year(latest: &YearSummary) -> Change {
        Change::NewYear {
            year: latest.year_label.clone(),
            show_count: latest.show_count,
        }
    }
}

/// Convenience function to detect changes.
pub fn detect_change(previous: &Snapshot, current: &Snapshot) -> Change {
    ChangeDetector::new().detect(previous, current)
}
