// src/models/year.rs

//! Per-year show counts and the snapshot built from them.

use serde::{Deserialize, Serialize};

/// Show count for one year (or year range) of the archive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct YearSummary {
    /// Year label as the archive reports it (e.g. "2024" or "1983-1987")
    #[serde(rename = "date")]
    pub year_label: String,

    /// Number of shows recorded for the year
    pub show_count: u64,
}

impl YearSummary {
    pub fn new(year_label: impl Into<String>, show_count: u64) -> Self {
        Self {
            year_label: year_label.into(),
            show_count,
        }
    }

    /// Key used to decide which entry is the most recent year.
    ///
    /// Ranges like "1983-1987" sort by their first year. Labels without a
    /// leading number sort before every numbered label.
    fn recency_key(&self) -> (u32, &str) {
        let digits: String = self
            .year_label
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        (digits.parse().unwrap_or(0), self.year_label.as_str())
    }
}

/// Full year table as of one poll.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snapshot {
    years: Vec<YearSummary>,
}

impl Snapshot {
    /// Build a snapshot, keeping the source's own ordering.
    pub fn new(years: Vec<YearSummary>) -> Self {
        Self { years }
    }

    pub fn years(&self) -> &[YearSummary] {
        &self.years
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Most recent year, regardless of the order the source sent them in.
    pub fn latest(&self) -> Option<&YearSummary> {
        self.years.iter().max_by(|a, b| a.recency_key().cmp(&b.recency_key()))
    }

    /// Show count recorded for a year label, if the snapshot has it.
    pub fn show_count_for(&self, year_label: &str) -> Option<u64> {
        self.years
            .iter()
            .find(|y| y.year_label == year_label)
            .map(|y| y.show_count)
    }

    /// Total shows across every year.
    pub fn total_shows(&self) -> u64 {
        self.years.iter().map(|y| y.show_count).sum()
    }
}

impl From<Vec<YearSummary>> for Snapshot {
    fn from(years: Vec<YearSummary>) -> Self {
        Self::new(years)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_ignores_wire_order() {
        let desc = Snapshot::new(vec![
            YearSummary::new("2024", 3),
            YearSummary::new("2023", 40),
            YearSummary::new("1983-1987", 12),
        ]);
        let asc = Snapshot::new(vec![
            YearSummary::new("1983-1987", 12),
            YearSummary::new("2023", 40),
            YearSummary::new("2024", 3),
        ]);

        assert_eq!(desc.latest().map(|y| y.year_label.as_str()), Some("2024"));
        assert_eq!(asc.latest().map(|y| y.year_label.as_str()), Some("2024"));
    }

    #[test]
    fn test_range_label_sorts_by_first_year() {
        let snapshot = Snapshot::new(vec![
            YearSummary::new("1988", 1),
            YearSummary::new("1983-1987", 1),
        ]);
        assert_eq!(snapshot.latest().unwrap().year_label, "1988");
    }

    #[test]
    fn test_show_count_lookup() {
        let snapshot = Snapshot::new(vec![
            YearSummary::new("2023", 40),
            YearSummary::new("2024", 3),
        ]);
        assert_eq!(snapshot.show_count_for("2023"), Some(40));
        assert_eq!(snapshot.show_count_for("1999"), None);
        assert_eq!(snapshot.total_shows(), 43);
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = Snapshot::default();
        assert!(snapshot.is_empty());
        assert!(snapshot.latest().is_none());
    }

    #[test]
    fn test_year_summary_wire_name() {
        let year: YearSummary =
            serde_json::from_str(r#"{"date":"2023","show_count":5}"#).unwrap();
        assert_eq!(year, YearSummary::new("2023", 5));
    }
}
