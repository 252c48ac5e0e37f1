//! Show data structure.

use serde::{Deserialize, Serialize};

/// A show returned by the archive's show listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShowRecord {
    /// Archive identifier of the show
    pub id: i64,

    /// Show date as reported by the archive (e.g. "2024-08-04")
    pub date: String,

    /// Venue display name
    pub venue_name: String,
}

impl ShowRecord {
    pub fn new(id: i64, date: impl Into<String>, venue_name: impl Into<String>) -> Self {
        Self {
            id,
            date: date.into(),
            venue_name: venue_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_fields_ignored() {
        let json = r#"{
            "id": 2001,
            "date": "2024-08-04",
            "venue_name": "Bethel Woods",
            "duration": 9876543,
            "sbd": false,
            "tags": []
        }"#;
        let show: ShowRecord = serde_json::from_str(json).unwrap();
        assert_eq!(show, ShowRecord::new(2001, "2024-08-04", "Bethel Woods"));
    }
}
