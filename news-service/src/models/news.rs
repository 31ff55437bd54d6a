use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One item of the feed, exactly as stored and as returned over HTTP.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsEntry {
    pub title: String,
    pub content: String,
    /// Seconds since the Unix epoch, fractional.
    pub timestamp: f64,
}

impl NewsEntry {
    pub fn new(title: String, content: String) -> Self {
        Self::at(title, content, Utc::now())
    }

    pub fn at(title: String, content: String, created_at: DateTime<Utc>) -> Self {
        Self {
            title,
            content,
            timestamp: epoch_seconds(created_at),
        }
    }
}

fn epoch_seconds(at: DateTime<Utc>) -> f64 {
    at.timestamp() as f64 + f64::from(at.timestamp_subsec_micros()) / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_keeps_sub_second_precision() {
        let at = Utc.timestamp_opt(1_700_000_000, 250_000_000).unwrap();
        let entry = NewsEntry::at("Outage".into(), "db down".into(), at);

        assert_eq!(entry.timestamp, 1_700_000_000.25);
    }

    #[test]
    fn new_stamps_current_time() {
        let before = Utc::now().timestamp() as f64;
        let entry = NewsEntry::new("Deploy".into(), String::new());
        let after = Utc::now().timestamp() as f64 + 1.0;

        assert!(entry.timestamp >= before && entry.timestamp <= after);
    }

    #[test]
    fn serializes_with_flat_fields() {
        let at = Utc.timestamp_opt(1_700_000_000, 500_000_000).unwrap();
        let entry = NewsEntry::at("Outage".into(), "db down".into(), at);

        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            serde_json::json!({
                "title": "Outage",
                "content": "db down",
                "timestamp": 1_700_000_000.5
            })
        );
    }

    #[test]
    fn integer_timestamps_from_other_writers_still_decode() {
        let entry: NewsEntry =
            serde_json::from_str(r#"{"title":"a","content":"b","timestamp":1700000000}"#).unwrap();

        assert_eq!(entry.timestamp, 1_700_000_000.0);
    }
}
