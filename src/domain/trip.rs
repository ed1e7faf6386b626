use std::fmt;

use serde::{Deserialize, Serialize};
use time::Date;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// How packed the generated schedule should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pace {
    Relaxed,
    Normal,
    Tight,
}

impl fmt::Display for Pace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pace::Relaxed => write!(f, "relaxed"),
            Pace::Normal => write!(f, "normal"),
            Pace::Tight => write!(f, "tight"),
        }
    }
}

/// One trip brief as submitted by the planner form. Consumed once per
/// submission, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRequest {
    pub origin: String,
    pub destination: String,
    #[serde(with = "iso_date")]
    pub start_date: Date,
    #[serde(with = "iso_date")]
    pub end_date: Date,
    /// Order is irrelevant; the backend accepts arbitrary interest strings.
    #[serde(default)]
    pub interests: Vec<String>,
    pub pace: Pace,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn pace_displays_lowercase() {
        assert_eq!(Pace::Relaxed.to_string(), "relaxed");
        assert_eq!(Pace::Tight.to_string(), "tight");
    }

    #[test]
    fn trip_request_deserializes_iso_dates() {
        let req: TripRequest = serde_json::from_value(serde_json::json!({
            "origin": "Hanoi",
            "destination": "Tokyo",
            "start_date": "2026-09-01",
            "end_date": "2026-09-08",
            "interests": ["food", "nature"],
            "pace": "normal"
        }))
        .unwrap();
        assert_eq!(req.start_date, date!(2026 - 09 - 01));
        assert_eq!(req.pace, Pace::Normal);
    }

    #[test]
    fn interests_default_to_empty() {
        let req: TripRequest = serde_json::from_value(serde_json::json!({
            "origin": "Hue",
            "destination": "Osaka",
            "start_date": "2026-10-01",
            "end_date": "2026-10-02",
            "pace": "relaxed"
        }))
        .unwrap();
        assert!(req.interests.is_empty());
    }
}
