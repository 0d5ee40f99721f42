use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HistoryKind {
    Search,
    Booking,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HistoryDetails {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub passengers: Option<u32>,
    pub price_max: Option<u32>,
}

/// One line of a user's activity log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    #[serde(rename = "type")]
    pub kind: HistoryKind,
    pub details: HistoryDetails,
    pub date: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(kind: HistoryKind, details: HistoryDetails) -> Self {
        Self {
            kind,
            details,
            date: Utc::now(),
        }
    }

    pub fn describe(&self) -> String {
        fn or_na<T: ToString>(value: &Option<T>) -> String {
            value.as_ref().map(T::to_string).unwrap_or_else(|| "N/A".to_string())
        }

        format!(
            "From {} to {} | Passengers: {} | Max Price: {}",
            or_na(&self.details.origin),
            or_na(&self.details.destination),
            or_na(&self.details.passengers),
            or_na(&self.details.price_max),
        )
    }
}
