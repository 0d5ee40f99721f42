use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a seat selection session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionState {
    Open,
    Confirmed,
    Discarded,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionState::Open => "OPEN",
            SessionState::Confirmed => "CONFIRMED",
            SessionState::Discarded => "DISCARDED",
        };
        f.write_str(label)
    }
}

/// Delivery result of one passenger's confirmation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationOutcome {
    pub email: String,
    pub delivered: bool,
    pub error: Option<String>,
}

impl NotificationOutcome {
    pub fn delivered(email: &str) -> Self {
        Self {
            email: email.to_string(),
            delivered: true,
            error: None,
        }
    }

    pub fn failed(email: &str, error: impl ToString) -> Self {
        Self {
            email: email.to_string(),
            delivered: false,
            error: Some(error.to_string()),
        }
    }
}
