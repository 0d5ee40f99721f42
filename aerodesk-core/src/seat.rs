use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Number of seat rows on every aircraft.
pub const ROWS: u8 = 20;

/// Seat letters, left triple then right triple.
pub const COLUMNS: [char; 6] = ['A', 'B', 'C', 'D', 'E', 'F'];

/// Column index after which the aisle sits.
pub const AISLE_AFTER: usize = 2;

/// A seat on the fixed cabin layout, written as row then letter (`12C`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeatId {
    row: u8,
    column: char,
}

impl SeatId {
    pub fn new(row: u8, column: char) -> Result<Self, SeatIdError> {
        if row == 0 || row > ROWS {
            return Err(SeatIdError::RowOutOfRange(row as u32));
        }
        let column = column.to_ascii_uppercase();
        if !COLUMNS.contains(&column) {
            return Err(SeatIdError::UnknownColumn(column));
        }
        Ok(Self { row, column })
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn column(&self) -> char {
        self.column
    }

    /// Window seats are the outer letters of each triple.
    pub fn is_window(&self) -> bool {
        self.column == COLUMNS[0] || self.column == COLUMNS[COLUMNS.len() - 1]
    }

    pub fn is_aisle(&self) -> bool {
        self.column == COLUMNS[AISLE_AFTER] || self.column == COLUMNS[AISLE_AFTER + 1]
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.column)
    }
}

impl FromStr for SeatId {
    type Err = SeatIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let column = s.chars().last().ok_or(SeatIdError::Malformed(s.to_string()))?;
        let digits = &s[..s.len() - column.len_utf8()];
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(SeatIdError::Malformed(s.to_string()));
        }
        let row: u32 = digits
            .parse()
            .map_err(|_| SeatIdError::Malformed(s.to_string()))?;
        if row == 0 || row > ROWS as u32 {
            return Err(SeatIdError::RowOutOfRange(row));
        }
        Self::new(row as u8, column)
    }
}

impl Serialize for SeatId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SeatId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SeatIdError {
    #[error("Malformed seat id: {0:?}")]
    Malformed(String),

    #[error("Seat row {0} is outside 1..={ROWS}")]
    RowOutOfRange(u32),

    #[error("Unknown seat column: {0}")]
    UnknownColumn(char),
}
