use aerodesk_core::seat::{AISLE_AFTER, COLUMNS, ROWS};
use aerodesk_core::SeatId;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatState {
    Available,
    Occupied,
    Selected,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SeatCell {
    pub seat: SeatId,
    pub state: SeatState,
    pub window: bool,
    pub aisle: bool,
}

impl SeatCell {
    pub fn new(seat: SeatId, state: SeatState) -> Self {
        Self {
            seat,
            state,
            window: seat.is_window(),
            aisle: seat.is_aisle(),
        }
    }
}

/// One cabin row split at the aisle.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SeatRow {
    pub row: u8,
    pub left: Vec<SeatCell>,
    pub right: Vec<SeatCell>,
}

/// The cabin layout offered for every flight: rows 1..=20, `ABC` aisle `DEF`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeatMap;

impl SeatMap {
    pub fn new() -> Self {
        Self
    }

    pub fn capacity(&self) -> usize {
        ROWS as usize * COLUMNS.len()
    }

    /// Every seat, front to back and left to right.
    pub fn seats(&self) -> impl Iterator<Item = SeatId> {
        (1..=ROWS).flat_map(|row| {
            COLUMNS
                .iter()
                .filter_map(move |&column| SeatId::new(row, column).ok())
        })
    }

    pub fn contains(&self, seat: &SeatId) -> bool {
        seat.row() >= 1 && seat.row() <= ROWS && COLUMNS.contains(&seat.column())
    }

    /// Lays the cabin out for display; occupancy wins over selection.
    pub fn render(&self, occupied: &HashSet<SeatId>, selected: &[SeatId]) -> Vec<SeatRow> {
        let state_of = |seat: SeatId| {
            if occupied.contains(&seat) {
                SeatState::Occupied
            } else if selected.contains(&seat) {
                SeatState::Selected
            } else {
                SeatState::Available
            }
        };

        (1..=ROWS)
            .map(|row| {
                let cells: Vec<SeatCell> = COLUMNS
                    .iter()
                    .filter_map(|&column| SeatId::new(row, column).ok())
                    .map(|seat| SeatCell::new(seat, state_of(seat)))
                    .collect();
                let (left, right) = cells.split_at(AISLE_AFTER + 1);
                SeatRow {
                    row,
                    left: left.to_vec(),
                    right: right.to_vec(),
                }
            })
            .collect()
    }

    pub fn available_count(&self, occupied: &HashSet<SeatId>) -> usize {
        self.seats().filter(|seat| !occupied.contains(seat)).count()
    }
}
