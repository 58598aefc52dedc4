use serde::{Deserialize, Serialize};

use super::clock::{ClockTime, MINUTES_PER_DAY};
use crate::errors::{BookingError, BookingResult};

/// Every bookable start sits on a multiple of this many minutes.
pub const SLOT_MINUTES: u16 = 30;

const DEFAULT_FIRST_SLOT: u16 = 8 * 60;
const DEFAULT_LAST_SLOT: u16 = 17 * 60;

/// A grid entry annotated for the booking form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub time: ClockTime,
    pub is_blocked: bool,
}

/// The ordered start times a clinic day offers.
///
/// A grid is never empty, strictly ascending and aligned to [`SLOT_MINUTES`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotGrid {
    starts: Vec<ClockTime>,
}

impl SlotGrid {
    pub fn new(starts: Vec<ClockTime>) -> BookingResult<Self> {
        if starts.is_empty() {
            return Err(BookingError::InvalidGrid("grid has no slots".to_string()));
        }

        if let Some(misaligned) = starts.iter().find(|t| t.minutes() % SLOT_MINUTES != 0) {
            return Err(BookingError::InvalidGrid(format!(
                "{misaligned} is not on a {SLOT_MINUTES}-minute boundary"
            )));
        }

        if let Some(pair) = starts.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(BookingError::InvalidGrid(format!(
                "slots must be strictly ascending, {} is not before {}",
                pair[0], pair[1]
            )));
        }

        Ok(Self { starts })
    }

    /// Every slot from `first` to `last`, both inclusive.
    pub fn daily(first: ClockTime, last: ClockTime) -> BookingResult<Self> {
        if first > last {
            return Err(BookingError::InvalidGrid(format!(
                "first slot {first} is after last slot {last}"
            )));
        }

        let starts = (first.minutes()..=last.minutes())
            .step_by(usize::from(SLOT_MINUTES))
            .map(ClockTime::from_minutes)
            .collect::<BookingResult<Vec<_>>>()
            .map_err(|e| BookingError::InvalidGrid(e.to_string()))?;

        // A misaligned `last` would otherwise be dropped silently by step_by
        if starts.last() != Some(&last) {
            return Err(BookingError::InvalidGrid(format!(
                "last slot {last} is not reachable from {first} in {SLOT_MINUTES}-minute steps"
            )));
        }

        Self::new(starts)
    }

    pub fn starts(&self) -> &[ClockTime] {
        &self.starts
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    pub fn first(&self) -> ClockTime {
        self.starts[0]
    }

    pub fn last(&self) -> ClockTime {
        self.starts[self.starts.len() - 1]
    }
}

/// 8:00 AM through 5:00 PM.
impl Default for SlotGrid {
    fn default() -> Self {
        debug_assert!(DEFAULT_LAST_SLOT < MINUTES_PER_DAY);
        let starts = (DEFAULT_FIRST_SLOT..=DEFAULT_LAST_SLOT)
            .step_by(usize::from(SLOT_MINUTES))
            .map(ClockTime::from_minutes_unchecked)
            .collect();
        Self { starts }
    }
}
