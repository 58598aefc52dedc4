//! Wall-clock times of day.
//!
//! Slots and appointments are compared by minutes since midnight. The
//! `"9:00 AM"` style label only exists for display and for reading
//! configuration.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::errors::{BookingError, BookingResult};

pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A time of day with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct ClockTime(u16);

impl ClockTime {
    /// Builds a time from minutes since midnight.
    pub fn from_minutes(minutes: u16) -> BookingResult<Self> {
        if minutes >= MINUTES_PER_DAY {
            return Err(BookingError::Validation(format!(
                "{minutes} minutes is past the end of the day"
            )));
        }
        Ok(Self(minutes))
    }

    /// Builds a time from a 24-hour clock reading.
    pub fn from_hm(hour: u8, minute: u8) -> BookingResult<Self> {
        if hour > 23 || minute > 59 {
            return Err(BookingError::Validation(format!(
                "{hour:02}:{minute:02} is not a valid time of day"
            )));
        }
        Ok(Self(u16::from(hour) * 60 + u16::from(minute)))
    }

    pub(crate) const fn from_minutes_unchecked(minutes: u16) -> Self {
        Self(minutes)
    }

    /// Time of day of a local date-time. Seconds are dropped.
    pub fn of(date_time: &NaiveDateTime) -> Self {
        Self::from(date_time.time())
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    pub fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }

    /// Display label such as `"9:00 AM"` or `"12:30 PM"`.
    pub fn label(self) -> String {
        let hour = self.hour();
        let suffix = if hour < 12 { "AM" } else { "PM" };
        let hour12 = match hour % 12 {
            0 => 12,
            h => h,
        };
        format!("{}:{:02} {}", hour12, self.minute(), suffix)
    }
}

impl From<NaiveTime> for ClockTime {
    fn from(time: NaiveTime) -> Self {
        // hour() <= 23 and minute() <= 59 so this stays below MINUTES_PER_DAY
        Self((time.hour() * 60 + time.minute()) as u16)
    }
}

impl TryFrom<u16> for ClockTime {
    type Error = BookingError;

    fn try_from(minutes: u16) -> BookingResult<Self> {
        Self::from_minutes(minutes)
    }
}

impl From<ClockTime> for u16 {
    fn from(time: ClockTime) -> Self {
        time.0
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Parses `"9:00 AM"`, `"9:00am"`, `"12:30 PM"` and 24-hour `"09:00"`.
impl FromStr for ClockTime {
    type Err = BookingError;

    fn from_str(raw: &str) -> BookingResult<Self> {
        let invalid = || BookingError::Validation(format!("'{raw}' is not a recognised time"));

        let normalized = raw.trim().to_ascii_uppercase();
        let (clock, meridiem) = if let Some(rest) = normalized.strip_suffix("AM") {
            (rest.trim_end(), Some(false))
        } else if let Some(rest) = normalized.strip_suffix("PM") {
            (rest.trim_end(), Some(true))
        } else {
            (normalized.as_str(), None)
        };

        let (hour, minute) = clock.split_once(':').ok_or_else(invalid)?;
        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        let minute: u8 = minute.parse().map_err(|_| invalid())?;

        let hour = match meridiem {
            Some(is_pm) => {
                if !(1..=12).contains(&hour) {
                    return Err(invalid());
                }
                hour % 12 + if is_pm { 12 } else { 0 }
            }
            None => hour,
        };

        Self::from_hm(hour, minute).map_err(|_| invalid())
    }
}
