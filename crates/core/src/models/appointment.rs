use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::clock::ClockTime;
use crate::errors::{BookingError, BookingResult};

/// An appointment already on the books for the dentist or the patient.
///
/// `start` is the clinic's local wall-clock time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledAppointment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub start: NaiveDateTime,
    pub duration_minutes: i64,
}

impl ScheduledAppointment {
    pub fn new(start: NaiveDateTime, duration_minutes: i64) -> Self {
        Self {
            id: None,
            start,
            duration_minutes,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn start_time(&self) -> ClockTime {
        ClockTime::of(&self.start)
    }

    pub(crate) fn validate(&self, index: usize) -> BookingResult<()> {
        if self.duration_minutes <= 0 {
            return Err(BookingError::MalformedAppointment {
                index,
                reason: format!(
                    "duration must be positive, got {} minutes",
                    self.duration_minutes
                ),
            });
        }
        Ok(())
    }
}

/// The service the new appointment would reserve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedService {
    pub duration_minutes: i64,
}

impl ProposedService {
    pub fn new(duration_minutes: i64) -> Self {
        Self { duration_minutes }
    }

    /// Reads a service's `estimatedTime`, a string holding a number of minutes.
    ///
    /// Fractional minutes round up.
    pub fn from_estimated_time(raw: &str) -> BookingResult<Self> {
        let minutes: f64 = raw.trim().parse().map_err(|_| {
            BookingError::InvalidDuration(format!("estimated time '{raw}' is not a number"))
        })?;

        if !minutes.is_finite() {
            return Err(BookingError::InvalidDuration(format!(
                "estimated time '{raw}' is not finite"
            )));
        }
        if minutes <= 0.0 {
            return Err(BookingError::InvalidDuration(format!(
                "estimated time must be positive, got '{raw}'"
            )));
        }

        // Float-to-int `as` saturates, which is fine for absurdly long services
        Ok(Self::new(minutes.ceil() as i64))
    }

    pub fn validate(&self) -> BookingResult<()> {
        if self.duration_minutes <= 0 {
            return Err(BookingError::InvalidDuration(format!(
                "duration must be positive, got {} minutes",
                self.duration_minutes
            )));
        }
        Ok(())
    }
}

/// Which of the two appointment lists a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentList {
    Dentist,
    Patient,
}

/// A record left out of the blocking computation because it was malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedAppointment {
    pub list: AppointmentList,
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub reason: String,
}
