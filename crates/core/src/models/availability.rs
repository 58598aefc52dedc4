use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{
    appointment::{ProposedService, ScheduledAppointment, SkippedAppointment},
    clock::ClockTime,
    slot::{SlotGrid, TimeSlot},
};
use crate::{
    calculator::Availability,
    errors::{BookingError, BookingResult},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityRequest {
    /// When set, appointments starting on any other day are ignored.
    pub date: Option<NaiveDate>,
    pub service_duration_minutes: Option<i64>,
    /// The service's `estimatedTime` field, string-encoded minutes.
    pub service_estimated_time: Option<String>,
    #[serde(default)]
    pub dentist_appointments: Vec<ScheduledAppointment>,
    #[serde(default)]
    pub patient_appointments: Vec<ScheduledAppointment>,
}

impl AvailabilityRequest {
    /// Resolves the one service field the request must carry.
    pub fn proposed_service(&self) -> BookingResult<ProposedService> {
        match (&self.service_duration_minutes, &self.service_estimated_time) {
            (Some(minutes), None) => Ok(ProposedService::new(*minutes)),
            (None, Some(estimated_time)) => ProposedService::from_estimated_time(estimated_time),
            (Some(_), Some(_)) => Err(BookingError::Validation(
                "provide either service_duration_minutes or service_estimated_time, not both"
                    .to_string(),
            )),
            (None, None) => Err(BookingError::Validation(
                "service_duration_minutes or service_estimated_time is required".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotResponse {
    pub time: String,
    pub minute_of_day: u16,
    pub is_blocked: bool,
}

impl From<TimeSlot> for SlotResponse {
    fn from(slot: TimeSlot) -> Self {
        Self {
            time: slot.time.label(),
            minute_of_day: slot.time.minutes(),
            is_blocked: slot.is_blocked,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub slots: Vec<SlotResponse>,
    pub skipped: Vec<SkippedAppointment>,
}

impl From<Availability> for AvailabilityResponse {
    fn from(availability: Availability) -> Self {
        Self {
            slots: availability.slots.into_iter().map(SlotResponse::from).collect(),
            skipped: availability.skipped,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSlotResponse {
    pub time: String,
    pub minute_of_day: u16,
}

impl From<ClockTime> for GridSlotResponse {
    fn from(time: ClockTime) -> Self {
        Self {
            time: time.label(),
            minute_of_day: time.minutes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridResponse {
    pub slots: Vec<GridSlotResponse>,
}

impl From<&SlotGrid> for GridResponse {
    fn from(grid: &SlotGrid) -> Self {
        Self {
            slots: grid.starts().iter().copied().map(GridSlotResponse::from).collect(),
        }
    }
}
