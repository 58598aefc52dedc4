//! # Availability Handlers
//!
//! Endpoints the booking form calls whenever the selected dentist, patient,
//! date or service changes. The form supplies the appointments it already
//! fetched for the dentist and the patient; this module narrows them to the
//! target date and hands them to the calculator.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use chairtime_core::{
    errors::BookingError,
    models::{
        appointment::{AppointmentList, ScheduledAppointment},
        availability::{AvailabilityRequest, AvailabilityResponse, GridResponse},
    },
};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::debug;

use crate::{ApiState, middleware::error_handling::AppError};

/// Appointments that start on the target date, with their positions in the
/// caller's list.
struct OnDate {
    appointments: Vec<ScheduledAppointment>,
    original_index: Vec<usize>,
}

impl OnDate {
    fn filter(appointments: Vec<ScheduledAppointment>, date: Option<NaiveDate>) -> Self {
        let (original_index, appointments) = appointments
            .into_iter()
            .enumerate()
            .filter(|(_, appointment)| date.is_none_or(|d| appointment.start.date() == d))
            .unzip();

        Self {
            appointments,
            original_index,
        }
    }

    fn original(&self, index: usize) -> usize {
        self.original_index.get(index).copied().unwrap_or(index)
    }
}

/// Marks which of the clinic's slots the new appointment cannot take
///
/// # Endpoint
///
/// ```text
/// POST /api/availability
/// ```
///
/// # Errors
///
/// * `BookingError::Validation` - the body is not a valid request, no service
///   field, or both service fields
/// * `BookingError::InvalidDuration` - the service duration is not a positive number
#[axum::debug_handler]
pub async fn compute_availability(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<AvailabilityRequest>, JsonRejection>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        debug!("Rejected availability request: {}", rejection.body_text());
        BookingError::Validation(rejection.body_text())
    })?;
    let service = payload.proposed_service()?;

    let dentist = OnDate::filter(payload.dentist_appointments, payload.date);
    let patient = OnDate::filter(payload.patient_appointments, payload.date);
    debug!(
        date = ?payload.date,
        dentist = dentist.appointments.len(),
        patient = patient.appointments.len(),
        "Computing availability"
    );

    let mut availability =
        state
            .calculator
            .compute(&service, &dentist.appointments, &patient.appointments)?;

    // Report skipped records by their position in the request, not the filtered list
    for skipped in &mut availability.skipped {
        let on_date = match skipped.list {
            AppointmentList::Dentist => &dentist,
            AppointmentList::Patient => &patient,
        };
        skipped.index = on_date.original(skipped.index);
    }

    Ok(Json(availability.into()))
}

/// Lists the clinic's bookable start times
///
/// # Endpoint
///
/// ```text
/// GET /api/slots
/// ```
pub async fn slot_grid(State(state): State<Arc<ApiState>>) -> Json<GridResponse> {
    Json(GridResponse::from(state.calculator.grid()))
}
