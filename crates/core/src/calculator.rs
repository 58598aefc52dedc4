//! # Slot Availability
//!
//! Works out which start times on a clinic day cannot take a new
//! appointment, given what the chosen dentist and the chosen patient already
//! have booked that day.
//!
//! ## Legacy rule
//!
//! Each existing appointment at `S` lasting `D` minutes blocks:
//!
//! 1. Walking back from `S` in 30-minute steps while the remaining part of
//!    the *new* service is longer than 30 minutes: `S - 30`, `S - 60`, ...
//! 2. Walking forward from `S` while at least 30 minutes of the *existing*
//!    appointment remain: `S`, `S + 30`, ...
//!
//! A new service of 30 minutes or less therefore gets no backward blocking.
//!
//! ## Interval-overlap rule
//!
//! Opt-in. A slot `t` is blocked when `[t, t + new)` overlaps any
//! `[S, S + D)`.
//!
//! Durations that are not multiples of 30 are rounded up, and appointment
//! spans are widened to the 30-minute boundaries they touch, before either
//! rule runs.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{BookingError, BookingResult};
use crate::models::{
    appointment::{AppointmentList, ProposedService, ScheduledAppointment, SkippedAppointment},
    clock::{ClockTime, MINUTES_PER_DAY},
    slot::{SLOT_MINUTES, SlotGrid, TimeSlot},
};

const STEP: i64 = SLOT_MINUTES as i64;

/// How an existing appointment turns into blocked slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockingRule {
    #[default]
    Legacy,
    IntervalOverlap,
}

impl fmt::Display for BlockingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockingRule::Legacy => f.write_str("legacy"),
            BlockingRule::IntervalOverlap => f.write_str("interval-overlap"),
        }
    }
}

impl FromStr for BlockingRule {
    type Err = BookingError;

    fn from_str(raw: &str) -> BookingResult<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(BlockingRule::Legacy),
            "interval-overlap" | "overlap" => Ok(BlockingRule::IntervalOverlap),
            other => Err(BookingError::Validation(format!(
                "unknown blocking rule '{other}', expected 'legacy' or 'interval-overlap'"
            ))),
        }
    }
}

/// The grid for one evaluation plus any records that were left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Availability {
    pub slots: Vec<TimeSlot>,
    pub skipped: Vec<SkippedAppointment>,
}

impl Availability {
    pub fn blocked_times(&self) -> impl Iterator<Item = ClockTime> + '_ {
        self.slots.iter().filter(|s| s.is_blocked).map(|s| s.time)
    }

    pub fn open_times(&self) -> impl Iterator<Item = ClockTime> + '_ {
        self.slots.iter().filter(|s| !s.is_blocked).map(|s| s.time)
    }

    /// `None` when `time` is not on the grid.
    pub fn is_blocked(&self, time: ClockTime) -> Option<bool> {
        self.slots
            .iter()
            .find(|s| s.time == time)
            .map(|s| s.is_blocked)
    }
}

/// Minutes an existing appointment occupies, widened to slot boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OccupiedSpan {
    start: i64,
    end: i64,
}

impl OccupiedSpan {
    fn of(appointment: &ScheduledAppointment) -> Self {
        let exact_start = i64::from(appointment.start_time().minutes());
        let start = exact_start - exact_start % STEP;
        let end = exact_start + round_up_to_slot(appointment.duration_minutes);
        Self {
            start,
            end: round_up_to_slot(end),
        }
    }

    fn overlaps(&self, start: i64, end: i64) -> bool {
        start < self.end && self.start < end
    }
}

/// Rounds a positive duration up to a whole number of slots.
///
/// Capped at two days, which already reaches past either end of any grid.
fn round_up_to_slot(minutes: i64) -> i64 {
    let capped = minutes.min(2 * i64::from(MINUTES_PER_DAY));
    (capped + STEP - 1) / STEP * STEP
}

/// Annotates a clinic day's slot grid with blocked start times.
///
/// The calculator is immutable and holds no per-request state, so one
/// instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct SlotAvailabilityCalculator {
    grid: SlotGrid,
    rule: BlockingRule,
}

impl SlotAvailabilityCalculator {
    pub fn new(grid: SlotGrid) -> Self {
        Self {
            grid,
            rule: BlockingRule::default(),
        }
    }

    pub fn with_rule(mut self, rule: BlockingRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn grid(&self) -> &SlotGrid {
        &self.grid
    }

    pub fn rule(&self) -> BlockingRule {
        self.rule
    }

    /// Computes which grid slots a new appointment for `service` cannot use.
    ///
    /// Both appointment lists must already be limited to the target date.
    /// Appointments with a non-positive duration are left out, logged, and
    /// reported in [`Availability::skipped`]; the rest still count.
    ///
    /// # Errors
    ///
    /// * `BookingError::InvalidDuration` - the service duration is not positive
    pub fn compute(
        &self,
        service: &ProposedService,
        dentist_appointments: &[ScheduledAppointment],
        patient_appointments: &[ScheduledAppointment],
    ) -> BookingResult<Availability> {
        service.validate()?;
        let new_minutes = round_up_to_slot(service.duration_minutes);

        let mut spans = Vec::with_capacity(dentist_appointments.len() + patient_appointments.len());
        let mut skipped = Vec::new();

        for (list, appointments) in [
            (AppointmentList::Dentist, dentist_appointments),
            (AppointmentList::Patient, patient_appointments),
        ] {
            for (index, appointment) in appointments.iter().enumerate() {
                match appointment.validate(index) {
                    Ok(()) => spans.push(OccupiedSpan::of(appointment)),
                    Err(err) => {
                        warn!(
                            ?list,
                            index,
                            id = appointment.id.as_deref().unwrap_or("-"),
                            "Skipping appointment: {}",
                            err
                        );
                        let reason = match err {
                            BookingError::MalformedAppointment { reason, .. } => reason,
                            other => other.to_string(),
                        };
                        skipped.push(SkippedAppointment {
                            list,
                            index,
                            id: appointment.id.clone(),
                            reason,
                        });
                    }
                }
            }
        }

        let slots = match self.rule {
            BlockingRule::Legacy => {
                let blocked = legacy_blocked_minutes(&spans, new_minutes);
                self.annotate(|slot| blocked.contains(&slot))
            }
            BlockingRule::IntervalOverlap => self.annotate(|slot| {
                spans
                    .iter()
                    .any(|span| span.overlaps(slot, slot + new_minutes))
            }),
        };

        debug!(
            rule = %self.rule,
            new_minutes,
            appointments = spans.len(),
            skipped = skipped.len(),
            blocked = slots.iter().filter(|s| s.is_blocked).count(),
            "Computed slot availability"
        );

        Ok(Availability { slots, skipped })
    }

    fn annotate(&self, is_blocked: impl Fn(i64) -> bool) -> Vec<TimeSlot> {
        self.grid
            .starts()
            .iter()
            .map(|&time| TimeSlot {
                time,
                is_blocked: is_blocked(i64::from(time.minutes())),
            })
            .collect()
    }
}

/// Union of the minutes the legacy rule blocks for every span.
///
/// Minutes can fall before midnight or past the end of the day; they simply
/// never match a grid slot.
fn legacy_blocked_minutes(spans: &[OccupiedSpan], new_minutes: i64) -> BTreeSet<i64> {
    let mut blocked = BTreeSet::new();

    for span in spans {
        let mut remaining = new_minutes;
        let mut at = span.start;
        while remaining > STEP {
            at -= STEP;
            blocked.insert(at);
            remaining -= STEP;
        }

        let mut remaining = span.end - span.start;
        let mut at = span.start;
        while remaining >= STEP {
            blocked.insert(at);
            at += STEP;
            remaining -= STEP;
        }
    }

    blocked
}
