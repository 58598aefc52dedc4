//! # Chairtime Core
//!
//! Domain types and the slot-availability computation used when booking a
//! dental appointment. Everything here is pure and synchronous: callers pass
//! in the appointments they already fetched and get back the day's slot grid
//! annotated with which start times are blocked.

pub mod calculator;
pub mod errors;
pub mod models;

pub use calculator::{Availability, BlockingRule, SlotAvailabilityCalculator};
pub use errors::{BookingError, BookingResult};
