pub mod appointment;
pub mod availability;
pub mod clock;
pub mod slot;
