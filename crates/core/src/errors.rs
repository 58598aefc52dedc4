use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Invalid service duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid slot grid: {0}")]
    InvalidGrid(String),

    #[error("Malformed appointment at index {index}: {reason}")]
    MalformedAppointment { index: usize, reason: String },

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type BookingResult<T> = Result<T, BookingError>;
