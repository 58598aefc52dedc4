use axum::{http::StatusCode, response::IntoResponse};
use chairtime_api::middleware::error_handling::AppError;
use chairtime_core::errors::BookingError;
use rstest::rstest;

#[rstest]
#[case(BookingError::InvalidDuration("zero".to_string()), StatusCode::BAD_REQUEST)]
#[case(BookingError::Validation("missing".to_string()), StatusCode::BAD_REQUEST)]
#[case(
    BookingError::MalformedAppointment { index: 0, reason: "negative".to_string() },
    StatusCode::UNPROCESSABLE_ENTITY
)]
#[case(BookingError::InvalidGrid("empty".to_string()), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status(#[case] error: BookingError, #[case] status: StatusCode) {
    assert_eq!(AppError(error).into_response().status(), status);
}

#[test]
fn test_from_booking_error() {
    let error: AppError = BookingError::Validation("bad".to_string()).into();
    assert_eq!(error.0, BookingError::Validation("bad".to_string()));
}
