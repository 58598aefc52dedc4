use chairtime_core::{
    errors::BookingError,
    models::{
        appointment::{AppointmentList, ProposedService, ScheduledAppointment, SkippedAppointment},
        availability::{AvailabilityRequest, AvailabilityResponse, GridResponse, SlotResponse},
        clock::ClockTime,
        slot::{SlotGrid, TimeSlot},
    },
};
use chrono::{NaiveDate, NaiveTime};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{from_str, json, to_value};
use serde_test::{Token, assert_de_tokens_error, assert_tokens};

fn clock(hour: u8, minute: u8) -> ClockTime {
    ClockTime::from_hm(hour, minute).expect("valid time")
}

#[rstest]
#[case(0, 0, "12:00 AM")]
#[case(8, 0, "8:00 AM")]
#[case(9, 30, "9:30 AM")]
#[case(12, 0, "12:00 PM")]
#[case(13, 5, "1:05 PM")]
#[case(23, 30, "11:30 PM")]
fn test_clock_time_label(#[case] hour: u8, #[case] minute: u8, #[case] label: &str) {
    let time = clock(hour, minute);
    assert_eq!(time.label(), label);
    assert_eq!(time.to_string(), label);
    assert_eq!(label.parse::<ClockTime>().expect("parses"), time);
}

#[rstest]
#[case("9:00am", 9, 0)]
#[case(" 5:00 pm ", 17, 0)]
#[case("12:15 AM", 0, 15)]
#[case("09:00", 9, 0)]
#[case("17:30", 17, 30)]
fn test_clock_time_parse_variants(#[case] raw: &str, #[case] hour: u8, #[case] minute: u8) {
    assert_eq!(raw.parse::<ClockTime>().expect("parses"), clock(hour, minute));
}

#[rstest]
#[case("")]
#[case("9")]
#[case("13:00 PM")]
#[case("0:30 AM")]
#[case("24:00")]
#[case("9:60")]
#[case("nine:00")]
fn test_clock_time_parse_rejects(#[case] raw: &str) {
    assert!(matches!(
        raw.parse::<ClockTime>(),
        Err(BookingError::Validation(_))
    ));
}

#[test]
fn test_clock_time_bounds() {
    assert_eq!(ClockTime::from_minutes(1439).expect("valid").label(), "11:59 PM");
    assert!(ClockTime::from_minutes(1440).is_err());
    assert!(ClockTime::from_hm(24, 0).is_err());
    assert!(ClockTime::from_hm(10, 60).is_err());
}

#[test]
fn test_clock_time_from_naive_time_drops_seconds() {
    let time = NaiveTime::from_hms_opt(14, 45, 59).expect("valid time");
    assert_eq!(ClockTime::from(time), clock(14, 45));
}

#[test]
fn test_clock_time_serializes_as_minutes() {
    assert_tokens(&clock(9, 0), &[Token::U16(540)]);
    assert_de_tokens_error::<ClockTime>(
        &[Token::U16(1440)],
        "Validation error: 1440 minutes is past the end of the day",
    );
}

#[test]
fn test_default_grid() {
    let grid = SlotGrid::default();

    assert_eq!(grid.len(), 19);
    assert!(!grid.is_empty());
    assert_eq!(grid.first(), clock(8, 0));
    assert_eq!(grid.last(), clock(17, 0));
    assert_eq!(
        SlotGrid::daily(clock(8, 0), clock(17, 0)).expect("valid grid"),
        grid
    );
}

#[test]
fn test_grid_rejects_empty() {
    assert!(matches!(SlotGrid::new(vec![]), Err(BookingError::InvalidGrid(_))));
}

#[rstest]
#[case::misaligned(vec![clock(8, 0), clock(8, 15)])]
#[case::unsorted(vec![clock(9, 0), clock(8, 30)])]
#[case::duplicated(vec![clock(9, 0), clock(9, 0)])]
fn test_grid_rejects_malformed(#[case] starts: Vec<ClockTime>) {
    assert!(matches!(SlotGrid::new(starts), Err(BookingError::InvalidGrid(_))));
}

#[rstest]
#[case::reversed(clock(17, 0), clock(8, 0))]
#[case::misaligned_last(clock(8, 0), clock(16, 45))]
#[case::misaligned_first(clock(8, 15), clock(9, 15))]
fn test_daily_grid_rejects(#[case] first: ClockTime, #[case] last: ClockTime) {
    assert!(matches!(
        SlotGrid::daily(first, last),
        Err(BookingError::InvalidGrid(_))
    ));
}

#[rstest]
#[case("45", 45)]
#[case(" 60 ", 60)]
#[case("30.2", 31)]
fn test_service_from_estimated_time(#[case] raw: &str, #[case] minutes: i64) {
    assert_eq!(
        ProposedService::from_estimated_time(raw).expect("valid estimate"),
        ProposedService::new(minutes)
    );
}

#[rstest]
#[case("")]
#[case("abc")]
#[case("0")]
#[case("-15")]
#[case("NaN")]
#[case("inf")]
fn test_service_from_estimated_time_rejects(#[case] raw: &str) {
    assert!(matches!(
        ProposedService::from_estimated_time(raw),
        Err(BookingError::InvalidDuration(_))
    ));
}

#[test]
fn test_scheduled_appointment_deserialization() {
    let appointment: ScheduledAppointment = from_str(
        r#"{"id":"64f0c2","start":"2024-03-04T09:30:00","duration_minutes":60}"#,
    )
    .expect("Failed to deserialize appointment");

    assert_eq!(appointment.id.as_deref(), Some("64f0c2"));
    assert_eq!(appointment.start_time(), clock(9, 30));
    assert_eq!(appointment.duration_minutes, 60);

    let anonymous: ScheduledAppointment =
        from_str(r#"{"start":"2024-03-04T10:00:00","duration_minutes":30}"#)
            .expect("Failed to deserialize appointment");
    assert_eq!(anonymous.id, None);
}

#[test]
fn test_request_resolves_service() {
    let mut request: AvailabilityRequest = from_str(
        r#"{"date":"2024-03-04","service_duration_minutes":60}"#,
    )
    .expect("Failed to deserialize request");

    assert_eq!(request.date, NaiveDate::from_ymd_opt(2024, 3, 4));
    assert!(request.dentist_appointments.is_empty());
    assert!(request.patient_appointments.is_empty());
    assert_eq!(
        request.proposed_service().expect("service"),
        ProposedService::new(60)
    );

    request.service_duration_minutes = None;
    request.service_estimated_time = Some("90".to_string());
    assert_eq!(
        request.proposed_service().expect("service"),
        ProposedService::new(90)
    );
}

#[rstest]
#[case::neither(None, None)]
#[case::both(Some(30), Some("30"))]
fn test_request_requires_exactly_one_service_field(
    #[case] minutes: Option<i64>,
    #[case] estimated: Option<&str>,
) {
    let request = AvailabilityRequest {
        date: None,
        service_duration_minutes: minutes,
        service_estimated_time: estimated.map(str::to_string),
        dentist_appointments: vec![],
        patient_appointments: vec![],
    };

    assert!(matches!(
        request.proposed_service(),
        Err(BookingError::Validation(_))
    ));
}

#[test]
fn test_slot_response_shape() {
    let response = SlotResponse::from(TimeSlot {
        time: clock(13, 30),
        is_blocked: true,
    });

    assert_eq!(
        to_value(&response).expect("serializes"),
        json!({ "time": "1:30 PM", "minute_of_day": 810, "is_blocked": true })
    );
}

#[test]
fn test_skipped_appointment_shape() {
    let response = AvailabilityResponse {
        slots: vec![],
        skipped: vec![SkippedAppointment {
            list: AppointmentList::Patient,
            index: 2,
            id: None,
            reason: "bad".to_string(),
        }],
    };

    assert_eq!(
        to_value(&response).expect("serializes"),
        json!({
            "slots": [],
            "skipped": [{ "list": "patient", "index": 2, "reason": "bad" }]
        })
    );
}

#[test]
fn test_grid_response() {
    let grid = SlotGrid::daily(clock(8, 0), clock(9, 0)).expect("valid grid");
    let response = GridResponse::from(&grid);

    let labels: Vec<_> = response.slots.iter().map(|s| s.time.as_str()).collect();
    assert_eq!(labels, vec!["8:00 AM", "8:30 AM", "9:00 AM"]);
    assert_eq!(response.slots[2].minute_of_day, 540);
}
