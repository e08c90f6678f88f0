// tests/duration_tests.rs

use chrono::{Duration, TimeZone, Utc};

use alerta_common::models::alert::AlertStatus;
use alerta_core::services::duration::{classify, live_countdown, Countdown, DurationVerdict};
use alerta_core::test_utils::sample_alert;

fn base_time() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap()
}

#[test]
fn test_classification_round_trip() {
    // 30-minute budget, resolved after 20 / 30 / 45 real minutes.
    let cases = [
        (20, DurationVerdict::ResolvedEarly, 10),
        (30, DurationVerdict::OnTime, 0),
        (45, DurationVerdict::ResolvedLate, -15),
    ];

    for (real, verdict, difference) in cases {
        let mut alert = sample_alert("Maria Lopez", base_time(), AlertStatus::Resolved);
        alert.configured_duration_minutes = 30;
        alert.resolved_at = Some(base_time() + Duration::minutes(real));

        let report = classify(&alert, base_time() + Duration::hours(3));
        assert_eq!(report.real_minutes, real);
        assert_eq!(report.difference_minutes, difference);
        assert_eq!(report.verdict, verdict);
    }
}

#[test]
fn test_classification_floors_partial_minutes() {
    let mut alert = sample_alert("Maria Lopez", base_time(), AlertStatus::Resolved);
    alert.configured_duration_minutes = 30;
    alert.resolved_at = Some(base_time() + Duration::minutes(20) + Duration::seconds(59));

    let report = classify(&alert, base_time() + Duration::hours(1));
    assert_eq!(report.real_minutes, 20);
    assert_eq!(report.difference_minutes, 10);
}

#[test]
fn test_classification_of_live_alert_uses_now() {
    let alert = sample_alert("Maria Lopez", base_time(), AlertStatus::Active);

    let report = classify(&alert, base_time() + Duration::minutes(12));
    assert_eq!(report.real_minutes, 12);
    assert_eq!(report.verdict, DurationVerdict::ResolvedEarly);
}

#[test]
fn test_countdown_reports_remaining_time() {
    let alert = sample_alert("Maria Lopez", base_time(), AlertStatus::Active);

    let countdown = live_countdown(&alert, base_time() + Duration::minutes(10));
    assert_eq!(countdown, Countdown::Remaining(Duration::minutes(20)));
}

#[test]
fn test_countdown_never_goes_negative() {
    let alert = sample_alert("Maria Lopez", base_time(), AlertStatus::Active);

    assert_eq!(
        live_countdown(&alert, base_time() + Duration::minutes(30)),
        Countdown::Expired
    );
    assert_eq!(
        live_countdown(&alert, base_time() + Duration::minutes(90)),
        Countdown::Expired
    );
}

#[test]
fn test_countdown_is_correct_after_observer_slept() {
    // No running timer to drift: an observer that last looked hours ago
    // still gets the value derived from the immutable inputs.
    let alert = sample_alert("Maria Lopez", base_time(), AlertStatus::Active);

    let early = live_countdown(&alert, base_time() + Duration::minutes(1));
    assert_eq!(early, Countdown::Remaining(Duration::minutes(29)));

    let after_sleep = live_countdown(&alert, base_time() + Duration::hours(6));
    assert_eq!(after_sleep, Countdown::Expired);
}
