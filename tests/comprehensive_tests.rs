use chrono::NaiveDate;
use mawaqit::{
    BaseTimes, ClockTime, FixedTimes, GeoCoordinate, MawaqitError, Prayer, build_schedule,
    compute_base_times, schedule_for,
};

fn t(hour: u8, minute: u8) -> ClockTime {
    ClockTime::new(hour, minute).unwrap()
}

/// Base times used by the window/query scenarios below.
fn sample_base() -> BaseTimes {
    BaseTimes::new(t(5, 12), t(6, 21), t(12, 41), t(16, 58), t(18, 45), t(20, 5))
}

#[test]
fn test_ishraq_derivation() {
    // Sunrise 06:21 puts Ishraq at 06:41 with a one-hour window.
    let schedule = build_schedule(&sample_base()).unwrap();
    let ishraq = schedule.get(Prayer::Ishraq).unwrap();
    assert_eq!(ishraq.time, t(6, 41));
    assert_eq!(ishraq.window_start, t(6, 41));
    assert_eq!(ishraq.window_end, t(7, 41));
}

#[test]
fn test_zawal_derivation() {
    // Dhuhr 12:41 puts Zawal at 12:26, window [12:21, 12:36).
    let schedule = build_schedule(&sample_base()).unwrap();
    let zawal = schedule.get(Prayer::Zawal).unwrap();
    assert_eq!(zawal.time, t(12, 26));
    assert_eq!(zawal.window_start, t(12, 21));
    assert_eq!(zawal.window_end, t(12, 36));
}

#[test]
fn test_night_windows_end_at_next_fajr() {
    // Isha 20:05, next-day Fajr 05:12: Isha spans the night, Tahajud
    // starts an hour after Isha.
    let schedule = build_schedule(&sample_base()).unwrap();

    let isha = schedule.get(Prayer::Isha).unwrap();
    assert_eq!(isha.window_start, t(20, 5));
    assert_eq!(isha.window_end, t(5, 12));

    let tahajud = schedule.get(Prayer::Tahajud).unwrap();
    assert_eq!(tahajud.window_start, t(21, 5));
    assert_eq!(tahajud.window_end, t(5, 12));
}

#[test]
fn test_next_entry_skips_elapsed_fajr() {
    // At 06:00, Fajr (05:12) has passed; Sunrise (06:21) is next.
    let schedule = build_schedule(&sample_base()).unwrap();
    let next = schedule.next_entry(t(6, 0)).unwrap();
    assert_eq!(next.prayer, Prayer::Sunrise);
    assert_eq!(next.time, t(6, 21));
}

#[test]
fn test_next_entry_wraps_past_last_display_time() {
    // At 23:59 every display time has passed (Tahajud's 03:00 reads as
    // next-day), so the query wraps to Fajr with a next-day countdown.
    let schedule = build_schedule(&sample_base()).unwrap();
    let (next, countdown) = schedule.next_with_countdown(t(23, 59)).unwrap();
    assert_eq!(next.prayer, Prayer::Fajr);
    assert_eq!(countdown.num_minutes(), 313); // 05:12 next day
    assert_eq!(countdown.num_hours(), 5);
}

#[test]
fn test_next_entry_at_exact_boundary_minute() {
    // "Strictly greater" means an entry exactly at `now` is not next.
    let schedule = build_schedule(&sample_base()).unwrap();
    let next = schedule.next_entry(t(6, 21)).unwrap();
    assert_eq!(next.prayer, Prayer::Ishraq);
}

#[test]
fn test_window_containment_except_zawal_and_tahajud() {
    let schedule = build_schedule(&sample_base()).unwrap();
    for entry in schedule.entries() {
        if matches!(entry.prayer, Prayer::Zawal | Prayer::Tahajud) {
            continue;
        }
        assert!(
            entry.window_contains(entry.time) || entry.time == entry.window_end,
            "{} display time {} outside window [{} - {})",
            entry.prayer,
            entry.time,
            entry.window_start,
            entry.window_end
        );
    }
}

#[test]
fn test_current_entry_during_night() {
    let schedule = build_schedule(&sample_base()).unwrap();
    let current = schedule.current_entry(t(23, 0)).unwrap();
    assert_eq!(current.prayer, Prayer::Isha);
}

#[test]
fn test_malformed_external_times_rejected() {
    let inverted = BaseTimes::new(t(5, 12), t(6, 21), t(12, 41), t(12, 30), t(18, 45), t(20, 5));
    let err = build_schedule(&inverted).unwrap_err();
    match err {
        MawaqitError::MalformedBaseTimes { reason } => {
            assert!(reason.contains("Asr"), "unexpected reason: {reason}");
        }
        other => panic!("expected MalformedBaseTimes, got {other:?}"),
    }
}

#[test]
fn test_coordinate_range_checked_before_computation() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    for (lat, lng) in [(91.0, 0.0), (-91.0, 0.0), (0.0, 181.0), (0.0, -181.0)] {
        let err = compute_base_times(GeoCoordinate::new(lat, lng), date).unwrap_err();
        assert!(
            matches!(err, MawaqitError::CoordinateOutOfRange { .. }),
            "({lat}, {lng}) gave {err:?}"
        );
    }
}

#[test]
fn test_polar_failure_propagates_to_schedule() {
    // No twilight solution exists, so the whole schedule fails.
    let date = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
    let svalbard = GeoCoordinate::new(78.2232, 15.6267);
    let err = schedule_for(&mawaqit::SolarTimes, svalbard, date).unwrap_err();
    assert!(matches!(err, MawaqitError::NoSolarSolution { .. }));
}

#[test]
fn test_sources_interchangeable_at_base_times_boundary() {
    let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let mecca = GeoCoordinate::new(21.4225, 39.8262);

    // Feed the astronomical output back through the external-times path;
    // the schedules must be identical.
    let base = compute_base_times(mecca, date).unwrap();
    let external = FixedTimes::new(base).unwrap();
    assert_eq!(
        schedule_for(&external, mecca, date).unwrap(),
        build_schedule(&base).unwrap()
    );
}

#[test]
fn test_schedule_regenerated_per_date() {
    let mecca = GeoCoordinate::new(21.4225, 39.8262);
    let june = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let december = NaiveDate::from_ymd_opt(2024, 12, 15).unwrap();

    let a = compute_base_times(mecca, june).unwrap();
    let b = compute_base_times(mecca, december).unwrap();
    assert_ne!(a, b, "seasonal times should differ");
}
