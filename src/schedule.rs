//! Schedule construction: secondary times, Hanafi windows, and the
//! time-source seam.

use crate::astronomy::compute_base_times;
use crate::constants::{
    CHASHT_OFFSET_MIN, CHASHT_WINDOW_MIN, FAJR_WINDOW_LEAD_MIN, ISHRAQ_OFFSET_MIN,
    ISHRAQ_WINDOW_MIN, MINUTES_PER_DAY, SUNRISE_WINDOW_HALF_MIN, TAHAJUD_HOUR,
    TAHAJUD_START_AFTER_ISHA_MIN, ZAWAL_LEAD_MIN, ZAWAL_WINDOW_END_LEAD_MIN,
    ZAWAL_WINDOW_START_LEAD_MIN,
};
use crate::error::MawaqitError;
use crate::types::{BaseTimes, ClockTime, GeoCoordinate, Prayer, Schedule, ScheduleEntry};
use chrono::NaiveDate;
use smallvec::SmallVec;

/// A source of base times for a location and date.
///
/// Anything that can produce a valid [`BaseTimes`] — the astronomical
/// calculator and remote timing services are interchangeable behind this
/// trait, so schedule construction never knows where its input came from.
pub trait BaseTimesProvider {
    fn base_times(&self, coords: GeoCoordinate, date: NaiveDate)
    -> Result<BaseTimes, MawaqitError>;
}

/// Astronomical source (the default path).
#[derive(Debug, Clone, Copy, Default)]
pub struct SolarTimes;

impl BaseTimesProvider for SolarTimes {
    fn base_times(
        &self,
        coords: GeoCoordinate,
        date: NaiveDate,
    ) -> Result<BaseTimes, MawaqitError> {
        compute_base_times(coords, date)
    }
}

/// Externally supplied base times (e.g. from a remote timing service).
///
/// Validated once at construction; the coordinate and date arguments are
/// ignored thereafter.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimes(BaseTimes);

impl FixedTimes {
    /// Wraps externally supplied times.
    ///
    /// # Errors
    /// Returns `MalformedBaseTimes` if the times are out of order.
    pub fn new(times: BaseTimes) -> Result<Self, MawaqitError> {
        times.validate()?;
        Ok(Self(times))
    }
}

impl BaseTimesProvider for FixedTimes {
    fn base_times(
        &self,
        _coords: GeoCoordinate,
        _date: NaiveDate,
    ) -> Result<BaseTimes, MawaqitError> {
        Ok(self.0)
    }
}

/// Builds the full ten-entry schedule from validated base times.
///
/// Secondary display times: Ishraq = sunrise + 20, Chasht = sunrise + 150,
/// Zawal = dhuhr − 15, Tahajud = fixed 03:00. Windows follow the Hanafi
/// offset table; the Isha and Tahajud windows end at the *next day's*
/// Fajr, so their end times wrap past midnight.
///
/// # Errors
/// Returns `MalformedBaseTimes` if `base` is not strictly increasing.
pub fn build_schedule(base: &BaseTimes) -> Result<Schedule, MawaqitError> {
    base.validate()?;
    let BaseTimes {
        fajr,
        sunrise,
        dhuhr,
        asr,
        maghrib,
        isha,
    } = *base;

    let ishraq = sunrise.add_minutes(ISHRAQ_OFFSET_MIN);
    let chasht = sunrise.add_minutes(CHASHT_OFFSET_MIN);
    let zawal = dhuhr.add_minutes(-ZAWAL_LEAD_MIN);
    let tahajud = ClockTime::from_minute_of_day(TAHAJUD_HOUR as u16 * 60);

    let entry = |prayer, time, window_start, window_end| ScheduleEntry {
        prayer,
        time,
        window_start,
        window_end,
    };

    let mut entries: SmallVec<[ScheduleEntry; 10]> = SmallVec::new();
    entries.push(entry(
        Prayer::Fajr,
        fajr,
        fajr.add_minutes(-FAJR_WINDOW_LEAD_MIN),
        sunrise,
    ));
    entries.push(entry(
        Prayer::Sunrise,
        sunrise,
        sunrise.add_minutes(-SUNRISE_WINDOW_HALF_MIN),
        sunrise.add_minutes(SUNRISE_WINDOW_HALF_MIN),
    ));
    entries.push(entry(
        Prayer::Ishraq,
        ishraq,
        ishraq,
        ishraq.add_minutes(ISHRAQ_WINDOW_MIN),
    ));
    entries.push(entry(
        Prayer::Chasht,
        chasht,
        chasht,
        chasht.add_minutes(CHASHT_WINDOW_MIN),
    ));
    entries.push(entry(
        Prayer::Zawal,
        zawal,
        dhuhr.add_minutes(-ZAWAL_WINDOW_START_LEAD_MIN),
        dhuhr.add_minutes(-ZAWAL_WINDOW_END_LEAD_MIN),
    ));
    entries.push(entry(Prayer::Dhuhr, dhuhr, dhuhr, asr));
    entries.push(entry(Prayer::Asr, asr, asr, maghrib));
    entries.push(entry(Prayer::Maghrib, maghrib, maghrib, isha));
    // Next day's Fajr; a full-day offset is the identity on the clock face.
    entries.push(entry(
        Prayer::Isha,
        isha,
        isha,
        fajr.add_minutes(MINUTES_PER_DAY),
    ));
    entries.push(entry(
        Prayer::Tahajud,
        tahajud,
        isha.add_minutes(TAHAJUD_START_AFTER_ISHA_MIN),
        fajr,
    ));

    Ok(Schedule::from_entries(entries))
}

/// Fetches base times from `provider` and builds the schedule.
pub fn schedule_for<P: BaseTimesProvider>(
    provider: &P,
    coords: GeoCoordinate,
    date: NaiveDate,
) -> Result<Schedule, MawaqitError> {
    let base = provider.base_times(coords, date)?;
    build_schedule(&base)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(hour: u8, minute: u8) -> ClockTime {
        ClockTime::new(hour, minute).unwrap()
    }

    fn sample_base() -> BaseTimes {
        BaseTimes::new(t(5, 12), t(6, 21), t(12, 41), t(16, 58), t(18, 45), t(20, 5))
    }

    #[test]
    fn ishraq_window_follows_sunrise() {
        let schedule = build_schedule(&sample_base()).unwrap();
        let ishraq = schedule.get(Prayer::Ishraq).unwrap();
        assert_eq!(ishraq.time, t(6, 41));
        assert_eq!(ishraq.window_start, t(6, 41));
        assert_eq!(ishraq.window_end, t(7, 41));
    }

    #[test]
    fn zawal_precedes_solar_noon() {
        let schedule = build_schedule(&sample_base()).unwrap();
        let zawal = schedule.get(Prayer::Zawal).unwrap();
        assert_eq!(zawal.time, t(12, 26));
        assert_eq!(zawal.window_start, t(12, 21));
        assert_eq!(zawal.window_end, t(12, 36));
    }

    #[test]
    fn night_windows_wrap_to_next_fajr() {
        let schedule = build_schedule(&sample_base()).unwrap();

        let isha = schedule.get(Prayer::Isha).unwrap();
        assert_eq!(isha.window_start, t(20, 5));
        assert_eq!(isha.window_end, t(5, 12));

        let tahajud = schedule.get(Prayer::Tahajud).unwrap();
        assert_eq!(tahajud.time, t(3, 0));
        assert_eq!(tahajud.window_start, t(21, 5));
        assert_eq!(tahajud.window_end, t(5, 12));
    }

    #[test]
    fn daytime_windows_chain_without_gaps() {
        let base = sample_base();
        let schedule = build_schedule(&base).unwrap();

        let dhuhr = schedule.get(Prayer::Dhuhr).unwrap();
        let asr = schedule.get(Prayer::Asr).unwrap();
        let maghrib = schedule.get(Prayer::Maghrib).unwrap();
        assert_eq!(dhuhr.window_end, asr.window_start);
        assert_eq!(asr.window_end, maghrib.window_start);
        assert_eq!(maghrib.window_end, base.isha);
    }

    #[test]
    fn entries_follow_fixed_sequence() {
        let schedule = build_schedule(&sample_base()).unwrap();
        let order: Vec<Prayer> = schedule.entries().iter().map(|e| e.prayer).collect();
        assert_eq!(order, Prayer::SEQUENCE);
    }

    #[test]
    fn malformed_base_times_rejected() {
        let inverted =
            BaseTimes::new(t(5, 12), t(6, 21), t(12, 41), t(12, 30), t(18, 45), t(20, 5));
        assert!(matches!(
            build_schedule(&inverted),
            Err(MawaqitError::MalformedBaseTimes { .. })
        ));
        assert!(FixedTimes::new(inverted).is_err());
    }

    #[test]
    fn fixed_and_solar_sources_are_interchangeable() {
        let base = sample_base();
        let provider = FixedTimes::new(base).unwrap();
        let coords = GeoCoordinate::new(0.0, 0.0);
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        let via_provider = schedule_for(&provider, coords, date).unwrap();
        let direct = build_schedule(&base).unwrap();
        assert_eq!(via_provider, direct);
    }
}
