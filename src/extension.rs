//! Extension trait for `NaiveDate`.

use crate::astronomy::compute_base_times;
use crate::error::MawaqitError;
use crate::schedule::build_schedule;
use crate::types::{BaseTimes, GeoCoordinate, Schedule};
use chrono::NaiveDate;

/// Extends `NaiveDate` with prayer-time computation methods.
pub trait PrayerDateExt {
    /// Full Hanafi schedule for this date at `coords`. Panics on failure.
    ///
    /// # Panics
    /// Panics if the coordinate is out of range or an event has no solar
    /// solution (polar edge case).
    fn schedule_at(&self, coords: GeoCoordinate) -> Schedule;

    /// Full Hanafi schedule for this date at `coords`. Safe version.
    fn try_schedule_at(&self, coords: GeoCoordinate) -> Result<Schedule, MawaqitError>;

    /// The six base solar events for this date at `coords`. Panics on failure.
    ///
    /// # Panics
    /// Panics under the same conditions as [`PrayerDateExt::schedule_at`].
    fn base_times_at(&self, coords: GeoCoordinate) -> BaseTimes;

    /// The six base solar events for this date at `coords`. Safe version.
    fn try_base_times_at(&self, coords: GeoCoordinate) -> Result<BaseTimes, MawaqitError>;
}

impl PrayerDateExt for NaiveDate {
    fn schedule_at(&self, coords: GeoCoordinate) -> Schedule {
        self.try_schedule_at(coords)
            .expect("Prayer schedule computation failed")
    }

    fn try_schedule_at(&self, coords: GeoCoordinate) -> Result<Schedule, MawaqitError> {
        let base = compute_base_times(coords, *self)?;
        build_schedule(&base)
    }

    fn base_times_at(&self, coords: GeoCoordinate) -> BaseTimes {
        self.try_base_times_at(coords)
            .expect("Base time computation failed")
    }

    fn try_base_times_at(&self, coords: GeoCoordinate) -> Result<BaseTimes, MawaqitError> {
        compute_base_times(coords, *self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Prayer;

    #[test]
    fn test_extension_trait() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        let mecca = GeoCoordinate::new(21.4225, 39.8262);

        let base = date.base_times_at(mecca);
        let schedule = date.schedule_at(mecca);
        assert_eq!(schedule.get(Prayer::Dhuhr).unwrap().time, base.dhuhr);
    }

    #[test]
    fn test_try_schedule_out_of_range() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        let bogus = GeoCoordinate::new(0.0, 200.0);
        assert!(date.try_schedule_at(bogus).is_err());
    }
}
