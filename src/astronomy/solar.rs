//! Solar Event Calculation Module.
//!
//! Derives the six base events (Fajr, Sunrise, Dhuhr, Asr, Maghrib, Isha)
//! from latitude, longitude, and calendar date using the closed-form
//! low-precision solar ephemeris: Julian day, solar declination, equation
//! of time, and hour angles for fixed depression angles. The Asr angle
//! follows the Hanafi shadow-length convention and depends on latitude
//! and declination rather than a fixed depression.

use crate::constants::{EARTH_OBLIQUITY, FAJR_ANGLE, HORIZON_ANGLE, ISHA_ANGLE, J2000_EPOCH};
use crate::error::MawaqitError;
use crate::types::{BaseTimes, ClockTime, GeoCoordinate, Prayer};
use chrono::{Datelike, NaiveDate};

fn dtr(degrees: f64) -> f64 {
    degrees.to_radians()
}

fn rtd(radians: f64) -> f64 {
    radians.to_degrees()
}

/// Julian Day Number for a Gregorian calendar date (integer algorithm).
pub(crate) fn julian_day(date: NaiveDate) -> f64 {
    let a = (14 - date.month() as i64) / 12;
    let y = date.year() as i64 + 4800 - a;
    let m = date.month() as i64 + 12 * a - 3;

    (date.day() as i64 + (153 * m + 2) / 5 + 365 * y + y / 4 - y / 100 + y / 400 - 32045) as f64
}

/// Solar declination and equation of time for a Julian day.
#[derive(Debug, Clone, Copy)]
struct SolarPosition {
    /// Declination in radians.
    declination: f64,
    /// Equation of time in minutes.
    equation_of_time: f64,
}

fn solar_position(julian_day: f64) -> SolarPosition {
    let n = julian_day - J2000_EPOCH;

    // Mean longitude and mean anomaly of the sun, in degrees.
    let l = (280.460 + 0.9856474 * n).rem_euclid(360.0);
    let g = dtr(357.528 + 0.9856003 * n);

    // Ecliptic longitude.
    let lambda = dtr(l) + dtr(1.915 * g.sin() + 0.020 * (2.0 * g).sin());

    let declination = (dtr(EARTH_OBLIQUITY).sin() * lambda.sin()).asin();

    // Right ascension, then the equation of time as 4 minutes per degree.
    // The L - alpha difference is reduced to (-180, 180] so whole-turn
    // multiples do not leak into the minutes.
    let alpha = rtd((dtr(EARTH_OBLIQUITY).cos() * lambda.sin()).atan2(lambda.cos()));
    let mut delta = (l - alpha).rem_euclid(360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }

    SolarPosition {
        declination,
        equation_of_time: 4.0 * delta,
    }
}

/// Hour angle (radians) at which the sun reaches `angle` degrees of
/// elevation, or `None` when there is no real solution (polar edge case).
fn hour_angle(lat_rad: f64, declination: f64, angle: f64) -> Option<f64> {
    let cos_h = (dtr(angle).sin() - lat_rad.sin() * declination.sin())
        / (lat_rad.cos() * declination.cos());
    if !(-1.0..=1.0).contains(&cos_h) {
        return None;
    }
    Some(cos_h.acos())
}

/// Hanafi Asr elevation angle (degrees): the sun altitude at which an
/// object's shadow equals its height plus the noon shadow,
/// `cot(a) = 1 + tan|lat - declination|`.
fn asr_angle(lat_rad: f64, declination: f64) -> f64 {
    let shadow_ratio = 1.0 + (lat_rad - declination).abs().tan();
    rtd((1.0 / shadow_ratio).atan())
}

/// Computes the six base solar events for a date and location.
///
/// Pure function of its inputs; local wall-clock times, minute precision.
///
/// # Errors
/// - `CoordinateOutOfRange` if `coords` is outside valid ranges.
/// - `NoSolarSolution` when an event's hour angle has no real solution
///   (extreme polar latitudes/dates); the failure names the event.
///
/// # Example
/// ```rust
/// use chrono::NaiveDate;
/// use mawaqit::types::GeoCoordinate;
/// use mawaqit::astronomy::compute_base_times;
///
/// let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
/// let mecca = GeoCoordinate::new(21.4225, 39.8262);
///
/// let times = compute_base_times(mecca, date).unwrap();
/// assert!(times.fajr < times.dhuhr);
/// ```
pub fn compute_base_times(
    coords: GeoCoordinate,
    date: NaiveDate,
) -> Result<BaseTimes, MawaqitError> {
    if !coords.is_valid() {
        return Err(MawaqitError::coordinate_out_of_range(coords));
    }

    let lat = dtr(coords.lat);
    let sun = solar_position(julian_day(date));
    let noon = 12.0 - coords.lng / 15.0 - sun.equation_of_time / 60.0;

    let event = |angle: f64, prayer: Prayer, morning: bool| -> Result<ClockTime, MawaqitError> {
        let h = hour_angle(lat, sun.declination, angle)
            .ok_or_else(|| MawaqitError::no_solar_solution(prayer, coords))?;
        let offset = rtd(h) / 15.0;
        let hours = if morning { noon - offset } else { noon + offset };
        Ok(ClockTime::from_fractional_hours(hours))
    };

    let fajr = event(FAJR_ANGLE, Prayer::Fajr, true)?;
    let sunrise = event(HORIZON_ANGLE, Prayer::Sunrise, true)?;
    let dhuhr = ClockTime::from_fractional_hours(noon);
    let asr = event(asr_angle(lat, sun.declination), Prayer::Asr, false)?;
    let maghrib = event(HORIZON_ANGLE, Prayer::Maghrib, false)?;
    let isha = event(ISHA_ANGLE, Prayer::Isha, false)?;

    Ok(BaseTimes::new(fajr, sunrise, dhuhr, asr, maghrib, isha))
}
