use crate::constants::MINUTES_PER_DAY;
use crate::error::MawaqitError;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// The ten named daily entries, in canonical sequence order.
///
/// The first six variants are the base solar events; Ishraq, Chasht,
/// Zawal, and Tahajud are derived from them by fixed offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prayer {
    Fajr,
    Sunrise,
    Ishraq,
    Chasht,
    Zawal,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
    Tahajud,
}

impl Prayer {
    /// All ten entries in the fixed sequence order used by schedules.
    pub const SEQUENCE: [Prayer; 10] = [
        Prayer::Fajr,
        Prayer::Sunrise,
        Prayer::Ishraq,
        Prayer::Chasht,
        Prayer::Zawal,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
        Prayer::Tahajud,
    ];

    /// Display title.
    pub fn title(&self) -> &'static str {
        match self {
            Prayer::Fajr => "Fajr",
            Prayer::Sunrise => "Sunrise",
            Prayer::Ishraq => "Ishraq",
            Prayer::Chasht => "Chasht (Duha)",
            Prayer::Zawal => "Zawal",
            Prayer::Dhuhr => "Dhuhr",
            Prayer::Asr => "Asr",
            Prayer::Maghrib => "Maghrib",
            Prayer::Isha => "Isha",
            Prayer::Tahajud => "Tahajud",
        }
    }

    /// One-line description.
    pub fn description(&self) -> &'static str {
        match self {
            Prayer::Fajr => "Dawn prayer",
            Prayer::Sunrise => "Sunrise time",
            Prayer::Ishraq => "Post-sunrise prayer",
            Prayer::Chasht => "Morning voluntary prayer",
            Prayer::Zawal => "Sun at zenith",
            Prayer::Dhuhr => "Noon prayer",
            Prayer::Asr => "Afternoon prayer",
            Prayer::Maghrib => "Sunset prayer",
            Prayer::Isha => "Night prayer",
            Prayer::Tahajud => "Night voluntary prayer",
        }
    }

    /// Returns true for the five obligatory daily prayers.
    pub fn is_obligatory(&self) -> bool {
        matches!(
            self,
            Prayer::Fajr | Prayer::Dhuhr | Prayer::Asr | Prayer::Maghrib | Prayer::Isha
        )
    }

    /// Returns true for the six base solar events (members of [`BaseTimes`]).
    pub fn is_base_event(&self) -> bool {
        matches!(
            self,
            Prayer::Fajr
                | Prayer::Sunrise
                | Prayer::Dhuhr
                | Prayer::Asr
                | Prayer::Maghrib
                | Prayer::Isha
        )
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    /// Latitude in degrees, valid in [-90, 90].
    pub lat: f64,
    /// Longitude in degrees, valid in [-180, 180].
    pub lng: f64,
}

impl GeoCoordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns true if both components are inside their valid ranges.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}°, {:.4}°", self.lat, self.lng)
    }
}

/// A wall-clock time of day with minute precision.
///
/// Ordering compares by minute-of-day; no date component participates.
/// All offset arithmetic goes through [`ClockTime::add_minutes`], which
/// normalizes across hour and day boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Creates a time of day, or `None` if out of range.
    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    /// Builds a time from a minute-of-day value, wrapping modulo one day.
    pub fn from_minute_of_day(minute: u16) -> Self {
        let m = minute % MINUTES_PER_DAY as u16;
        Self {
            hour: (m / 60) as u8,
            minute: (m % 60) as u8,
        }
    }

    /// Converts fractional hours to a clock time, flooring to the minute.
    /// Values outside [0, 24) wrap into the day.
    pub fn from_fractional_hours(hours: f64) -> Self {
        // rem_euclid can round up to exactly one full day for tiny
        // negative inputs; from_minute_of_day wraps that back to 00:00.
        let minutes = (hours * 60.0).rem_euclid(f64::from(MINUTES_PER_DAY)).floor();
        Self::from_minute_of_day(minutes as u16)
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes since midnight, in [0, 1440).
    pub const fn minute_of_day(&self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }

    /// Adds (or, when negative, subtracts) minutes with full carry/borrow
    /// normalization across the day boundary.
    pub fn add_minutes(self, delta: i32) -> Self {
        let total = (self.minute_of_day() as i32 + delta).rem_euclid(MINUTES_PER_DAY);
        Self::from_minute_of_day(total as u16)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = MawaqitError;

    /// Parses `"HH:MM"` (24-hour).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (h, m) = s
            .split_once(':')
            .ok_or_else(|| MawaqitError::malformed(format!("expected HH:MM, got {s:?}")))?;
        let hour: u8 = h
            .trim()
            .parse()
            .map_err(|_| MawaqitError::malformed(format!("bad hour in {s:?}")))?;
        let minute: u8 = m
            .trim()
            .parse()
            .map_err(|_| MawaqitError::malformed(format!("bad minute in {s:?}")))?;
        Self::new(hour, minute)
            .ok_or_else(|| MawaqitError::malformed(format!("clock time {s:?} out of range")))
    }
}

/// The six base solar events for one date, in local wall-clock time.
///
/// Valid instances are strictly increasing in declaration order; use
/// [`BaseTimes::validate`] before trusting externally supplied values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseTimes {
    pub fajr: ClockTime,
    pub sunrise: ClockTime,
    pub dhuhr: ClockTime,
    pub asr: ClockTime,
    pub maghrib: ClockTime,
    pub isha: ClockTime,
}

impl BaseTimes {
    pub fn new(
        fajr: ClockTime,
        sunrise: ClockTime,
        dhuhr: ClockTime,
        asr: ClockTime,
        maghrib: ClockTime,
        isha: ClockTime,
    ) -> Self {
        Self {
            fajr,
            sunrise,
            dhuhr,
            asr,
            maghrib,
            isha,
        }
    }

    /// The six events paired with their keys, in chronological key order.
    pub fn in_order(&self) -> [(Prayer, ClockTime); 6] {
        [
            (Prayer::Fajr, self.fajr),
            (Prayer::Sunrise, self.sunrise),
            (Prayer::Dhuhr, self.dhuhr),
            (Prayer::Asr, self.asr),
            (Prayer::Maghrib, self.maghrib),
            (Prayer::Isha, self.isha),
        ]
    }

    /// Looks up a base event; `None` for the four derived entries.
    pub fn get(&self, prayer: Prayer) -> Option<ClockTime> {
        match prayer {
            Prayer::Fajr => Some(self.fajr),
            Prayer::Sunrise => Some(self.sunrise),
            Prayer::Dhuhr => Some(self.dhuhr),
            Prayer::Asr => Some(self.asr),
            Prayer::Maghrib => Some(self.maghrib),
            Prayer::Isha => Some(self.isha),
            _ => None,
        }
    }

    /// Rejects base times that are not strictly increasing.
    ///
    /// # Errors
    /// Returns `MalformedBaseTimes` naming the first out-of-order pair.
    pub fn validate(&self) -> Result<(), MawaqitError> {
        for pair in self.in_order().windows(2) {
            let (earlier, later) = (pair[0], pair[1]);
            if later.1 <= earlier.1 {
                return Err(MawaqitError::malformed(format!(
                    "{} ({}) must fall after {} ({})",
                    later.0, later.1, earlier.0, earlier.1
                )));
            }
        }
        Ok(())
    }
}

/// One named entry of a daily schedule.
///
/// `window_start`/`window_end` bound the valid performance interval
/// `[start, end)`; `time` is the recommended instant shown to the user.
/// When `window_end` is earlier in clock time than `window_start`, the
/// window crosses midnight into the next calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub prayer: Prayer,
    pub time: ClockTime,
    pub window_start: ClockTime,
    pub window_end: ClockTime,
}

impl ScheduleEntry {
    /// Returns true if `t` falls inside the window, accounting for
    /// windows that wrap past midnight.
    pub fn window_contains(&self, t: ClockTime) -> bool {
        if self.window_start <= self.window_end {
            self.window_start <= t && t < self.window_end
        } else {
            t >= self.window_start || t < self.window_end
        }
    }

    /// Non-negative time until this entry's display time, rolled to the
    /// next day when the time is not strictly after `now`. Whole minutes.
    pub fn countdown_from(&self, now: ClockTime) -> Duration {
        let mut minutes = i64::from(self.time.minute_of_day()) - i64::from(now.minute_of_day());
        if minutes <= 0 {
            minutes += i64::from(MINUTES_PER_DAY);
        }
        Duration::minutes(minutes)
    }
}

impl fmt::Display for ScheduleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{} - {})",
            self.prayer, self.time, self.window_start, self.window_end
        )
    }
}

/// A full day's schedule: the ten entries in fixed sequence order.
///
/// Immutable once built; a new schedule is constructed wholesale when the
/// location or date changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    entries: SmallVec<[ScheduleEntry; 10]>,
}

impl Schedule {
    pub(crate) fn from_entries(entries: SmallVec<[ScheduleEntry; 10]>) -> Self {
        Self { entries }
    }

    /// Entries in fixed sequence order.
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn get(&self, prayer: Prayer) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|e| e.prayer == prayer)
    }

    /// The first entry in sequence order whose display time is strictly
    /// after `now`, wrapping to the first entry (next day) when none is.
    ///
    /// `None` only for an empty schedule.
    pub fn next_entry(&self, now: ClockTime) -> Option<&ScheduleEntry> {
        self.entries
            .iter()
            .find(|e| e.time > now)
            .or_else(|| self.entries.first())
    }

    /// Next entry together with the countdown until it.
    pub fn next_with_countdown(&self, now: ClockTime) -> Option<(&ScheduleEntry, Duration)> {
        let entry = self.next_entry(now)?;
        Some((entry, entry.countdown_from(now)))
    }

    /// The first entry (in sequence order) whose window contains `now`.
    pub fn current_entry(&self, now: ClockTime) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|e| e.window_contains(now))
    }
}
