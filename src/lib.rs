//! # Mawaqit
//!
//! A pure, stateless engine for canonical Hanafi daily prayer times.
//!
//! Computes the six base solar events (Fajr, Sunrise, Dhuhr, Asr, Maghrib,
//! Isha) from latitude, longitude, and calendar date, derives the four
//! secondary observances (Ishraq, Chasht, Zawal, Tahajud), builds the ten
//! start/end windows, and answers next-entry and countdown queries against
//! a caller-supplied "now".
//!
//! ## Modules
//!
//! - `types`: core types (`Prayer`, `ClockTime`, `BaseTimes`, `Schedule`)
//! - `astronomy`: solar computation of the six base events
//! - `schedule`: window derivation and the time-source seam
//! - `network`: remote timing source (optional, feature `net`)
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use mawaqit::prelude::*;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
//! let mecca = GeoCoordinate::new(21.4225, 39.8262);
//!
//! let schedule = schedule_for(&SolarTimes, mecca, date).unwrap();
//! let now = ClockTime::new(6, 0).unwrap();
//! let (next, countdown) = schedule.next_with_countdown(now).unwrap();
//! println!("{} in {} minutes", next.prayer, countdown.num_minutes());
//! ```

pub mod astronomy;
pub mod constants;
pub mod error;
pub mod extension;
#[cfg(feature = "net")]
pub mod network;
pub mod schedule;
pub mod types;

pub use astronomy::compute_base_times;
pub use error::MawaqitError;
pub use extension::PrayerDateExt;
pub use schedule::{BaseTimesProvider, FixedTimes, SolarTimes, build_schedule, schedule_for};
pub use types::{BaseTimes, ClockTime, GeoCoordinate, Prayer, Schedule, ScheduleEntry};

pub mod prelude {
    pub use crate::types::*;
    pub use crate::{BaseTimesProvider, FixedTimes, SolarTimes};
    pub use crate::{MawaqitError, PrayerDateExt};
    pub use crate::{build_schedule, compute_base_times, schedule_for, upcoming_entries};
}

use chrono::NaiveDate;

/// Lazy iterator over upcoming schedule entries, day by day.
///
/// Recomputes the schedule for each new date via the provider; the engine
/// itself stays stateless. A provider failure is yielded once as an error
/// and ends the iteration.
pub struct UpcomingEntries<P: BaseTimesProvider> {
    provider: P,
    coords: GeoCoordinate,
    date: NaiveDate,
    // Entries at or before the cursor are skipped on the first day only.
    cursor: Option<ClockTime>,
    current: Option<Schedule>,
    index: usize,
    done: bool,
}

impl<P: BaseTimesProvider> Iterator for UpcomingEntries<P> {
    type Item = Result<(NaiveDate, ScheduleEntry), MawaqitError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            if self.current.is_none() {
                match schedule_for(&self.provider, self.coords, self.date) {
                    Ok(schedule) => {
                        self.current = Some(schedule);
                        self.index = 0;
                    }
                    Err(e) => {
                        self.done = true;
                        return Some(Err(e));
                    }
                }
            }

            if let Some(schedule) = self.current.as_ref() {
                while self.index < schedule.entries().len() {
                    let entry = schedule.entries()[self.index];
                    self.index += 1;
                    if self.cursor.is_some_and(|c| entry.time <= c) {
                        continue;
                    }
                    return Some(Ok((self.date, entry)));
                }
            }

            // Day exhausted; move to the next calendar date.
            self.cursor = None;
            self.current = None;
            match self.date.succ_opt() {
                Some(d) => self.date = d,
                None => {
                    self.done = true;
                    return None;
                }
            }
        }
    }
}

/// Walks schedule entries forward from `after` on `start_date`, in fixed
/// sequence order within each day. Returns a lazy iterator.
pub fn upcoming_entries<P: BaseTimesProvider>(
    provider: P,
    coords: GeoCoordinate,
    start_date: NaiveDate,
    after: ClockTime,
) -> UpcomingEntries<P> {
    UpcomingEntries {
        provider,
        coords,
        date: start_date,
        cursor: Some(after),
        current: None,
        index: 0,
        done: false,
    }
}
