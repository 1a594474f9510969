//! Fixed angles and minute offsets of the Hanafi ruleset.

/// Minutes in a wall-clock day.
pub const MINUTES_PER_DAY: i32 = 24 * 60;

// Solar depression angles (degrees below the horizon).
/// Dawn angle for Fajr.
pub const FAJR_ANGLE: f64 = -18.0;
/// Geometric horizon corrected for atmospheric refraction (sunrise/sunset).
pub const HORIZON_ANGLE: f64 = -0.833;
/// Night angle for Isha.
pub const ISHA_ANGLE: f64 = -17.0;

/// Mean obliquity of the ecliptic (degrees).
pub const EARTH_OBLIQUITY: f64 = 23.439;
/// Julian day of the J2000 epoch.
pub const J2000_EPOCH: f64 = 2_451_545.0;

// Secondary display-time offsets (minutes).
/// Ishraq begins this long after sunrise.
pub const ISHRAQ_OFFSET_MIN: i32 = 20;
/// Chasht (Duha) begins this long after sunrise.
pub const CHASHT_OFFSET_MIN: i32 = 150;
/// Zawal is announced this long before solar noon.
pub const ZAWAL_LEAD_MIN: i32 = 15;
/// Tahajud is announced at a fixed wall-clock hour, not derived from
/// astronomy. Season and latitude do not move it.
pub const TAHAJUD_HOUR: u8 = 3;

// Window offsets (minutes).
pub const FAJR_WINDOW_LEAD_MIN: i32 = 15;
pub const SUNRISE_WINDOW_HALF_MIN: i32 = 5;
pub const ISHRAQ_WINDOW_MIN: i32 = 60;
pub const CHASHT_WINDOW_MIN: i32 = 60;
pub const ZAWAL_WINDOW_START_LEAD_MIN: i32 = 20;
pub const ZAWAL_WINDOW_END_LEAD_MIN: i32 = 5;
pub const TAHAJUD_START_AFTER_ISHA_MIN: i32 = 60;
