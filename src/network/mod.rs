//! Remote Timing Source Module.
//!
//! Alternate path for obtaining [`BaseTimes`]: instead of computing the
//! six base events astronomically, fetch them from an Aladhan-compatible
//! timings endpoint. The response is reduced to the same validated
//! `BaseTimes` the solar calculator produces, keeping the two sources
//! interchangeable downstream.

use crate::error::MawaqitError;
use crate::types::{BaseTimes, ClockTime, GeoCoordinate};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

/// Public Aladhan API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.aladhan.com";

// Calculation method 2 (ISNA), as deployed upstream.
const CALCULATION_METHOD: u8 = 2;

#[derive(Debug, Deserialize)]
struct TimingsResponse {
    status: String,
    data: TimingsData,
}

#[derive(Debug, Deserialize)]
struct TimingsData {
    timings: RawTimings,
}

#[derive(Debug, Deserialize)]
struct RawTimings {
    #[serde(rename = "Fajr")]
    fajr: String,
    #[serde(rename = "Sunrise")]
    sunrise: String,
    #[serde(rename = "Dhuhr")]
    dhuhr: String,
    #[serde(rename = "Asr")]
    asr: String,
    #[serde(rename = "Maghrib")]
    maghrib: String,
    #[serde(rename = "Isha")]
    isha: String,
}

/// HTTP client for an Aladhan-compatible timings service.
#[derive(Debug, Clone)]
pub struct TimingsClient {
    base_url: String,
    http: reqwest::Client,
}

impl Default for TimingsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingsClient {
    /// Client against the public Aladhan endpoint.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client against a custom endpoint (e.g. a mirror or a test server).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Fetches the six base times for a date and location.
    ///
    /// # Errors
    /// - `CoordinateOutOfRange` before any request is made.
    /// - `RemoteSource` for transport failures, non-success HTTP status,
    ///   or a service-level error status.
    /// - `MalformedBaseTimes` if a timing string does not parse or the
    ///   returned times are out of chronological order.
    pub async fn fetch_base_times(
        &self,
        coords: GeoCoordinate,
        date: NaiveDate,
    ) -> Result<BaseTimes, MawaqitError> {
        if !coords.is_valid() {
            return Err(MawaqitError::coordinate_out_of_range(coords));
        }

        // The timings path segment takes a Unix timestamp; midnight UTC
        // of the requested date selects that day.
        let unix = date.and_time(NaiveTime::MIN).and_utc().timestamp();
        let url = format!(
            "{}/v1/timings/{}?latitude={}&longitude={}&method={}",
            self.base_url, unix, coords.lat, coords.lng, CALCULATION_METHOD,
        );

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| MawaqitError::remote(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MawaqitError::remote(format!("HTTP {}", response.status())));
        }

        let body: TimingsResponse = response
            .json()
            .await
            .map_err(|e| MawaqitError::remote(e.to_string()))?;

        if body.status != "OK" {
            return Err(MawaqitError::remote(format!(
                "service status {:?}",
                body.status
            )));
        }

        let t = body.data.timings;
        let base = BaseTimes::new(
            parse_clock(&t.fajr)?,
            parse_clock(&t.sunrise)?,
            parse_clock(&t.dhuhr)?,
            parse_clock(&t.asr)?,
            parse_clock(&t.maghrib)?,
            parse_clock(&t.isha)?,
        );
        base.validate()?;
        Ok(base)
    }
}

/// Parses `"HH:MM"`, tolerating the `"HH:MM (WIB)"` form the live API emits.
fn parse_clock(raw: &str) -> Result<ClockTime, MawaqitError> {
    let clock = raw.split_whitespace().next().unwrap_or(raw);
    clock
        .parse()
        .map_err(|_| MawaqitError::malformed(format!("unparseable clock time {raw:?}")))
}
