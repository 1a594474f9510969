use crate::types::{GeoCoordinate, Prayer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from mawaqit operations.
///
/// Every failure is a local computation error; nothing here is transient
/// or retryable, and the engine never retries internally.
#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
pub enum MawaqitError {
    /// Latitude or longitude outside the valid range.
    #[error("coordinate ({lat:.4}, {lng:.4}) is outside the valid range (lat [-90, 90], lng [-180, 180])")]
    CoordinateOutOfRange { lat: f64, lng: f64 },

    /// The hour-angle equation has no real solution for this event
    /// (extreme polar latitude/date combination).
    #[error("no solar solution for {event} at latitude {lat:.4} on this date")]
    NoSolarSolution { event: Prayer, lat: f64 },

    /// Externally supplied base times are missing a key or out of
    /// chronological order.
    #[error("malformed base times: {reason}")]
    MalformedBaseTimes { reason: String },

    /// The remote timing service returned an unusable response.
    #[cfg(feature = "net")]
    #[error("remote timing source failed: {reason}")]
    RemoteSource { reason: String },
}

impl MawaqitError {
    /// Creates a `CoordinateOutOfRange` error for `coords`.
    pub fn coordinate_out_of_range(coords: GeoCoordinate) -> Self {
        Self::CoordinateOutOfRange {
            lat: coords.lat,
            lng: coords.lng,
        }
    }

    /// Creates a `NoSolarSolution` error for the given event.
    pub fn no_solar_solution(event: Prayer, coords: GeoCoordinate) -> Self {
        Self::NoSolarSolution {
            event,
            lat: coords.lat,
        }
    }

    /// Creates a `MalformedBaseTimes` error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedBaseTimes {
            reason: reason.into(),
        }
    }

    /// Creates a `RemoteSource` error.
    #[cfg(feature = "net")]
    pub fn remote(reason: impl Into<String>) -> Self {
        Self::RemoteSource {
            reason: reason.into(),
        }
    }
}
