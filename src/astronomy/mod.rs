//! Astronomical computation of the six base solar events.

pub mod solar;

pub use solar::compute_base_times;
