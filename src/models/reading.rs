//! Reading data model.
//!
//! Represents a single classified distance observation produced on one
//! sampling tick.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One classified sensor observation.
///
/// A timeout from the sensor is a normal, representable outcome: it is
/// recorded with `valid = false` and a zero distance, never as an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reading {
    /// Position within the session, starting at 1. Strictly increasing,
    /// never reused.
    pub index: u64,
    pub timestamp: DateTime<Utc>,
    /// Distance in centimeters. Always >= 0; negative sensor noise is
    /// clamped at classification time.
    pub distance_cm: f64,
    /// False when the sensor reported a timeout instead of a measurement.
    pub valid: bool,
}
