//! Sample classification.
//!
//! Turns a raw sensor result into a `Reading`. A timeout is a normal
//! outcome here: it becomes an invalid zero-distance reading and the
//! session keeps going.

use chrono::{DateTime, Utc};

use crate::models::Reading;

/// Classify one raw sample under a caller-supplied index and timestamp.
///
/// Negative distances (sensor noise near the transducer) are clamped to
/// zero, which also keeps them out of the alert zone.
pub fn classify(raw: Option<f64>, index: u64, timestamp: DateTime<Utc>) -> Reading {
    match raw {
        Some(distance) => Reading {
            index,
            timestamp,
            distance_cm: distance.max(0.0),
            valid: true,
        },
        None => Reading {
            index,
            timestamp,
            distance_cm: 0.0,
            valid: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_sample_passes_through() {
        let reading = classify(Some(42.5), 7, Utc::now());
        assert_eq!(reading.index, 7);
        assert_eq!(reading.distance_cm, 42.5);
        assert!(reading.valid);
    }

    #[test]
    fn negative_sample_clamps_to_zero() {
        let reading = classify(Some(-1.25), 1, Utc::now());
        assert_eq!(reading.distance_cm, 0.0);
        assert!(reading.valid);
    }

    #[test]
    fn timeout_becomes_invalid_zero() {
        let reading = classify(None, 3, Utc::now());
        assert_eq!(reading.distance_cm, 0.0);
        assert!(!reading.valid);
    }
}
