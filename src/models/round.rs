//! Round data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Reading;

/// A sealed batch of readings collected together and exported as one unit.
///
/// Sealing is the only way a `Round` comes into existence: the collector
/// hands back a full sequence of readings, and the driver stamps it with
/// the round number and collection time. The contents are never mutated
/// afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    /// Round counter within the session, starting at 1.
    pub number: u32,
    /// When the round completed collection. Embedded in export filenames.
    pub collected_at: DateTime<Utc>,
    pub readings: Vec<Reading>,
}

impl Round {
    pub fn new(number: u32, collected_at: DateTime<Utc>, readings: Vec<Reading>) -> Self {
        Self {
            number,
            collected_at,
            readings,
        }
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}
