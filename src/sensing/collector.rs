//! Round accumulation for batch mode.

use crate::models::Reading;

/// Accumulates readings until a round's worth is complete.
///
/// Sealing is the only transition: `push` hands back the full sequence at
/// exactly the configured size and the collector restarts empty. A session
/// that ends mid-round simply drops the collector, discarding the partial
/// buffer.
#[derive(Debug)]
pub struct RoundCollector {
    size: usize,
    readings: Vec<Reading>,
}

impl RoundCollector {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            readings: Vec::with_capacity(size),
        }
    }

    /// Append one reading. Returns the completed sequence when the round
    /// size is reached, otherwise `None`.
    pub fn push(&mut self, reading: Reading) -> Option<Vec<Reading>> {
        self.readings.push(reading);
        if self.readings.len() == self.size {
            let sealed = std::mem::replace(&mut self.readings, Vec::with_capacity(self.size));
            Some(sealed)
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}
