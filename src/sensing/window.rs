//! Rolling window of recent readings for the live view.

use std::collections::VecDeque;

use crate::config::AxisPolicy;
use crate::models::Reading;

/// Axis extents the live view should cover for the current window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBounds {
    pub index_max: u64,
    pub distance_max: f64,
}

/// Fixed-capacity FIFO buffer of the most recent readings.
///
/// Oldest entries are evicted first once capacity is exceeded, so the
/// window always holds the last `capacity` readings in arrival order.
#[derive(Debug)]
pub struct RollingWindow {
    capacity: usize,
    readings: VecDeque<Reading>,
}

impl RollingWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            readings: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, reading: Reading) {
        self.readings.push_back(reading);
        while self.readings.len() > self.capacity {
            self.readings.pop_front();
        }
    }

    /// Ordered copy of the current contents, for rendering. Does not
    /// disturb the buffer.
    pub fn snapshot(&self) -> Vec<Reading> {
        self.readings.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Axis extents for rendering: the index axis covers at least the
    /// configured span and always reaches past the newest index; the
    /// distance axis covers the largest distance currently in the window
    /// plus a margin.
    pub fn view_bounds(&self, policy: &AxisPolicy) -> ViewBounds {
        let latest_index = self.readings.back().map(|r| r.index).unwrap_or(0);
        let max_distance = self
            .readings
            .iter()
            .map(|r| r.distance_cm)
            .fold(0.0_f64, f64::max);

        ViewBounds {
            index_max: policy.min_index_span.max(latest_index + policy.index_margin),
            distance_max: policy
                .min_distance_span
                .max(max_distance + policy.distance_margin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn reading(index: u64, distance_cm: f64) -> Reading {
        Reading {
            index,
            timestamp: Utc::now(),
            distance_cm,
            valid: true,
        }
    }

    #[test]
    fn never_exceeds_capacity() {
        let mut window = RollingWindow::new(3);
        for i in 1..=10 {
            window.push(reading(i, i as f64));
            assert!(window.len() <= 3);
        }
    }

    #[test]
    fn keeps_last_capacity_readings_in_order() {
        let mut window = RollingWindow::new(3);
        for i in 1..=7 {
            window.push(reading(i, i as f64 * 2.0));
        }
        let snapshot = window.snapshot();
        let indices: Vec<u64> = snapshot.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![5, 6, 7]);
        assert_eq!(snapshot[0].distance_cm, 10.0);
    }

    #[test]
    fn bounds_respect_policy_floors() {
        let mut window = RollingWindow::new(5);
        window.push(reading(1, 12.0));
        let bounds = window.view_bounds(&AxisPolicy::default());
        assert_eq!(bounds.index_max, 200);
        assert_eq!(bounds.distance_max, 100.0);
    }

    #[test]
    fn bounds_track_latest_index_and_max_distance() {
        let policy = AxisPolicy {
            min_index_span: 10,
            index_margin: 5,
            min_distance_span: 20.0,
            distance_margin: 10.0,
        };
        let mut window = RollingWindow::new(5);
        window.push(reading(40, 80.0));
        window.push(reading(41, 35.0));
        let bounds = window.view_bounds(&policy);
        assert_eq!(bounds.index_max, 46);
        // Max distance in the window, not the most recent one
        assert_eq!(bounds.distance_max, 90.0);
    }
}
