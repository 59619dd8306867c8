//! Proximity alert policy.

use crate::config::AlertMode;
use crate::models::Reading;

/// Decides when an alert should fire. The policy only produces the
/// decision; playback belongs to the session driver.
#[derive(Debug)]
pub struct AlertPolicy {
    warning_distance_cm: f64,
    mode: AlertMode,
    /// Whether the previous reading was inside the warning zone.
    alerting: bool,
}

impl AlertPolicy {
    pub fn new(warning_distance_cm: f64, mode: AlertMode) -> Self {
        Self {
            warning_distance_cm,
            mode,
            alerting: false,
        }
    }

    /// Evaluate one reading and update the alert state.
    ///
    /// The zone check is strict on both ends: a distance of exactly zero
    /// means "no valid object" (the timeout representation) and never
    /// fires.
    pub fn evaluate(&mut self, reading: &Reading) -> bool {
        let in_zone = reading.distance_cm > 0.0 && reading.distance_cm < self.warning_distance_cm;
        let fires = match self.mode {
            AlertMode::EveryReading => in_zone,
            AlertMode::OnEntry => in_zone && !self.alerting,
        };
        self.alerting = in_zone;
        fires
    }

    pub fn is_alerting(&self) -> bool {
        self.alerting
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn reading(distance_cm: f64) -> Reading {
        Reading {
            index: 1,
            timestamp: Utc::now(),
            distance_cm,
            valid: true,
        }
    }

    #[test]
    fn fires_inside_zone_only() {
        let mut policy = AlertPolicy::new(10.0, AlertMode::EveryReading);
        assert!(!policy.evaluate(&reading(15.0)));
        assert!(policy.evaluate(&reading(9.99)));
        assert!(!policy.evaluate(&reading(10.0)));
    }

    #[test]
    fn zero_distance_never_fires() {
        let mut policy = AlertPolicy::new(10.0, AlertMode::EveryReading);
        assert!(!policy.evaluate(&reading(0.0)));
        assert!(!policy.is_alerting());
    }

    #[test]
    fn every_reading_mode_refires() {
        let mut policy = AlertPolicy::new(10.0, AlertMode::EveryReading);
        assert!(policy.evaluate(&reading(5.0)));
        assert!(policy.evaluate(&reading(4.0)));
        assert!(policy.evaluate(&reading(3.0)));
    }

    #[test]
    fn on_entry_mode_fires_on_transition_only() {
        let mut policy = AlertPolicy::new(10.0, AlertMode::OnEntry);
        assert!(policy.evaluate(&reading(5.0)));
        assert!(!policy.evaluate(&reading(4.0)));
        // Leaving and re-entering the zone arms it again
        assert!(!policy.evaluate(&reading(20.0)));
        assert!(policy.evaluate(&reading(6.0)));
    }
}
