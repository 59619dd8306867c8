//! Monitor configuration.
//!
//! Every tunable the session needs is collected here and passed at
//! construction, so sessions can be configured per run and tested without
//! touching module-level constants.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// When the alert should fire for readings inside the warning zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertMode {
    /// Fire on every qualifying reading. Matches the reference hardware
    /// behavior; at a short cadence this repeats playback per sample.
    EveryReading,
    /// Fire only on the transition into the warning zone.
    OnEntry,
}

impl Default for AlertMode {
    fn default() -> Self {
        AlertMode::EveryReading
    }
}

/// Axis scaling for the live view with tunable floors and margins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisPolicy {
    /// The index axis always spans at least this many readings.
    pub min_index_span: u64,
    /// Headroom past the newest index.
    pub index_margin: u64,
    /// The distance axis always spans at least this many centimeters.
    pub min_distance_span: f64,
    /// Headroom past the largest distance currently in the window.
    pub distance_margin: f64,
}

impl Default for AxisPolicy {
    fn default() -> Self {
        Self {
            min_index_span: 200,
            index_margin: 10,
            min_distance_span: 100.0,
            distance_margin: 10.0,
        }
    }
}

/// Configuration for one monitoring session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Distance threshold for the proximity alert (cm).
    pub warning_distance_cm: f64,

    /// Fixed delay between successive samples.
    pub sample_interval_ms: u64,

    /// Capacity of the rolling window in live mode.
    pub window_capacity: usize,

    /// Readings per round in batch mode.
    pub round_size: usize,

    pub alert_mode: AlertMode,

    /// Playback volume, 0-100.
    pub alert_volume: u8,

    /// Sound asset to play on alert. A synthesized warning tone is used
    /// when no asset is configured.
    pub alert_sound: Option<PathBuf>,

    /// Wait for playback to finish before the next sample. Off by default
    /// so playback cannot stall the sampling cadence.
    pub blocking_alerts: bool,

    pub axis: AxisPolicy,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            warning_distance_cm: 10.0,
            sample_interval_ms: 300,
            window_capacity: 200,
            round_size: 90,
            alert_mode: AlertMode::default(),
            alert_volume: 100,
            alert_sound: None,
            blocking_alerts: false,
            axis: AxisPolicy::default(),
        }
    }
}

impl MonitorConfig {
    /// Load configuration from a JSON file. A malformed file is an error;
    /// sampling must not start on a config the user did not intend.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        Ok(config)
    }

    /// Reject unusable values before any sampling begins.
    pub fn validate(&self) -> Result<()> {
        if self.warning_distance_cm <= 0.0 {
            bail!(
                "warning_distance_cm must be positive, got {}",
                self.warning_distance_cm
            );
        }
        if self.sample_interval_ms == 0 {
            bail!("sample_interval_ms must be positive");
        }
        if self.window_capacity == 0 {
            bail!("window_capacity must be positive");
        }
        if self.round_size == 0 {
            bail!("round_size must be positive");
        }
        if self.alert_volume > 100 {
            bail!("alert_volume must be 0-100, got {}", self.alert_volume);
        }
        if self.axis.min_index_span == 0 || self.axis.min_distance_span <= 0.0 {
            bail!("axis spans must be positive");
        }
        Ok(())
    }

    pub fn sample_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.sample_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(MonitorConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_capacity() {
        let config = MonitorConfig {
            window_capacity: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_non_positive_threshold() {
        let config = MonitorConfig {
            warning_distance_cm: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = MonitorConfig {
            warning_distance_cm: -3.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_interval_and_round_size() {
        let config = MonitorConfig {
            sample_interval_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = MonitorConfig {
            round_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_overrange_volume() {
        let config = MonitorConfig {
            alert_volume: 101,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: MonitorConfig =
            serde_json::from_str(r#"{ "warning_distance_cm": 25.0 }"#).unwrap();
        assert_eq!(config.warning_distance_cm, 25.0);
        assert_eq!(config.round_size, MonitorConfig::default().round_size);
        assert_eq!(config.alert_mode, AlertMode::EveryReading);
    }
}
