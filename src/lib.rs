//! echowatch: a single-sensor proximity monitor.
//!
//! Samples a distance sensor on a fixed cadence, classifies each reading
//! against a warning threshold, plays an audible alert when an object is
//! close, and keeps a bounded rolling history for live display or collects
//! fixed-size rounds for export.
//!
//! The sensor, alert playback, round export, and live rendering are all
//! trait seams ([`sensor::DistanceSensor`], [`audio::AlertSink`],
//! [`export::RoundExporter`], [`view::LiveView`]); the state machine in
//! [`sensing`] is pure enough to drive from tests with scripted fakes.

pub mod audio;
pub mod config;
pub mod export;
pub mod models;
pub mod sensing;
pub mod sensor;
pub mod utils;
pub mod view;

pub use config::{AlertMode, AxisPolicy, MonitorConfig};
pub use models::{Reading, Round};
pub use sensing::{MonitorController, SessionDriver, SessionMode, SessionOutcome};
