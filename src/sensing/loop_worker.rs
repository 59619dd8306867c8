//! Session driver: the sampling, alerting, and buffering state machine.
//!
//! One tokio task owns the whole tick cycle: sample, classify, evaluate the
//! alert, push into the mode's buffer, hand off to the view or exporter.
//! The window and collector are never touched from anywhere else, so the
//! loop needs no locks. Cancellation is checked between ticks; a partial
//! round in flight when the session ends is discarded, never exported.

use anyhow::Result;
use chrono::Utc;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::audio::AlertSink;
use crate::config::MonitorConfig;
use crate::export::RoundExporter;
use crate::models::{Reading, Round};
use crate::sensor::DistanceSensor;
use crate::view::LiveView;

use super::alert::AlertPolicy;
use super::classifier::classify;
use super::collector::RoundCollector;
use super::window::RollingWindow;

// Set to false to mute the per-reading output from this module
const ENABLE_LOGS: bool = true;

use crate::{log_error, log_info, log_warn};

/// How a session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Sample indefinitely into the rolling window, rendering after every
    /// reading, until cancelled.
    Live,
    /// Collect fixed-size rounds and export each one. With `interactive`
    /// set, the confirmation gate is consulted between rounds.
    Rounds { interactive: bool },
}

/// What a finished session did. Interruption is an expected ending, so the
/// outcome is returned on cancellation too.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOutcome {
    pub readings_taken: u64,
    pub rounds_completed: u32,
}

/// Asked between rounds in interactive mode; `false` ends the session.
pub type ContinueGate = Box<dyn FnMut(u32) -> bool + Send>;

/// Owns the sampling cadence and composes classifier, alert policy, and
/// the per-mode buffers over the injected capabilities.
pub struct SessionDriver {
    config: MonitorConfig,
    sensor: Box<dyn DistanceSensor + Send>,
    policy: AlertPolicy,
    sink: Box<dyn AlertSink + Send>,
    view: Box<dyn LiveView + Send>,
    exporter: Box<dyn RoundExporter + Send>,
    confirm: ContinueGate,
    session_id: String,
    next_index: u64,
}

impl SessionDriver {
    /// Build a driver over validated configuration. Construction fails fast
    /// on an unusable config, before any sampling begins.
    pub fn new(
        config: MonitorConfig,
        sensor: Box<dyn DistanceSensor + Send>,
        sink: Box<dyn AlertSink + Send>,
        view: Box<dyn LiveView + Send>,
        exporter: Box<dyn RoundExporter + Send>,
        confirm: ContinueGate,
    ) -> Result<Self> {
        config.validate()?;
        let policy = AlertPolicy::new(config.warning_distance_cm, config.alert_mode);
        Ok(Self {
            config,
            sensor,
            policy,
            sink,
            view,
            exporter,
            confirm,
            session_id: Uuid::new_v4().to_string(),
            next_index: 1,
        })
    }

    pub async fn run(self, mode: SessionMode, cancel: CancellationToken) -> Result<SessionOutcome> {
        log_info!(
            "session {} starting in {:?} mode, cadence {}ms",
            self.session_id,
            mode,
            self.config.sample_interval_ms
        );
        match mode {
            SessionMode::Live => self.run_live(cancel).await,
            SessionMode::Rounds { interactive } => self.run_rounds(interactive, cancel).await,
        }
    }

    /// One tick: sample, classify, log, evaluate the alert.
    fn take_reading(&mut self) -> Reading {
        let index = self.next_index;
        self.next_index += 1;

        let raw = self.sensor.sample();
        let reading = classify(raw, index, Utc::now());

        if reading.valid {
            log_info!("Reading {}: {:.2} cm", reading.index, reading.distance_cm);
        } else {
            log_info!("Reading {}: timeout", reading.index);
        }

        if self.policy.evaluate(&reading) {
            log_warn!(
                "*** WARNING: object within {:.1} cm ***",
                self.config.warning_distance_cm
            );
            // Dispatch only; the audio thread owns playback. In blocking
            // mode the sink itself waits, delaying the next tick.
            if let Err(err) = self.sink.alert() {
                log_error!("alert dispatch failed: {err:?}");
            }
        }

        reading
    }

    async fn run_live(mut self, cancel: CancellationToken) -> Result<SessionOutcome> {
        let mut window = RollingWindow::new(self.config.window_capacity);
        let mut ticker = interval(self.config.sample_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut outcome = SessionOutcome::default();

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    log_info!("session {} interrupted, shutting down", self.session_id);
                    break;
                }
                _ = ticker.tick() => {
                    let reading = self.take_reading();
                    outcome.readings_taken += 1;
                    window.push(reading);

                    let bounds = window.view_bounds(&self.config.axis);
                    self.view.render(&window.snapshot(), bounds);
                }
            }
        }

        Ok(outcome)
    }

    async fn run_rounds(
        mut self,
        interactive: bool,
        cancel: CancellationToken,
    ) -> Result<SessionOutcome> {
        let mut collector = RoundCollector::new(self.config.round_size);
        let mut ticker = interval(self.config.sample_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut outcome = SessionOutcome::default();
        let mut round_number: u32 = 1;

        log_info!(
            "Starting data collection of {} readings...",
            self.config.round_size
        );

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    if !collector.is_empty() {
                        log_info!(
                            "session {} interrupted mid-round, discarding {} readings",
                            self.session_id,
                            collector.len()
                        );
                    } else {
                        log_info!("session {} interrupted, shutting down", self.session_id);
                    }
                    break;
                }
                _ = ticker.tick() => {
                    let reading = self.take_reading();
                    outcome.readings_taken += 1;

                    let Some(readings) = collector.push(reading) else {
                        continue;
                    };

                    let round = Round::new(round_number, Utc::now(), readings);
                    log_info!("Collection complete: round {} ({} readings)", round.number, round.len());

                    // The sealed round stays intact either way; a failed
                    // export is logged and the session moves on.
                    match self.exporter.export(&round) {
                        Ok(path) => log_info!("Round saved as: {}", path.display()),
                        Err(err) => log_error!("Failed to export round {}: {err:?}", round.number),
                    }

                    outcome.rounds_completed += 1;
                    round_number += 1;

                    if interactive && !(self.confirm)(outcome.rounds_completed) {
                        log_info!("session {} ended after round {}", self.session_id, outcome.rounds_completed);
                        break;
                    }

                    log_info!(
                        "Starting data collection of {} readings...",
                        self.config.round_size
                    );
                }
            }
        }

        Ok(outcome)
    }
}
