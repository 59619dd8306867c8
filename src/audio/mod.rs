//! Alert audio playback.
//!
//! rodio's output stream and sink are not `Send`, so a dedicated audio
//! thread owns them and receives play commands over a channel. The sampling
//! loop fires alerts through [`AlertSink`]; by default a command is
//! dispatched and the loop moves on, so playback never stalls the sampling
//! cadence. Blocking mode waits for an ack sent after playback finishes.

pub mod tone;

pub use tone::WarningTone;

use anyhow::{anyhow, Result};
use log::warn;
use rodio::{Decoder, OutputStream, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::{
    mpsc::{self, Sender},
    Arc, Mutex,
};
use std::thread;

/// Alert playback capability used by the session driver.
pub trait AlertSink {
    fn alert(&self) -> Result<()>;
}

enum AudioCommand {
    Play { done: Option<Sender<()>> },
}

/// Plays the configured alert asset (or the synthesized warning tone) on a
/// dedicated audio thread.
pub struct AudioAlertHandle {
    tx: Arc<Mutex<Option<Sender<AudioCommand>>>>,
    sound: Option<PathBuf>,
    volume: f32,
    blocking: bool,
}

impl AudioAlertHandle {
    /// `volume` is 0-100, matching the reference playback API.
    pub fn new(sound: Option<PathBuf>, volume: u8, blocking: bool) -> Self {
        Self {
            tx: Arc::new(Mutex::new(None)),
            sound,
            volume: f32::from(volume.min(100)) / 100.0,
            blocking,
        }
    }

    fn ensure_thread(&self) -> Result<Sender<AudioCommand>> {
        if let Some(tx) = self
            .tx
            .lock()
            .map_err(|e| anyhow!("audio handle poisoned: {e}"))?
            .as_ref()
        {
            return Ok(tx.clone());
        }

        let (tx, rx) = mpsc::channel::<AudioCommand>();
        let sound = self.sound.clone();
        let volume = self.volume;

        // Dedicated thread holding the non-Send audio objects
        thread::Builder::new()
            .name("alert-audio".to_string())
            .spawn(move || {
                let mut _stream: Option<OutputStream> = None;
                let mut sink: Option<Sink> = None;

                fn ensure_sink(
                    stream: &mut Option<OutputStream>,
                    sink: &mut Option<Sink>,
                ) -> Result<()> {
                    if sink.is_none() {
                        let (s, handle) = OutputStream::try_default()
                            .map_err(|e| anyhow!("failed to open audio output: {e}"))?;
                        let new_sink = Sink::try_new(&handle)
                            .map_err(|e| anyhow!("failed to create audio sink: {e}"))?;
                        *stream = Some(s);
                        *sink = Some(new_sink);
                    }
                    Ok(())
                }

                while let Ok(cmd) = rx.recv() {
                    match cmd {
                        AudioCommand::Play { done } => {
                            if let Err(e) = ensure_sink(&mut _stream, &mut sink) {
                                warn!("alert playback unavailable: {e}");
                            } else if let Some(ref s) = sink {
                                s.set_volume(volume);
                                match append_alert_source(s, sound.as_deref()) {
                                    Ok(()) => {
                                        if done.is_some() {
                                            s.sleep_until_end();
                                        }
                                    }
                                    Err(e) => warn!("alert playback failed: {e}"),
                                }
                            }
                            if let Some(done) = done {
                                let _ = done.send(());
                            }
                        }
                    }
                }
            })
            .map_err(|e| anyhow!("failed to spawn audio thread: {e}"))?;

        let tx_clone = tx.clone();
        *self
            .tx
            .lock()
            .map_err(|e| anyhow!("audio handle poisoned: {e}"))? = Some(tx);
        Ok(tx_clone)
    }
}

fn append_alert_source(sink: &Sink, sound: Option<&std::path::Path>) -> Result<()> {
    match sound {
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| anyhow!("failed to open alert sound {}: {e}", path.display()))?;
            let decoder = Decoder::new(BufReader::new(file))
                .map_err(|e| anyhow!("failed to decode alert sound {}: {e}", path.display()))?;
            sink.append(decoder);
        }
        None => sink.append(WarningTone::new()),
    }
    Ok(())
}

impl AlertSink for AudioAlertHandle {
    fn alert(&self) -> Result<()> {
        let tx = self.ensure_thread()?;
        if self.blocking {
            let (done_tx, done_rx) = mpsc::channel();
            tx.send(AudioCommand::Play {
                done: Some(done_tx),
            })
            .map_err(|e| anyhow!("audio thread gone: {e}"))?;
            // Reference behavior: playback delays the next sample
            done_rx
                .recv()
                .map_err(|e| anyhow!("audio thread dropped ack: {e}"))?;
        } else {
            tx.send(AudioCommand::Play { done: None })
                .map_err(|e| anyhow!("audio thread gone: {e}"))?;
        }
        Ok(())
    }
}
