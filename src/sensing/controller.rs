use anyhow::{bail, Context, Result};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::loop_worker::{SessionDriver, SessionMode, SessionOutcome};

/// Owns a running session task: spawns the driver's loop and stops it by
/// cancelling the token and joining the task.
pub struct MonitorController {
    handle: Option<JoinHandle<Result<SessionOutcome>>>,
    cancel_token: Option<CancellationToken>,
}

impl MonitorController {
    pub fn new() -> Self {
        Self {
            handle: None,
            cancel_token: None,
        }
    }

    pub fn start(&mut self, driver: SessionDriver, mode: SessionMode) -> Result<()> {
        if self.handle.is_some() {
            bail!("session already active");
        }

        let cancel_token = CancellationToken::new();
        let token_clone = cancel_token.clone();

        let handle = tokio::spawn(driver.run(mode, token_clone));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        Ok(())
    }

    /// Cancel the session and wait for it to wind down. Returns what the
    /// session accomplished; interruption is a clean ending, not an error.
    pub async fn stop(&mut self) -> Result<SessionOutcome> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            handle.await.context("session task failed to join")?
        } else {
            Ok(SessionOutcome::default())
        }
    }
}

impl Default for MonitorController {
    fn default() -> Self {
        Self::new()
    }
}
