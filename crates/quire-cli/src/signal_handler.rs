//! Ctrl+C handling
//!
//! SIGINT cancels the token of the running command; a second SIGINT exits.

use futures::stream::StreamExt;
use signal_hook::consts::SIGINT;
use signal_hook_tokio::{Handle, Signals};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Exit status for an interrupted command
pub const EXIT_INTERRUPTED: u8 = 130;

/// Signal handler that turns Ctrl+C into cancellation
pub struct SignalHandler {
    token: CancellationToken,
    signals: Option<Handle>,
    task_handle: Option<JoinHandle<()>>,
}

impl SignalHandler {
    /// Create a handler that cancels `token` on Ctrl+C
    pub fn new(token: CancellationToken) -> Self {
        Self {
            token,
            signals: None,
            task_handle: None,
        }
    }

    /// Start listening for SIGINT
    pub fn start(&mut self) -> std::io::Result<()> {
        if self.task_handle.is_some() {
            return Ok(()); // Already started
        }

        let mut signals = Signals::new([SIGINT])?;
        self.signals = Some(signals.handle());
        let token = self.token.clone();

        let handle = tokio::spawn(async move {
            while let Some(signal) = signals.next().await {
                if signal != SIGINT {
                    continue;
                }
                if token.is_cancelled() {
                    // Second Ctrl+C: stop waiting for a graceful finish
                    std::process::exit(i32::from(EXIT_INTERRUPTED));
                }
                tracing::debug!("SIGINT received, cancelling");
                token.cancel();
            }
        });

        self.task_handle = Some(handle);
        Ok(())
    }

    /// Stop listening
    pub fn stop(&mut self) {
        if let Some(signals) = self.signals.take() {
            signals.close();
        }
        if let Some(handle) = self.task_handle.take() {
            handle.abort();
        }
    }
}

impl Drop for SignalHandler {
    fn drop(&mut self) {
        self.stop();
    }
}
