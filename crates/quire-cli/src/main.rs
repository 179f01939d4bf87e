//! Quire CLI application
//!
//! Command-line access to the Quire gateway: chat completion (plain, JSON
//! mode or streamed), text-to-speech, image generation, and the diary mood
//! and summary features.
//!
//! # Installation
//!
//! ```bash
//! cargo install --path crates/quire-cli
//! ```
//!
//! Configuration comes from `--config FILE`, `.env` and the environment
//! (`OPENAI_API_KEY`, `STABLE_LM_API_KEY`, ...). Set `RUST_LOG` or pass
//! `--verbose` for logs. Ctrl+C cancels the running request; the process
//! then exits with status 130.

// Allow common clippy lints that are stylistic preferences
#![allow(clippy::collapsible_if)]
#![allow(clippy::field_reassign_with_default)]

mod args;
mod commands;
mod console;
mod router;
mod signal_handler;

use clap::Parser;
use console::CliConsole;
use quire_core::GatewayError;
use quire_core::error::UserFriendlyError;
use signal_handler::EXIT_INTERRUPTED;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use args::Cli;

/// What the process should report for a failed command
fn exit_for(err: &anyhow::Error) -> (Option<String>, u8) {
    match err.downcast_ref::<GatewayError>() {
        Some(gateway) if gateway.is_cancelled() => (None, EXIT_INTERRUPTED),
        Some(gateway) => (
            UserFriendlyError::from_error(gateway).map(|friendly| friendly.format_display()),
            1,
        ),
        None => (Some(format!("{:#}", err)), 1),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging with environment-based filtering
    // Set RUST_LOG=debug, or pass --verbose, for verbose logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match router::route(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let (message, code) = exit_for(&err);
            if let Some(message) = message {
                CliConsole::new(false).error(&message);
            }
            ExitCode::from(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_is_silent() {
        let err = anyhow::Error::new(GatewayError::cancelled());
        let (message, code) = exit_for(&err);
        assert!(message.is_none());
        assert_eq!(code, 130);
    }

    #[test]
    fn test_gateway_error_uses_user_message() {
        let err = anyhow::Error::new(GatewayError::rate_limited());
        let (message, code) = exit_for(&err);
        assert!(message.unwrap().contains("Rate limit exceeded"));
        assert_eq!(code, 1);
    }

    #[test]
    fn test_other_errors_print_chain() {
        let err = anyhow::anyhow!("disk full").context("Failed to write audio");
        let (message, _) = exit_for(&err);
        assert_eq!(message.unwrap(), "Failed to write audio: disk full");
    }
}
