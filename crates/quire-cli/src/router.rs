//! Command routing logic for CLI

use crate::args::{Cli, Commands};
use crate::commands::{self, CommandContext};
use crate::console::CliConsole;
use crate::signal_handler::SignalHandler;
use quire_core::cancellation::deadline_token;
use quire_core::config::load_config_with_provider;
use quire_core::{GatewayClient, GatewayError, SlidingWindowRateLimiter};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli) -> anyhow::Result<()> {
    let console = CliConsole::new(cli.verbose);
    let config = load_config_with_provider(cli.config.as_deref(), cli.provider.map(Into::into))?;

    if let Commands::Config = cli.command {
        return commands::config::show(&console, &config);
    }

    let limiter = SlidingWindowRateLimiter::new(config.rate_limit)?;
    let client = GatewayClient::new(config, limiter)?;
    console.info(&format!("Using provider '{}'", client.provider()));

    // Ctrl+C cancels the root; the deadline only cancels the request token
    let root = CancellationToken::new();
    let mut signals = SignalHandler::new(root.clone());
    signals.start()?;

    let token = match cli.deadline {
        Some(secs) => deadline_token(&root, Duration::from_secs(secs)),
        None => root.child_token(),
    };

    let ctx = CommandContext {
        client,
        token,
        console,
    };

    let result = match &cli.command {
        Commands::Chat {
            prompt,
            json,
            stream,
        } => commands::chat::run(&ctx, prompt, *json, *stream).await,
        Commands::Speak { text, out } => commands::speak::run(&ctx, text, out).await,
        Commands::Image { description, raw } => {
            commands::image::run(&ctx, description, *raw).await
        }
        Commands::Mood { entries } => commands::mood::run(&ctx, entries).await,
        Commands::Summarize { notes, stream } => {
            commands::summarize::run(&ctx, notes, *stream).await
        }
        Commands::Config => Ok(()),
    };

    signals.stop();

    if let (Err(err), Some(secs)) = (&result, cli.deadline) {
        let cancelled = err
            .downcast_ref::<GatewayError>()
            .is_some_and(GatewayError::is_cancelled);
        if cancelled && !root.is_cancelled() {
            ctx.console
                .warn(&format!("Deadline of {}s reached, request cancelled", secs));
        }
    }
    result
}
