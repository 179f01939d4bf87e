//! `quire config`: show the effective configuration

use crate::console::CliConsole;
use quire_core::GatewayConfig;
use quire_core::config::format_api_key_status;

pub fn show(console: &CliConsole, config: &GatewayConfig) -> anyhow::Result<()> {
    let provider = &config.provider;

    console.print_header("Configuration");
    console.field("Provider", provider.kind.name());
    console.field("Base URL", provider.base_url());
    console.field("Chat model", provider.chat_model());
    console.field("Speech model", provider.speech_model().unwrap_or("(not sent)"));
    console.field("Image model", provider.image_model().unwrap_or("(not sent)"));
    console.field("Voice", provider.voice());
    console.field(
        "Rate limit",
        &format!(
            "{} requests / {}ms",
            config.rate_limit.max_requests,
            config.rate_limit.window.as_millis()
        ),
    );
    console.field(
        "Timeouts",
        &match config.network.request_timeout() {
            Some(timeout) => format!(
                "connect {}s, request {}s",
                config.network.connect_timeout_secs,
                timeout.as_secs()
            ),
            None => format!("connect {}s", config.network.connect_timeout_secs),
        },
    );
    println!();
    println!(
        "{}",
        format_api_key_status(provider.kind.name(), provider.api_key())
    );

    match config.validate() {
        Ok(()) => console.success("Configuration is valid"),
        Err(err) => console.warn(err.message()),
    }
    Ok(())
}
