//! `quire speak`

use super::CommandContext;
use anyhow::Context;
use std::path::Path;

pub async fn run(ctx: &CommandContext, text: &str, out: &Path) -> anyhow::Result<()> {
    let audio = ctx.cancellable(ctx.client.generate_speech(text)).await?;

    tokio::fs::write(out, &audio.bytes)
        .await
        .with_context(|| format!("Failed to write audio to '{}'", out.display()))?;

    ctx.console.success(&format!(
        "Saved {} bytes of {} to {}",
        audio.len(),
        audio.mime_type,
        out.display()
    ));
    Ok(())
}
