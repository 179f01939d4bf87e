//! `quire summarize`

use super::{CommandContext, read_json_records};
use quire_core::diary::{self, Note};
use std::path::Path;

pub async fn run(ctx: &CommandContext, notes_path: &Path, stream: bool) -> anyhow::Result<()> {
    let notes: Vec<Note> = read_json_records(notes_path)?;
    ctx.console.info(&format!("Summarizing {} notes", notes.len()));

    if stream {
        let summary = diary::summarize_notes_stream(&ctx.client, &notes, ctx.token.clone()).await?;
        return ctx.print_stream(summary).await;
    }

    let summary = ctx
        .cancellable(diary::summarize_notes(&ctx.client, &notes))
        .await?;
    println!("{}", summary);
    Ok(())
}
