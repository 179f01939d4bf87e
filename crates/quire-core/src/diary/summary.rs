//! Note summaries

use super::backend::ChatBackend;
use super::types::Note;
use crate::client::{GatewayClient, ResponseFormat};
use crate::error::{GatewayError, GatewayResult};
use crate::streaming::ChatStream;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

/// Build the summary prompt for `notes`.
pub fn summary_prompt(notes: &[Note]) -> String {
    let blocks = notes
        .iter()
        .map(|note| format!("Title: {}\nContent: {}", note.title, note.content))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Please provide a concise summary of these notes in a clear and organized manner:\n\n\
         {}\n\n\
         Please format the summary with clear sections and bullet points where appropriate.",
        blocks
    )
}

fn ensure_notes(notes: &[Note]) -> GatewayResult<()> {
    if notes.is_empty() {
        return Err(GatewayError::invalid_input("No notes to summarize"));
    }
    Ok(())
}

/// Summarize `notes` with a plain completion and return the summary text.
#[instrument(skip_all, fields(notes = notes.len()))]
pub async fn summarize_notes<B>(backend: &B, notes: &[Note]) -> GatewayResult<String>
where
    B: ChatBackend + ?Sized,
{
    ensure_notes(notes)?;

    let completion = backend
        .complete(&summary_prompt(notes), ResponseFormat::Text)
        .await?;

    completion
        .content()
        .map(str::to_string)
        .ok_or_else(|| GatewayError::upstream(502, "Completion has no message content"))
}

/// Summarize `notes` as a stream of text fragments.
pub async fn summarize_notes_stream(
    client: &GatewayClient,
    notes: &[Note],
    cancel: CancellationToken,
) -> GatewayResult<ChatStream> {
    ensure_notes(notes)?;
    client
        .chat_completion_stream(&summary_prompt(notes), cancel)
        .await
}
