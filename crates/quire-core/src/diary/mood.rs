//! Mood analysis over diary entries

use super::backend::ChatBackend;
use super::types::{DiaryEntry, MoodAnalysis, MoodPoint};
use crate::client::ResponseFormat;
use crate::error::{GatewayError, GatewayResult};
use tracing::{debug, instrument};

/// Build the analysis prompt for `entries`, kept in the order given.
pub fn mood_prompt(entries: &[DiaryEntry]) -> String {
    let blocks = entries
        .iter()
        .map(|entry| {
            format!(
                "Date: {}\nContent: {}",
                entry.date.format("%m/%d/%Y"),
                entry.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        r#"Please analyze the mood and sentiment of these diary entries and return a JSON object with the following structure:
{{
  "mood": "positive|negative|neutral",
  "confidence": number between 0 and 1,
  "emotions": ["emotion1", "emotion2", "emotion3"]
}}

Here are the entries in chronological order:

{}

Please provide your analysis in JSON format."#,
        blocks
    )
}

/// Ask the backend for a JSON-mode mood analysis of `entries`.
///
/// # Errors
///
/// - `InvalidInput` if `entries` is empty, or the prompt is too long
/// - `Upstream` 502 if the answer is not the expected JSON object
/// - any error from the backend call
#[instrument(skip_all, fields(entries = entries.len()))]
pub async fn analyze_mood<B>(backend: &B, entries: &[DiaryEntry]) -> GatewayResult<MoodAnalysis>
where
    B: ChatBackend + ?Sized,
{
    if entries.is_empty() {
        return Err(GatewayError::invalid_input("No entries to analyze"));
    }

    let completion = backend
        .complete(&mood_prompt(entries), ResponseFormat::JsonObject)
        .await?;
    let analysis: MoodAnalysis = completion.parse_json_content()?;

    debug!(
        mood = %analysis.mood,
        confidence = analysis.confidence,
        "Mood analysis parsed"
    );
    Ok(analysis)
}

/// Per-entry chart scores from each entry's stored analysis
pub fn mood_series(entries: &[DiaryEntry]) -> Vec<MoodPoint> {
    entries
        .iter()
        .map(|entry| MoodPoint {
            date: entry.date,
            score: entry.mood().score(),
        })
        .collect()
}
