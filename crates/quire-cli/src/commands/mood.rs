//! `quire mood`

use super::{CommandContext, read_json_records};
use colored::*;
use quire_core::diary::{self, DiaryEntry, Mood};
use std::path::Path;

fn colored_mood(mood: Mood) -> ColoredString {
    match mood {
        Mood::Positive => mood.label().green(),
        Mood::Neutral => mood.label().normal(),
        Mood::Negative => mood.label().red(),
        Mood::Unknown => "Unknown".dimmed(),
    }
}

pub async fn run(ctx: &CommandContext, entries_path: &Path) -> anyhow::Result<()> {
    let entries: Vec<DiaryEntry> = read_json_records(entries_path)?;
    ctx.console
        .info(&format!("Analyzing {} diary entries", entries.len()));

    let analysis = ctx
        .cancellable(diary::analyze_mood(&ctx.client, &entries))
        .await?;

    ctx.console.print_header("AI Mood Analysis");
    ctx.console
        .field("Overall mood", &colored_mood(analysis.mood).to_string());
    ctx.console.field(
        "Confidence",
        &format!("{}%", analysis.confidence_percent()),
    );
    let emotions = if analysis.emotions.is_empty() {
        "No emotions detected".to_string()
    } else {
        analysis.emotions.join(", ")
    };
    ctx.console.field("Key emotions", &emotions);

    let series = diary::mood_series(&entries);
    if entries.iter().any(|entry| entry.analysis.is_some()) {
        ctx.console.print_header("Mood Score Over Time");
        for point in series {
            ctx.console.field(
                &point.date.format("%m/%d/%Y").to_string(),
                &format!("{:+}", point.score),
            );
        }
    }
    Ok(())
}
