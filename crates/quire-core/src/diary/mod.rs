//! Diary features built on chat completion
//!
//! Mood analysis of diary entries (JSON mode), the mood chart series, and
//! note summaries. Everything runs against a [`ChatBackend`], which
//! [`GatewayClient`](crate::client::GatewayClient) implements.

mod backend;
mod mood;
mod summary;
mod types;


pub use backend::ChatBackend;
pub use mood::{analyze_mood, mood_prompt, mood_series};
pub use summary::{summarize_notes, summarize_notes_stream, summary_prompt};
pub use types::{DiaryEntry, Mood, MoodAnalysis, MoodPoint, Note};
