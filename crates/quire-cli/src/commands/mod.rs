//! CLI command implementations

pub mod chat;
pub mod config;
pub mod image;
pub mod mood;
pub mod speak;
pub mod summarize;

use crate::console::CliConsole;
use anyhow::Context;
use futures::StreamExt;
use quire_core::error::{GatewayError, GatewayResult};
use quire_core::{ChatStream, GatewayClient};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::path::Path;
use tokio_util::sync::CancellationToken;

/// Everything a gateway command needs
pub struct CommandContext {
    pub client: GatewayClient,
    pub token: CancellationToken,
    pub console: CliConsole,
}

impl CommandContext {
    /// Run `call`, giving up with `Cancelled` as soon as the token fires
    pub async fn cancellable<T, F>(&self, call: F) -> GatewayResult<T>
    where
        F: Future<Output = GatewayResult<T>>,
    {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(GatewayError::cancelled()),
            result = call => result,
        }
    }

    /// Print fragments as they arrive, then a final newline
    pub async fn print_stream(&self, mut stream: ChatStream) -> anyhow::Result<()> {
        while let Some(fragment) = stream.next().await {
            self.console.fragment(&fragment?)?;
        }
        println!();
        Ok(())
    }
}

/// Read a JSON array of records from `path`
pub fn read_json_records<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse '{}' as a JSON array", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_core::diary::{DiaryEntry, Note};
    use tempfile::TempDir;

    #[test]
    fn test_read_entries_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("entries.json");
        std::fs::write(
            &path,
            r#"[{"_id": "1", "title": "Mon", "content": "Good day", "date": "2024-05-06"}]"#,
        )
        .unwrap();

        let entries: Vec<DiaryEntry> = read_json_records(&path).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].content, "Good day");
    }

    #[test]
    fn test_read_records_errors_name_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.json");
        let err = read_json_records::<Note>(&missing).unwrap_err();
        assert!(err.to_string().contains("missing.json"));

        let bad = temp_dir.path().join("notes.json");
        std::fs::write(&bad, r#"{"title": "not an array"}"#).unwrap();
        let err = read_json_records::<Note>(&bad).unwrap_err();
        assert!(err.to_string().contains("JSON array"));
    }
}
