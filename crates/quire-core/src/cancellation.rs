//! Cancellation helpers
//!
//! Requests never time out on their own. A caller that wants a deadline
//! derives a token that fires after it and passes that token in.

use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Derive a child of `parent` that is cancelled after `after`.
///
/// Cancelling `parent` still cancels the child immediately. The timer task
/// exits early if the child is cancelled first.
///
/// Must be called from within a tokio runtime.
pub fn deadline_token(parent: &CancellationToken, after: Duration) -> CancellationToken {
    let child = parent.child_token();
    let timer_token = child.clone();

    tokio::spawn(async move {
        tokio::select! {
            _ = timer_token.cancelled() => {}
            _ = tokio::time::sleep(after) => {
                debug!("Deadline of {}ms reached, cancelling request", after.as_millis());
                timer_token.cancel();
            }
        }
    });

    child
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_deadline_fires() {
        let parent = CancellationToken::new();
        let token = deadline_token(&parent, Duration::from_millis(500));

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert!(!token.is_cancelled());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(token.is_cancelled());
        assert!(!parent.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_parent_cancels_child() {
        let parent = CancellationToken::new();
        let token = deadline_token(&parent, Duration::from_secs(60));

        parent.cancel();
        assert!(token.is_cancelled());
    }
}
