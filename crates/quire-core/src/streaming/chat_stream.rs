//! Pull-based stream of completion text fragments

use super::decoder::{SseLineDecoder, SseRecord, parse_line};
use crate::client::error_utils::{error_from_response, transport_error};
use crate::error::{GatewayError, GatewayResult};
use bytes::Bytes;
use futures::{Stream, StreamExt, stream};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Fallback message for streaming failures without a provider message
pub const STREAM_FALLBACK: &str = "Failed to get streaming response";

/// Transport block stream feeding a [`ChatStream`]
pub type ByteStream = Pin<Box<dyn Stream<Item = GatewayResult<Bytes>> + Send>>;

/// Lifecycle of a streamed completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// Built, not yet polled
    Idle,
    /// Request sent, waiting for response headers
    Connecting,
    /// Reading blocks and yielding fragments
    Streaming,
    /// `[DONE]` received or the transport ended cleanly
    Completed,
    /// The cancellation token fired
    Cancelled,
    /// Upstream or transport failure
    Failed,
}

impl StreamState {
    /// Whether no further reads will happen
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Failed)
    }
}

/// A finite, single-pass stream of completion text fragments.
///
/// Yields `Ok(fragment)` in arrival order. A failure or cancellation is
/// yielded once as `Err`, after which the stream ends. Once it has ended it
/// keeps returning `None`; issue a new request to retry.
///
/// # Examples
///
/// ```no_run
/// use futures::StreamExt;
/// use quire_core::client::GatewayClient;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example(client: GatewayClient) -> quire_core::error::GatewayResult<()> {
/// let token = CancellationToken::new();
/// let mut stream = client.chat_completion_stream("Tell me a story", token.clone()).await?;
/// while let Some(fragment) = stream.next().await {
///     print!("{}", fragment?);
/// }
/// # Ok(())
/// # }
/// ```
pub struct ChatStream {
    state: StreamState,
    bytes: ByteStream,
    decoder: SseLineDecoder,
    /// Fragments decoded but not yet yielded
    pending: VecDeque<String>,
    /// Failure to yield once `pending` is drained
    failure: Option<GatewayError>,
    cancelled: Pin<Box<dyn Future<Output = ()> + Send>>,
}

impl std::fmt::Debug for ChatStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatStream")
            .field("state", &self.state)
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

impl ChatStream {
    /// Send `request` and start streaming its response body.
    ///
    /// The token is watched while connecting and on every read afterwards.
    pub(crate) async fn open(
        request: reqwest::RequestBuilder,
        cancel: CancellationToken,
    ) -> GatewayResult<Self> {
        debug!(state = ?StreamState::Connecting, "Opening completion stream");

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(state = ?StreamState::Cancelled, "Cancelled while connecting");
                return Err(GatewayError::cancelled());
            }
            result = request.send() => result.map_err(|e| transport_error(&e, STREAM_FALLBACK))?,
        };

        if !response.status().is_success() {
            debug!(state = ?StreamState::Failed, status = %response.status(), "Stream rejected");
            return tokio::select! {
                biased;
                _ = cancel.cancelled() => Err(GatewayError::cancelled()),
                err = error_from_response(response, STREAM_FALLBACK) => Err(err),
            };
        }

        let bytes = response
            .bytes_stream()
            .map(|block| block.map_err(|e| transport_error(&e, STREAM_FALLBACK)));
        Ok(Self::from_byte_stream(bytes, cancel))
    }

    /// Build a stream over an already open transport
    pub fn from_byte_stream<S>(bytes: S, cancel: CancellationToken) -> Self
    where
        S: Stream<Item = GatewayResult<Bytes>> + Send + 'static,
    {
        Self {
            state: StreamState::Idle,
            bytes: Box::pin(bytes),
            decoder: SseLineDecoder::new(),
            pending: VecDeque::new(),
            failure: None,
            cancelled: Box::pin(async move { cancel.cancelled().await }),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Drain the stream and concatenate every fragment
    pub async fn collect_text(mut self) -> GatewayResult<String> {
        let mut text = String::new();
        while let Some(fragment) = self.next().await {
            text.push_str(&fragment?);
        }
        Ok(text)
    }

    fn transition(&mut self, next: StreamState) {
        if self.state == next {
            return;
        }
        debug!(from = ?self.state, to = ?next, "Stream state change");
        self.state = next;
        if next.is_terminal() {
            // Release the connection
            self.bytes = Box::pin(stream::empty());
        }
    }

    /// Classify decoded lines, queueing fragments until `[DONE]` or a failure
    fn process_lines(&mut self, lines: Vec<String>) {
        for line in lines {
            match parse_line(&line) {
                Ok(SseRecord::Delta(content)) => self.pending.push_back(content),
                Ok(SseRecord::Skip) => {}
                Ok(SseRecord::Done) => {
                    self.transition(StreamState::Completed);
                    return;
                }
                Err(err) => {
                    self.failure = Some(err);
                    return;
                }
            }
        }
    }
}

impl Stream for ChatStream {
    type Item = GatewayResult<String>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;

        loop {
            if matches!(this.state, StreamState::Cancelled | StreamState::Failed) {
                return Poll::Ready(None);
            }

            // Queued fragments stay cancellable after `[DONE]`
            let drained = this.state == StreamState::Completed && this.pending.is_empty();
            if !drained && this.cancelled.as_mut().poll(cx).is_ready() {
                this.pending.clear();
                this.failure = None;
                this.transition(StreamState::Cancelled);
                return Poll::Ready(Some(Err(GatewayError::cancelled())));
            }

            if let Some(fragment) = this.pending.pop_front() {
                return Poll::Ready(Some(Ok(fragment)));
            }

            if let Some(err) = this.failure.take() {
                this.transition(StreamState::Failed);
                return Poll::Ready(Some(Err(err)));
            }

            if this.state == StreamState::Completed {
                return Poll::Ready(None);
            }

            if this.state == StreamState::Idle {
                this.transition(StreamState::Streaming);
            }

            match this.bytes.as_mut().poll_next(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Some(Ok(block))) => {
                    let lines = this.decoder.feed(&block);
                    this.process_lines(lines);
                }
                Poll::Ready(Some(Err(err))) => {
                    this.failure = Some(err);
                }
                Poll::Ready(None) => {
                    if let Some(line) = this.decoder.finish() {
                        this.process_lines(vec![line]);
                    }
                    if this.failure.is_none() {
                        this.transition(StreamState::Completed);
                    }
                }
            }
        }
    }
}
