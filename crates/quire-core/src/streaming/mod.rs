//! Streaming completion support
//!
//! [`ChatStream`] turns a chunked `data:` response body into text fragments,
//! honoring a [`tokio_util::sync::CancellationToken`] between reads.

mod chat_stream;
mod decoder;

pub use chat_stream::{ByteStream, ChatStream, STREAM_FALLBACK, StreamState};
pub use decoder::{DATA_PREFIX, DONE_MARKER, SseLineDecoder, SseRecord, parse_line};
