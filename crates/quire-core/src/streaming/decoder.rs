//! Line-oriented decoder for chunked `data:` streams
//!
//! Completion streams arrive as `data: {json}\n` lines, terminated by
//! `data: [DONE]\n`. Transport blocks can cut a line, or a multi-byte UTF-8
//! character, anywhere; the decoder buffers both until they are complete.

use crate::error::{GatewayError, GatewayResult};
use serde_json::Value;

/// Prefix marking a data record
pub const DATA_PREFIX: &str = "data: ";

/// Payload marking normal end of stream
pub const DONE_MARKER: &str = "[DONE]";

/// One decoded stream line, classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseRecord {
    /// A non-empty text fragment from `choices[0].delta.content`
    Delta(String),
    /// The `[DONE]` marker
    Done,
    /// Keep-alive, comment, or a record without content
    Skip,
}

/// Classify one complete line.
///
/// Fails only when a `data: ` record is not valid JSON.
pub fn parse_line(line: &str) -> GatewayResult<SseRecord> {
    let Some(data) = line.strip_prefix(DATA_PREFIX) else {
        return Ok(SseRecord::Skip);
    };

    if data.trim() == DONE_MARKER {
        return Ok(SseRecord::Done);
    }

    let json: Value = serde_json::from_str(data).map_err(|e| {
        GatewayError::upstream_default(format!("Malformed stream record: {}", e))
    })?;

    match json["choices"][0]["delta"]["content"].as_str() {
        Some(content) if !content.is_empty() => Ok(SseRecord::Delta(content.to_string())),
        _ => Ok(SseRecord::Skip),
    }
}

/// Buffered line splitter that handles partial chunks
#[derive(Debug, Default)]
pub struct SseLineDecoder {
    /// Text of the current incomplete line
    buffer: String,
    /// Incomplete UTF-8 byte sequence at the end of the last block
    incomplete_utf8: Vec<u8>,
}

impl SseLineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one transport block and return every line it completes.
    ///
    /// Lines are returned without their `\n` or `\r\n` terminator.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        let bytes_to_decode = if self.incomplete_utf8.is_empty() {
            chunk.to_vec()
        } else {
            let mut combined = std::mem::take(&mut self.incomplete_utf8);
            combined.extend_from_slice(chunk);
            combined
        };

        let (valid_str, remaining_bytes) = Self::decode_utf8_with_remainder(&bytes_to_decode);
        self.incomplete_utf8 = remaining_bytes;
        self.buffer.push_str(&valid_str);

        let mut lines = Vec::new();
        while let Some(end) = self.buffer.find('\n') {
            let mut line: String = self.buffer.drain(..=end).collect();
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
            lines.push(line);
        }
        lines
    }

    /// Take whatever is left once the transport has ended.
    ///
    /// A truncated UTF-8 sequence is decoded lossily.
    pub fn finish(&mut self) -> Option<String> {
        if !self.incomplete_utf8.is_empty() {
            let tail = std::mem::take(&mut self.incomplete_utf8);
            self.buffer.push_str(&String::from_utf8_lossy(&tail));
        }
        if self.buffer.is_empty() {
            return None;
        }
        let mut line = std::mem::take(&mut self.buffer);
        if line.ends_with('\r') {
            line.pop();
        }
        Some(line)
    }

    /// Check if there's buffered data not yet returned as a line
    pub fn has_remaining(&self) -> bool {
        !self.buffer.is_empty() || !self.incomplete_utf8.is_empty()
    }

    /// Decode bytes as UTF-8, returning the valid string and any trailing
    /// incomplete sequence
    fn decode_utf8_with_remainder(bytes: &[u8]) -> (String, Vec<u8>) {
        if let Ok(s) = std::str::from_utf8(bytes) {
            return (s.to_string(), Vec::new());
        }

        // Find the start of a trailing sequence that is cut short
        let mut valid_end = bytes.len();
        for i in 1..=4.min(bytes.len()) {
            let pos = bytes.len() - i;
            let byte = bytes[pos];
            if !Self::is_continuation_byte(byte) {
                if bytes.len() - pos < Self::utf8_char_len(byte) {
                    valid_end = pos;
                }
                break;
            }
        }

        let remaining = bytes[valid_end..].to_vec();
        match std::str::from_utf8(&bytes[..valid_end]) {
            Ok(s) => (s.to_string(), remaining),
            Err(_) => {
                // Invalid bytes in the middle: replace them rather than stall
                tracing::warn!("Invalid UTF-8 in stream block, replacing undecodable bytes");
                (
                    String::from_utf8_lossy(&bytes[..valid_end]).into_owned(),
                    remaining,
                )
            }
        }
    }

    #[inline]
    fn is_continuation_byte(byte: u8) -> bool {
        (byte & 0b1100_0000) == 0b1000_0000
    }

    #[inline]
    fn utf8_char_len(first_byte: u8) -> usize {
        if first_byte & 0b1000_0000 == 0 {
            1
        } else if first_byte & 0b1110_0000 == 0b1100_0000 {
            2
        } else if first_byte & 0b1111_0000 == 0b1110_0000 {
            3
        } else if first_byte & 0b1111_1000 == 0b1111_0000 {
            4
        } else {
            1
        }
    }
}
