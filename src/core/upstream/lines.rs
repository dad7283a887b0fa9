//! Line reassembly for event-stream bodies

use crate::utils::error::{GatewayError, Result};

/// Prefix of the only event-stream lines that carry payloads
pub const DATA_PREFIX: &str = "data: ";

/// End-of-stream sentinel sent by streaming backends
pub const DONE_SENTINEL: &str = "[DONE]";

/// Default bound on a single unterminated line
pub const MAX_LINE_BYTES: usize = 16 * 1024 * 1024;

/// Reassembles newline-terminated lines from arbitrarily split byte chunks.
///
/// Bytes after the last newline of a chunk stay buffered and are prefixed onto the next
/// chunk, so a line (or a multi-byte character) straddling a read boundary comes out whole.
/// The unterminated remainder is bounded; a backend that never sends a newline is an error.
#[derive(Debug)]
pub struct LineBuffer {
    pending: Vec<u8>,
    max_line_bytes: usize,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::with_limit(MAX_LINE_BYTES)
    }
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(max_line_bytes: usize) -> Self {
        Self {
            pending: Vec::new(),
            max_line_bytes,
        }
    }

    /// Feed one chunk and return every line it completes, without terminators
    pub fn push(&mut self, chunk: &[u8]) -> Result<Vec<String>> {
        self.pending.extend_from_slice(chunk);

        let Some(last_newline) = self.pending.iter().rposition(|b| *b == b'\n') else {
            self.check_limit()?;
            return Ok(Vec::new());
        };

        let rest = self.pending.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.pending, rest);
        self.check_limit()?;

        Ok(complete[..last_newline]
            .split(|b| *b == b'\n')
            .map(decode_line)
            .collect())
    }

    fn check_limit(&mut self) -> Result<()> {
        if self.pending.len() <= self.max_line_bytes {
            return Ok(());
        }
        self.pending.clear();
        Err(GatewayError::upstream(format!(
            "event-stream line exceeds {} bytes",
            self.max_line_bytes
        )))
    }

    /// Flush a trailing line that never got its terminator
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let line = std::mem::take(&mut self.pending);
        Some(decode_line(&line))
    }

    /// Number of buffered bytes not yet forming a complete line
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

fn decode_line(line: &[u8]) -> String {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}

/// Meaning of one event-stream line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SseLine<'a> {
    /// A `data: ` line with a non-empty payload
    Data(&'a str),
    /// The `[DONE]` sentinel
    Done,
    /// Anything else (comments, `event:` lines, blank separators, empty data)
    Ignored,
}

/// Classify a line: only `data: ` lines count, payload is trimmed
pub fn classify_line(line: &str) -> SseLine<'_> {
    match line.strip_prefix(DATA_PREFIX).map(str::trim) {
        Some(DONE_SENTINEL) => SseLine::Done,
        Some("") | None => SseLine::Ignored,
        Some(payload) => SseLine::Data(payload),
    }
}
