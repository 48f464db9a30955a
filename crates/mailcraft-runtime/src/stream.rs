#![forbid(unsafe_code)]

//! Simulated streaming of generated text.
//!
//! Generated copy is revealed a few words at a time so the editor can
//! render it progressively. [`stream_text`] emits chunks to a sink, pauses
//! between them, and checks a [`CancellationToken`] before every chunk and
//! during every pause.
//!
//! The outcome distinguishes three endings:
//!
//! - [`StreamOutcome::Completed`] carries the full text.
//! - [`StreamOutcome::Cancelled`] carries whatever was emitted before the
//!   token fired.
//! - [`StreamOutcome::Failed`] carries the partial text and the sink error.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::cancellation::CancellationToken;

/// Pacing of a simulated stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Words per emitted chunk (values below 1 are treated as 1).
    pub chunk_words: usize,
    /// Pause between chunks, in milliseconds.
    pub delay_ms: u64,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            chunk_words: 3,
            delay_ms: 30,
        }
    }
}

impl StreamConfig {
    /// No pause between chunks.
    #[must_use]
    pub fn immediate(chunk_words: usize) -> Self {
        Self {
            chunk_words,
            delay_ms: 0,
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// How a stream ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamOutcome<E> {
    Completed(String),
    Cancelled { partial: String },
    Failed { partial: String, error: E },
}

impl<E> StreamOutcome<E> {
    /// Text emitted so far, whatever the ending.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Completed(text) => text,
            Self::Cancelled { partial } | Self::Failed { partial, .. } => partial,
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// Split `text` into slices of `words_per_chunk` words.
///
/// Whitespace stays attached to the preceding word, so concatenating the
/// chunks reproduces `text` exactly.
#[must_use]
pub fn chunk_words(text: &str, words_per_chunk: usize) -> Vec<&str> {
    let per_chunk = words_per_chunk.max(1);
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut words = 0;
    let mut in_word = false;
    for (idx, ch) in text.char_indices() {
        let is_word = !ch.is_whitespace();
        if is_word && !in_word {
            if words == per_chunk {
                chunks.push(&text[start..idx]);
                start = idx;
                words = 0;
            }
            words += 1;
        }
        in_word = is_word;
    }
    if start < text.len() {
        chunks.push(&text[start..]);
    }
    chunks
}

/// Stream `text` into `sink` chunk by chunk.
pub fn stream_text<E, S>(
    text: &str,
    config: &StreamConfig,
    token: &CancellationToken,
    mut sink: S,
) -> StreamOutcome<E>
where
    S: FnMut(&str) -> Result<(), E>,
{
    let started = Instant::now();
    let chunks = chunk_words(text, config.chunk_words);
    let total = chunks.len();
    let mut emitted = String::with_capacity(text.len());

    for (i, chunk) in chunks.into_iter().enumerate() {
        let paused_and_cancelled =
            i > 0 && config.delay_ms > 0 && token.wait_timeout(config.delay());
        if paused_and_cancelled || token.is_cancelled() {
            tracing::debug!(
                target: "mailcraft.stream",
                emitted_chunks = i,
                total_chunks = total,
                "stream cancelled"
            );
            return StreamOutcome::Cancelled { partial: emitted };
        }
        if let Err(error) = sink(chunk) {
            tracing::warn!(
                target: "mailcraft.stream",
                emitted_chunks = i,
                "stream sink failed"
            );
            return StreamOutcome::Failed {
                partial: emitted,
                error,
            };
        }
        emitted.push_str(chunk);
    }

    tracing::debug!(
        target: "mailcraft.stream",
        total_chunks = total,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "stream completed"
    );
    StreamOutcome::Completed(emitted)
}
