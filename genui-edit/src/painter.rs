//! Async driver that feeds a chunk stream through an [`HtmlPatcher`].

use std::fmt::Display;
use std::time::Duration;

use tokio::time::{sleep_until, Instant};
use tokio_stream::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;

use crate::decode::{TextChunk, Utf8StreamDecoder};
use crate::error::{EditError, EditResult};
use crate::html_patcher::{HtmlPatcher, PaintSurface};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamOutcome {
    /// Stream ended; holds the complete text that was painted last
    Completed(String),
    Cancelled,
}

/// Paint `chunks` onto `surface`, at most once per `frame`.
///
/// The first chunk after a repaint arms a single deadline one frame ahead;
/// later chunks only grow the buffer until it fires. On stream end the full
/// text is painted verbatim. Cancellation drops the pending repaint and the
/// buffers without a final paint.
///
/// Chunks may be text or raw bytes; a character split across byte chunks is
/// held back until it is complete.
pub async fn stream_to_surface<St, C, E, S>(
    mut chunks: St,
    surface: &mut S,
    frame: Duration,
    cancel: &CancellationToken,
) -> EditResult<StreamOutcome>
where
    St: Stream<Item = Result<C, E>> + Unpin,
    C: TextChunk,
    E: Display,
    S: PaintSurface + ?Sized,
{
    let mut patcher = HtmlPatcher::new();
    let mut decoder = Utf8StreamDecoder::new();
    let mut deadline: Option<Instant> = None;

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                patcher.cancel();
                tracing::debug!("HTML stream cancelled");
                return Ok(StreamOutcome::Cancelled);
            }
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                deadline = None;
                patcher.flush_frame(surface);
            }
            next = chunks.next() => match next {
                Some(Ok(chunk)) => {
                    let text = chunk.decode(&mut decoder);
                    if !text.is_empty() && patcher.push_chunk(&text) {
                        deadline = Some(Instant::now() + frame);
                    }
                }
                Some(Err(e)) => {
                    patcher.cancel();
                    return Err(EditError::Stream(e.to_string()));
                }
                None => {
                    let tail = decoder.finish();
                    if !tail.is_empty() {
                        patcher.push_chunk(&tail);
                    }
                    let text = patcher.finish(surface);
                    return Ok(StreamOutcome::Completed(text));
                }
            }
        }
    }
}
