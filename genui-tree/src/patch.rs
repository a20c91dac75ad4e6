//! Streamed patch protocol.
//!
//! The backend emits one JSON record per line:
//!
//! ```text
//! {"op":"set","path":"/root","value":"card"}
//! {"op":"add","path":"/elements/card","value":{"key":"card","type":"Card","props":{},"children":["title"]}}
//! ```
//!
//! Lines that do not parse or that describe an unsupported operation are
//! dropped; the stream keeps going. A transmission cut mid-line leaves a
//! truncated last record, which is dropped the same way.

use serde::Deserialize;
use serde_json::Value;

use crate::tree::{UiElement, UiTree};

const ROOT_PATH: &str = "/root";
const ELEMENTS_PREFIX: &str = "/elements/";

/// A classified operation record
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// `set /root`
    SetRoot(String),
    /// `add /elements/<key>`: full replacement of one element
    PutElement { key: String, element: UiElement },
}

#[derive(Deserialize)]
struct RawRecord {
    op: String,
    path: String,
    #[serde(default)]
    value: Value,
}

/// Outcome counters for a batch of lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyStats {
    pub applied: usize,
    pub skipped: usize,
}

impl ApplyStats {
    fn record(&mut self, applied: bool) {
        if applied {
            self.applied += 1;
        } else {
            self.skipped += 1;
        }
    }

    fn merge(&mut self, other: ApplyStats) {
        self.applied += other.applied;
        self.skipped += other.skipped;
    }
}

/// Parse one line into an operation. `None` for anything unusable.
pub fn parse_operation(line: &str) -> Option<Operation> {
    let record: RawRecord = match serde_json::from_str(line.trim()) {
        Ok(r) => r,
        Err(e) => {
            tracing::debug!("Discarding unparsable patch line: {}", e);
            return None;
        }
    };

    match (record.op.as_str(), record.path.as_str()) {
        ("set", ROOT_PATH) => match record.value {
            Value::String(key) => Some(Operation::SetRoot(key)),
            other => {
                tracing::debug!("Discarding set /root with non-string value {}", other);
                None
            }
        },
        ("add", path) if path.starts_with(ELEMENTS_PREFIX) => {
            let key = unescape_pointer_segment(&path[ELEMENTS_PREFIX.len()..])?;
            match serde_json::from_value::<UiElement>(record.value) {
                Ok(mut element) => {
                    element.key = key.clone();
                    Some(Operation::PutElement { key, element })
                }
                Err(e) => {
                    tracing::debug!("Discarding malformed element '{}': {}", key, e);
                    None
                }
            }
        }
        (op, path) => {
            tracing::debug!("Discarding unsupported operation {} {}", op, path);
            None
        }
    }
}

/// JSON Pointer segment decoding; nested paths and empty keys are not element keys
fn unescape_pointer_segment(segment: &str) -> Option<String> {
    if segment.is_empty() || segment.contains('/') {
        tracing::debug!("Discarding element path segment '{}'", segment);
        return None;
    }
    Some(segment.replace("~1", "/").replace("~0", "~"))
}

pub fn apply_operation(tree: &mut UiTree, operation: Operation) {
    match operation {
        Operation::SetRoot(key) => tree.root = Some(key),
        Operation::PutElement { key, element } => {
            tree.elements.insert(key, element);
        }
    }
    tree.version += 1;
}

/// Apply a single line. Returns true when it produced an operation.
pub fn apply_line(tree: &mut UiTree, line: &str) -> bool {
    match parse_operation(line) {
        Some(op) => {
            apply_operation(tree, op);
            true
        }
        None => false,
    }
}

/// Apply lines in order. Blank lines are ignored and not counted.
pub fn apply_lines<'a, I>(tree: &mut UiTree, lines: I) -> ApplyStats
where
    I: IntoIterator<Item = &'a str>,
{
    let mut stats = ApplyStats::default();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        stats.record(apply_line(tree, line));
    }
    stats
}

/// Apply a whole JSONL payload
pub fn apply_text(tree: &mut UiTree, text: &str) -> ApplyStats {
    apply_lines(tree, text.lines())
}

/// Feeds transport chunks with arbitrary boundaries into a tree.
///
/// Complete lines are applied as soon as their newline arrives; the trailing
/// partial line is held until the next chunk or [`StreamPatcher::finish`].
#[derive(Debug, Default)]
pub struct StreamPatcher {
    pending: String,
    stats: ApplyStats,
}

impl StreamPatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and apply every line it completes
    pub fn push_chunk(&mut self, tree: &mut UiTree, chunk: &str) -> ApplyStats {
        self.pending.push_str(chunk);
        let Some(last_newline) = self.pending.rfind('\n') else {
            return ApplyStats::default();
        };

        let rest = self.pending.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.pending, rest);
        let stats = apply_text(tree, &complete);
        self.stats.merge(stats);
        stats
    }

    /// Apply whatever is left in the buffer (possibly a truncated record)
    pub fn finish(&mut self, tree: &mut UiTree) -> ApplyStats {
        let tail = std::mem::take(&mut self.pending);
        let stats = apply_text(tree, &tail);
        self.stats.merge(stats);
        stats
    }

    /// Drop the pending fragment without touching the tree
    pub fn reset(&mut self) {
        self.pending.clear();
    }

    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Totals since construction
    pub fn stats(&self) -> ApplyStats {
        self.stats
    }
}
