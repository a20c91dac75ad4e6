//! Streaming UTF-8 decoding for transport chunks.
//!
//! A byte chunk may end in the middle of a multi-byte character. The
//! incomplete tail is held back and completed by the next chunk; invalid
//! sequences become U+FFFD.

use std::str;

#[derive(Debug, Default)]
pub struct Utf8StreamDecoder {
    pending: Vec<u8>,
}

impl Utf8StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode everything `bytes` completes; keep an unfinished character for later
    pub fn push(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);
        let mut out = String::with_capacity(self.pending.len());
        let mut rest: &[u8] = &self.pending;

        loop {
            match str::from_utf8(rest) {
                Ok(text) => {
                    out.push_str(text);
                    rest = &[];
                    break;
                }
                Err(e) => {
                    let (valid, after) = rest.split_at(e.valid_up_to());
                    out.push_str(str::from_utf8(valid).unwrap_or_default());
                    match e.error_len() {
                        Some(bad) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[bad..];
                        }
                        // Sequence cut short by the chunk boundary
                        None => {
                            rest = after;
                            break;
                        }
                    }
                }
            }
        }

        let tail = rest.to_vec();
        self.pending = tail;
        out
    }

    /// Flush a trailing incomplete sequence as U+FFFD
    pub fn finish(&mut self) -> String {
        let tail = std::mem::take(&mut self.pending);
        String::from_utf8_lossy(&tail).into_owned()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

/// A chunk type the painter can turn into text
pub trait TextChunk {
    fn decode(self, decoder: &mut Utf8StreamDecoder) -> String;
}

impl TextChunk for String {
    fn decode(self, _decoder: &mut Utf8StreamDecoder) -> String {
        self
    }
}

impl TextChunk for &str {
    fn decode(self, _decoder: &mut Utf8StreamDecoder) -> String {
        self.to_string()
    }
}

impl TextChunk for Vec<u8> {
    fn decode(self, decoder: &mut Utf8StreamDecoder) -> String {
        decoder.push(&self)
    }
}

impl TextChunk for &[u8] {
    fn decode(self, decoder: &mut Utf8StreamDecoder) -> String {
        decoder.push(self)
    }
}
