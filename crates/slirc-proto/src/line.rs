//! Line framing codec for tokio.
//!
//! Splits an inbound byte stream into CRLF (or bare LF) terminated lines and
//! writes encoded lines back. Oversized and non-UTF-8 lines are dropped with
//! a warning so that one bad line never tears the connection down.

use bytes::{Buf, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::warn;

use crate::error::{ProtocolError, Result};

/// Longest inbound line accepted, terminator included (tags plus body).
pub const MAX_LINE_LEN: usize = 8191;

/// Newline-delimited framing for IRC lines.
#[derive(Debug)]
pub struct LineCodec {
    /// Index of next byte to check for newline.
    next_index: usize,
    max_len: usize,
    /// Set while skipping the rest of an oversized line.
    discarding: bool,
}

impl LineCodec {
    /// Create a codec with the default line limit.
    pub fn new() -> Self {
        Self::with_max_len(MAX_LINE_LEN)
    }

    /// Create a codec with a custom line limit.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
            discarding: false,
        }
    }

    /// Prepare an outbound line for the wire.
    ///
    /// Cuts everything after the first line ending, appends CRLF when
    /// missing and rejects NUL.
    pub fn sanitize(mut data: String) -> Result<String> {
        if let Some(pos) = data.find(&['\r', '\n'][..]) {
            data.truncate(pos);
        }
        if let Some(ch) = data.chars().find(|&c| c == '\0') {
            return Err(ProtocolError::IllegalControlChar(ch));
        }
        data.push_str("\r\n");
        Ok(data)
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<String>> {
        loop {
            let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') else {
                if self.discarding {
                    src.clear();
                    self.next_index = 0;
                } else if src.len() > self.max_len {
                    warn!(len = src.len(), limit = self.max_len, "dropping oversized line");
                    src.clear();
                    self.next_index = 0;
                    self.discarding = true;
                } else {
                    self.next_index = src.len();
                }
                return Ok(None);
            };

            let end = self.next_index + offset + 1;
            self.next_index = 0;

            if self.discarding {
                src.advance(end);
                self.discarding = false;
                continue;
            }
            if end > self.max_len {
                warn!(len = end, limit = self.max_len, "dropping oversized line");
                src.advance(end);
                continue;
            }

            let line = src.split_to(end);
            match std::str::from_utf8(&line) {
                Ok(s) => {
                    let s = s.trim_end_matches(&['\r', '\n'][..]);
                    if s.is_empty() {
                        continue;
                    }
                    return Ok(Some(s.to_owned()));
                }
                Err(e) => {
                    warn!(
                        valid_up_to = e.valid_up_to(),
                        line = %String::from_utf8_lossy(&line).trim_end(),
                        "dropping non-UTF-8 line"
                    );
                }
            }
        }
    }
}

impl Encoder<String> for LineCodec {
    type Error = ProtocolError;

    fn encode(&mut self, line: String, dst: &mut BytesMut) -> Result<()> {
        let line = Self::sanitize(line)?;
        dst.extend_from_slice(line.as_bytes());
        Ok(())
    }
}
