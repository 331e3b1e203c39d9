//! Line-based codec for tokio.
//!
//! Reads text lines terminated by CR, LF or CRLF and writes [`Reply`] values
//! in their `\r\n`-terminated wire form.

use std::fmt::Write as _;

use bytes::{Buf, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::error;
use crate::limits::BUFFER_SZ;
use crate::reply::Reply;

/// Line-based codec for the chat protocol.
///
/// Decoding never fails on content: bytes are decoded lossily as UTF-8 and a
/// line longer than the maximum is cut at the limit, with the remainder of that
/// line discarded up to the next terminator.
#[derive(Debug)]
pub struct LineCodec {
    /// Index of next byte to check for a terminator
    next_index: usize,
    /// Maximum line length in bytes
    max_len: usize,
    /// Dropping the tail of an overlong line
    discarding: bool,
}

impl LineCodec {
    /// Create a codec limited to [`BUFFER_SZ`] bytes per line.
    pub fn new() -> Self {
        Self::with_max_len(BUFFER_SZ)
    }

    /// Create a codec with a custom max line length.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len: max_len.max(1),
            discarding: false,
        }
    }

    fn is_terminator(b: &u8) -> bool {
        *b == b'\r' || *b == b'\n'
    }

    /// Cut point for an overlong line that does not split a UTF-8 sequence.
    fn overlong_cut(&self, src: &BytesMut) -> usize {
        let mut end = self.max_len;
        while end > 0 && (src[end] & 0xC0) == 0x80 {
            end -= 1;
        }
        if end == 0 { self.max_len } else { end }
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = error::ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
        loop {
            if self.discarding {
                match src.iter().position(Self::is_terminator) {
                    Some(offset) => {
                        src.advance(offset + 1);
                        self.discarding = false;
                        continue;
                    }
                    None => {
                        src.clear();
                        return Ok(None);
                    }
                }
            }

            let found = src[self.next_index..]
                .iter()
                .position(Self::is_terminator)
                .map(|offset| self.next_index + offset);

            if let Some(end) = found.filter(|end| *end <= self.max_len) {
                let line = src.split_to(end);
                src.advance(1);
                self.next_index = 0;
                return Ok(Some(String::from_utf8_lossy(&line).into_owned()));
            }

            if found.is_some() || src.len() > self.max_len {
                let cut = self.overlong_cut(src);
                let line = src.split_to(cut);
                self.next_index = 0;
                self.discarding = true;
                return Ok(Some(String::from_utf8_lossy(&line).into_owned()));
            }

            // No complete line yet - remember where we stopped
            self.next_index = src.len();
            return Ok(None);
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
        if let Some(line) = self.decode(src)? {
            return Ok(Some(line));
        }
        self.next_index = 0;
        if src.is_empty() {
            return Ok(None);
        }
        let line = src.split();
        Ok(Some(String::from_utf8_lossy(&line).into_owned()))
    }
}

impl Encoder<&Reply> for LineCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, reply: &Reply, dst: &mut BytesMut) -> error::Result<()> {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = write!(out, "{reply}");
        dst.extend_from_slice(out.as_bytes());
        Ok(())
    }
}
