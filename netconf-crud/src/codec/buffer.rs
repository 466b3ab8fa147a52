//! Receive buffer that splits a byte stream into NETCONF messages.

use bytes::{Buf, BytesMut};
use memchr::memmem;

use super::{END_OF_MESSAGE, Framing};
use crate::error::CodecError;

/// Largest chunk-size RFC 6242 allows.
const MAX_CHUNK_SIZE: u64 = 4_294_967_295;

/// Longest possible chunk header: `\n#` + 10 digits + `\n`.
const MAX_CHUNK_HEADER: usize = 13;

/// Buffer for accumulating transport output and extracting whole messages.
///
/// Bytes are appended as they arrive from the transport; `next_message`
/// returns complete messages and leaves any trailing partial frame buffered.
#[derive(Debug)]
pub struct MessageBuffer {
    /// Bytes received but not yet consumed.
    buffer: BytesMut,

    /// Chunks of the message currently being reassembled.
    pending: Vec<u8>,

    /// Upper bound on a single message.
    max_message_size: usize,

    /// Offset already scanned for the end-of-message delimiter.
    scanned: usize,
}

impl MessageBuffer {
    /// Create a buffer that rejects messages larger than `max_message_size`.
    pub fn new(max_message_size: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(8192),
            pending: Vec::new(),
            max_message_size,
            scanned: 0,
        }
    }

    /// Append bytes received from the transport.
    pub fn extend(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Get the number of buffered, unconsumed bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if there are no buffered bytes.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty() && self.pending.is_empty()
    }

    /// Extract the next complete message, if one is buffered.
    pub fn next_message(&mut self, framing: Framing) -> Result<Option<Vec<u8>>, CodecError> {
        match framing {
            Framing::EndOfMessage => self.next_delimited(),
            Framing::Chunked => self.next_chunked(),
        }
    }

    fn next_delimited(&mut self) -> Result<Option<Vec<u8>>, CodecError> {
        // Rescan the last few bytes in case the delimiter straddles reads
        let from = self.scanned.saturating_sub(END_OF_MESSAGE.len() - 1);
        match memmem::find(&self.buffer[from..], END_OF_MESSAGE) {
            Some(pos) => {
                let end = from + pos;
                let message = self.buffer.split_to(end).to_vec();
                self.buffer.advance(END_OF_MESSAGE.len());
                self.scanned = 0;
                Ok(Some(message))
            }
            None => {
                self.scanned = self.buffer.len();
                if self.buffer.len() > self.max_message_size {
                    return Err(CodecError::MessageTooLarge {
                        limit: self.max_message_size,
                    });
                }
                Ok(None)
            }
        }
    }

    fn next_chunked(&mut self) -> Result<Option<Vec<u8>>, CodecError> {
        loop {
            if self.buffer.len() < 4 {
                return Ok(None);
            }
            if &self.buffer[..2] != b"\n#" {
                return Err(CodecError::InvalidChunkHeader);
            }

            // End-of-chunks marker
            if self.buffer[2] == b'#' {
                if self.buffer[3] != b'\n' {
                    return Err(CodecError::InvalidChunkHeader);
                }
                self.buffer.advance(4);
                if self.pending.is_empty() {
                    return Err(CodecError::EmptyMessage);
                }
                return Ok(Some(std::mem::take(&mut self.pending)));
            }

            let Some(newline) = memchr::memchr(b'\n', &self.buffer[2..]) else {
                if self.buffer.len() >= MAX_CHUNK_HEADER {
                    return Err(CodecError::InvalidChunkHeader);
                }
                return Ok(None);
            };

            let size = parse_chunk_size(&self.buffer[2..2 + newline])?;
            let header_len = 2 + newline + 1;
            if self.pending.len() + size > self.max_message_size {
                return Err(CodecError::MessageTooLarge {
                    limit: self.max_message_size,
                });
            }
            if self.buffer.len() < header_len + size {
                return Ok(None);
            }

            self.buffer.advance(header_len);
            let chunk = self.buffer.split_to(size);
            self.pending.extend_from_slice(&chunk);
        }
    }
}

impl Default for MessageBuffer {
    fn default() -> Self {
        Self::new(64 * 1024 * 1024)
    }
}

fn parse_chunk_size(digits: &[u8]) -> Result<usize, CodecError> {
    let text = String::from_utf8_lossy(digits);
    let invalid = || CodecError::InvalidChunkSize(text.to_string());

    if digits.is_empty() || digits[0] == b'0' || !digits.iter().all(u8::is_ascii_digit) {
        return Err(invalid());
    }
    let size: u64 = text.parse().map_err(|_| invalid())?;
    if size > MAX_CHUNK_SIZE {
        return Err(invalid());
    }
    usize::try_from(size).map_err(|_| invalid())
}
