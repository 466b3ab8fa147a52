//! NETCONF message framing (RFC 6242).
//!
//! Sessions start in end-of-message framing and switch to chunked framing
//! once both peers have advertised `urn:ietf:params:netconf:base:1.1`.

mod buffer;

pub use buffer::MessageBuffer;

/// Message delimiter used by base:1.0 framing.
pub const END_OF_MESSAGE: &[u8] = b"]]>]]>";

/// Framing mode of a NETCONF session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Framing {
    /// `]]>]]>` terminated messages (base:1.0).
    #[default]
    EndOfMessage,

    /// Chunked framing (base:1.1).
    Chunked,
}

/// Frame a complete message for the wire.
pub fn encode(framing: Framing, message: &[u8]) -> Vec<u8> {
    match framing {
        Framing::EndOfMessage => {
            let mut out = Vec::with_capacity(message.len() + END_OF_MESSAGE.len());
            out.extend_from_slice(message);
            out.extend_from_slice(END_OF_MESSAGE);
            out
        }
        Framing::Chunked => {
            let header = format!("\n#{}\n", message.len());
            let mut out = Vec::with_capacity(header.len() + message.len() + 4);
            out.extend_from_slice(header.as_bytes());
            out.extend_from_slice(message);
            out.extend_from_slice(b"\n##\n");
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_end_of_message() {
        assert_eq!(encode(Framing::EndOfMessage, b"<ok/>"), b"<ok/>]]>]]>");
    }

    #[test]
    fn test_encode_chunked() {
        assert_eq!(encode(Framing::Chunked, b"<ok/>"), b"\n#5\n<ok/>\n##\n");
    }
}
