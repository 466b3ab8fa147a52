//! Error types for netconf-crud.

use std::io;
use thiserror::Error;

use crate::session::reply::RpcErrors;

/// Main error type for netconf-crud operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Command line / device URL errors
    #[error("Usage error: {0}")]
    Usage(#[from] UsageError),

    /// SSH or TCP transport-level errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// NETCONF message framing errors
    #[error("Framing error: {0}")]
    Codec(#[from] CodecError),

    /// NETCONF session errors (hello, message-id, state)
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// The device answered with one or more `<rpc-error>` elements
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcErrors),

    /// Model encoding, decoding or validation errors
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Report formatting errors
    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

/// Argument errors, raised before any connection is attempted.
#[derive(Error, Debug)]
pub enum UsageError {
    /// The device argument is not a URL
    #[error("Invalid device URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// The device URL has no host component
    #[error("Device URL '{url}' has no host")]
    MissingHost { url: String },

    /// The URL scheme names a transport we do not speak
    #[error("Unsupported transport scheme '{scheme}' (expected ssh or tcp)")]
    UnsupportedScheme { scheme: String },

    /// A required builder setting was not provided
    #[error("Missing required setting: {0}")]
    MissingSetting(&'static str),
}

/// Transport layer errors (connection, authentication).
#[derive(Error, Debug)]
pub enum TransportError {
    /// Failed to connect to host
    #[error("Connection failed to {host}:{port}: {source}")]
    ConnectionFailed {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    /// SSH handshake or protocol error
    #[error("SSH error: {0}")]
    Ssh(#[from] russh::Error),

    /// Authentication failed
    #[error("Authentication failed for user '{user}'")]
    AuthenticationFailed { user: String },

    /// SSH key error
    #[error("SSH key error: {0}")]
    Key(String),

    /// Server host key differs from the one in known_hosts
    #[error("Host key for {host}:{port} changed (known_hosts line {line})")]
    HostKeyChanged { host: String, port: u16, line: usize },

    /// Server host key not in known_hosts and strict checking is on
    #[error("Host key for {host}:{port} is not in known_hosts")]
    HostKeyUnknown { host: String, port: u16 },

    /// known_hosts could not be read or written
    #[error("known_hosts error: {0}")]
    KnownHosts(String),

    /// The server refused the `netconf` subsystem
    #[error("Server refused the '{0}' subsystem")]
    SubsystemRefused(String),

    /// Connection was closed unexpectedly
    #[error("Connection disconnected")]
    Disconnected,

    /// Operation timed out
    #[error("Operation timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Framing errors (RFC 6242).
#[derive(Error, Debug)]
pub enum CodecError {
    /// A chunk header did not start with `\n#`
    #[error("Invalid chunk header")]
    InvalidChunkHeader,

    /// A chunk size was zero, had a leading zero or overflowed
    #[error("Invalid chunk size '{0}'")]
    InvalidChunkSize(String),

    /// End-of-chunks marker with no preceding chunk
    #[error("Empty chunked message")]
    EmptyMessage,

    /// A message grew beyond the configured limit
    #[error("Message exceeds {limit} bytes")]
    MessageTooLarge { limit: usize },

    /// Message body is not valid UTF-8
    #[error("Message is not valid UTF-8")]
    InvalidUtf8,
}

/// NETCONF session errors.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Session not open
    #[error("Session not open")]
    NotOpen,

    /// The server's first message was not a `<hello>`
    #[error("Expected <hello> from server, got <{0}>")]
    UnexpectedHello(String),

    /// The server hello lacks a base capability we support
    #[error("Server does not support NETCONF base 1.0 or 1.1")]
    NoCommonBase,

    /// A reply that is not an `<rpc-reply>`
    #[error("Expected <rpc-reply>, got <{0}>")]
    UnexpectedReply(String),

    /// Reply message-id does not match the request
    #[error("Reply message-id '{got}' does not match request '{expected}'")]
    MessageIdMismatch { expected: String, got: String },

    /// Neither the running nor the candidate datastore is writable
    #[error("Device advertises no writable datastore")]
    NoWritableDatastore,
}

/// Model encoding, decoding and validation errors.
#[derive(Error, Debug)]
pub enum ModelError {
    /// XML could not be read or written
    #[error("XML error: {0}")]
    Xml(String),

    /// Top-level element does not belong to the model
    #[error("Expected <{expected}>, found <{found}>")]
    UnexpectedElement { expected: &'static str, found: String },

    /// A list entry lacks its key leaf
    #[error("List '{list}' entry is missing key '{key}'")]
    MissingKey {
        list: &'static str,
        key: &'static str,
    },

    /// Two list entries share the same key
    #[error("List '{list}' has duplicate key '{key}'")]
    DuplicateKey { list: &'static str, key: String },

    /// A leaf value could not be parsed into its YANG type
    #[error("Invalid value '{value}' for leaf '{leaf}'")]
    InvalidValue { leaf: &'static str, value: String },

    /// An enumeration leaf carries a name the model does not know
    #[error("Unknown enum '{value}' for leaf '{leaf}'")]
    UnknownEnum { leaf: &'static str, value: String },
}

/// Report formatting errors.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Adjacency state code without a label
    #[error("Unknown neighbor state code {0}")]
    UnknownNeighborState(u32),

    /// Circuit type code without a label
    #[error("Unknown circuit type code {0}")]
    UnknownCircuitType(u32),

    /// Neighbor system-id that no host-name entry resolves
    #[error("No host name for system id '{0}'")]
    UnknownSystemId(String),

    /// A row needs a leaf the device did not return
    #[error("Neighbor is missing leaf '{0}'")]
    MissingLeaf(&'static str),

    /// Writing into the report buffer failed
    #[error("Report formatting failed")]
    Format(#[from] std::fmt::Error),
}

/// Result type alias using netconf-crud's Error.
pub type Result<T> = std::result::Result<T, Error>;
