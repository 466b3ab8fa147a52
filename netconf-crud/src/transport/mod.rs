//! Transport layer carrying NETCONF messages.
//!
//! A transport moves raw bytes; framing and XML live above it in the
//! session. Two transports exist: SSH with the `netconf` subsystem
//! (RFC 6242) and plain TCP for lab devices.

pub mod config;
mod ssh;
mod stream;

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use bytes::Bytes;
use tokio::net::TcpStream;

pub use config::{AuthMethod, HostKeyVerification, TransportConfig};
pub use ssh::SshTransport;
pub use stream::StreamTransport;

use crate::error::{Result, UsageError};

/// Byte pipe to a NETCONF server.
pub trait Transport: Send {
    /// Write all of `data` to the server.
    fn send(&mut self, data: &[u8]) -> impl Future<Output = Result<()>> + Send;

    /// Wait for the next bytes from the server. `None` means end of stream.
    fn recv(&mut self) -> impl Future<Output = Result<Option<Bytes>>> + Send;

    /// Shut the transport down.
    fn close(self) -> impl Future<Output = Result<()>> + Send;
}

/// Transport scheme named in a device URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    /// NETCONF over SSH.
    #[default]
    Ssh,

    /// NETCONF over plain TCP.
    Tcp,
}

impl Scheme {
    /// IANA NETCONF port, used when the URL carries none.
    pub const DEFAULT_PORT: u16 = 830;

    /// Scheme as it appears in a URL.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Ssh => "ssh",
            Scheme::Tcp => "tcp",
        }
    }
}

impl FromStr for Scheme {
    type Err = UsageError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ssh" => Ok(Scheme::Ssh),
            "tcp" => Ok(Scheme::Tcp),
            _ => Err(UsageError::UnsupportedScheme {
                scheme: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport selected at runtime from the device URL scheme.
pub enum DeviceTransport {
    /// SSH `netconf` subsystem channel.
    Ssh(SshTransport),

    /// Plain TCP stream.
    Tcp(StreamTransport<TcpStream>),
}

impl DeviceTransport {
    /// Connect using the transport named by `scheme`.
    pub async fn connect(scheme: Scheme, config: TransportConfig) -> Result<Self> {
        match scheme {
            Scheme::Ssh => Ok(Self::Ssh(SshTransport::connect(config).await?)),
            Scheme::Tcp => Ok(Self::Tcp(StreamTransport::connect(&config).await?)),
        }
    }
}

impl Transport for DeviceTransport {
    async fn send(&mut self, data: &[u8]) -> Result<()> {
        match self {
            Self::Ssh(t) => t.send(data).await,
            Self::Tcp(t) => t.send(data).await,
        }
    }

    async fn recv(&mut self) -> Result<Option<Bytes>> {
        match self {
            Self::Ssh(t) => t.recv().await,
            Self::Tcp(t) => t.recv().await,
        }
    }

    async fn close(self) -> Result<()> {
        match self {
            Self::Ssh(t) => t.close().await,
            Self::Tcp(t) => t.close().await,
        }
    }
}
