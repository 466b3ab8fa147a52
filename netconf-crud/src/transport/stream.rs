//! NETCONF over a plain byte stream (TCP).

use bytes::{Bytes, BytesMut};
use log::debug;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

use super::Transport;
use super::config::TransportConfig;
use crate::error::{Result, TransportError};

/// Read size for each `recv` call.
const READ_CHUNK: usize = 8192;

/// Transport over any async byte stream.
pub struct StreamTransport<S> {
    stream: S,
    read_buf: BytesMut,
}

impl<S> StreamTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    /// Wrap an already connected stream.
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            read_buf: BytesMut::with_capacity(READ_CHUNK),
        }
    }
}

impl StreamTransport<TcpStream> {
    /// Open a TCP connection to the configured host and port.
    pub async fn connect(config: &TransportConfig) -> Result<Self> {
        debug!("Connecting to {}:{} over TCP", config.host, config.port);
        let stream = tokio::time::timeout(
            config.timeout,
            TcpStream::connect((config.host.as_str(), config.port)),
        )
        .await
        .map_err(|_| TransportError::Timeout(config.timeout))?
        .map_err(|source| TransportError::ConnectionFailed {
            host: config.host.clone(),
            port: config.port,
            source,
        })?;
        stream.set_nodelay(true).map_err(TransportError::Io)?;
        Ok(Self::new(stream))
    }
}

impl<S> Transport for StreamTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn send(&mut self, data: &[u8]) -> Result<()> {
        self.stream
            .write_all(data)
            .await
            .map_err(TransportError::Io)?;
        self.stream.flush().await.map_err(TransportError::Io)?;
        Ok(())
    }

    async fn recv(&mut self) -> Result<Option<Bytes>> {
        self.read_buf.reserve(READ_CHUNK);
        let n = self
            .stream
            .read_buf(&mut self.read_buf)
            .await
            .map_err(TransportError::Io)?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(self.read_buf.split().freeze()))
    }

    async fn close(mut self) -> Result<()> {
        self.stream.shutdown().await.map_err(TransportError::Io)?;
        Ok(())
    }
}
