//! NETCONF session over any transport.

use log::{debug, warn};

use super::capabilities::{BASE_1_0, BASE_1_1, Capabilities};
use super::reply::RpcReply;
use super::rpc::{NETCONF_NS, Rpc, rpc_message};
use super::{Session, SessionOptions};
use crate::codec::{self, Framing, MessageBuffer};
use crate::error::{CodecError, Result, SessionError, TransportError};
use crate::transport::Transport;
use crate::xml::{XML_DECLARATION, XmlElement};

/// NETCONF client session.
///
/// Created by [`SessionBuilder::connect`](super::SessionBuilder::connect) or
/// [`NetconfSession::establish`] over an already connected transport.
/// Call [`close`](Session::close) when done; dropping an open session only
/// logs a warning.
pub struct NetconfSession<T: Transport> {
    /// Transport (None once closed).
    transport: Option<T>,

    /// Receive buffer.
    buffer: MessageBuffer,

    /// Framing in effect; switches to chunked after a base:1.1 hello.
    framing: Framing,

    /// Capabilities advertised by the server.
    capabilities: Capabilities,

    /// Server-assigned session id.
    session_id: Option<u32>,

    /// Message id for the next request.
    next_message_id: u64,

    options: SessionOptions,
}

impl<T: Transport> NetconfSession<T> {
    /// Exchange hellos over `transport` and return the open session.
    ///
    /// The transport is closed if the exchange fails.
    pub async fn establish(transport: T, options: SessionOptions) -> Result<Self> {
        let mut session = Self {
            transport: Some(transport),
            buffer: MessageBuffer::new(options.max_message_size),
            framing: Framing::EndOfMessage,
            capabilities: Capabilities::default(),
            session_id: None,
            next_message_id: 1,
            options,
        };

        if let Err(e) = session.exchange_hello().await {
            if let Some(transport) = session.transport.take() {
                if let Err(close_err) = transport.close().await {
                    debug!("Closing transport after failed hello: {}", close_err);
                }
            }
            return Err(e);
        }
        Ok(session)
    }

    /// Server-assigned session id.
    pub fn session_id(&self) -> Option<u32> {
        self.session_id
    }

    /// Framing currently in use.
    pub fn framing(&self) -> Framing {
        self.framing
    }

    async fn exchange_hello(&mut self) -> Result<()> {
        self.send_message(&hello_message()?).await?;

        let text = self.recv_message().await?;
        let hello = XmlElement::parse(&text)?;
        if hello.local_name() != "hello" {
            let name = hello.local_name().to_string();
            return Err(SessionError::UnexpectedHello(name).into());
        }

        self.capabilities = Capabilities::from_hello(&hello);
        self.session_id = hello.child_text("session-id").and_then(|id| id.parse().ok());

        if self.capabilities.supports(BASE_1_1) {
            self.framing = Framing::Chunked;
        } else if !self.capabilities.supports(BASE_1_0) {
            return Err(SessionError::NoCommonBase.into());
        }

        debug!(
            "NETCONF session {:?} established ({} capabilities, {:?} framing)",
            self.session_id,
            self.capabilities.len(),
            self.framing
        );
        Ok(())
    }

    async fn send_message(&mut self, message: &str) -> Result<()> {
        if self.options.trace_messages {
            debug!("Sending message:\n{}", message);
        }
        let frame = codec::encode(self.framing, message.as_bytes());
        let transport = self.transport.as_mut().ok_or(SessionError::NotOpen)?;
        transport.send(&frame).await
    }

    async fn recv_message(&mut self) -> Result<String> {
        loop {
            if let Some(message) = self.buffer.next_message(self.framing)? {
                let text = String::from_utf8(message).map_err(|_| CodecError::InvalidUtf8)?;
                if self.options.trace_messages {
                    debug!("Received message:\n{}", text.trim());
                }
                return Ok(text.trim().to_string());
            }

            let transport = self.transport.as_mut().ok_or(SessionError::NotOpen)?;
            let chunk = match self.options.rpc_timeout {
                Some(limit) => tokio::time::timeout(limit, transport.recv())
                    .await
                    .map_err(|_| TransportError::Timeout(limit))??,
                None => transport.recv().await?,
            };

            match chunk {
                Some(bytes) => self.buffer.extend(&bytes),
                None => return Err(TransportError::Disconnected.into()),
            }
        }
    }
}

impl<T: Transport> Session for NetconfSession<T> {
    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn rpc(&mut self, rpc: &Rpc) -> Result<RpcReply> {
        let message_id = self.next_message_id;
        self.next_message_id += 1;

        debug!("Sending <{}> (message-id {})", rpc.name(), message_id);
        let message = rpc_message(message_id, rpc)?;
        self.send_message(&message).await?;

        let text = self.recv_message().await?;
        let reply = RpcReply::from_element(&XmlElement::parse(&text)?)?;

        let expected = message_id.to_string();
        if let Some(ref got) = reply.message_id {
            if *got != expected {
                return Err(SessionError::MessageIdMismatch {
                    expected,
                    got: got.clone(),
                }
                .into());
            }
        }

        reply.into_result()
    }

    async fn close(&mut self) -> Result<()> {
        if self.transport.is_none() {
            return Ok(());
        }

        let outcome = self.rpc(&Rpc::CloseSession).await;
        let closed = match self.transport.take() {
            Some(transport) => transport.close().await,
            None => Ok(()),
        };
        debug!("NETCONF session {:?} closed", self.session_id);

        outcome?;
        closed
    }

    fn is_open(&self) -> bool {
        self.transport.is_some()
    }
}

impl<T: Transport> Drop for NetconfSession<T> {
    fn drop(&mut self) {
        if self.transport.is_some() {
            warn!("NetconfSession dropped without close()");
        }
    }
}

/// Client `<hello>` message.
pub(crate) fn hello_message() -> Result<String> {
    let hello = XmlElement::new("hello")
        .with_namespace(NETCONF_NS)
        .with_child(Capabilities::client().to_element());
    Ok(format!("{}{}", XML_DECLARATION, hello.to_xml()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::session::reply::RpcErrors;
    use crate::transport::StreamTransport;
    use tokio_test::io::Builder;

    fn server_hello(base: &str) -> Vec<u8> {
        let hello = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<hello xmlns="urn:ietf:params:xml:ns:netconf:base:1.0">
  <capabilities>
    <capability>{}</capability>
    <capability>urn:ietf:params:netconf:capability:writable-running:1.0</capability>
  </capabilities>
  <session-id>4711</session-id>
</hello>"#,
            base
        );
        codec::encode(Framing::EndOfMessage, hello.as_bytes())
    }

    fn client_hello() -> Vec<u8> {
        codec::encode(Framing::EndOfMessage, hello_message().unwrap().as_bytes())
    }

    fn request(framing: Framing, message_id: u64, rpc: &Rpc) -> Vec<u8> {
        codec::encode(framing, rpc_message(message_id, rpc).unwrap().as_bytes())
    }

    fn reply(framing: Framing, message_id: u64, body: &str) -> Vec<u8> {
        let text = format!(
            r#"<rpc-reply message-id="{}" xmlns="urn:ietf:params:xml:ns:netconf:base:1.0">{}</rpc-reply>"#,
            message_id, body
        );
        codec::encode(framing, text.as_bytes())
    }

    #[tokio::test]
    async fn test_base_1_0_session_lifecycle() {
        let framing = Framing::EndOfMessage;
        let get = Rpc::Get { filter: None };
        let mock = Builder::new()
            .write(&client_hello())
            .read(&server_hello(BASE_1_0))
            .write(&request(framing, 1, &get))
            .read(&reply(framing, 1, "<data><isis/></data>"))
            .write(&request(framing, 2, &Rpc::CloseSession))
            .read(&reply(framing, 2, "<ok/>"))
            .build();

        let transport = StreamTransport::new(mock);
        let options = SessionOptions::default();
        let mut session = NetconfSession::establish(transport, options).await.unwrap();
        assert_eq!(session.session_id(), Some(4711));
        assert_eq!(session.framing(), Framing::EndOfMessage);
        assert!(session.capabilities().supports(BASE_1_0));

        let answer = session.rpc(&get).await.unwrap();
        assert!(answer.data.unwrap().child("isis").is_some());

        session.close().await.unwrap();
        assert!(!session.is_open());
        // Second close is a no-op
        session.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_base_1_1_switches_to_chunked() {
        let framing = Framing::Chunked;
        let mock = Builder::new()
            .write(&client_hello())
            .read(&server_hello(BASE_1_1))
            .write(&request(framing, 1, &Rpc::Commit))
            .read(&reply(framing, 1, "<ok/>"))
            .write(&request(framing, 2, &Rpc::CloseSession))
            .read(&reply(framing, 2, "<ok/>"))
            .build();

        let transport = StreamTransport::new(mock);
        let options = SessionOptions::default();
        let mut session = NetconfSession::establish(transport, options).await.unwrap();
        assert_eq!(session.framing(), Framing::Chunked);
        assert!(session.rpc(&Rpc::Commit).await.unwrap().ok);
        session.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_rpc_error_and_message_id_mismatch() {
        let framing = Framing::EndOfMessage;
        let mock = Builder::new()
            .write(&client_hello())
            .read(&server_hello(BASE_1_0))
            .write(&request(framing, 1, &Rpc::Commit))
            .read(&reply(
                framing,
                1,
                "<rpc-error><error-type>protocol</error-type><error-tag>operation-failed</error-tag>\
                 <error-severity>error</error-severity></rpc-error>",
            ))
            .write(&request(framing, 2, &Rpc::DiscardChanges))
            .read(&reply(framing, 9, "<ok/>"))
            .write(&request(framing, 3, &Rpc::CloseSession))
            .read(&reply(framing, 3, "<ok/>"))
            .build();

        let transport = StreamTransport::new(mock);
        let options = SessionOptions::default();
        let mut session = NetconfSession::establish(transport, options).await.unwrap();

        match session.rpc(&Rpc::Commit).await {
            Err(Error::Rpc(RpcErrors(errors))) => assert_eq!(errors[0].tag, "operation-failed"),
            other => panic!("expected rpc error, got {:?}", other),
        }
        assert!(matches!(
            session.rpc(&Rpc::DiscardChanges).await,
            Err(Error::Session(SessionError::MessageIdMismatch { .. }))
        ));
        session.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_server_without_hello() {
        let mock = Builder::new()
            .write(&client_hello())
            .read(&codec::encode(Framing::EndOfMessage, b"<rpc-reply/>"))
            .build();

        let transport = StreamTransport::new(mock);
        let options = SessionOptions::default();
        let result = NetconfSession::establish(transport, options).await;
        assert!(matches!(
            result,
            Err(Error::Session(SessionError::UnexpectedHello(_)))
        ));
    }

    #[tokio::test]
    async fn test_disconnect_during_hello() {
        let mock = Builder::new().write(&client_hello()).build();

        let transport = StreamTransport::new(mock);
        let options = SessionOptions::default();
        let result = NetconfSession::establish(transport, options).await;
        assert!(matches!(
            result,
            Err(Error::Transport(TransportError::Disconnected))
        ));
    }
}
