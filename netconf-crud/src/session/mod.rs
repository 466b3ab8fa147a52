//! NETCONF sessions.
//!
//! The session layer turns a byte [`Transport`](crate::transport::Transport)
//! into a request/reply channel: it performs the `<hello>` exchange, picks
//! the framing, numbers requests and decodes replies.

mod builder;
pub mod capabilities;
mod netconf;
pub mod reply;
pub mod rpc;

#[cfg(test)]
pub(crate) mod mock;

pub use builder::SessionBuilder;
pub use capabilities::Capabilities;
pub use netconf::NetconfSession;
pub use reply::{RpcErrorInfo, RpcErrors, RpcReply};
pub use rpc::{Datastore, EditOperation, Rpc};

use std::future::Future;
use std::time::Duration;

use crate::error::Result;

/// An open management session to one device.
pub trait Session: Send {
    /// Capabilities the device advertised.
    fn capabilities(&self) -> &Capabilities;

    /// Send one RPC and wait for its reply.
    ///
    /// Replies carrying error-severity `<rpc-error>`s are returned as
    /// [`Error::Rpc`](crate::Error::Rpc).
    fn rpc(&mut self, rpc: &Rpc) -> impl Future<Output = Result<RpcReply>> + Send;

    /// Close the session. Closing an already closed session is a no-op.
    fn close(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Check if the session is open.
    fn is_open(&self) -> bool;
}

/// Per-session protocol options.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// How long to wait for each reply. `None` waits forever.
    pub rpc_timeout: Option<Duration>,

    /// Log every message body at debug level.
    pub trace_messages: bool,

    /// Largest message accepted from the device.
    pub max_message_size: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            rpc_timeout: None,
            trace_messages: false,
            max_message_size: 64 * 1024 * 1024,
        }
    }
}
