//! Recording session for tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use super::capabilities::{BASE_1_1, WRITABLE_RUNNING};
use super::{Capabilities, Rpc, RpcReply, Session};
use crate::error::{Result, SessionError};

/// What a [`MockSession`] saw.
#[derive(Debug, Default)]
pub(crate) struct Recording {
    pub rpcs: Vec<Rpc>,
    pub closes: usize,
}

/// Session that records every request and answers from a script.
///
/// Requests without a scripted reply are answered with `<ok/>`.
pub(crate) struct MockSession {
    recording: Arc<Mutex<Recording>>,
    replies: VecDeque<RpcReply>,
    capabilities: Capabilities,
    open: bool,
}

impl MockSession {
    /// Session advertising base:1.1 and `:writable-running`.
    pub fn new() -> Self {
        Self::with_capabilities(Capabilities::new([BASE_1_1, WRITABLE_RUNNING]))
    }

    pub fn with_capabilities(capabilities: Capabilities) -> Self {
        Self {
            recording: Arc::new(Mutex::new(Recording::default())),
            replies: VecDeque::new(),
            capabilities,
            open: true,
        }
    }

    /// Queue the reply for the next request.
    pub fn reply(mut self, reply: RpcReply) -> Self {
        self.replies.push_back(reply);
        self
    }

    /// Handle for inspecting the recording after the session is consumed.
    pub fn recording(&self) -> Arc<Mutex<Recording>> {
        self.recording.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Recording> {
        self.recording.lock().unwrap()
    }
}

impl Session for MockSession {
    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn rpc(&mut self, rpc: &Rpc) -> Result<RpcReply> {
        if !self.open {
            return Err(SessionError::NotOpen.into());
        }
        self.lock().rpcs.push(rpc.clone());
        self.replies
            .pop_front()
            .unwrap_or_else(RpcReply::ok)
            .into_result()
    }

    async fn close(&mut self) -> Result<()> {
        self.lock().closes += 1;
        self.open = false;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }
}
