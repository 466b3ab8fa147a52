//! `<rpc-reply>` decoding.

use std::fmt;

use log::warn;

use crate::error::{Result, SessionError};
use crate::xml::XmlElement;

/// Severity of an `<rpc-error>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Error,
    Warning,
}

/// One `<rpc-error>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcErrorInfo {
    pub error_type: String,
    pub tag: String,
    pub severity: ErrorSeverity,
    pub path: Option<String>,
    pub message: Option<String>,
}

impl RpcErrorInfo {
    fn from_element(element: &XmlElement) -> Self {
        let text = |name: &str| element.child_text(name).map(str::to_string);
        Self {
            error_type: text("error-type").unwrap_or_default(),
            tag: text("error-tag").unwrap_or_default(),
            severity: match element.child_text("error-severity") {
                Some("warning") => ErrorSeverity::Warning,
                _ => ErrorSeverity::Error,
            },
            path: text("error-path"),
            message: text("error-message"),
        }
    }
}

impl fmt::Display for RpcErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.tag, self.error_type)?;
        if let Some(ref path) = self.path {
            write!(f, " at {}", path)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

/// Errors returned by the device for one RPC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcErrors(pub Vec<RpcErrorInfo>);

impl fmt::Display for RpcErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for RpcErrors {}

/// Decoded `<rpc-reply>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RpcReply {
    /// `message-id` echoed by the server.
    pub message_id: Option<String>,

    /// `<ok/>` was present.
    pub ok: bool,

    /// `<data>` element, if present.
    pub data: Option<XmlElement>,

    /// All `<rpc-error>` elements, any severity.
    pub errors: Vec<RpcErrorInfo>,
}

impl RpcReply {
    /// A bare `<ok/>` reply.
    pub fn ok() -> Self {
        Self {
            ok: true,
            ..Default::default()
        }
    }

    /// A reply carrying `<data>`.
    pub fn with_data(data: XmlElement) -> Self {
        Self {
            data: Some(data),
            ..Default::default()
        }
    }

    /// Decode an `<rpc-reply>` element.
    pub fn from_element(element: &XmlElement) -> Result<Self> {
        if element.local_name() != "rpc-reply" {
            let name = element.local_name().to_string();
            return Err(SessionError::UnexpectedReply(name).into());
        }
        Ok(Self {
            message_id: element.attribute("message-id").map(str::to_string),
            ok: element.child("ok").is_some(),
            data: element.child("data").cloned(),
            errors: element
                .children_named("rpc-error")
                .map(RpcErrorInfo::from_element)
                .collect(),
        })
    }

    /// Fail on error-severity `<rpc-error>`s; log and drop warnings.
    pub fn into_result(self) -> Result<Self> {
        let (errors, warnings): (Vec<_>, Vec<_>) = self
            .errors
            .iter()
            .cloned()
            .partition(|e| e.severity == ErrorSeverity::Error);

        for warning in &warnings {
            warn!("Device warning: {}", warning);
        }
        if !errors.is_empty() {
            return Err(RpcErrors(errors).into());
        }
        Ok(self)
    }
}
