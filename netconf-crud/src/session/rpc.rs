//! NETCONF RPC requests.

use std::fmt;

use crate::error::ModelError;
use crate::xml::{XML_DECLARATION, XmlElement};

/// NETCONF base namespace.
pub const NETCONF_NS: &str = "urn:ietf:params:xml:ns:netconf:base:1.0";

/// Configuration datastore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Datastore {
    Running,
    Candidate,
}

impl Datastore {
    pub fn as_str(&self) -> &'static str {
        match self {
            Datastore::Running => "running",
            Datastore::Candidate => "candidate",
        }
    }

    fn to_element(self, wrapper: &str) -> XmlElement {
        XmlElement::new(wrapper).with_child(XmlElement::new(self.as_str()))
    }
}

/// `operation` attribute values used by `<edit-config>` (RFC 6241 section 7.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOperation {
    Merge,
    Create,
    Delete,
}

impl EditOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditOperation::Merge => "merge",
            EditOperation::Create => "create",
            EditOperation::Delete => "delete",
        }
    }
}

impl fmt::Display for EditOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A NETCONF protocol operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rpc {
    /// `<get>` with an optional subtree filter.
    Get { filter: Option<XmlElement> },

    /// `<get-config>` with an optional subtree filter.
    GetConfig {
        source: Datastore,
        filter: Option<XmlElement>,
    },

    /// `<edit-config>`; `config` is the content of the `<config>` element.
    EditConfig {
        target: Datastore,
        config: XmlElement,
    },

    /// `<commit>` the candidate datastore.
    Commit,

    /// `<discard-changes>` in the candidate datastore.
    DiscardChanges,

    /// `<lock>` a datastore.
    Lock { target: Datastore },

    /// `<unlock>` a datastore.
    Unlock { target: Datastore },

    /// `<close-session>`.
    CloseSession,
}

impl Rpc {
    /// Operation element name.
    pub fn name(&self) -> &'static str {
        match self {
            Rpc::Get { .. } => "get",
            Rpc::GetConfig { .. } => "get-config",
            Rpc::EditConfig { .. } => "edit-config",
            Rpc::Commit => "commit",
            Rpc::DiscardChanges => "discard-changes",
            Rpc::Lock { .. } => "lock",
            Rpc::Unlock { .. } => "unlock",
            Rpc::CloseSession => "close-session",
        }
    }

    /// Build the operation element (the child of `<rpc>`).
    pub fn to_element(&self) -> XmlElement {
        let mut op = XmlElement::new(self.name());
        match self {
            Rpc::Get { filter } => {
                if let Some(filter) = filter {
                    op.push(subtree_filter(filter));
                }
            }
            Rpc::GetConfig { source, filter } => {
                op.push(source.to_element("source"));
                if let Some(filter) = filter {
                    op.push(subtree_filter(filter));
                }
            }
            Rpc::EditConfig { target, config } => {
                op.push(target.to_element("target"));
                op.push(XmlElement::new("config").with_child(config.clone()));
            }
            Rpc::Lock { target } | Rpc::Unlock { target } => {
                op.push(target.to_element("target"));
            }
            Rpc::Commit | Rpc::DiscardChanges | Rpc::CloseSession => {}
        }
        op
    }
}

fn subtree_filter(content: &XmlElement) -> XmlElement {
    XmlElement::new("filter")
        .with_attribute("type", "subtree")
        .with_child(content.clone())
}

/// Serialize a complete `<rpc>` message.
pub fn rpc_message(message_id: u64, rpc: &Rpc) -> Result<String, ModelError> {
    let envelope = XmlElement::new("rpc")
        .with_attribute("message-id", message_id.to_string())
        .with_namespace(NETCONF_NS)
        .with_child(rpc.to_element());
    Ok(format!("{}{}", XML_DECLARATION, envelope.to_xml()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_with_filter() {
        let rpc = Rpc::Get {
            filter: Some(XmlElement::new("isis").with_namespace("urn:example")),
        };
        let xml = rpc_message(3, &rpc).unwrap();
        assert_eq!(
            xml,
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8"?>"#,
                r#"<rpc message-id="3" xmlns="urn:ietf:params:xml:ns:netconf:base:1.0">"#,
                r#"<get><filter type="subtree"><isis xmlns="urn:example"/></filter></get></rpc>"#
            )
        );
    }

    #[test]
    fn test_edit_config_layout() {
        let rpc = Rpc::EditConfig {
            target: Datastore::Candidate,
            config: XmlElement::new("arpgmp"),
        };
        let op = rpc.to_element();
        assert_eq!(op.name, "edit-config");
        assert!(op.child("target").unwrap().child("candidate").is_some());
        assert!(op.child("config").unwrap().child("arpgmp").is_some());
    }

    #[test]
    fn test_close_session_is_empty() {
        let op = Rpc::CloseSession.to_element();
        assert_eq!(op.name, "close-session");
        assert!(op.children.is_empty());
    }
}
