//! NETCONF capability set exchanged in `<hello>`.

use indexmap::IndexSet;

use crate::xml::XmlElement;

/// Base protocol 1.0 (end-of-message framing).
pub const BASE_1_0: &str = "urn:ietf:params:netconf:base:1.0";
/// Base protocol 1.1 (chunked framing).
pub const BASE_1_1: &str = "urn:ietf:params:netconf:base:1.1";
/// `:candidate` datastore.
pub const CANDIDATE: &str = "urn:ietf:params:netconf:capability:candidate:1.0";
/// `:writable-running` datastore.
pub const WRITABLE_RUNNING: &str = "urn:ietf:params:netconf:capability:writable-running:1.0";

/// Capabilities advertised by a peer, in advertisement order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    uris: IndexSet<String>,
}

impl Capabilities {
    /// Build from a list of capability URIs.
    pub fn new<I, S>(uris: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            uris: uris.into_iter().map(Into::into).collect(),
        }
    }

    /// Capabilities this client advertises.
    pub fn client() -> Self {
        Self::new([BASE_1_0, BASE_1_1])
    }

    /// Read the `<capabilities>` child of a `<hello>` element.
    pub fn from_hello(hello: &XmlElement) -> Self {
        let uris = hello
            .child("capabilities")
            .into_iter()
            .flat_map(|caps| caps.children_named("capability"))
            .filter_map(|cap| cap.text())
            .map(str::to_string);
        Self::new(uris)
    }

    /// Check for a capability, ignoring any `?query` parameters.
    pub fn supports(&self, uri: &str) -> bool {
        self.uris.iter().any(|cap| strip_query(cap) == uri)
    }

    /// YANG module names announced with `?module=`.
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.uris.iter().filter_map(|cap| {
            let (_, query) = cap.split_once('?')?;
            query
                .split(['&', ';'])
                .find_map(|param| param.strip_prefix("module="))
        })
    }

    /// Check whether the peer announced a YANG module by name.
    pub fn has_module(&self, module: &str) -> bool {
        self.modules().any(|m| m == module)
    }

    /// Iterate over all advertised URIs.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.uris.iter().map(String::as_str)
    }

    /// Number of advertised capabilities.
    pub fn len(&self) -> usize {
        self.uris.len()
    }

    /// Check if nothing was advertised.
    pub fn is_empty(&self) -> bool {
        self.uris.is_empty()
    }

    /// Render as the `<capabilities>` element of a hello.
    pub fn to_element(&self) -> XmlElement {
        let mut element = XmlElement::new("capabilities");
        for uri in &self.uris {
            element.push(XmlElement::leaf("capability", uri));
        }
        element
    }
}

fn strip_query(uri: &str) -> &str {
    uri.split_once('?').map_or(uri, |(base, _)| base)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO: &str = r#"<hello xmlns="urn:ietf:params:xml:ns:netconf:base:1.0">
  <capabilities>
    <capability>urn:ietf:params:netconf:base:1.1</capability>
    <capability>urn:ietf:params:netconf:capability:candidate:1.0</capability>
    <capability>http://cisco.com/ns/yang/Cisco-IOS-XR-ipv4-arp-cfg?module=Cisco-IOS-XR-ipv4-arp-cfg&amp;revision=2015-11-09</capability>
  </capabilities>
  <session-id>42</session-id>
</hello>"#;

    #[test]
    fn test_from_hello() {
        let hello = XmlElement::parse(HELLO).unwrap();
        let caps = Capabilities::from_hello(&hello);

        assert_eq!(caps.len(), 3);
        assert!(caps.supports(BASE_1_1));
        assert!(!caps.supports(BASE_1_0));
        assert!(caps.supports(CANDIDATE));
        assert!(!caps.supports(WRITABLE_RUNNING));
        let arp_cfg = "http://cisco.com/ns/yang/Cisco-IOS-XR-ipv4-arp-cfg";
        assert!(caps.supports(arp_cfg));
    }

    #[test]
    fn test_modules() {
        let hello = XmlElement::parse(HELLO).unwrap();
        let caps = Capabilities::from_hello(&hello);

        let modules: Vec<_> = caps.modules().collect();
        assert_eq!(modules, vec!["Cisco-IOS-XR-ipv4-arp-cfg"]);
        assert!(caps.has_module("Cisco-IOS-XR-ipv4-arp-cfg"));
        assert!(!caps.has_module("Cisco-IOS-XR-clns-isis-oper"));
    }

    #[test]
    fn test_client_capabilities_element() {
        let element = Capabilities::client().to_element();
        let uris: Vec<_> = element
            .children_named("capability")
            .filter_map(|c| c.text())
            .collect();
        assert_eq!(uris, vec![BASE_1_0, BASE_1_1]);
    }
}
