//! Typed YANG models.
//!
//! Each model is a tree of plain structs: containers are structs, lists are
//! `Vec`s, leaves are `Option`s so that key-only objects can be built for
//! filters and deletes. [`Entity`] is the capability set the CRUD service
//! needs from a top-level node: encode, decode and validate.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;
use crate::xml::XmlElement;

/// Top-level node of a YANG model that can be sent to or read from a device.
pub trait Entity: Default + Send + Sync {
    /// YANG module name, as announced in `?module=` capabilities.
    const MODULE: &'static str;

    /// Module namespace.
    const NAMESPACE: &'static str;

    /// Element name of the top-level node.
    const NAME: &'static str;

    /// Encode the populated parts of this tree. Unset leaves and empty
    /// containers are omitted, so a key-only object encodes as a filter.
    fn to_element(&self) -> XmlElement;

    /// Decode from the top-level element.
    fn from_element(element: &XmlElement) -> Result<Self, ModelError>;

    /// Check list keys before the object is sent.
    fn validate(&self) -> Result<(), ModelError> {
        Ok(())
    }
}

/// A YANG enumeration.
pub trait YangEnum: Sized + Copy {
    /// Integer value assigned in the YANG module.
    fn value(&self) -> u32;

    /// Enum name as it appears on the wire.
    fn yang_name(&self) -> &'static str;

    /// Look up a variant by its wire name.
    fn from_yang_name(name: &str) -> Option<Self>;
}

macro_rules! yang_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = ($value:expr, $yang:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::model::YangEnum for $name {
            fn value(&self) -> u32 {
                match self {
                    $( Self::$variant => $value ),+
                }
            }

            fn yang_name(&self) -> &'static str {
                match self {
                    $( Self::$variant => $yang ),+
                }
            }

            fn from_yang_name(name: &str) -> Option<Self> {
                match name {
                    $( $yang => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::model::YangEnum::yang_name(self))
            }
        }
    };
}

pub mod clns_isis_oper;
pub mod ipv4_arp_cfg;

/// IEEE 802 MAC address in colon notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    pub fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    pub fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl FromStr for MacAddress {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ModelError::InvalidValue {
            leaf: "mac-address",
            value: s.to_string(),
        };

        let mut octets = [0u8; 6];
        let mut parts = s.split(':');
        for octet in octets.iter_mut() {
            let part = parts.next().ok_or_else(invalid)?;
            if part.len() != 2 {
                return Err(invalid());
            }
            *octet = u8::from_str_radix(part, 16).map_err(|_| invalid())?;
        }
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Self(octets))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

// -----------------------------------------------------------------------------
// Encoding and decoding helpers shared by the generated-style models
// -----------------------------------------------------------------------------

/// Append `<name>value</name>` when the leaf is set.
pub(crate) fn push_leaf<T: fmt::Display>(parent: &mut XmlElement, name: &str, value: Option<&T>) {
    if let Some(value) = value {
        parent.push(XmlElement::leaf(name, value));
    }
}

/// Append `child` unless it carries no content.
pub(crate) fn push_container(parent: &mut XmlElement, child: XmlElement) {
    if !child.children.is_empty() {
        parent.push(child);
    }
}

/// Parse an optional leaf with `FromStr`.
pub(crate) fn parse_leaf<T: FromStr>(
    element: &XmlElement,
    leaf: &'static str,
) -> Result<Option<T>, ModelError> {
    element
        .child_text(leaf)
        .map(|text| {
            text.parse().map_err(|_| ModelError::InvalidValue {
                leaf,
                value: text.to_string(),
            })
        })
        .transpose()
}

/// Parse an optional enumeration leaf.
pub(crate) fn enum_leaf<E: YangEnum>(
    element: &XmlElement,
    leaf: &'static str,
) -> Result<Option<E>, ModelError> {
    element
        .child_text(leaf)
        .map(|text| {
            // identityref-style values may carry a module prefix
            let name = text.rsplit_once(':').map_or(text, |(_, local)| local);
            E::from_yang_name(name).ok_or_else(|| ModelError::UnknownEnum {
                leaf,
                value: text.to_string(),
            })
        })
        .transpose()
}

/// Parse a mandatory list key leaf.
pub(crate) fn key_leaf<T: FromStr>(
    element: &XmlElement,
    list: &'static str,
    key: &'static str,
) -> Result<T, ModelError> {
    parse_leaf(element, key)?.ok_or(ModelError::MissingKey { list, key })
}

/// Fail on the first repeated key.
pub(crate) fn check_unique_keys<K>(
    list: &'static str,
    keys: impl IntoIterator<Item = K>,
) -> Result<(), ModelError>
where
    K: fmt::Display + Eq + std::hash::Hash,
{
    let mut seen = HashSet::new();
    for key in keys {
        if seen.contains(&key) {
            return Err(ModelError::DuplicateKey {
                list,
                key: key.to_string(),
            });
        }
        seen.insert(key);
    }
    Ok(())
}

/// Check that a decoded top-level element is the expected node.
pub(crate) fn expect_element(
    element: &XmlElement,
    name: &'static str,
) -> Result<(), ModelError> {
    if element.local_name() != name {
        return Err(ModelError::UnexpectedElement {
            expected: name,
            found: element.local_name().to_string(),
        });
    }
    Ok(())
}
