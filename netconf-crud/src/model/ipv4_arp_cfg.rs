//! Cisco-IOS-XR-ipv4-arp-cfg: static ARP configuration per VRF.
//!
//! ```text
//! arpgmp
//!  +-- vrf* [vrf-name]
//!       +-- entries
//!            +-- entry* [address]
//!                 +-- mac-address
//!                 +-- encapsulation
//!                 +-- entry-type
//!                 +-- interface
//! ```

use std::net::Ipv4Addr;

use super::{
    Entity, MacAddress, check_unique_keys, enum_leaf, expect_element, key_leaf, parse_leaf,
    push_container, push_leaf,
};
use crate::error::ModelError;
use crate::xml::XmlElement;

yang_enum! {
    /// ARP encapsulation.
    pub enum ArpEncap {
        Arpa = (1, "arpa"),
        Srp = (4, "srp"),
        Srpa = (5, "srpa"),
        Srpb = (6, "srpb"),
    }
}

yang_enum! {
    /// ARP entry type.
    pub enum ArpEntryType {
        Static = (0, "static"),
        Alias = (1, "alias"),
    }
}

/// ARP configuration root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arpgmp {
    pub vrf: Vec<Vrf>,
}

/// Per-VRF ARP configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vrf {
    /// List key.
    pub vrf_name: String,
    pub entries: Entries,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entries {
    pub entry: Vec<Entry>,
}

/// Static ARP entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// List key.
    pub address: Ipv4Addr,
    pub mac_address: Option<MacAddress>,
    pub encapsulation: Option<ArpEncap>,
    pub entry_type: Option<ArpEntryType>,
    pub interface: Option<String>,
}

impl Vrf {
    pub fn new(vrf_name: impl Into<String>) -> Self {
        Self {
            vrf_name: vrf_name.into(),
            entries: Entries::default(),
        }
    }

    fn to_element(&self) -> XmlElement {
        let mut vrf = XmlElement::new("vrf");
        vrf.push(XmlElement::leaf("vrf-name", &self.vrf_name));

        let mut entries = XmlElement::new("entries");
        for entry in &self.entries.entry {
            entries.push(entry.to_element());
        }
        push_container(&mut vrf, entries);
        vrf
    }

    fn from_element(element: &XmlElement) -> Result<Self, ModelError> {
        let entry = match element.child("entries") {
            Some(entries) => entries
                .children_named("entry")
                .map(Entry::from_element)
                .collect::<Result<_, _>>()?,
            None => Vec::new(),
        };
        Ok(Self {
            vrf_name: key_leaf(element, "vrf", "vrf-name")?,
            entries: Entries { entry },
        })
    }
}

impl Entry {
    /// Entry with only its key set.
    pub fn new(address: Ipv4Addr) -> Self {
        Self {
            address,
            mac_address: None,
            encapsulation: None,
            entry_type: None,
            interface: None,
        }
    }

    fn to_element(&self) -> XmlElement {
        let mut entry = XmlElement::new("entry");
        entry.push(XmlElement::leaf("address", self.address));
        push_leaf(&mut entry, "mac-address", self.mac_address.as_ref());
        push_leaf(&mut entry, "encapsulation", self.encapsulation.as_ref());
        push_leaf(&mut entry, "entry-type", self.entry_type.as_ref());
        push_leaf(&mut entry, "interface", self.interface.as_ref());
        entry
    }

    fn from_element(element: &XmlElement) -> Result<Self, ModelError> {
        Ok(Self {
            address: key_leaf(element, "entry", "address")?,
            mac_address: parse_leaf(element, "mac-address")?,
            encapsulation: enum_leaf(element, "encapsulation")?,
            entry_type: enum_leaf(element, "entry-type")?,
            interface: parse_leaf(element, "interface")?,
        })
    }
}

impl Entity for Arpgmp {
    const MODULE: &'static str = "Cisco-IOS-XR-ipv4-arp-cfg";
    const NAMESPACE: &'static str = "http://cisco.com/ns/yang/Cisco-IOS-XR-ipv4-arp-cfg";
    const NAME: &'static str = "arpgmp";

    fn to_element(&self) -> XmlElement {
        let mut root = XmlElement::new(Self::NAME).with_namespace(Self::NAMESPACE);
        for vrf in &self.vrf {
            root.push(vrf.to_element());
        }
        root
    }

    fn from_element(element: &XmlElement) -> Result<Self, ModelError> {
        expect_element(element, Self::NAME)?;
        Ok(Self {
            vrf: element
                .children_named("vrf")
                .map(Vrf::from_element)
                .collect::<Result<_, _>>()?,
        })
    }

    fn validate(&self) -> Result<(), ModelError> {
        check_unique_keys("vrf", self.vrf.iter().map(|v| v.vrf_name.as_str()))?;
        for vrf in &self.vrf {
            if vrf.vrf_name.is_empty() {
                return Err(ModelError::MissingKey {
                    list: "vrf",
                    key: "vrf-name",
                });
            }
            check_unique_keys("entry", vrf.entries.entry.iter().map(|e| e.address))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::YangEnum;

    fn sample() -> Arpgmp {
        let mut vrf = Vrf::new("RED");
        let mut entry = Entry::new(Ipv4Addr::new(172, 16, 0, 1));
        entry.mac_address = Some("52:54:00:28:89:88".parse().unwrap());
        entry.encapsulation = Some(ArpEncap::Arpa);
        entry.entry_type = Some(ArpEntryType::Static);
        entry.interface = Some("GigabitEthernet0/0/0/0".to_string());
        vrf.entries.entry.push(entry);
        Arpgmp { vrf: vec![vrf] }
    }

    #[test]
    fn test_encode_layout() {
        let xml = sample().to_element().to_xml().unwrap();
        assert_eq!(
            xml,
            concat!(
                r#"<arpgmp xmlns="http://cisco.com/ns/yang/Cisco-IOS-XR-ipv4-arp-cfg">"#,
                "<vrf><vrf-name>RED</vrf-name><entries><entry>",
                "<address>172.16.0.1</address>",
                "<mac-address>52:54:00:28:89:88</mac-address>",
                "<encapsulation>arpa</encapsulation>",
                "<entry-type>static</entry-type>",
                "<interface>GigabitEthernet0/0/0/0</interface>",
                "</entry></entries></vrf></arpgmp>"
            )
        );
    }

    #[test]
    fn test_key_only_vrf_omits_entries() {
        let arpgmp = Arpgmp {
            vrf: vec![Vrf::new("BLUE")],
        };
        let element = arpgmp.to_element();
        let vrf = element.child("vrf").unwrap();
        assert!(vrf.child("entries").is_none());
        assert_eq!(vrf.child_text("vrf-name"), Some("BLUE"));
    }

    #[test]
    fn test_decode() {
        let element = XmlElement::parse(&sample().to_element().to_xml().unwrap()).unwrap();
        let decoded = Arpgmp::from_element(&element).unwrap();
        assert_eq!(decoded, sample());
        let entry = &decoded.vrf[0].entries.entry[0];
        assert_eq!(entry.entry_type.unwrap().value(), 0);
    }

    #[test]
    fn test_decode_unknown_encapsulation() {
        let element = XmlElement::parse(
            "<arpgmp><vrf><vrf-name>RED</vrf-name><entries><entry>\
             <address>10.0.0.1</address><encapsulation>snap</encapsulation>\
             </entry></entries></vrf></arpgmp>",
        )
        .unwrap();
        assert!(matches!(
            Arpgmp::from_element(&element),
            Err(ModelError::UnknownEnum { leaf: "encapsulation", .. })
        ));
    }

    #[test]
    fn test_validate_duplicate_entry() {
        let mut arpgmp = sample();
        let duplicate = arpgmp.vrf[0].entries.entry[0].clone();
        arpgmp.vrf[0].entries.entry.push(duplicate);
        assert!(matches!(
            arpgmp.validate(),
            Err(ModelError::DuplicateKey { list: "entry", .. })
        ));
    }

    #[test]
    fn test_validate_duplicate_vrf() {
        let arpgmp = Arpgmp {
            vrf: vec![Vrf::new("RED"), Vrf::new("RED")],
        };
        assert!(matches!(
            arpgmp.validate(),
            Err(ModelError::DuplicateKey { list: "vrf", .. })
        ));
    }
}
