//! Cisco-IOS-XR-clns-isis-oper: IS-IS operational state (subset).
//!
//! ```text
//! isis
//!  +-- instances
//!       +-- instance* [instance-name]
//!            +-- host-names
//!            |    +-- host-name* [system-id]
//!            |         +-- host-levels
//!            |         +-- host-name
//!            +-- neighbors
//!                 +-- neighbor* [system-id interface-name]
//!                      +-- neighbor-snpa
//!                      +-- neighbor-state
//!                      +-- neighbor-circuit-type
//!                      +-- neighbor-holdtime
//!                      +-- neighbor-ietf-nsf-capable-flag
//! ```

use super::{
    Entity, check_unique_keys, enum_leaf, expect_element, key_leaf, parse_leaf, push_container,
    push_leaf,
};
use crate::error::ModelError;
use crate::xml::XmlElement;

yang_enum! {
    /// IS-IS adjacency state.
    pub enum IsisAdjState {
        Up = (0, "isis-adj-up-state"),
        Init = (1, "isis-adj-init-state"),
        Failed = (2, "isis-adj-failed-state"),
    }
}

yang_enum! {
    /// IS-IS levels.
    pub enum IsisLevels {
        NoLevels = (0, "isis-levels-none"),
        Level1 = (1, "isis-levels-1"),
        Level2 = (2, "isis-levels-2"),
        Level12 = (3, "isis-levels-12"),
    }
}

/// IS-IS operational data root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Isis {
    pub instances: Instances,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Instances {
    pub instance: Vec<Instance>,
}

/// One IS-IS routing instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Instance {
    /// List key.
    pub instance_name: String,
    pub host_names: HostNames,
    pub neighbors: Neighbors,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostNames {
    pub host_name: Vec<HostName>,
}

/// Dynamic host name mapping for a system id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostName {
    /// List key.
    pub system_id: String,
    pub host_levels: Option<IsisLevels>,
    pub host_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Neighbors {
    pub neighbor: Vec<Neighbor>,
}

/// IS-IS adjacency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Neighbor {
    /// List key.
    pub system_id: String,
    /// List key.
    pub interface_name: String,
    pub neighbor_snpa: Option<String>,
    pub neighbor_state: Option<IsisAdjState>,
    pub neighbor_circuit_type: Option<IsisLevels>,
    /// Seconds.
    pub neighbor_holdtime: Option<u32>,
    pub neighbor_ietf_nsf_capable_flag: Option<u32>,
}

impl Isis {
    /// Key object selecting one instance by name.
    pub fn with_instance(instance_name: impl Into<String>) -> Self {
        Self {
            instances: Instances {
                instance: vec![Instance::new(instance_name)],
            },
        }
    }
}

impl Instance {
    pub fn new(instance_name: impl Into<String>) -> Self {
        Self {
            instance_name: instance_name.into(),
            ..Default::default()
        }
    }

    fn to_element(&self) -> XmlElement {
        let mut instance = XmlElement::new("instance");
        instance.push(XmlElement::leaf("instance-name", &self.instance_name));

        let mut host_names = XmlElement::new("host-names");
        for host in &self.host_names.host_name {
            let mut element = XmlElement::new("host-name");
            element.push(XmlElement::leaf("system-id", &host.system_id));
            push_leaf(&mut element, "host-levels", host.host_levels.as_ref());
            push_leaf(&mut element, "host-name", host.host_name.as_ref());
            host_names.push(element);
        }
        push_container(&mut instance, host_names);

        let mut neighbors = XmlElement::new("neighbors");
        for neighbor in &self.neighbors.neighbor {
            neighbors.push(neighbor.to_element());
        }
        push_container(&mut instance, neighbors);

        instance
    }

    fn from_element(element: &XmlElement) -> Result<Self, ModelError> {
        let host_name = match element.child("host-names") {
            Some(hosts) => hosts
                .children_named("host-name")
                .map(|h| -> Result<HostName, ModelError> {
                    Ok(HostName {
                        system_id: key_leaf(h, "host-name", "system-id")?,
                        host_levels: enum_leaf(h, "host-levels")?,
                        host_name: parse_leaf(h, "host-name")?,
                    })
                })
                .collect::<Result<_, _>>()?,
            None => Vec::new(),
        };

        let neighbor = match element.child("neighbors") {
            Some(neighbors) => neighbors
                .children_named("neighbor")
                .map(Neighbor::from_element)
                .collect::<Result<_, _>>()?,
            None => Vec::new(),
        };

        Ok(Self {
            instance_name: key_leaf(element, "instance", "instance-name")?,
            host_names: HostNames { host_name },
            neighbors: Neighbors { neighbor },
        })
    }
}

impl Neighbor {
    fn to_element(&self) -> XmlElement {
        let mut element = XmlElement::new("neighbor");
        element.push(XmlElement::leaf("system-id", &self.system_id));
        element.push(XmlElement::leaf("interface-name", &self.interface_name));
        push_leaf(&mut element, "neighbor-snpa", self.neighbor_snpa.as_ref());
        push_leaf(&mut element, "neighbor-state", self.neighbor_state.as_ref());
        push_leaf(
            &mut element,
            "neighbor-circuit-type",
            self.neighbor_circuit_type.as_ref(),
        );
        push_leaf(
            &mut element,
            "neighbor-holdtime",
            self.neighbor_holdtime.as_ref(),
        );
        push_leaf(
            &mut element,
            "neighbor-ietf-nsf-capable-flag",
            self.neighbor_ietf_nsf_capable_flag.as_ref(),
        );
        element
    }

    fn from_element(element: &XmlElement) -> Result<Self, ModelError> {
        Ok(Self {
            system_id: key_leaf(element, "neighbor", "system-id")?,
            interface_name: key_leaf(element, "neighbor", "interface-name")?,
            neighbor_snpa: parse_leaf(element, "neighbor-snpa")?,
            neighbor_state: enum_leaf(element, "neighbor-state")?,
            neighbor_circuit_type: enum_leaf(element, "neighbor-circuit-type")?,
            neighbor_holdtime: parse_leaf(element, "neighbor-holdtime")?,
            neighbor_ietf_nsf_capable_flag: parse_leaf(element, "neighbor-ietf-nsf-capable-flag")?,
        })
    }
}

impl Entity for Isis {
    const MODULE: &'static str = "Cisco-IOS-XR-clns-isis-oper";
    const NAMESPACE: &'static str = "http://cisco.com/ns/yang/Cisco-IOS-XR-clns-isis-oper";
    const NAME: &'static str = "isis";

    fn to_element(&self) -> XmlElement {
        let mut root = XmlElement::new(Self::NAME).with_namespace(Self::NAMESPACE);
        let mut instances = XmlElement::new("instances");
        for instance in &self.instances.instance {
            instances.push(instance.to_element());
        }
        push_container(&mut root, instances);
        root
    }

    fn from_element(element: &XmlElement) -> Result<Self, ModelError> {
        expect_element(element, Self::NAME)?;
        let instance = match element.child("instances") {
            Some(instances) => instances
                .children_named("instance")
                .map(Instance::from_element)
                .collect::<Result<_, _>>()?,
            None => Vec::new(),
        };
        Ok(Self {
            instances: Instances { instance },
        })
    }

    fn validate(&self) -> Result<(), ModelError> {
        let instances = &self.instances.instance;
        if instances.iter().any(|i| i.instance_name.is_empty()) {
            return Err(ModelError::MissingKey {
                list: "instance",
                key: "instance-name",
            });
        }
        check_unique_keys(
            "instance",
            instances.iter().map(|i| i.instance_name.as_str()),
        )
    }
}
