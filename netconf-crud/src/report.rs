//! IS-IS neighbor report.
//!
//! Renders decoded IS-IS operational state the way `show isis neighbors`
//! does: a host-name block, then per instance a fixed-width neighbor table
//! and a neighbor count.

use std::collections::HashMap;
use std::fmt::Write;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ReportError, Result};
use crate::model::YangEnum;
use crate::model::clns_isis_oper::{HostName, Instance, Isis, Neighbor};

const NEIGHBOR_HEADER: &str =
    "System Id      Interface        SNPA           State Holdtime Type IETF-NSF";

const NO_HOSTNAME: &str = "No IS-IS hostname found\n";
const NO_INSTANCES: &str = "No IS-IS instances found";

type ReportResult = std::result::Result<(), ReportError>;

/// First run of digits in an interface name.
static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new("[0-9]+").expect("Invalid regex pattern"));

/// Format every instance in `isis`.
///
/// When no instance carries host names or neighbors the output is a fixed
/// placeholder.
pub fn process_isis(isis: &Isis) -> Result<String> {
    let instances = &isis.instances.instance;
    if instances.iter().all(is_empty_instance) {
        return Ok(format!("{}{}", NO_HOSTNAME, NO_INSTANCES));
    }

    let mut hosts = String::new();
    let mut neighbors = String::new();
    for instance in instances {
        for host in &instance.host_names.host_name {
            write_host(&mut hosts, host)?;
        }
        if !neighbors.is_empty() {
            neighbors.push_str("\n\n");
        }
        write_neighbors(&mut neighbors, instance)?;
    }

    hosts.push_str(&neighbors);
    Ok(hosts)
}

/// Key-only instance: nothing but its name came back.
fn is_empty_instance(instance: &Instance) -> bool {
    instance.host_names.host_name.is_empty() && instance.neighbors.neighbor.is_empty()
}

fn write_host(out: &mut String, host: &HostName) -> ReportResult {
    let name = host
        .host_name
        .as_deref()
        .ok_or(ReportError::MissingLeaf("host-name"))?;
    let level = host
        .host_levels
        .ok_or(ReportError::MissingLeaf("host-levels"))?;

    writeln!(
        out,
        "Hostname: {:<20} System Id: {:<14} Level: {:<13}",
        name,
        host.system_id,
        level.yang_name()
    )?;
    Ok(())
}

fn write_neighbors(out: &mut String, instance: &Instance) -> ReportResult {
    write!(
        out,
        "IS-IS {} neighbors:\n{}",
        instance.instance_name, NEIGHBOR_HEADER
    )?;

    let names: HashMap<&str, Option<&str>> = instance
        .host_names
        .host_name
        .iter()
        .map(|h| (h.system_id.as_str(), h.host_name.as_deref()))
        .collect();

    let neighbors = &instance.neighbors.neighbor;
    for neighbor in neighbors {
        out.push('\n');
        write_row(out, neighbor, &names)?;
    }

    if !neighbors.is_empty() {
        write!(out, "\n\nTotal neighbor count: {}", neighbors.len())?;
    }
    Ok(())
}

fn write_row(
    out: &mut String,
    neighbor: &Neighbor,
    names: &HashMap<&str, Option<&str>>,
) -> ReportResult {
    let system = match names.get(neighbor.system_id.as_str()) {
        Some(Some(name)) => *name,
        Some(None) => return Err(ReportError::MissingLeaf("host-name")),
        None => return Err(ReportError::UnknownSystemId(neighbor.system_id.clone())),
    };

    let snpa = neighbor
        .neighbor_snpa
        .as_deref()
        .ok_or(ReportError::MissingLeaf("neighbor-snpa"))?;
    let state = neighbor
        .neighbor_state
        .ok_or(ReportError::MissingLeaf("neighbor-state"))?;
    let circuit_type = neighbor
        .neighbor_circuit_type
        .ok_or(ReportError::MissingLeaf("neighbor-circuit-type"))?;
    let holdtime = neighbor
        .neighbor_holdtime
        .ok_or(ReportError::MissingLeaf("neighbor-holdtime"))?;
    let nsf = match neighbor.neighbor_ietf_nsf_capable_flag {
        Some(flag) if flag != 0 => "Y",
        _ => "N",
    };

    write!(
        out,
        "{:<14} {:<16} {:<14} {:<5} {:<8} {:<4} {:^8}",
        system,
        abbreviate_interface(&neighbor.interface_name),
        snpa,
        neighbor_state_label(state.value())?,
        holdtime,
        circuit_type_label(circuit_type.value())?,
        nsf
    )?;
    Ok(())
}

/// Label for an adjacency state code.
pub fn neighbor_state_label(code: u32) -> std::result::Result<&'static str, ReportError> {
    match code {
        0 => Ok("Up"),
        1 => Ok("Init"),
        2 => Ok("Fail"),
        other => Err(ReportError::UnknownNeighborState(other)),
    }
}

/// Label for a circuit type code.
pub fn circuit_type_label(code: u32) -> std::result::Result<&'static str, ReportError> {
    match code {
        0 => Ok("None"),
        1 => Ok("L1"),
        2 => Ok("L2"),
        3 => Ok("L1L2"),
        other => Err(ReportError::UnknownCircuitType(other)),
    }
}

/// Short interface name: the first two characters followed by the first run
/// of digits, so `GigabitEthernet0/0/0/0` becomes `Gi0`.
pub fn abbreviate_interface(name: &str) -> String {
    let prefix: String = name.chars().take(2).collect();
    match DIGITS.find(name) {
        Some(digits) => prefix + digits.as_str(),
        None => prefix,
    }
}
