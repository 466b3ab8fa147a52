//! Static ARP configuration for VRF RED.

use std::net::Ipv4Addr;

use log::debug;

use super::finish;
use crate::crud::CrudService;
use crate::error::Result;
use crate::model::ipv4_arp_cfg::{ArpEncap, ArpEntryType, Arpgmp, Entry, Vrf};
use crate::session::Session;

/// Entries configured in VRF RED: address, MAC address, interface.
const RED_ENTRIES: [(Ipv4Addr, &str, &str); 2] = [
    (
        Ipv4Addr::new(172, 16, 0, 1),
        "52:54:00:28:89:88",
        "GigabitEthernet0/0/0/0",
    ),
    (
        Ipv4Addr::new(172, 16, 0, 4),
        "52:54:00:7d:8f:8f",
        "GigabitEthernet0/0/0/1",
    ),
];

/// Add VRF RED with its static ARPA entries to `arpgmp`.
pub fn config_arpgmp(arpgmp: &mut Arpgmp) -> Result<()> {
    let mut vrf = Vrf::new("RED");

    for (address, mac, interface) in RED_ENTRIES {
        let mut entry = Entry::new(address);
        entry.mac_address = Some(mac.parse()?);
        entry.encapsulation = Some(ArpEncap::Arpa);
        entry.entry_type = Some(ArpEntryType::Static);
        entry.interface = Some(interface.to_string());
        vrf.entries.entry.push(entry);
    }

    arpgmp.vrf.push(vrf);
    Ok(())
}

fn red_config() -> Result<Arpgmp> {
    let mut arpgmp = Arpgmp::default();
    config_arpgmp(&mut arpgmp)?;
    Ok(arpgmp)
}

/// Create the VRF RED entries, then close the session.
pub async fn create<S: Session>(mut session: S) -> Result<()> {
    let outcome = async {
        let arpgmp = red_config()?;
        debug!("Creating {} ARP entries", arpgmp.vrf[0].entries.entry.len());
        CrudService::new().create(&mut session, &arpgmp).await
    }
    .await;
    finish(session, outcome).await
}

/// Merge the VRF RED entries, then close the session.
pub async fn update<S: Session>(mut session: S) -> Result<()> {
    let outcome = async {
        let arpgmp = red_config()?;
        CrudService::new().update(&mut session, &arpgmp).await
    }
    .await;
    finish(session, outcome).await
}

/// Delete all static ARP configuration, then close the session.
pub async fn delete<S: Session>(mut session: S) -> Result<()> {
    let outcome = CrudService::new()
        .delete(&mut session, &Arpgmp::default())
        .await;
    finish(session, outcome).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::{Entity, MacAddress};
    use crate::session::mock::MockSession;
    use crate::session::reply::ErrorSeverity;
    use crate::session::{Capabilities, Datastore, Rpc, RpcErrorInfo, RpcReply};

    #[test]
    fn test_config_arpgmp() {
        let mut arpgmp = Arpgmp::default();
        config_arpgmp(&mut arpgmp).unwrap();

        assert_eq!(arpgmp.vrf.len(), 1);
        assert_eq!(arpgmp.vrf[0].vrf_name, "RED");
        let entries = &arpgmp.vrf[0].entries.entry;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].address, Ipv4Addr::new(172, 16, 0, 4));
        assert_eq!(
            entries[1].mac_address,
            Some(MacAddress::new([0x52, 0x54, 0x00, 0x7d, 0x8f, 0x8f]))
        );
        assert!(arpgmp.validate().is_ok());
    }

    #[tokio::test]
    async fn test_create_submits_red_entries_and_closes() {
        let session = MockSession::new();
        let recording = session.recording();

        create(session).await.unwrap();

        let recording = recording.lock().unwrap();
        assert_eq!(recording.closes, 1);
        assert_eq!(recording.rpcs.len(), 1);

        let Rpc::EditConfig { target, config } = &recording.rpcs[0] else {
            panic!("expected edit-config, got {:?}", recording.rpcs[0]);
        };
        assert_eq!(*target, Datastore::Running);
        assert_eq!(config.attribute("operation"), Some("create"));

        let vrfs: Vec<_> = config.children_named("vrf").collect();
        assert_eq!(vrfs.len(), 1);
        assert_eq!(vrfs[0].child_text("vrf-name"), Some("RED"));

        let entries: Vec<_> = vrfs[0]
            .child("entries")
            .unwrap()
            .children_named("entry")
            .collect();
        assert_eq!(entries.len(), 2);

        let submitted: Vec<_> = entries
            .iter()
            .map(|e| {
                (
                    e.child_text("address").unwrap(),
                    e.child_text("mac-address").unwrap(),
                    e.child_text("entry-type").unwrap(),
                )
            })
            .collect();
        assert_eq!(
            submitted,
            vec![
                ("172.16.0.1", "52:54:00:28:89:88", "static"),
                ("172.16.0.4", "52:54:00:7d:8f:8f", "static"),
            ]
        );
    }

    #[tokio::test]
    async fn test_create_failure_still_closes() {
        let failure = RpcReply {
            errors: vec![RpcErrorInfo {
                error_type: "application".to_string(),
                tag: "data-exists".to_string(),
                severity: ErrorSeverity::Error,
                path: None,
                message: Some("entry exists".to_string()),
            }],
            ..Default::default()
        };
        let session = MockSession::new().reply(failure);
        let recording = session.recording();

        let result = create(session).await;
        assert!(matches!(result, Err(Error::Rpc(_))));
        assert_eq!(recording.lock().unwrap().closes, 1);
    }

    #[tokio::test]
    async fn test_update_merges() {
        let session = MockSession::new();
        let recording = session.recording();

        update(session).await.unwrap();

        let recording = recording.lock().unwrap();
        assert!(matches!(
            &recording.rpcs[0],
            Rpc::EditConfig { config, .. } if config.attribute("operation") == Some("merge")
        ));
        assert_eq!(recording.closes, 1);
    }

    #[tokio::test]
    async fn test_delete_sends_empty_container() {
        let session = MockSession::new();
        let recording = session.recording();

        delete(session).await.unwrap();

        let recording = recording.lock().unwrap();
        let Rpc::EditConfig { config, .. } = &recording.rpcs[0] else {
            panic!("expected edit-config");
        };
        assert_eq!(config.local_name(), "arpgmp");
        assert_eq!(config.attribute("operation"), Some("delete"));
        assert!(config.children.is_empty());
        assert_eq!(recording.closes, 1);
    }

    #[tokio::test]
    async fn test_no_writable_datastore_still_closes() {
        let session = MockSession::with_capabilities(Capabilities::default());
        let recording = session.recording();

        assert!(create(session).await.is_err());
        let recording = recording.lock().unwrap();
        assert!(recording.rpcs.is_empty());
        assert_eq!(recording.closes, 1);
    }
}
