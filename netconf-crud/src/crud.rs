//! Create/read/update/delete over typed models.
//!
//! `CrudService` maps each operation onto NETCONF:
//!
//! | Operation     | RPC                                        |
//! |---------------|--------------------------------------------|
//! | `create`      | `<edit-config>`, `operation="create"`      |
//! | `update`      | `<edit-config>`, `operation="merge"`       |
//! | `delete`      | `<edit-config>`, `operation="delete"`      |
//! | `read`        | `<get>` with a subtree filter              |
//! | `read_config` | `<get-config>` on running with a filter    |
//!
//! Edits go to `running` when the device advertises `:writable-running`,
//! otherwise to `candidate` followed by `<commit>`.

use log::{debug, warn};

use crate::error::{Result, SessionError};
use crate::model::Entity;
use crate::session::capabilities::{CANDIDATE, WRITABLE_RUNNING};
use crate::session::rpc::NETCONF_NS;
use crate::session::{Datastore, EditOperation, Rpc, Session};

/// Stateless CRUD service.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrudService;

impl CrudService {
    pub fn new() -> Self {
        Self
    }

    /// Create `entity` on the device. Fails if it already exists.
    pub async fn create<S: Session, E: Entity>(&self, session: &mut S, entity: &E) -> Result<()> {
        self.edit(session, entity, EditOperation::Create).await
    }

    /// Merge `entity` into the device configuration.
    pub async fn update<S: Session, E: Entity>(&self, session: &mut S, entity: &E) -> Result<()> {
        self.edit(session, entity, EditOperation::Merge).await
    }

    /// Delete the subtree rooted at `entity`.
    pub async fn delete<S: Session, E: Entity>(&self, session: &mut S, entity: &E) -> Result<()> {
        self.edit(session, entity, EditOperation::Delete).await
    }

    /// Read configuration and state matching the key object `filter`.
    ///
    /// A reply without matching data yields `E::default()`.
    pub async fn read<S: Session, E: Entity>(&self, session: &mut S, filter: &E) -> Result<E> {
        check_module::<S, E>(session);
        let rpc = Rpc::Get {
            filter: Some(filter.to_element()),
        };
        self.fetch(session, &rpc).await
    }

    /// Read configuration only, from the running datastore.
    pub async fn read_config<S: Session, E: Entity>(
        &self,
        session: &mut S,
        filter: &E,
    ) -> Result<E> {
        check_module::<S, E>(session);
        let rpc = Rpc::GetConfig {
            source: Datastore::Running,
            filter: Some(filter.to_element()),
        };
        self.fetch(session, &rpc).await
    }

    async fn fetch<S: Session, E: Entity>(&self, session: &mut S, rpc: &Rpc) -> Result<E> {
        let reply = session.rpc(rpc).await?;
        let found = reply.data.as_ref().and_then(|data| data.child(E::NAME));

        match found {
            Some(element) => Ok(E::from_element(element)?),
            None => {
                debug!("No <{}> data in reply", E::NAME);
                Ok(E::default())
            }
        }
    }

    async fn edit<S: Session, E: Entity>(
        &self,
        session: &mut S,
        entity: &E,
        operation: EditOperation,
    ) -> Result<()> {
        entity.validate()?;
        check_module::<S, E>(session);

        let target = writable_datastore(session)?;

        let mut config = entity.to_element();
        config.set_attribute("xmlns:nc", NETCONF_NS);
        config.set_attribute("nc:operation", operation.as_str());

        debug!(
            "<edit-config> {} on <{}> in {}",
            operation,
            E::NAME,
            target.as_str()
        );
        session.rpc(&Rpc::EditConfig { target, config }).await?;

        if target == Datastore::Candidate {
            session.rpc(&Rpc::Commit).await?;
        }
        Ok(())
    }
}

/// Pick the datastore edits go to.
fn writable_datastore<S: Session>(session: &S) -> Result<Datastore> {
    let capabilities = session.capabilities();
    if capabilities.supports(WRITABLE_RUNNING) {
        Ok(Datastore::Running)
    } else if capabilities.supports(CANDIDATE) {
        Ok(Datastore::Candidate)
    } else {
        Err(SessionError::NoWritableDatastore.into())
    }
}

/// Warn when the device lists its modules and `E`'s module is not among them.
fn check_module<S: Session, E: Entity>(session: &S) {
    let capabilities = session.capabilities();
    if capabilities.modules().next().is_some() && !capabilities.has_module(E::MODULE) {
        warn!("Device does not advertise module {}", E::MODULE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ModelError};
    use crate::model::clns_isis_oper::Isis;
    use crate::model::clns_isis_oper::tests::DEFAULT_INSTANCE;
    use crate::model::ipv4_arp_cfg::{Arpgmp, Vrf};
    use crate::session::capabilities::BASE_1_1;
    use crate::session::mock::MockSession;
    use crate::session::reply::ErrorSeverity;
    use crate::session::{Capabilities, RpcErrorInfo, RpcReply};
    use crate::xml::XmlElement;

    fn red_vrf() -> Arpgmp {
        Arpgmp {
            vrf: vec![Vrf::new("RED")],
        }
    }

    #[tokio::test]
    async fn test_create_edits_running() {
        let mut session = MockSession::new();
        let recording = session.recording();
        let crud = CrudService::new();

        crud.create(&mut session, &red_vrf()).await.unwrap();

        let recording = recording.lock().unwrap();
        assert_eq!(recording.rpcs.len(), 1);
        match &recording.rpcs[0] {
            Rpc::EditConfig { target, config } => {
                assert_eq!(*target, Datastore::Running);
                assert_eq!(config.local_name(), "arpgmp");
                assert_eq!(config.attribute("operation"), Some("create"));
            }
            other => panic!("unexpected rpc {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_and_delete_operations() {
        let mut session = MockSession::new();
        let recording = session.recording();
        let crud = CrudService::new();

        crud.update(&mut session, &red_vrf()).await.unwrap();
        crud.delete(&mut session, &Arpgmp::default()).await.unwrap();

        let operations: Vec<_> = recording
            .lock()
            .unwrap()
            .rpcs
            .iter()
            .filter_map(|rpc| match rpc {
                Rpc::EditConfig { config, .. } => config.attribute("operation").map(str::to_string),
                _ => None,
            })
            .collect();
        assert_eq!(operations, vec!["merge", "delete"]);
    }

    #[tokio::test]
    async fn test_candidate_commit() {
        let mut session =
            MockSession::with_capabilities(Capabilities::new([BASE_1_1, CANDIDATE]));
        let recording = session.recording();
        let crud = CrudService::new();

        crud.update(&mut session, &red_vrf()).await.unwrap();

        let recording = recording.lock().unwrap();
        assert!(matches!(
            recording.rpcs[0],
            Rpc::EditConfig {
                target: Datastore::Candidate,
                ..
            }
        ));
        assert_eq!(recording.rpcs[1], Rpc::Commit);
    }

    #[tokio::test]
    async fn test_no_writable_datastore() {
        let mut session = MockSession::with_capabilities(Capabilities::new([BASE_1_1]));
        let result = CrudService::new().create(&mut session, &red_vrf()).await;
        assert!(matches!(
            result,
            Err(Error::Session(SessionError::NoWritableDatastore))
        ));
    }

    #[tokio::test]
    async fn test_invalid_entity_is_not_sent() {
        let mut session = MockSession::new();
        let recording = session.recording();
        let arpgmp = Arpgmp {
            vrf: vec![Vrf::new("RED"), Vrf::new("RED")],
        };

        let result = CrudService::new().create(&mut session, &arpgmp).await;
        assert!(matches!(
            result,
            Err(Error::Model(ModelError::DuplicateKey { .. }))
        ));
        assert!(recording.lock().unwrap().rpcs.is_empty());
    }

    #[tokio::test]
    async fn test_read_decodes_data() {
        let isis = XmlElement::parse(DEFAULT_INSTANCE).unwrap();
        let data = XmlElement::new("data").with_child(isis);
        let mut session = MockSession::new().reply(RpcReply::with_data(data));
        let recording = session.recording();

        let isis = CrudService::new()
            .read(&mut session, &Isis::with_instance("DEFAULT"))
            .await
            .unwrap();
        assert_eq!(isis.instances.instance[0].neighbors.neighbor.len(), 2);

        match &recording.lock().unwrap().rpcs[0] {
            Rpc::Get { filter: Some(filter) } => {
                assert_eq!(filter.local_name(), "isis");
                assert!(filter.attribute("operation").is_none());
            }
            other => panic!("unexpected rpc {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_read_without_data_is_empty() {
        let empty = RpcReply::with_data(XmlElement::new("data"));
        let mut session = MockSession::new().reply(empty);
        let isis = CrudService::new()
            .read_config(&mut session, &Isis::with_instance("DEFAULT"))
            .await
            .unwrap();
        assert_eq!(isis, Isis::default());
    }

    #[tokio::test]
    async fn test_rpc_error_aborts() {
        let failure = RpcReply {
            errors: vec![RpcErrorInfo {
                error_type: "application".to_string(),
                tag: "data-exists".to_string(),
                severity: ErrorSeverity::Error,
                path: None,
                message: None,
            }],
            ..Default::default()
        };
        let mut session = MockSession::new().reply(failure);

        let result = CrudService::new().create(&mut session, &red_vrf()).await;
        assert!(matches!(result, Err(Error::Rpc(_))));
    }
}
