//! # netconf-crud
//!
//! Typed NETCONF/YANG create, read, update and delete for network devices.
//!
//! netconf-crud opens a NETCONF session over SSH (or plain TCP in a lab),
//! exchanges hellos and then pushes or reads strongly typed model objects
//! through a small CRUD service.
//!
//! ## Features
//!
//! - Async NETCONF over SSH via russh (`netconf` subsystem)
//! - RFC 6242 end-of-message and chunked framing
//! - Typed models for Cisco-IOS-XR-ipv4-arp-cfg and Cisco-IOS-XR-clns-isis-oper
//! - Datastore selection from advertised capabilities
//! - IS-IS neighbor report formatting
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use netconf_crud::model::clns_isis_oper::Isis;
//! use netconf_crud::{CrudService, Session, SessionBuilder};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), netconf_crud::Error> {
//!     let mut session = SessionBuilder::new("192.168.1.1")
//!         .username("admin")
//!         .password("secret")
//!         .connect()
//!         .await?;
//!
//!     let isis = CrudService::new()
//!         .read(&mut session, &Isis::with_instance("DEFAULT"))
//!         .await?;
//!     println!("{}", netconf_crud::report::process_isis(&isis)?);
//!
//!     session.close().await?;
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod crud;
pub mod device;
pub mod error;
pub mod logging;
pub mod model;
pub mod report;
pub mod samples;
pub mod session;
pub mod transport;
pub mod xml;

// Re-export main types for convenience
pub use crud::CrudService;
pub use device::{DeviceArgs, DeviceUrl};
pub use error::{Error, Result};
pub use logging::LogConfig;
pub use model::Entity;
pub use session::{NetconfSession, Session, SessionBuilder};
pub use transport::{AuthMethod, HostKeyVerification, Scheme, TransportConfig};
