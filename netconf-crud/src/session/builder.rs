//! Builder for opening NETCONF sessions.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use super::SessionOptions;
use super::netconf::NetconfSession;
use crate::device::DeviceUrl;
use crate::error::{Result, UsageError};
use crate::logging::LogConfig;
use crate::transport::{
    AuthMethod, DeviceTransport, HostKeyVerification, Scheme, TransportConfig,
};

/// Builder for constructing NETCONF sessions.
///
/// # Example
///
/// ```rust,no_run
/// use netconf_crud::{Session, SessionBuilder};
///
/// # async fn example() -> Result<(), netconf_crud::Error> {
/// let mut session = SessionBuilder::new("192.168.1.1")
///     .username("admin")
///     .password("secret")
///     .connect()
///     .await?;
///
/// println!("{} capabilities", session.capabilities().len());
/// session.close().await?;
/// # Ok(())
/// # }
/// ```
pub struct SessionBuilder {
    host: String,
    port: u16,
    scheme: Scheme,
    username: Option<String>,
    auth: AuthMethod,
    timeout: Duration,
    rpc_timeout: Option<Duration>,
    host_key_verification: HostKeyVerification,
    known_hosts_path: Option<PathBuf>,
    log: LogConfig,
    max_message_size: usize,
}

impl SessionBuilder {
    /// Create a new session builder for the specified host.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Scheme::DEFAULT_PORT,
            scheme: Scheme::Ssh,
            username: None,
            auth: AuthMethod::None,
            timeout: Duration::from_secs(30),
            rpc_timeout: None,
            host_key_verification: HostKeyVerification::default(),
            known_hosts_path: None,
            log: LogConfig::default(),
            max_message_size: SessionOptions::default().max_message_size,
        }
    }

    /// Create a builder from a parsed device URL.
    pub fn from_device(device: &DeviceUrl) -> Self {
        let mut builder = Self::new(device.host.clone())
            .port(device.port)
            .scheme(device.scheme);
        if let Some(ref username) = device.username {
            builder = builder.username(username.clone());
        }
        if let Some(ref password) = device.password {
            builder = builder.password(password.expose_secret());
        }
        builder
    }

    /// Set the NETCONF port (default: 830).
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the transport scheme (default: SSH).
    pub fn scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Set the username for authentication.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set password authentication.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.auth = AuthMethod::Password(SecretString::from(password.into()));
        self
    }

    /// Set private key authentication.
    pub fn private_key(mut self, key_path: impl Into<PathBuf>) -> Self {
        self.auth = AuthMethod::PrivateKey {
            path: key_path.into(),
            passphrase: None,
        };
        self
    }

    /// Set private key authentication with passphrase.
    pub fn private_key_with_passphrase(
        mut self,
        key_path: impl Into<PathBuf>,
        passphrase: impl Into<String>,
    ) -> Self {
        self.auth = AuthMethod::PrivateKey {
            path: key_path.into(),
            passphrase: Some(SecretString::from(passphrase.into())),
        };
        self
    }

    /// Set the connection timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Limit how long each RPC waits for its reply (default: no limit).
    pub fn rpc_timeout(mut self, timeout: Duration) -> Self {
        self.rpc_timeout = Some(timeout);
        self
    }

    /// Set the host key verification mode.
    pub fn host_key_verification(mut self, mode: HostKeyVerification) -> Self {
        self.host_key_verification = mode;
        self
    }

    /// Use a specific known_hosts file.
    pub fn known_hosts_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.known_hosts_path = Some(path.into());
        self
    }

    /// Set the logging configuration for the session.
    pub fn log_config(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }

    /// Set the largest message accepted from the device.
    pub fn max_message_size(mut self, bytes: usize) -> Self {
        self.max_message_size = bytes;
        self
    }

    /// Resolve the settings into transport and session configuration.
    fn build(self) -> Result<(Scheme, TransportConfig, SessionOptions)> {
        let username = match (self.scheme, self.username) {
            (_, Some(username)) => username,
            (Scheme::Tcp, None) => String::new(),
            (Scheme::Ssh, None) => return Err(UsageError::MissingSetting("username").into()),
        };

        let transport = TransportConfig {
            host: self.host,
            port: self.port,
            username,
            auth: self.auth,
            timeout: self.timeout,
            host_key_verification: self.host_key_verification,
            known_hosts_path: self.known_hosts_path,
        };

        let options = SessionOptions {
            rpc_timeout: self.rpc_timeout,
            trace_messages: self.log.trace_messages,
            max_message_size: self.max_message_size,
        };

        Ok((self.scheme, transport, options))
    }

    /// Connect, exchange hellos and return the open session.
    pub async fn connect(self) -> Result<NetconfSession<DeviceTransport>> {
        let (scheme, config, options) = self.build()?;
        let transport = DeviceTransport::connect(scheme, config).await?;
        NetconfSession::establish(transport, options).await
    }
}
