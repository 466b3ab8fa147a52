//! NETCONF over SSH (RFC 6242) using russh.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use log::{debug, warn};
use russh::client::{self, Handle, Msg};
use russh::keys::{PrivateKeyWithHashAlg, PublicKey, load_secret_key};
use russh::{Channel, ChannelMsg};
use secrecy::ExposeSecret;

use super::Transport;
use super::config::{AuthMethod, HostKeyVerification, TransportConfig};
use crate::error::{Result, TransportError};

/// SSH subsystem name for NETCONF.
const NETCONF_SUBSYSTEM: &str = "netconf";

/// SSH transport with an open `netconf` subsystem channel.
pub struct SshTransport {
    /// The russh session handle.
    session: Handle<SshHandler>,

    /// Channel running the `netconf` subsystem.
    channel: Channel<Msg>,
}

impl SshTransport {
    /// Connect to the SSH server, authenticate and start the subsystem.
    pub async fn connect(config: TransportConfig) -> Result<Self> {
        let ssh_config = Arc::new(client::Config::default());

        let host_key_error: Arc<Mutex<Option<TransportError>>> = Arc::new(Mutex::new(None));

        let handler = SshHandler {
            host: config.host.clone(),
            port: config.port,
            host_key_verification: config.host_key_verification.clone(),
            known_hosts_path: config.known_hosts_path.clone(),
            host_key_error: host_key_error.clone(),
        };

        debug!("Connecting to {}:{} over SSH", config.host, config.port);
        let mut session = tokio::time::timeout(
            config.timeout,
            client::connect(ssh_config, (config.host.as_str(), config.port), handler),
        )
        .await
        .map_err(|_| TransportError::Timeout(config.timeout))?
        .map_err(|e| {
            // check_server_key may have stored a more precise reason
            let stored = host_key_error.lock().ok().and_then(|mut slot| slot.take());
            stored.unwrap_or(TransportError::Ssh(e))
        })?;

        Self::authenticate(&mut session, &config).await?;

        let channel = session
            .channel_open_session()
            .await
            .map_err(TransportError::Ssh)?;
        channel
            .request_subsystem(true, NETCONF_SUBSYSTEM)
            .await
            .map_err(|_| TransportError::SubsystemRefused(NETCONF_SUBSYSTEM.into()))?;
        debug!("Started '{}' subsystem", NETCONF_SUBSYSTEM);

        Ok(Self { session, channel })
    }

    /// Authenticate with the server.
    async fn authenticate(
        session: &mut Handle<SshHandler>,
        config: &TransportConfig,
    ) -> Result<()> {
        let success = match &config.auth {
            AuthMethod::None => session
                .authenticate_none(&config.username)
                .await
                .map_err(TransportError::Ssh)?
                .success(),
            AuthMethod::Password(password) => session
                .authenticate_password(&config.username, password.expose_secret())
                .await
                .map_err(TransportError::Ssh)?
                .success(),
            AuthMethod::PrivateKey { path, passphrase } => {
                let key = load_secret_key(path, passphrase.as_ref().map(|p| p.expose_secret()))
                    .map_err(|e| TransportError::Key(e.to_string()))?;

                let hash_alg = session
                    .best_supported_rsa_hash()
                    .await
                    .map_err(TransportError::Ssh)?
                    .flatten();

                session
                    .authenticate_publickey(
                        &config.username,
                        PrivateKeyWithHashAlg::new(Arc::new(key), hash_alg),
                    )
                    .await
                    .map_err(TransportError::Ssh)?
                    .success()
            }
        };

        if !success {
            return Err(TransportError::AuthenticationFailed {
                user: config.username.clone(),
            }
            .into());
        }

        Ok(())
    }
}

impl Transport for SshTransport {
    async fn send(&mut self, data: &[u8]) -> Result<()> {
        self.channel.data(data).await.map_err(TransportError::Ssh)?;
        Ok(())
    }

    async fn recv(&mut self) -> Result<Option<Bytes>> {
        loop {
            match self.channel.wait().await {
                Some(ChannelMsg::Data { ref data, .. }) => {
                    return Ok(Some(Bytes::copy_from_slice(data)));
                }
                Some(ChannelMsg::ExtendedData { ref data, .. }) => {
                    debug!("stderr: {}", String::from_utf8_lossy(data).trim_end());
                }
                Some(ChannelMsg::Eof) | Some(ChannelMsg::Close) | None => return Ok(None),
                Some(_) => {}
            }
        }
    }

    async fn close(self) -> Result<()> {
        // Servers often drop the channel right after <close-session/>
        if let Err(e) = self.channel.eof().await {
            debug!("Channel EOF failed: {}", e);
        }
        self.session
            .disconnect(russh::Disconnect::ByApplication, "", "en")
            .await
            .map_err(TransportError::Ssh)?;
        Ok(())
    }
}

/// SSH client handler for russh.
struct SshHandler {
    host: String,
    port: u16,
    host_key_verification: HostKeyVerification,
    known_hosts_path: Option<PathBuf>,
    /// Detailed host-key error surfaced by connect() instead of the
    /// generic russh::Error::UnknownKey.
    host_key_error: Arc<Mutex<Option<TransportError>>>,
}

impl SshHandler {
    /// Check the host key against known_hosts.
    ///
    /// Returns `Ok(true)` if matched, `Ok(false)` if host not found,
    /// `Err(TransportError::HostKeyChanged)` if key changed.
    fn check_known_hosts(&self, pubkey: &PublicKey) -> std::result::Result<bool, TransportError> {
        let result = if let Some(ref path) = self.known_hosts_path {
            russh::keys::check_known_hosts_path(&self.host, self.port, pubkey, path)
        } else {
            russh::keys::check_known_hosts(&self.host, self.port, pubkey)
        };

        match result {
            Ok(matched) => Ok(matched),
            Err(russh::keys::Error::KeyChanged { line }) => Err(TransportError::HostKeyChanged {
                host: self.host.clone(),
                port: self.port,
                line,
            }),
            Err(e) => Err(TransportError::KnownHosts(e.to_string())),
        }
    }

    /// Save a new host key to known_hosts.
    fn learn_host_key(&self, pubkey: &PublicKey) -> std::result::Result<(), TransportError> {
        let result = if let Some(ref path) = self.known_hosts_path {
            russh::keys::known_hosts::learn_known_hosts_path(&self.host, self.port, pubkey, path)
        } else {
            russh::keys::known_hosts::learn_known_hosts(&self.host, self.port, pubkey)
        };

        result.map_err(|e| TransportError::KnownHosts(e.to_string()))
    }

    fn reject(&self, error: TransportError) -> bool {
        if let Ok(mut slot) = self.host_key_error.lock() {
            *slot = Some(error);
        }
        false
    }
}

impl client::Handler for SshHandler {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        server_public_key: &PublicKey,
    ) -> std::result::Result<bool, Self::Error> {
        match self.host_key_verification {
            HostKeyVerification::Disabled => Ok(true),

            HostKeyVerification::AcceptNew => match self.check_known_hosts(server_public_key) {
                Ok(true) => Ok(true),
                Ok(false) => {
                    if let Err(e) = self.learn_host_key(server_public_key) {
                        warn!("Failed to save host key: {}", e);
                    }
                    Ok(true)
                }
                Err(e) => Ok(self.reject(e)),
            },

            HostKeyVerification::Strict => match self.check_known_hosts(server_public_key) {
                Ok(true) => Ok(true),
                Ok(false) => Ok(self.reject(TransportError::HostKeyUnknown {
                    host: self.host.clone(),
                    port: self.port,
                })),
                Err(e) => Ok(self.reject(e)),
            },
        }
    }
}
