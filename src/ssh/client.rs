//! SSH client implementation using russh.
//!
//! Provides connection management and authentication.

use std::net::ToSocketAddrs;
use std::sync::Arc;

use async_trait::async_trait;
use russh::client::{self, Handle};
use tokio::net::UnixStream;
use tokio::sync::Mutex;

use crate::connector::CommandOutput;
use crate::error::{Result, ShipbotError};
use crate::ssh::config::SshConfig;
use crate::ssh::sftp::SftpClient;

/// SSH client wrapper over russh.
pub struct SshClient {
    session: Arc<Mutex<Handle<ClientHandler>>>,
}

impl SshClient {
    /// Connect to an SSH server.
    pub async fn connect(host: &str, port: u16, config: &SshConfig) -> Result<Self> {
        let russh_config = Arc::new(client::Config {
            inactivity_timeout: None,
            // Keep-alives cover the window where systemctl restart stalls
            keepalive_interval: Some(std::time::Duration::from_secs(15)),
            keepalive_max: 4,
            ..Default::default()
        });

        // Resolve hostname to IP
        let addr = format!("{}:{}", host, port)
            .to_socket_addrs()
            .map_err(|e| ShipbotError::Ssh(format!("Failed to resolve {}: {}", host, e)))?
            .next()
            .ok_or_else(|| ShipbotError::Ssh(format!("No address found for {}", host)))?;

        let handler = ClientHandler {
            host_key_policy: config.host_key_policy,
        };

        let mut session = client::connect(russh_config, addr, handler)
            .await
            .map_err(|e| ShipbotError::Ssh(format!("Connection failed: {}", e)))?;

        Self::authenticate(&mut session, config).await?;

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
        })
    }

    /// Authenticate with the SSH server.
    async fn authenticate(session: &mut Handle<ClientHandler>, config: &SshConfig) -> Result<()> {
        // Try agent authentication first
        match Self::auth_with_agent(session, config).await {
            Ok(true) => return Ok(()),
            Ok(false) => {
                tracing::debug!("Agent authentication: server rejected all keys");
            }
            Err(e) => {
                tracing::debug!("Agent authentication failed: {}", e);
            }
        }

        // Check if key has passphrase before trying to load it directly
        let has_passphrase = crate::ssh::key_has_passphrase(&config.key_path).unwrap_or(true);

        if has_passphrase {
            return Err(ShipbotError::Ssh(format!(
                "SSH key requires passphrase but is not loaded in the agent.\n\
                 Add your key to the agent first:\n\n  \
                 ssh-add {}",
                config.key_path.display()
            )));
        }

        // Key file authentication (only for unencrypted keys)
        Self::auth_with_key_file(session, config).await
    }

    /// Authenticate using SSH agent.
    async fn auth_with_agent(
        session: &mut Handle<ClientHandler>,
        config: &SshConfig,
    ) -> Result<bool> {
        let socket_path = std::env::var("SSH_AUTH_SOCK")
            .map_err(|_| ShipbotError::Ssh("SSH_AUTH_SOCK not set".to_string()))?;

        let stream = UnixStream::connect(&socket_path)
            .await
            .map_err(|e| ShipbotError::Ssh(format!("Failed to connect to agent: {}", e)))?;

        let mut agent = russh_keys::agent::client::AgentClient::connect(stream);

        let identities = agent
            .request_identities()
            .await
            .map_err(|e| ShipbotError::Ssh(format!("Failed to get agent identities: {}", e)))?;

        tracing::debug!("Agent has {} identities", identities.len());

        for identity in identities {
            let auth_result = session
                .authenticate_publickey_with(&config.user, identity, &mut agent)
                .await;

            match auth_result {
                Ok(true) => return Ok(true),
                Ok(false) => continue,
                Err(e) => {
                    tracing::debug!("Agent auth error: {}", e);
                    continue;
                }
            }
        }

        Ok(false)
    }

    /// Authenticate using key file directly.
    async fn auth_with_key_file(
        session: &mut Handle<ClientHandler>,
        config: &SshConfig,
    ) -> Result<()> {
        let key = russh_keys::load_secret_key(&config.key_path, None)
            .map_err(|e| ShipbotError::Ssh(format!("Failed to load key: {}", e)))?;

        let auth_result = session
            .authenticate_publickey(&config.user, Arc::new(key))
            .await
            .map_err(|e| ShipbotError::Ssh(format!("Authentication failed: {}", e)))?;

        if auth_result {
            Ok(())
        } else {
            Err(ShipbotError::Ssh(
                "Authentication failed. Key may require passphrase - use ssh-add first."
                    .to_string(),
            ))
        }
    }

    /// Execute a command on the remote host (non-interactive).
    pub async fn exec(&self, command: &str) -> Result<CommandOutput> {
        let session = self.session.lock().await;
        crate::ssh::exec::exec_command(&session, command).await
    }

    /// Get an SFTP client for file transfers.
    pub async fn sftp(&self) -> Result<SftpClient> {
        let session = self.session.lock().await;
        SftpClient::new(&session).await
    }
}

/// Client handler for russh connection callbacks.
pub struct ClientHandler {
    pub host_key_policy: crate::ssh::config::HostKeyPolicy,
}

#[async_trait]
impl client::Handler for ClientHandler {
    type Error = ShipbotError;

    async fn check_server_key(
        &mut self,
        _server_public_key: &russh_keys::PublicKey,
    ) -> std::result::Result<bool, Self::Error> {
        match self.host_key_policy {
            crate::ssh::config::HostKeyPolicy::AcceptAny => Ok(true),
            crate::ssh::config::HostKeyPolicy::AcceptNew => Ok(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_handler_accepts_keys() {
        let handler = ClientHandler {
            host_key_policy: crate::ssh::config::HostKeyPolicy::AcceptAny,
        };
        assert!(matches!(
            handler.host_key_policy,
            crate::ssh::config::HostKeyPolicy::AcceptAny
        ));
    }
}
