//! SSH adapter for the [`Connection`] port.
//!
//! Pure Rust via russh; no external ssh/scp binaries involved.

use std::path::Path;

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::connector::{CommandOutput, Connection};
use crate::error::Result;
use crate::ssh::{SshClient, SshConfig};

/// A live SSH session to one host.
pub struct SshConnection {
    client: SshClient,
}

impl SshConnection {
    /// Connect and authenticate against `host` using the configured identity.
    pub async fn open(host: &str, config: &AppConfig) -> Result<Self> {
        let ssh_config = SshConfig::from(config);
        let client = SshClient::connect(host, 22, &ssh_config).await?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Connection for SshConnection {
    async fn upload(&self, local: &Path, remote: &str) -> Result<()> {
        let sftp = self.client.sftp().await?;
        sftp.upload(local, remote).await
    }

    async fn run(&self, command: &str) -> Result<CommandOutput> {
        self.client.exec(command).await
    }
}
