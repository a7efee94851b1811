use console::style;

use crate::config::AppConfig;
use crate::connector::ssh::SshConnection;
use crate::deploy;
use crate::error::{Result, ShipbotError};

pub async fn execute(config: &AppConfig, host_override: Option<String>) -> Result<()> {
    let host = host_override.as_deref().unwrap_or(&config.host);
    let target = &config.deploy;

    if !target.artifact.exists() {
        return Err(ShipbotError::Config(format!(
            "Artifact {} not found. Build it first.",
            target.artifact.display()
        )));
    }

    println!(
        "  {} deploying {} to {}",
        style("→").bold(),
        style(target.artifact.display()).white().bold(),
        style(host).cyan()
    );

    let connection = SshConnection::open(host, config).await?;
    deploy::deploy(&connection, target).await?;

    println!(
        "  {} {} restarted on {}",
        style("✓").green().bold(),
        style(&target.service).white().bold(),
        style(host).dim()
    );

    Ok(())
}
