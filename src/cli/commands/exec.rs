use crate::config::AppConfig;
use crate::connector::ssh::SshConnection;
use crate::connector::Connection;
use crate::error::{Result, ShipbotError};

pub async fn execute(config: &AppConfig, host_override: Option<String>, command: &str) -> Result<()> {
    let host = host_override.as_deref().unwrap_or(&config.host);

    let connection = SshConnection::open(host, config).await?;
    let output = connection.run(command).await?;

    if !output.stdout.is_empty() {
        print!("{}", output.stdout);
    }
    if !output.stderr.is_empty() {
        eprint!("{}", output.stderr);
    }

    if !output.success {
        return Err(ShipbotError::Command {
            command: command.to_string(),
            stderr: output.stderr,
        });
    }

    Ok(())
}
