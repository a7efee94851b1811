//! Remote command execution.
//!
//! Non-interactive execution with stdout/stderr capture and exit status.

use russh::client::Handle;
use russh::ChannelMsg;

use crate::connector::CommandOutput;
use crate::error::{Result, ShipbotError};
use crate::ssh::client::ClientHandler;

/// Execute a command on the remote host (non-interactive).
///
/// A non-zero exit status is not an error here: the caller decides what a
/// failed command means. Only channel-level problems surface as `Err`.
pub async fn exec_command(session: &Handle<ClientHandler>, command: &str) -> Result<CommandOutput> {
    let wrapped_command = format!(
        "bash --norc --noprofile -c '{}'",
        command.replace('\'', "'\\''")
    );

    let mut channel = session
        .channel_open_session()
        .await
        .map_err(|e| ShipbotError::Ssh(format!("Failed to open channel: {}", e)))?;

    channel
        .exec(true, wrapped_command.as_bytes())
        .await
        .map_err(|e| ShipbotError::Ssh(format!("Failed to execute command: {}", e)))?;

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let mut exit_code = 0u32;

    loop {
        match channel.wait().await {
            Some(ChannelMsg::Data { data }) => {
                stdout.extend_from_slice(&data);
            }
            Some(ChannelMsg::ExtendedData { data, ext }) => {
                if ext == 1 {
                    stderr.extend_from_slice(&data);
                }
            }
            Some(ChannelMsg::ExitStatus { exit_status }) => {
                exit_code = exit_status;
            }
            Some(ChannelMsg::Eof) | Some(ChannelMsg::Close) | None => {
                break;
            }
            _ => {}
        }
    }

    Ok(CommandOutput::new(
        String::from_utf8_lossy(&stdout).to_string(),
        String::from_utf8_lossy(&stderr).to_string(),
        exit_code,
    ))
}
