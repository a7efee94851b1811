//! The deployment task.
//!
//! A fixed four-step sequence against one host: upload the freshly built
//! binary to a staging path, move it into place, restart the systemd unit,
//! announce the new version in the channel. Strictly ordered, no retries, no
//! rollback; the first failing step aborts the rest.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::connector::Connection;
use crate::error::{Result, ShipbotError};

/// What gets deployed where.
///
/// The defaults are the production bot layout; the config file may override
/// individual fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployTarget {
    /// Local path of the prebuilt binary.
    pub artifact: PathBuf,

    /// Remote staging path the artifact is uploaded to.
    pub staging: String,

    /// Final remote path the binary is moved to.
    pub destination: String,

    /// systemd unit restarted after the move.
    pub service: String,

    /// Peer/channel the deployment notice goes to.
    pub notify_peer: String,

    /// Notification text.
    pub notify_message: String,
}

impl Default for DeployTarget {
    fn default() -> Self {
        Self {
            artifact: PathBuf::from("./bot"),
            staging: "/tmp/bot".to_string(),
            destination: "/home/bot/bot".to_string(),
            service: "bot".to_string(),
            notify_peer: "gotd_ru".to_string(),
            notify_message: "New version is deployed".to_string(),
        }
    }
}

impl DeployTarget {
    fn install_command(&self) -> String {
        format!("mv {} {}", self.staging, self.destination)
    }

    fn restart_command(&self) -> String {
        format!("systemctl restart {}", self.service)
    }

    fn notify_command(&self) -> String {
        // `tg` runs on the remote host and posts as the bot, not as a user
        format!(
            "tg send -p {} \"{}\"",
            self.notify_peer, self.notify_message
        )
    }
}

/// Run the deployment sequence over an established connection.
///
/// The old binary is overwritten while the old process may still be running;
/// it keeps its file handle until the restart, which is ordinary POSIX rename
/// behavior and deliberately not papered over here.
pub async fn deploy(connection: &dyn Connection, target: &DeployTarget) -> Result<()> {
    tracing::info!(
        artifact = %target.artifact.display(),
        staging = %target.staging,
        "uploading artifact"
    );
    connection.upload(&target.artifact, &target.staging).await?;

    run_checked(connection, &target.install_command()).await?;
    run_checked(connection, &target.restart_command()).await?;
    run_checked(connection, &target.notify_command()).await?;

    Ok(())
}

/// Run one remote command, turning a non-zero exit status into an error.
async fn run_checked(connection: &dyn Connection, command: &str) -> Result<()> {
    tracing::info!(%command, "running remote command");
    let output = connection.run(command).await?;

    if !output.success {
        return Err(ShipbotError::Command {
            command: command.to_string(),
            stderr: output.stderr,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::connector::CommandOutput;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Op {
        Upload(String, String),
        Run(String),
    }

    /// Connection double that records every operation issued against it.
    #[derive(Default)]
    struct RecordingConnection {
        ops: Mutex<Vec<Op>>,
        fail_upload: bool,
        /// Commands starting with this prefix report a non-zero exit status.
        fail_command_prefix: Option<String>,
    }

    impl RecordingConnection {
        fn ops(&self) -> Vec<Op> {
            self.ops.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Connection for RecordingConnection {
        async fn upload(&self, local: &Path, remote: &str) -> Result<()> {
            self.ops.lock().unwrap().push(Op::Upload(
                local.display().to_string(),
                remote.to_string(),
            ));

            if self.fail_upload {
                return Err(ShipbotError::Transfer {
                    path: local.display().to_string(),
                    reason: "connection reset".to_string(),
                });
            }
            Ok(())
        }

        async fn run(&self, command: &str) -> Result<CommandOutput> {
            self.ops.lock().unwrap().push(Op::Run(command.to_string()));

            let failed = self
                .fail_command_prefix
                .as_deref()
                .is_some_and(|prefix| command.starts_with(prefix));

            if failed {
                Ok(CommandOutput::new(
                    String::new(),
                    "boom".to_string(),
                    1,
                ))
            } else {
                Ok(CommandOutput::new(String::new(), String::new(), 0))
            }
        }
    }

    fn expected_sequence() -> Vec<Op> {
        vec![
            Op::Upload("./bot".to_string(), "/tmp/bot".to_string()),
            Op::Run("mv /tmp/bot /home/bot/bot".to_string()),
            Op::Run("systemctl restart bot".to_string()),
            Op::Run("tg send -p gotd_ru \"New version is deployed\"".to_string()),
        ]
    }

    #[tokio::test]
    async fn test_deploy_issues_four_ops_in_order() {
        let conn = RecordingConnection::default();

        deploy(&conn, &DeployTarget::default()).await.unwrap();

        assert_eq!(conn.ops(), expected_sequence());
    }

    #[tokio::test]
    async fn test_upload_failure_issues_no_commands() {
        let conn = RecordingConnection {
            fail_upload: true,
            ..Default::default()
        };

        let err = deploy(&conn, &DeployTarget::default()).await.unwrap_err();

        assert!(matches!(err, ShipbotError::Transfer { .. }));
        let commands: Vec<_> = conn
            .ops()
            .into_iter()
            .filter(|op| matches!(op, Op::Run(_)))
            .collect();
        assert!(commands.is_empty());
    }

    #[tokio::test]
    async fn test_mv_failure_stops_before_restart() {
        let conn = RecordingConnection {
            fail_command_prefix: Some("mv ".to_string()),
            ..Default::default()
        };

        let err = deploy(&conn, &DeployTarget::default()).await.unwrap_err();

        match err {
            ShipbotError::Command { command, .. } => {
                assert!(command.starts_with("mv "));
            }
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(conn.ops(), expected_sequence()[..2].to_vec());
    }

    #[tokio::test]
    async fn test_restart_failure_skips_notification() {
        let conn = RecordingConnection {
            fail_command_prefix: Some("systemctl ".to_string()),
            ..Default::default()
        };

        let err = deploy(&conn, &DeployTarget::default()).await.unwrap_err();

        assert!(matches!(err, ShipbotError::Command { .. }));
        assert_eq!(conn.ops(), expected_sequence()[..3].to_vec());
    }

    #[tokio::test]
    async fn test_notify_failure_after_restart() {
        // The restart already happened; a broken notifier still fails the task
        let conn = RecordingConnection {
            fail_command_prefix: Some("tg ".to_string()),
            ..Default::default()
        };

        let err = deploy(&conn, &DeployTarget::default()).await.unwrap_err();

        assert!(matches!(err, ShipbotError::Command { .. }));
        assert_eq!(conn.ops(), expected_sequence());
    }

    #[tokio::test]
    async fn test_two_runs_repeat_the_sequence() {
        let conn = RecordingConnection::default();
        let target = DeployTarget::default();

        deploy(&conn, &target).await.unwrap();
        deploy(&conn, &target).await.unwrap();

        let mut expected = expected_sequence();
        expected.extend(expected_sequence());
        assert_eq!(conn.ops(), expected);
    }

    #[tokio::test]
    async fn test_target_overrides_flow_into_commands() {
        let conn = RecordingConnection::default();
        let target = DeployTarget {
            service: "bot-staging".to_string(),
            destination: "/srv/bot/bot".to_string(),
            ..Default::default()
        };

        deploy(&conn, &target).await.unwrap();

        let ops = conn.ops();
        assert_eq!(ops[1], Op::Run("mv /tmp/bot /srv/bot/bot".to_string()));
        assert_eq!(ops[2], Op::Run("systemctl restart bot-staging".to_string()));
    }
}
