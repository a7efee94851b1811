//! Remote-execution port.
//!
//! The deploy task only needs two capabilities from a remote host: put a file
//! there and run a shell command. [`Connection`] captures exactly that, so the
//! task can be exercised against a fake without a network.

pub mod ssh;

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;

/// Output from a remote command execution.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Whether the command succeeded (exit_code == 0).
    pub success: bool,
}

impl CommandOutput {
    pub fn new(stdout: String, stderr: String, exit_code: u32) -> Self {
        Self {
            stdout,
            stderr,
            success: exit_code == 0,
        }
    }
}

/// An authenticated session against a single remote host.
///
/// Credentials live with the implementation; callers hold the connection only
/// for the duration of one task.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Upload a local file to a remote path.
    async fn upload(&self, local: &Path, remote: &str) -> Result<()>;

    /// Execute a shell command on the remote host and report its outcome.
    async fn run(&self, command: &str) -> Result<CommandOutput>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_output_success() {
        let output = CommandOutput::new("hello".to_string(), String::new(), 0);
        assert!(output.success);
        assert_eq!(output.stdout, "hello");
    }

    #[test]
    fn test_command_output_failure() {
        let output = CommandOutput::new(String::new(), "error".to_string(), 1);
        assert!(!output.success);
        assert_eq!(output.stderr, "error");
    }
}
