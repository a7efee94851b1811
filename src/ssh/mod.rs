//! Pure Rust SSH transport for shipbot.
//!
//! No external ssh/scp/ssh-add binaries: connection, command execution, and
//! file transfer all go through native Rust libraries.
//!
//! ## Modules
//!
//! - [`keys`] - SSH key passphrase detection
//! - [`client`] - SSH connection management and authentication
//! - [`exec`] - Remote command execution
//! - [`sftp`] - File transfer via SFTP

mod client;
pub mod config;
mod exec;
mod keys;
mod sftp;

pub use client::SshClient;
pub use config::SshConfig;
pub use keys::key_has_passphrase;
