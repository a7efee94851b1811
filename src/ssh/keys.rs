//! SSH key passphrase detection.
//!
//! Replaces `ssh-keygen -y -P "" -f <key>` with a pure Rust check.

use std::path::Path;

use crate::error::Result;

/// Check if an SSH key has a passphrase.
///
/// Returns `true` if the key is encrypted (requires passphrase), `false` if
/// unencrypted.
pub fn key_has_passphrase(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();

    match russh_keys::load_secret_key(path, None) {
        Ok(_) => Ok(false),
        Err(e) => {
            let err_str = e.to_string().to_lowercase();
            if err_str.contains("encrypted")
                || err_str.contains("passphrase")
                || err_str.contains("decrypt")
                || err_str.contains("password")
            {
                Ok(true)
            } else {
                tracing::debug!("load_secret_key error: {}", e);
                Ok(true)
            }
        }
    }
}
