use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::deploy::DeployTarget;
use crate::error::{Result, ShipbotError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Production host the bot runs on.
    pub host: String,
    #[serde(default = "default_ssh_user")]
    pub ssh_user: String,
    pub ssh_key_path: String,
    /// Deployment target. Omitted fields fall back to the stock bot layout.
    #[serde(default)]
    pub deploy: DeployTarget,
}

fn default_ssh_user() -> String {
    "bot".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            ssh_user: "bot".to_string(),
            ssh_key_path: shellexpand::tilde("~/.ssh/id_ed25519").to_string(),
            deploy: DeployTarget::default(),
        }
    }
}

impl AppConfig {
    pub fn config_dir() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .map_err(|_| ShipbotError::Config("HOME environment variable not set".to_string()))?;
        Ok(PathBuf::from(home).join(".config").join("shipbot"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.yaml"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Err(ShipbotError::Config(format!(
                "Config file not found: {}. Run 'shipbot init' first.",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(&path)?;
        let config: AppConfig = serde_yaml::from_str(&content)
            .map_err(|e| ShipbotError::Config(format!("Invalid config: {}", e)))?;

        if config.host.is_empty() {
            return Err(ShipbotError::Config(
                "No host configured. Set 'host' in the config or pass --host.".to_string(),
            ));
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| ShipbotError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.ssh_user, "bot");
        assert!(config.ssh_key_path.ends_with(".ssh/id_ed25519"));
    }

    #[test]
    fn test_minimal_yaml_fills_defaults() {
        let yaml = "host: bot.example.org\nssh_key_path: /home/me/.ssh/id_ed25519\n";
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.host, "bot.example.org");
        assert_eq!(config.ssh_user, "bot");
        assert_eq!(config.deploy.service, "bot");
        assert_eq!(config.deploy.destination, "/home/bot/bot");
    }

    #[test]
    fn test_deploy_overrides() {
        let yaml = concat!(
            "host: bot.example.org\n",
            "ssh_key_path: /home/me/.ssh/id_ed25519\n",
            "deploy:\n",
            "  service: bot-staging\n",
        );
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.deploy.service, "bot-staging");
        // Untouched fields keep their stock values.
        assert_eq!(config.deploy.staging, "/tmp/bot");
    }
}
