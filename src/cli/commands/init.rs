use console::style;
use dialoguer::{Confirm, Input};

use crate::config::AppConfig;
use crate::deploy::DeployTarget;
use crate::error::Result;

pub async fn execute() -> Result<()> {
    println!("{}", style("shipbot setup").bold().cyan());
    println!("Configure the production host the bot deploys to.\n");

    let existing = AppConfig::config_path()?.exists();
    if existing {
        let overwrite = Confirm::new()
            .with_prompt("Config already exists. Overwrite?")
            .default(false)
            .interact()?;
        if !overwrite {
            return Ok(());
        }
    }

    let host: String = Input::new()
        .with_prompt("Production host")
        .interact_text()?;

    let ssh_user: String = Input::new()
        .with_prompt("SSH user")
        .default("bot".to_string())
        .interact_text()?;

    let ssh_key_path: String = Input::new()
        .with_prompt("SSH private key path")
        .default("~/.ssh/id_ed25519".to_string())
        .interact_text()?;

    let config = AppConfig {
        host,
        ssh_user,
        ssh_key_path: shellexpand::tilde(&ssh_key_path).to_string(),
        deploy: DeployTarget::default(),
    };

    config.save()?;

    println!(
        "\n{} Config written to {}",
        style("✓").green().bold(),
        AppConfig::config_path()?.display()
    );
    println!("Run {} to ship a new version.", style("shipbot deploy").bold());

    Ok(())
}
