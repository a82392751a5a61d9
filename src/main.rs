//! notepress - publish tagged notes as blog posts.

mod cli;
mod config;
mod init;
mod pipeline;
mod publish;
mod utils;

use anyhow::{Result, bail};
use clap::Parser;
use cli::{Cli, Commands};
use config::PublishConfig;
use init::write_default_config;
use publish::publish_all;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Init => {
            write_default_config(&config.config_path)?;
            log!("init"; "wrote {}", config.config_path.display());
            Ok(())
        }
        Commands::Publish { .. } => publish_all(&config).map(|_| ()),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<PublishConfig> {
    let root = cli.root.as_deref().unwrap_or(std::path::Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        PublishConfig::from_path(&config_path)?
    } else {
        PublishConfig::default()
    };
    config.update_with_cli(cli);

    let config_exists = config.config_path.exists();
    match (cli.is_init(), config_exists) {
        (true, true) => {
            bail!("Config file already exists. Remove it manually or init in a different path.")
        }
        (false, false) => bail!(
            "Config file not found: {}. Run `notepress init` first.",
            config.config_path.display()
        ),
        _ => {}
    }

    if !cli.is_init() {
        config.validate()?;
    }

    Ok(config)
}
