//! Config subcommand handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::{Path, PathBuf};

use crate::config::{self, ConfigLoader, paths};

/// Configuration management subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get configuration value
    Get {
        /// Configuration key (url, apiKey, extraHeaders, timeoutSeconds)
        key: Option<String>,
    },
    /// Set configuration value
    Set {
        /// Configuration key (url, apiKey, extraHeaders, timeoutSeconds)
        key: String,
        /// Configuration value
        value: String,
    },
    /// List all configuration
    List,
    /// Show configuration file path
    Path,
    /// Validate configuration
    Validate,
}

/// Handle configuration subcommands
///
/// `config_path` overrides the root config file for every subcommand.
pub fn handle_config_command(cmd: ConfigSubcommand, config_path: Option<&Path>) -> Result<()> {
    match cmd {
        ConfigSubcommand::Get { key } => {
            let config = ConfigLoader::load(config_path).context("Failed to load configuration")?;

            if let Some(key) = key {
                let value = config::get_config_value(&config, &key)?;
                println!("{}", value);
            } else {
                print_yaml(&config.redacted())?;
            }
        }
        ConfigSubcommand::Set { key, value } => {
            let path = target_path(config_path);
            // Only the file layer is edited; environment overrides are not persisted
            let mut config = if path.exists() {
                ConfigLoader::load_file(&path)?
            } else {
                ConfigLoader::load_defaults()
            };

            config::set_config_value(&mut config, &key, &value)
                .with_context(|| format!("Failed to set {}", key))?;

            ConfigLoader::save(&config, &path).context("Failed to save configuration")?;
            println!("Configuration saved to {}", path.display());
        }
        ConfigSubcommand::List => {
            let config = ConfigLoader::load(config_path).context("Failed to load configuration")?;
            print_yaml(&config.redacted())?;
        }
        ConfigSubcommand::Path => {
            println!("{}", target_path(config_path).display());
        }
        ConfigSubcommand::Validate => match ConfigLoader::validate(config_path) {
            Ok(_) => println!("Configuration is valid"),
            Err(e) => {
                return Err(e.context("Configuration validation failed"));
            }
        },
    }

    Ok(())
}

fn target_path(config_path: Option<&Path>) -> PathBuf {
    config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(paths::root_config_path)
}

fn print_yaml(config: &config::ProviderConfig) -> Result<()> {
    let yaml = serde_yaml::to_string(config).context("Failed to serialize configuration")?;
    print!("{}", yaml);
    Ok(())
}
