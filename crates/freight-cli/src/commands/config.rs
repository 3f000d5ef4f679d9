//! Config command - inspect and change extraction settings.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;

use freight_core::{FreightConfig, CONFIG_KEYS};

use super::default_config_path;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// List every setting with its current value
    Show {
        /// Print the whole file as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Write a configuration file with default settings
    Init {
        /// Where to write the file (default: user config directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print one setting, e.g. "extraction.context_window"
    Get { key: String },

    /// Change one setting and save the file
    Set { key: String, value: String },

    /// Print the configuration file location
    Path,
}

pub async fn run(args: ConfigArgs) -> anyhow::Result<()> {
    let path = default_config_path();

    match args.command {
        ConfigCommand::Show { json } => show(&path, json),
        ConfigCommand::Init { output, force } => init(&output.unwrap_or(path), force),
        ConfigCommand::Get { key } => {
            println!("{}", stored(&path)?.get(&key)?);
            Ok(())
        }
        ConfigCommand::Set { key, value } => set(&path, &key, &value),
        ConfigCommand::Path => {
            let status = if path.exists() { "" } else { " (not created)" };
            println!("{}{}", path.display(), status);
            Ok(())
        }
    }
}

/// Settings saved at `path`, or the defaults when there is no file yet.
fn stored(path: &Path) -> anyhow::Result<FreightConfig> {
    if path.exists() {
        Ok(FreightConfig::from_file(path)?)
    } else {
        Ok(FreightConfig::default())
    }
}

fn show(path: &Path, json: bool) -> anyhow::Result<()> {
    let config = stored(path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    for key in CONFIG_KEYS {
        println!("{} = {}", key, config.get(key)?);
    }
    if !path.exists() {
        println!("{} defaults; no file at {}", style("ℹ").blue(), path.display());
    }
    Ok(())
}

fn init(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }
    save(path, &FreightConfig::default())?;
    println!("{} Created {}", style("✓").green(), path.display());
    Ok(())
}

fn set(path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let mut config = stored(path)?;
    config.set(key, value)?;
    save(path, &config)?;
    println!("{} {} = {}", style("✓").green(), key, config.get(key)?);
    Ok(())
}

fn save(path: &Path, config: &FreightConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(config.save(path)?)
}
