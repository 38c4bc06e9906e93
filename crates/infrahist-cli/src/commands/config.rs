//! Config commands (get/set/unset persisted defaults)

use clap::{Args, Subcommand};
use infrahist_engine::commands::config::{config_get, config_set, config_unset};
use infrahist_engine::Home;

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the value of a default
    Get { key: String },
    /// Set a default, e.g. `config set region eu-west-1`
    Set { key: String, value: String },
    /// Remove a default
    Unset { key: String },
}

pub fn execute(args: ConfigArgs, home: &Home) -> Result<(), Box<dyn std::error::Error>> {
    let defaults = home.open_defaults()?;
    match args.command {
        ConfigCommand::Get { key } => match config_get(&defaults, &key)? {
            Some(value) => println!("{}", value),
            None => return Err(format!("{} is not set", key).into()),
        },
        ConfigCommand::Set { key, value } => config_set(&defaults, &key, &value)?,
        ConfigCommand::Unset { key } => {
            config_unset(&defaults, &key)?;
        }
    }
    Ok(())
}
