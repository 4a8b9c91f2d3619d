//! CLI module for the user schema validator
//!
//! Provides subcommands for checking payloads outside a running service:
//! - `validate`: validate a JSON payload as one of the user records
//! - `password`: run the password complexity rules on a single value

pub mod password;
pub mod validate;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// User schemas - validation rules for user service payloads
#[derive(Parser)]
#[command(name = "user-schemas")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a JSON payload as a user record
    Validate(validate::ValidateArgs),

    /// Check a password against the complexity rules
    Password(password::PasswordArgs),
}

/// Load configuration and install logging
fn bootstrap() -> AppConfig {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    config
}

fn print_json<T: Serialize>(config: &AppConfig, value: &T) -> anyhow::Result<()> {
    let rendered = if config.output.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };

    println!("{}", rendered);
    Ok(())
}
