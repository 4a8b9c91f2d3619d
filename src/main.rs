use std::process::ExitCode;

use clap::Parser;
use user_schemas::cli::{self, Cli, Command};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Command::Validate(args) => cli::validate::run(args),
        Command::Password(args) => cli::password::run(args),
    }
}
