//! Validate command - checks a JSON payload against a record kind

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::domain::user::{validate_json, RecordKind};

/// Arguments for the validate command
#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Record kind: user_base, user_create, user_update, user_response,
    /// user_list_response or login_request
    #[arg(long, short)]
    pub kind: RecordKind,

    /// JSON file to validate (reads stdin when omitted)
    #[arg(long, short)]
    pub file: Option<PathBuf>,
}

/// Run the validate command
pub fn run(args: ValidateArgs) -> anyhow::Result<ExitCode> {
    let config = super::bootstrap();
    let payload = read_payload(args.file.as_deref())?;

    match validate_json(args.kind, &payload) {
        Ok(record) => {
            info!(record = %args.kind, "Payload is valid");
            super::print_json(&config, &record)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(errors) => {
            info!(
                record = %args.kind,
                count = errors.errors().len(),
                "Payload is invalid"
            );
            super::print_json(&config, &errors.to_response())?;
            Ok(ExitCode::FAILURE)
        }
    }
}

fn read_payload(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read payload from stdin")?;
            Ok(buffer)
        }
    }
}
