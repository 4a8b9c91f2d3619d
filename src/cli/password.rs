//! Password command - runs the complexity rules on one value

use std::process::ExitCode;

use clap::Args;
use serde::Serialize;

use crate::domain::user::{check_password_complexity, PasswordRequirement};

/// Arguments for the password command
#[derive(Args, Clone)]
pub struct PasswordArgs {
    /// Password to check
    pub password: String,
}

#[derive(Debug, Serialize)]
struct PasswordReport {
    valid: bool,
    unmet: Vec<PasswordRequirement>,
}

/// Run the password command
pub fn run(args: PasswordArgs) -> anyhow::Result<ExitCode> {
    let config = super::bootstrap();

    let report = match check_password_complexity(&args.password) {
        Ok(()) => PasswordReport {
            valid: true,
            unmet: Vec::new(),
        },
        Err(e) => PasswordReport {
            valid: false,
            unmet: e.unmet().to_vec(),
        },
    };

    super::print_json(&config, &report)?;

    Ok(if report.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
