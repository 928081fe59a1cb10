// SPDX-FileCopyrightText: 2026 Boxtrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration error diagnostics rendered through miette.

use miette::Diagnostic;
use thiserror::Error;

/// A configuration error with diagnostic metadata for terminal rendering.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// Figment failed to deserialize the merged configuration.
    #[error("configuration error: {message}")]
    #[diagnostic(
        code(boxtrack::config::parse),
        help("check boxtrack.toml against the documented sections: tracker, server, storage")
    )]
    Parse {
        /// Figment's description of the failure, including the offending key.
        message: String,
    },

    /// A validation error for a config value.
    #[error("validation error: {message}")]
    #[diagnostic(code(boxtrack::config::validation))]
    Validation {
        /// Description of the validation failure.
        message: String,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Parse {
            message: err.to_string(),
        }
    }
}

/// Render collected configuration errors to stderr via miette reports.
pub fn render_errors(errors: &[ConfigError]) {
    for error in errors {
        let report = miette::Report::msg(format!("{error}"));
        eprintln!("{report:?}");
        if let Some(help) = error.help() {
            eprintln!("  help: {help}");
        }
    }
    eprintln!(
        "boxtrack: {} configuration error{} -- aborting startup",
        errors.len(),
        if errors.len() == 1 { "" } else { "s" }
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_carry_figment_message() {
        let figment_err = figment::Error::from("invalid port".to_string());
        let err = ConfigError::from(figment_err);
        assert!(err.to_string().contains("invalid port"));
    }

    #[test]
    fn validation_errors_have_diagnostic_code() {
        let err = ConfigError::Validation {
            message: "server.port must be non-zero".to_string(),
        };
        let code = err.code().expect("validation errors carry a code");
        assert_eq!(code.to_string(), "boxtrack::config::validation");
    }
}
