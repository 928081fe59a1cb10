// SPDX-FileCopyrightText: 2026 Boxtrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Boxtrack asset tracker.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, environment variable
//! overrides, and miette diagnostic rendering.
//!
//! # Usage
//!
//! ```no_run
//! use boxtrack_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("listening on {}:{}", config.server.host, config.server.port);
//! ```

pub mod error;
pub mod loader;
pub mod model;
pub mod validation;

pub use error::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::BoxtrackConfig;

/// Load configuration from the XDG hierarchy and validate it.
///
/// This is the high-level entry point that:
/// 1. Loads config from TOML files + env vars via Figment
/// 2. On success: runs post-deserialization validation
/// 3. On Figment error: converts to a diagnostic error
///
/// Returns either a valid `BoxtrackConfig` or a list of diagnostic errors.
pub fn load_and_validate() -> Result<BoxtrackConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(vec![ConfigError::from(err)]),
    }
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<BoxtrackConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(vec![ConfigError::from(err)]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_toml_loads_and_validates() {
        let config = load_and_validate_str("[server]\nport = 8080\n").unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn validation_failures_surface_as_errors() {
        let errors = load_and_validate_str("[server]\nport = 0\n").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("port"));
    }

    #[test]
    fn figment_failures_surface_as_parse_errors() {
        let errors = load_and_validate_str("[tracker]\nname = 7\n").unwrap_err();
        assert!(matches!(errors[0], ConfigError::Parse { .. }));
    }
}
