// SPDX-FileCopyrightText: 2026 Boxtrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses and known log levels.

use crate::error::ConfigError;
use crate::model::BoxtrackConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &BoxtrackConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.tracker.log_level.trim();
    if !LOG_LEVELS.contains(&level) {
        errors.push(ConfigError::Validation {
            message: format!(
                "tracker.log_level `{level}` is not one of trace, debug, info, warn, error"
            ),
        });
    }

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.server.port == 0 {
        errors.push(ConfigError::Validation {
            message: "server.port must be non-zero".to_string(),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = BoxtrackConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn bad_log_level_is_reported() {
        let mut config = BoxtrackConfig::default();
        config.tracker.log_level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("log_level"));
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = BoxtrackConfig::default();
        config.tracker.log_level = "loud".to_string();
        config.server.host = String::new();
        config.server.port = 0;
        config.storage.database_path = " ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn hostname_and_ip_hosts_are_accepted() {
        for host in ["0.0.0.0", "::1", "tracker.internal"] {
            let mut config = BoxtrackConfig::default();
            config.server.host = host.to_string();
            assert!(validate_config(&config).is_ok(), "{host} should validate");
        }
    }
}
