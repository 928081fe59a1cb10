// SPDX-FileCopyrightText: 2026 Boxtrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./boxtrack.toml` > `~/.config/boxtrack/boxtrack.toml`
//! > `/etc/boxtrack/boxtrack.toml` with environment variable overrides via
//! the `BOXTRACK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::BoxtrackConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/boxtrack/boxtrack.toml` (system-wide)
/// 3. `~/.config/boxtrack/boxtrack.toml` (user XDG config)
/// 4. `./boxtrack.toml` (local directory)
/// 5. `BOXTRACK_*` environment variables
pub fn load_config() -> Result<BoxtrackConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BoxtrackConfig::default()))
        .merge(Toml::file("/etc/boxtrack/boxtrack.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("boxtrack/boxtrack.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("boxtrack.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<BoxtrackConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BoxtrackConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<BoxtrackConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BoxtrackConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `BOXTRACK_STORAGE_DATABASE_PATH` must map
/// to `storage.database_path`, not `storage.database.path`.
fn env_provider() -> Env {
    Env::prefixed("BOXTRACK_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("tracker_", "tracker.", 1)
            .replacen("server_", "server.", 1)
            .replacen("storage_", "storage.", 1);
        mapped.into()
    })
}
