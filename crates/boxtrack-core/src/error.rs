// SPDX-FileCopyrightText: 2026 Boxtrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Boxtrack asset tracker.

use thiserror::Error;

/// The primary error type used across the Boxtrack core and storage layers.
#[derive(Debug, Error)]
pub enum BoxtrackError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// A referenced entity does not exist (unknown box, alert, or user).
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    /// The request is missing required fields or carries malformed values.
    ///
    /// Detected before any write is attempted.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A unique identifier collided on creation (duplicate box_id, username, ...).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Credential check failed.
    #[error("invalid credentials")]
    Unauthorized,

    /// Storage backend errors (database connection, query failure, aborted transaction).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl BoxtrackError {
    /// Shorthand for a [`BoxtrackError::NotFound`] over a box identifier.
    pub fn box_not_found(box_id: impl Into<String>) -> Self {
        Self::NotFound {
            resource: "box",
            id: box_id.into(),
        }
    }
}
