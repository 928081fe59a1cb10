// SPDX-FileCopyrightText: 2026 Boxtrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User credential checks.
//!
//! Passwords are stored as SHA-256 hex digests; the HTTP layer digests the
//! submitted password so plaintext never reaches this module.

use std::str::FromStr;

use boxtrack_core::BoxtrackError;
use boxtrack_core::types::{User, UserRole};
use rusqlite::params;

use crate::database::Database;

/// Check credentials and role, returning the matching user if any.
pub async fn verify_login(
    db: &Database,
    username: &str,
    password_digest: &str,
    role: UserRole,
) -> Result<Option<User>, BoxtrackError> {
    let username = username.to_string();
    let password_digest = password_digest.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<User>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, username, role FROM users \
                 WHERE username = ?1 AND password_digest = ?2 AND role = ?3",
            )?;
            let result = stmt.query_row(
                params![username, password_digest, role.to_string()],
                |row| {
                    let role: String = row.get(2)?;
                    Ok(User {
                        id: row.get(0)?,
                        username: row.get(1)?,
                        role: UserRole::from_str(&role).map_err(|e| {
                            rusqlite::Error::FromSqlConversionFailure(
                                2,
                                rusqlite::types::Type::Text,
                                Box::new(e),
                            )
                        })?,
                    })
                },
            );
            match result {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}
