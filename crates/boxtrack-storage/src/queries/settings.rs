// SPDX-FileCopyrightText: 2026 Boxtrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Settings key/value operations.

use std::collections::BTreeMap;

use boxtrack_core::BoxtrackError;
use rusqlite::params;

use crate::database::Database;

/// All settings as an ordered key/value map.
pub async fn all_settings(db: &Database) -> Result<BTreeMap<String, String>, BoxtrackError> {
    db.connection()
        .call(|conn| -> Result<BTreeMap<String, String>, rusqlite::Error> {
            let mut stmt = conn.prepare("SELECT key, value FROM settings")?;
            let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
            let mut settings = BTreeMap::new();
            for row in rows {
                let (key, value): (String, String) = row?;
                settings.insert(key, value);
            }
            Ok(settings)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert or update one setting.
pub async fn put_setting(db: &Database, key: &str, value: &str) -> Result<(), BoxtrackError> {
    if key.trim().is_empty() {
        return Err(BoxtrackError::InvalidInput(
            "setting key must not be empty".to_string(),
        ));
    }
    let key = key.to_string();
    let value = value.to_string();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO settings (key, value) VALUES (?1, ?2) \
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_defaults_are_present() {
        let db = Database::open_in_memory().await.unwrap();
        let settings = all_settings(&db).await.unwrap();
        assert_eq!(settings.get("plastic_max_cycles").map(String::as_str), Some("150"));
        assert_eq!(
            settings.get("wooden_inspection_threshold").map(String::as_str),
            Some("90")
        );
        assert_eq!(settings.get("email_notifications").map(String::as_str), Some("true"));
    }

    #[tokio::test]
    async fn put_setting_upserts() {
        let db = Database::open_in_memory().await.unwrap();
        put_setting(&db, "metal_max_cycles", "250").await.unwrap();
        put_setting(&db, "night_shift_notifications", "false").await.unwrap();

        let settings = all_settings(&db).await.unwrap();
        assert_eq!(settings.get("metal_max_cycles").map(String::as_str), Some("250"));
        assert_eq!(
            settings.get("night_shift_notifications").map(String::as_str),
            Some("false")
        );
    }

    #[tokio::test]
    async fn blank_key_is_invalid_input() {
        let db = Database::open_in_memory().await.unwrap();
        let err = put_setting(&db, "  ", "1").await.unwrap_err();
        assert!(matches!(err, BoxtrackError::InvalidInput(_)));
    }
}
