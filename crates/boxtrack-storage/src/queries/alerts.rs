// SPDX-FileCopyrightText: 2026 Boxtrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Alert reads and acknowledgment.
//!
//! Alert rows are created inside the record-action transaction
//! (`queries::actions::raise_alert_deduped`); they are never deleted.

use std::str::FromStr;

use boxtrack_core::BoxtrackError;
use boxtrack_core::types::{Alert, AlertKind};
use rusqlite::params;

use crate::database::Database;

fn alert_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Alert> {
    let kind: String = row.get(2)?;
    Ok(Alert {
        id: row.get(0)?,
        box_id: row.get(1)?,
        kind: AlertKind::from_str(&kind).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
        })?,
        message: row.get(3)?,
        created_at: row.get(4)?,
        is_read: row.get(5)?,
    })
}

/// All alerts, newest first.
pub async fn list_alerts(db: &Database) -> Result<Vec<Alert>, BoxtrackError> {
    db.connection()
        .call(|conn| -> Result<Vec<Alert>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, box_id, kind, message, created_at, is_read \
                 FROM alerts ORDER BY created_at DESC, id DESC",
            )?;
            let rows = stmt.query_map([], alert_from_row)?;
            let mut alerts = Vec::new();
            for row in rows {
                alerts.push(row?);
            }
            Ok(alerts)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Acknowledge an alert. Unknown ids are `NotFound`.
pub async fn mark_read(db: &Database, id: i64) -> Result<(), BoxtrackError> {
    let changed = db
        .connection()
        .call(move |conn| -> Result<usize, rusqlite::Error> {
            conn.execute("UPDATE alerts SET is_read = 1 WHERE id = ?1", params![id])
        })
        .await
        .map_err(crate::database::map_tr_err)?;
    if changed == 0 {
        return Err(BoxtrackError::NotFound {
            resource: "alert",
            id: id.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn insert_alert(db: &Database, box_id: &str, kind: &str, created_at: &str) -> i64 {
        let box_id = box_id.to_string();
        let kind = kind.to_string();
        let created_at = created_at.to_string();
        db.connection()
            .call(move |conn| -> Result<i64, rusqlite::Error> {
                conn.execute(
                    "INSERT INTO alerts (box_id, kind, message, created_at) VALUES (?1, ?2, ?3, ?4)",
                    params![box_id, kind, format!("Box {box_id} alert"), created_at],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn alerts_list_newest_first() {
        let db = Database::open_in_memory().await.unwrap();
        insert_alert(&db, "BX-1", "inspection", "2026-01-01T08:00:00.000Z").await;
        insert_alert(&db, "BX-2", "eol", "2026-01-02T08:00:00.000Z").await;

        let alerts = list_alerts(&db).await.unwrap();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].box_id, "BX-2");
        assert_eq!(alerts[0].kind, AlertKind::Eol);
        assert!(!alerts[0].is_read);
    }

    #[tokio::test]
    async fn mark_read_flips_flag_once() {
        let db = Database::open_in_memory().await.unwrap();
        let id = insert_alert(&db, "BX-1", "eol", "2026-01-01T08:00:00.000Z").await;

        mark_read(&db, id).await.unwrap();
        let alerts = list_alerts(&db).await.unwrap();
        assert!(alerts[0].is_read);
    }

    #[tokio::test]
    async fn mark_read_unknown_id_is_not_found() {
        let db = Database::open_in_memory().await.unwrap();
        let err = mark_read(&db, 404).await.unwrap_err();
        assert!(matches!(err, BoxtrackError::NotFound { .. }));
    }
}
