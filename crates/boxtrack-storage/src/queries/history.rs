// SPDX-FileCopyrightText: 2026 Boxtrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! History ledger reads.
//!
//! Appends happen only inside the record-action transaction
//! (`queries::actions`); this module is the read side.

use boxtrack_core::BoxtrackError;
use boxtrack_core::types::{ActionKind, HistoryEntry};
use rusqlite::params;

use crate::database::Database;

fn entry_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<HistoryEntry> {
    let action: String = row.get(2)?;
    Ok(HistoryEntry {
        id: row.get(0)?,
        box_id: row.get(1)?,
        action: ActionKind::from(action.as_str()),
        location: row.get(3)?,
        actor_id: row.get(4)?,
        timestamp: row.get(5)?,
        note: row.get(6)?,
    })
}

/// Ledger entries for a box, newest first.
///
/// Ordering is deterministic: timestamp descending with rowid as the
/// tie-break for same-millisecond inserts, so repeated reads return the
/// identical sequence. An unknown or actionless box yields an empty vec;
/// tracking lookups must tolerate history/box creation races.
pub async fn list_for(db: &Database, box_id: &str) -> Result<Vec<HistoryEntry>, BoxtrackError> {
    let box_id = box_id.to_string();
    db.connection()
        .call(move |conn| -> Result<Vec<HistoryEntry>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, box_id, action, location, actor_id, timestamp, note \
                 FROM box_history WHERE box_id = ?1 \
                 ORDER BY timestamp DESC, id DESC",
            )?;
            let rows = stmt.query_map(params![box_id], entry_from_row)?;
            let mut entries = Vec::new();
            for row in rows {
                entries.push(row?);
            }
            Ok(entries)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
