// SPDX-FileCopyrightText: 2026 Boxtrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Box registry CRUD operations.

use std::str::FromStr;

use boxtrack_core::BoxtrackError;
use boxtrack_core::types::{BoxRecord, BoxStatus, BoxType, BoxUpdate, NewBox};
use rusqlite::params;

use crate::database::Database;

const BOX_COLUMNS: &str = "box_id, box_type, cycle_count, location, last_used, manufacture_date, \
                           status, thickness, supplier, dimensions, material, serial_code, created_at";

/// Map one `boxes` row onto a [`BoxRecord`].
///
/// Enum columns are stored as their display strings; a row that fails to
/// parse is a corrupt database, surfaced as a conversion failure.
pub(crate) fn box_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<BoxRecord> {
    let box_type: String = row.get(1)?;
    let status: String = row.get(6)?;
    Ok(BoxRecord {
        box_id: row.get(0)?,
        box_type: BoxType::from_str(&box_type).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
        })?,
        cycle_count: row.get(2)?,
        location: row.get(3)?,
        last_used: row.get(4)?,
        manufacture_date: row.get(5)?,
        status: BoxStatus::from_str(&status).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
        })?,
        thickness: row.get(7)?,
        supplier: row.get(8)?,
        dimensions: row.get(9)?,
        material: row.get(10)?,
        serial_code: row.get(11)?,
        created_at: row.get(12)?,
    })
}

/// Register a new box. Status starts `active`, cycle_count at zero.
///
/// Returns [`BoxtrackError::Conflict`] when the identifier is taken. The
/// existence check and insert run on the single writer thread, so they
/// cannot interleave with another create.
pub async fn create_box(db: &Database, new_box: &NewBox) -> Result<BoxRecord, BoxtrackError> {
    new_box.validate()?;
    let new_box = new_box.clone();
    let box_id = new_box.box_id.clone();
    let created = db
        .connection()
        .call(move |conn| -> Result<Option<BoxRecord>, rusqlite::Error> {
            let taken: i64 = conn.query_row(
                "SELECT COUNT(*) FROM boxes WHERE box_id = ?1",
                params![new_box.box_id],
                |row| row.get(0),
            )?;
            if taken > 0 {
                return Ok(None);
            }
            conn.execute(
                "INSERT INTO boxes (box_id, box_type, manufacture_date, location, \
                 thickness, supplier, dimensions, material, serial_code) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    new_box.box_id,
                    new_box.box_type.to_string(),
                    new_box.manufacture_date,
                    new_box.location,
                    new_box.thickness,
                    new_box.supplier,
                    new_box.dimensions,
                    new_box.material,
                    new_box.serial_code,
                ],
            )?;
            let mut stmt = conn.prepare(&format!(
                "SELECT {BOX_COLUMNS} FROM boxes WHERE box_id = ?1"
            ))?;
            stmt.query_row(params![new_box.box_id], box_from_row).map(Some)
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    created.ok_or_else(|| BoxtrackError::Conflict(format!("box {box_id} already exists")))
}

/// Fetch a box by its identifier.
pub async fn get_box(db: &Database, box_id: &str) -> Result<Option<BoxRecord>, BoxtrackError> {
    let box_id = box_id.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<BoxRecord>, rusqlite::Error> {
            let mut stmt = conn.prepare(&format!(
                "SELECT {BOX_COLUMNS} FROM boxes WHERE box_id = ?1"
            ))?;
            match stmt.query_row(params![box_id], box_from_row) {
                Ok(record) => Ok(Some(record)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List boxes, newest registration first, with optional paging.
///
/// SQLite treats `LIMIT -1` as unlimited, so absent paging maps to
/// `(-1, 0)`.
pub async fn list_boxes(
    db: &Database,
    limit: Option<i64>,
    offset: Option<i64>,
) -> Result<Vec<BoxRecord>, BoxtrackError> {
    db.connection()
        .call(move |conn| -> Result<Vec<BoxRecord>, rusqlite::Error> {
            let mut stmt = conn.prepare(&format!(
                "SELECT {BOX_COLUMNS} FROM boxes \
                 ORDER BY created_at DESC, id DESC LIMIT ?1 OFFSET ?2"
            ))?;
            let rows = stmt.query_map(
                params![limit.unwrap_or(-1), offset.unwrap_or(0)],
                box_from_row,
            )?;
            let mut boxes = Vec::new();
            for row in rows {
                boxes.push(row?);
            }
            Ok(boxes)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Apply an admin field update and return the updated record.
///
/// `None` fields keep their stored values. This is the only path that may
/// lower `cycle_count` (explicit reset) or set `missing` status directly.
pub async fn update_box(
    db: &Database,
    box_id: &str,
    update: &BoxUpdate,
) -> Result<BoxRecord, BoxtrackError> {
    let box_id = box_id.to_string();
    let box_id_for_error = box_id.clone();
    let update = update.clone();
    let updated = db
        .connection()
        .call(move |conn| -> Result<Option<BoxRecord>, rusqlite::Error> {
            let mut stmt = conn.prepare(&format!(
                "SELECT {BOX_COLUMNS} FROM boxes WHERE box_id = ?1"
            ))?;
            let existing = match stmt.query_row(params![box_id], box_from_row) {
                Ok(record) => record,
                Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
                Err(e) => return Err(e),
            };

            let box_type = update.box_type.unwrap_or(existing.box_type);
            let cycle_count = update.cycle_count.unwrap_or(existing.cycle_count);
            let location = update.location.clone().or(existing.location);
            let last_used = update.last_used.clone().or(existing.last_used);
            let manufacture_date = update
                .manufacture_date
                .clone()
                .unwrap_or(existing.manufacture_date);
            let status = update.status.unwrap_or(existing.status);

            conn.execute(
                "UPDATE boxes SET box_type = ?1, cycle_count = ?2, location = ?3, \
                 last_used = ?4, manufacture_date = ?5, status = ?6 WHERE box_id = ?7",
                params![
                    box_type.to_string(),
                    cycle_count,
                    location,
                    last_used,
                    manufacture_date,
                    status.to_string(),
                    box_id,
                ],
            )?;

            let mut stmt = conn.prepare(&format!(
                "SELECT {BOX_COLUMNS} FROM boxes WHERE box_id = ?1"
            ))?;
            stmt.query_row(params![box_id], box_from_row).map(Some)
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    updated.ok_or_else(|| BoxtrackError::box_not_found(box_id_for_error))
}
