// SPDX-FileCopyrightText: 2026 Boxtrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The record-action transaction: registry update + ledger append + alert
//! evaluation in one atomic unit.
//!
//! A caller must never observe a box mutated without its history entry, nor
//! a history entry without the box mutation it describes. Everything here
//! runs inside a single `rusqlite` transaction on the writer thread.

use std::str::FromStr;

use boxtrack_core::types::{ActionInput, ActionOutcome, ActionKind, Alert, AlertKind, BoxStatus, BoxType, HistoryEntry};
use boxtrack_core::{BoxtrackError, Thresholds, alerts, lifecycle};
use rusqlite::{Transaction, params};
use tracing::info;

use crate::database::Database;

/// Record one action against a box.
///
/// Validates the input, then atomically: looks the box up (unknown box →
/// `NotFound`, nothing appended), applies the lifecycle transition, appends
/// the ledger entry with a server-assigned timestamp, and (for `check_in`)
/// evaluates thresholds and raises a deduplicated alert.
pub async fn record_action(
    db: &Database,
    input: &ActionInput,
) -> Result<ActionOutcome, BoxtrackError> {
    input.validate()?;
    let input = input.clone();
    let box_id = input.box_id.clone();

    let outcome = db
        .connection()
        .call(move |conn| -> Result<Option<ActionOutcome>, rusqlite::Error> {
            let tx = conn.transaction()?;

            let existing = match lookup_box(&tx, &input.box_id) {
                Ok(found) => found,
                Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
                Err(e) => return Err(e),
            };

            // One timestamp for the whole action: box fields and the ledger
            // entry must agree.
            let now: String = tx.query_row(
                "SELECT strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
                [],
                |row| row.get(0),
            )?;

            let transition = lifecycle::apply(existing.status, &input.action);
            let cycle_count = existing.cycle_count + u32::from(transition.increments_cycle);

            if transition.mutates_box(existing.status) {
                let last_used = if transition.touches_last_used {
                    Some(now.clone())
                } else {
                    existing.last_used
                };
                let location = if transition.updates_location {
                    input.location.clone()
                } else {
                    existing.location
                };
                tx.execute(
                    "UPDATE boxes SET status = ?1, cycle_count = ?2, last_used = ?3, \
                     location = ?4 WHERE box_id = ?5",
                    params![
                        transition.new_status.to_string(),
                        cycle_count,
                        last_used,
                        location,
                        input.box_id,
                    ],
                )?;
            }

            tx.execute(
                "INSERT INTO box_history (box_id, action, location, actor_id, timestamp, note) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    input.box_id,
                    input.action.to_string(),
                    input.location,
                    input.actor_id,
                    now,
                    input.note,
                ],
            )?;
            let entry = HistoryEntry {
                id: tx.last_insert_rowid(),
                box_id: input.box_id.clone(),
                action: input.action.clone(),
                location: input.location.clone(),
                actor_id: input.actor_id.clone(),
                timestamp: now.clone(),
                note: input.note.clone(),
            };

            // Threshold evaluation is advisory: it raises alerts, it never
            // touches box status.
            let alert = if input.action == ActionKind::CheckIn {
                let thresholds = thresholds_in_tx(&tx, existing.box_type)?;
                match alerts::evaluate(cycle_count, &thresholds) {
                    Some(kind) => {
                        raise_alert_deduped(&tx, &input.box_id, kind, cycle_count, &now)?
                    }
                    None => None,
                }
            } else {
                None
            };

            tx.commit()?;
            Ok(Some(ActionOutcome {
                status: transition.new_status,
                entry,
                alert,
            }))
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    let outcome = outcome.ok_or_else(|| BoxtrackError::box_not_found(box_id))?;
    info!(
        box_id = %outcome.entry.box_id,
        action = %outcome.entry.action,
        status = %outcome.status,
        alert = outcome.alert.is_some(),
        "action recorded"
    );
    Ok(outcome)
}

/// The box fields the transition needs.
struct BoxSnapshot {
    box_type: BoxType,
    cycle_count: u32,
    location: Option<String>,
    last_used: Option<String>,
    status: BoxStatus,
}

fn lookup_box(tx: &Transaction<'_>, box_id: &str) -> rusqlite::Result<BoxSnapshot> {
    tx.query_row(
        "SELECT box_type, cycle_count, location, last_used, status FROM boxes WHERE box_id = ?1",
        params![box_id],
        |row| {
            let box_type: String = row.get(0)?;
            let status: String = row.get(4)?;
            Ok(BoxSnapshot {
                box_type: BoxType::from_str(&box_type).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        0,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })?,
                cycle_count: row.get(1)?,
                location: row.get(2)?,
                last_used: row.get(3)?,
                status: BoxStatus::from_str(&status).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        4,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })?,
            })
        },
    )
}

/// Read the per-material thresholds within the transaction.
///
/// Missing or unparseable settings rows fall back to the compiled defaults.
fn thresholds_in_tx(tx: &Transaction<'_>, box_type: BoxType) -> rusqlite::Result<Thresholds> {
    let defaults = Thresholds::defaults_for(box_type);
    let prefix = box_type.threshold_prefix();
    let max_cycles = setting_u32(tx, &format!("{prefix}_max_cycles"))?.unwrap_or(defaults.max_cycles);
    let inspection_threshold = setting_u32(tx, &format!("{prefix}_inspection_threshold"))?
        .unwrap_or(defaults.inspection_threshold);
    Ok(Thresholds {
        max_cycles,
        inspection_threshold,
    })
}

fn setting_u32(tx: &Transaction<'_>, key: &str) -> rusqlite::Result<Option<u32>> {
    let value: Option<String> = match tx.query_row(
        "SELECT value FROM settings WHERE key = ?1",
        params![key],
        |row| row.get(0),
    ) {
        Ok(v) => Some(v),
        Err(rusqlite::Error::QueryReturnedNoRows) => None,
        Err(e) => return Err(e),
    };
    Ok(value.and_then(|v| v.trim().parse().ok()))
}

/// Insert an alert unless an unread one of the same kind already exists for
/// this box (idempotence across repeated check-ins).
fn raise_alert_deduped(
    tx: &Transaction<'_>,
    box_id: &str,
    kind: AlertKind,
    cycle_count: u32,
    now: &str,
) -> rusqlite::Result<Option<Alert>> {
    let unread: i64 = tx.query_row(
        "SELECT COUNT(*) FROM alerts WHERE box_id = ?1 AND kind = ?2 AND is_read = 0",
        params![box_id, kind.to_string()],
        |row| row.get(0),
    )?;
    if unread > 0 {
        return Ok(None);
    }
    let message = alerts::alert_message(box_id, kind, cycle_count);
    tx.execute(
        "INSERT INTO alerts (box_id, kind, message, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![box_id, kind.to_string(), message, now],
    )?;
    Ok(Some(Alert {
        id: tx.last_insert_rowid(),
        box_id: box_id.to_string(),
        kind,
        message,
        created_at: now.to_string(),
        is_read: false,
    }))
}
