// SPDX-FileCopyrightText: 2026 Boxtrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-side dashboard aggregation.
//!
//! One batched pass over registry and ledger. No snapshot guarantee: the
//! counts are a convenience view and may lag concurrent writes.

use boxtrack_core::BoxtrackError;
use boxtrack_core::types::{DashboardStats, TurnoverSeries};
use rusqlite::Connection;

use crate::database::Database;

/// Compute dashboard aggregates: total boxes, counts per status, and the
/// monthly check-in/check-out turnover series for the last six months.
pub async fn dashboard_stats(db: &Database) -> Result<DashboardStats, BoxtrackError> {
    db.connection()
        .call(|conn| -> Result<DashboardStats, rusqlite::Error> {
            let total_boxes: i64 =
                conn.query_row("SELECT COUNT(*) FROM boxes", [], |row| row.get(0))?;

            let mut active_boxes = 0;
            let mut needs_inspection = 0;
            let mut end_of_life = 0;
            let mut missing_boxes = 0;
            let mut stmt = conn.prepare("SELECT status, COUNT(*) FROM boxes GROUP BY status")?;
            let rows = stmt.query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            })?;
            for row in rows {
                let (status, count) = row?;
                match status.as_str() {
                    "active" => active_boxes = count,
                    "needs_inspection" => needs_inspection = count,
                    "retired" => end_of_life = count,
                    "missing" => missing_boxes = count,
                    _ => {}
                }
            }

            let turnover_chart = turnover_series(conn)?;

            Ok(DashboardStats {
                total_boxes,
                active_boxes,
                needs_inspection,
                end_of_life,
                missing_boxes,
                usage_chart: [active_boxes, needs_inspection, end_of_life],
                turnover_chart,
            })
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Monthly check-in/check-out counts from the ledger, oldest month first.
///
/// ISO 8601 text timestamps sort and slice correctly under `strftime`.
fn turnover_series(conn: &Connection) -> Result<TurnoverSeries, rusqlite::Error> {
    let mut stmt = conn.prepare(
        "SELECT strftime('%Y-%m', timestamp) AS month, \
                SUM(CASE WHEN action = 'check_in' THEN 1 ELSE 0 END), \
                SUM(CASE WHEN action = 'check_out' THEN 1 ELSE 0 END) \
         FROM box_history \
         WHERE action IN ('check_in', 'check_out') \
           AND timestamp >= strftime('%Y-%m-%dT%H:%M:%fZ', 'now', 'start of month', '-5 months') \
         GROUP BY month ORDER BY month ASC",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, i64>(1)?,
            row.get::<_, i64>(2)?,
        ))
    })?;

    let mut series = TurnoverSeries::default();
    for row in rows {
        let (month, checked_in, checked_out) = row?;
        series.labels.push(month);
        series.checked_in.push(checked_in);
        series.checked_out.push(checked_out);
    }
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::{actions, boxes};
    use boxtrack_core::types::{ActionInput, ActionKind, BoxStatus, BoxType, BoxUpdate, NewBox};

    async fn seed_box(db: &Database, box_id: &str, status: BoxStatus) {
        let new_box = NewBox {
            box_id: box_id.to_string(),
            box_type: BoxType::MetalCrate,
            manufacture_date: "2022-01-01".to_string(),
            location: None,
            thickness: None,
            supplier: None,
            dimensions: None,
            material: None,
            serial_code: None,
        };
        boxes::create_box(db, &new_box).await.unwrap();
        if status != BoxStatus::Active {
            let update = BoxUpdate {
                status: Some(status),
                ..BoxUpdate::default()
            };
            boxes::update_box(db, box_id, &update).await.unwrap();
        }
    }

    #[tokio::test]
    async fn empty_database_yields_zeroes() {
        let db = Database::open_in_memory().await.unwrap();
        let stats = dashboard_stats(&db).await.unwrap();
        assert_eq!(stats.total_boxes, 0);
        assert_eq!(stats.usage_chart, [0, 0, 0]);
        assert!(stats.turnover_chart.labels.is_empty());
    }

    #[tokio::test]
    async fn counts_group_by_status() {
        let db = Database::open_in_memory().await.unwrap();
        seed_box(&db, "BX-1", BoxStatus::Active).await;
        seed_box(&db, "BX-2", BoxStatus::Active).await;
        seed_box(&db, "BX-3", BoxStatus::NeedsInspection).await;
        seed_box(&db, "BX-4", BoxStatus::Retired).await;
        seed_box(&db, "BX-5", BoxStatus::Missing).await;

        let stats = dashboard_stats(&db).await.unwrap();
        assert_eq!(stats.total_boxes, 5);
        assert_eq!(stats.active_boxes, 2);
        assert_eq!(stats.needs_inspection, 1);
        assert_eq!(stats.end_of_life, 1);
        assert_eq!(stats.missing_boxes, 1);
        assert_eq!(stats.usage_chart, [2, 1, 1]);
    }

    #[tokio::test]
    async fn turnover_counts_current_month_actions() {
        let db = Database::open_in_memory().await.unwrap();
        seed_box(&db, "BX-1", BoxStatus::Active).await;

        for kind in [ActionKind::CheckIn, ActionKind::CheckIn, ActionKind::CheckOut] {
            let input = ActionInput {
                box_id: "BX-1".to_string(),
                action: kind,
                location: None,
                actor_id: None,
                note: None,
            };
            actions::record_action(&db, &input).await.unwrap();
        }
        // Scans do not count toward turnover.
        let scan = ActionInput {
            box_id: "BX-1".to_string(),
            action: ActionKind::Scan,
            location: None,
            actor_id: None,
            note: None,
        };
        actions::record_action(&db, &scan).await.unwrap();

        let stats = dashboard_stats(&db).await.unwrap();
        assert_eq!(stats.turnover_chart.labels.len(), 1);
        assert_eq!(stats.turnover_chart.checked_in, vec![2]);
        assert_eq!(stats.turnover_chart.checked_out, vec![1]);
    }
}
