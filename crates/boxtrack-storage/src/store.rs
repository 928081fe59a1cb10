// SPDX-FileCopyrightText: 2026 Boxtrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the [`BoxStore`] trait.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tracing::debug;

use boxtrack_config::model::StorageConfig;
use boxtrack_core::types::{
    ActionInput, ActionOutcome, Alert, BoxRecord, BoxUpdate, DashboardStats, HistoryEntry, NewBox,
    User, UserRole,
};
use boxtrack_core::{BoxStore, BoxtrackError};

use crate::database::Database;
use crate::queries;

/// SQLite-backed box store.
///
/// Wraps a [`Database`] handle and delegates to the typed query modules.
/// All writes go through the single tokio-rusqlite background thread.
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Open (or create) the store at the configured path and run migrations.
    pub async fn open(config: &StorageConfig) -> Result<Self, BoxtrackError> {
        let db = Database::open(&config.database_path).await?;
        debug!(path = %config.database_path, "SQLite store opened");
        Ok(Self { db })
    }

    /// Open an in-memory store. Used by tests and ephemeral tooling.
    pub async fn open_in_memory() -> Result<Self, BoxtrackError> {
        let db = Database::open_in_memory().await?;
        Ok(Self { db })
    }

    /// The underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl BoxStore for SqliteStore {
    async fn create_box(&self, new_box: &NewBox) -> Result<BoxRecord, BoxtrackError> {
        queries::boxes::create_box(&self.db, new_box).await
    }

    async fn get_box(&self, box_id: &str) -> Result<Option<BoxRecord>, BoxtrackError> {
        queries::boxes::get_box(&self.db, box_id).await
    }

    async fn list_boxes(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<BoxRecord>, BoxtrackError> {
        queries::boxes::list_boxes(&self.db, limit, offset).await
    }

    async fn update_box(
        &self,
        box_id: &str,
        update: &BoxUpdate,
    ) -> Result<BoxRecord, BoxtrackError> {
        queries::boxes::update_box(&self.db, box_id, update).await
    }

    async fn record_action(&self, input: &ActionInput) -> Result<ActionOutcome, BoxtrackError> {
        queries::actions::record_action(&self.db, input).await
    }

    async fn history_for(&self, box_id: &str) -> Result<Vec<HistoryEntry>, BoxtrackError> {
        queries::history::list_for(&self.db, box_id).await
    }

    async fn list_alerts(&self) -> Result<Vec<Alert>, BoxtrackError> {
        queries::alerts::list_alerts(&self.db).await
    }

    async fn mark_alert_read(&self, id: i64) -> Result<(), BoxtrackError> {
        queries::alerts::mark_read(&self.db, id).await
    }

    async fn settings(&self) -> Result<BTreeMap<String, String>, BoxtrackError> {
        queries::settings::all_settings(&self.db).await
    }

    async fn put_setting(&self, key: &str, value: &str) -> Result<(), BoxtrackError> {
        queries::settings::put_setting(&self.db, key, value).await
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, BoxtrackError> {
        queries::dashboard::dashboard_stats(&self.db).await
    }

    async fn verify_login(
        &self,
        username: &str,
        password_digest: &str,
        role: UserRole,
    ) -> Result<Option<User>, BoxtrackError> {
        queries::users::verify_login(&self.db, username, password_digest, role).await
    }

    async fn close(&self) -> Result<(), BoxtrackError> {
        self.db.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxtrack_core::types::{ActionKind, BoxStatus, BoxType};
    use tempfile::tempdir;

    fn make_config(path: &str) -> StorageConfig {
        StorageConfig {
            database_path: path.to_string(),
            wal_mode: true,
        }
    }

    #[tokio::test]
    async fn open_creates_database_at_configured_path() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("store.db");
        let store = SqliteStore::open(&make_config(db_path.to_str().unwrap()))
            .await
            .unwrap();
        assert!(db_path.exists(), "database file should be created");
        store.close().await.unwrap();
    }

    #[tokio::test]
    async fn full_box_lifecycle_through_store() {
        let store = SqliteStore::open_in_memory().await.unwrap();

        let new_box = NewBox {
            box_id: "BX-3021-43".to_string(),
            box_type: BoxType::MetalCrate,
            manufacture_date: "2021-08-20".to_string(),
            location: Some("Dispatch Area".to_string()),
            thickness: Some("3mm".to_string()),
            supplier: None,
            dimensions: Some("120x80x60".to_string()),
            material: None,
            serial_code: Some("MC-2021-3021".to_string()),
        };
        let created = store.create_box(&new_box).await.unwrap();
        assert_eq!(created.status, BoxStatus::Active);

        let input = ActionInput {
            box_id: "BX-3021-43".to_string(),
            action: ActionKind::CheckIn,
            location: Some("Warehouse B".to_string()),
            actor_id: Some("admin".to_string()),
            note: Some("returned from route 7".to_string()),
        };
        let outcome = store.record_action(&input).await.unwrap();
        assert_eq!(outcome.entry.note.as_deref(), Some("returned from route 7"));

        let fetched = store.get_box("BX-3021-43").await.unwrap().unwrap();
        assert_eq!(fetched.cycle_count, 1);

        let history = store.history_for("BX-3021-43").await.unwrap();
        assert_eq!(history.len(), 1);

        let stats = store.dashboard_stats().await.unwrap();
        assert_eq!(stats.total_boxes, 1);
        assert_eq!(stats.active_boxes, 1);

        store.close().await.unwrap();
    }
}
