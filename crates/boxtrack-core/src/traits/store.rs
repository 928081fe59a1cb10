// SPDX-FileCopyrightText: 2026 Boxtrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store trait for the relational backend.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::BoxtrackError;
use crate::types::{
    ActionInput, ActionOutcome, Alert, BoxRecord, BoxUpdate, DashboardStats, HistoryEntry, NewBox,
    User, UserRole,
};

/// Persistence boundary for the box registry, history ledger, alerts,
/// settings, and users.
///
/// The backend must provide atomic multi-statement transactions: in
/// particular [`record_action`](BoxStore::record_action) commits the
/// registry update and the ledger append together or not at all.
#[async_trait]
pub trait BoxStore: Send + Sync {
    // --- Registry ---

    /// Register a new box. Fails with [`BoxtrackError::Conflict`] when the
    /// identifier is already taken.
    async fn create_box(&self, new_box: &NewBox) -> Result<BoxRecord, BoxtrackError>;

    /// Fetch a box by its identifier.
    async fn get_box(&self, box_id: &str) -> Result<Option<BoxRecord>, BoxtrackError>;

    /// List boxes, newest registration first, with optional paging.
    async fn list_boxes(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<BoxRecord>, BoxtrackError>;

    /// Apply an admin field update. Fails with [`BoxtrackError::NotFound`]
    /// for an unknown identifier.
    async fn update_box(&self, box_id: &str, update: &BoxUpdate) -> Result<BoxRecord, BoxtrackError>;

    // --- Actions (registry + ledger, one transaction) ---

    /// Record one action: validate, run the lifecycle transition, update the
    /// box, append to the ledger, and evaluate thresholds, all atomically.
    ///
    /// Returns [`BoxtrackError::NotFound`] for an unknown box identifier
    /// without appending anything.
    async fn record_action(&self, input: &ActionInput) -> Result<ActionOutcome, BoxtrackError>;

    /// Ledger entries for a box, newest first. An unknown or actionless
    /// identifier yields an empty vec, not an error.
    async fn history_for(&self, box_id: &str) -> Result<Vec<HistoryEntry>, BoxtrackError>;

    // --- Alerts ---

    /// All alerts, newest first.
    async fn list_alerts(&self) -> Result<Vec<Alert>, BoxtrackError>;

    /// Acknowledge an alert.
    async fn mark_alert_read(&self, id: i64) -> Result<(), BoxtrackError>;

    // --- Settings ---

    /// All settings as a key/value map.
    async fn settings(&self) -> Result<BTreeMap<String, String>, BoxtrackError>;

    /// Insert or update one setting.
    async fn put_setting(&self, key: &str, value: &str) -> Result<(), BoxtrackError>;

    // --- Dashboard ---

    /// Read-side aggregates over registry and ledger.
    async fn dashboard_stats(&self) -> Result<DashboardStats, BoxtrackError>;

    // --- Users ---

    /// Check credentials. The caller passes the SHA-256 hex digest of the
    /// submitted password; plaintext never reaches the store.
    async fn verify_login(
        &self,
        username: &str,
        password_digest: &str,
        role: UserRole,
    ) -> Result<Option<User>, BoxtrackError>;

    // --- Lifecycle ---

    /// Flush pending writes and release the backend.
    async fn close(&self) -> Result<(), BoxtrackError>;
}
