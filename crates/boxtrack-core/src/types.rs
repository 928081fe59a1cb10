// SPDX-FileCopyrightText: 2026 Boxtrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common domain types shared across the Boxtrack workspace.
//!
//! Timestamps are ISO 8601 strings with millisecond precision
//! (`%Y-%m-%dT%H:%M:%S%.3fZ`), assigned by the server or by SQLite
//! `strftime` defaults. They are kept as strings end to end so the storage
//! layer never round-trips through a datetime type.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Lifecycle status of a box. Transitions only via recorded actions.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BoxStatus {
    /// In circulation. Initial state for every new box.
    #[default]
    Active,
    /// Flagged for inspection by an `inspection` action.
    NeedsInspection,
    /// Taken out of circulation. Terminal under normal operation.
    Retired,
    /// Reported missing via an admin update.
    Missing,
}

/// Material type of a box. Thresholds are configured per material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
pub enum BoxType {
    #[strum(serialize = "Plastic Container")]
    #[serde(rename = "Plastic Container")]
    PlasticContainer,
    #[strum(serialize = "Metal Crate")]
    #[serde(rename = "Metal Crate")]
    MetalCrate,
    #[strum(serialize = "Wooden Pallet")]
    #[serde(rename = "Wooden Pallet")]
    WoodenPallet,
}

impl BoxType {
    /// Prefix used for per-material threshold keys in the settings table,
    /// e.g. `metal_max_cycles` / `metal_inspection_threshold`.
    pub fn threshold_prefix(&self) -> &'static str {
        match self {
            Self::PlasticContainer => "plastic",
            Self::MetalCrate => "metal",
            Self::WoodenPallet => "wooden",
        }
    }
}

/// The category of event recorded against a box.
///
/// The ledger accepts any action kind: kinds the engine does not recognize
/// are carried as [`ActionKind::Unknown`] and still appended to history,
/// they just never mutate the box.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionKind {
    /// Return to circulation. The only action that increments `cycle_count`.
    CheckIn,
    /// Dispatch out of a location.
    CheckOut,
    /// Flag the box for inspection.
    Inspection,
    /// Take the box out of circulation.
    Retire,
    /// Bare QR read. Audit event only.
    Scan,
    /// Any other kind. Recorded verbatim, never mutates the box.
    Unknown(String),
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CheckIn => f.write_str("check_in"),
            Self::CheckOut => f.write_str("check_out"),
            Self::Inspection => f.write_str("inspection"),
            Self::Retire => f.write_str("retire"),
            Self::Scan => f.write_str("scan"),
            Self::Unknown(kind) => f.write_str(kind),
        }
    }
}

impl From<&str> for ActionKind {
    fn from(value: &str) -> Self {
        match value {
            "check_in" => Self::CheckIn,
            "check_out" => Self::CheckOut,
            "inspection" => Self::Inspection,
            "retire" => Self::Retire,
            "scan" => Self::Scan,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<String> for ActionKind {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<ActionKind> for String {
    fn from(kind: ActionKind) -> Self {
        kind.to_string()
    }
}

/// Kind of threshold alert raised against a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Cycle count at or above the inspection threshold.
    Inspection,
    /// Cycle count at or above the end-of-life maximum.
    Eol,
}

/// Role of an application user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Staff,
    Delivery,
}

/// A trackable reusable container asset.
///
/// `box_id` is the unique, immutable, human-readable identifier and the key
/// for every API route and foreign reference. The descriptive attributes
/// (`thickness` through `serial_code`) are immutable reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxRecord {
    pub box_id: String,
    #[serde(rename = "type")]
    pub box_type: BoxType,
    pub cycle_count: u32,
    pub location: Option<String>,
    pub last_used: Option<String>,
    pub manufacture_date: String,
    pub status: BoxStatus,
    pub thickness: Option<String>,
    pub supplier: Option<String>,
    pub dimensions: Option<String>,
    pub material: Option<String>,
    pub serial_code: Option<String>,
    pub created_at: String,
}

/// Fields required to register a new box. Status starts `active`,
/// cycle_count starts at zero.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBox {
    pub box_id: String,
    #[serde(rename = "type")]
    pub box_type: BoxType,
    pub manufacture_date: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub thickness: Option<String>,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub dimensions: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub serial_code: Option<String>,
}

impl NewBox {
    /// Validate required fields before any write is attempted.
    pub fn validate(&self) -> Result<(), crate::BoxtrackError> {
        if self.box_id.trim().is_empty() {
            return Err(crate::BoxtrackError::InvalidInput(
                "box_id must not be empty".to_string(),
            ));
        }
        if self.manufacture_date.trim().is_empty() {
            return Err(crate::BoxtrackError::InvalidInput(
                "manufacture_date must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Admin-side field update for an existing box.
///
/// `None` fields are left untouched. Setting `cycle_count` here is the one
/// sanctioned way to reset a counter outside of `check_in` increments.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoxUpdate {
    #[serde(rename = "type")]
    #[serde(default)]
    pub box_type: Option<BoxType>,
    #[serde(default)]
    pub cycle_count: Option<u32>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub last_used: Option<String>,
    #[serde(default)]
    pub manufacture_date: Option<String>,
    #[serde(default)]
    pub status: Option<BoxStatus>,
}

/// One append-only ledger row describing an action against a box.
///
/// `box_id` is a reference, not ownership: history survives retirement and
/// may even precede box creation in tolerant lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub box_id: String,
    pub action: ActionKind,
    pub location: Option<String>,
    pub actor_id: Option<String>,
    pub timestamp: String,
    pub note: Option<String>,
}

/// A threshold alert. Never deleted; acknowledged via `is_read`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: i64,
    pub box_id: String,
    pub kind: AlertKind,
    pub message: String,
    pub created_at: String,
    pub is_read: bool,
}

/// An application user. The password digest never leaves the storage layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub role: UserRole,
}

/// An action submitted by a scan device or UI against a box identifier.
#[derive(Debug, Clone)]
pub struct ActionInput {
    pub box_id: String,
    pub action: ActionKind,
    pub location: Option<String>,
    pub actor_id: Option<String>,
    pub note: Option<String>,
}

impl ActionInput {
    /// Validate required fields before any write is attempted.
    pub fn validate(&self) -> Result<(), crate::BoxtrackError> {
        if self.box_id.trim().is_empty() {
            return Err(crate::BoxtrackError::InvalidInput(
                "box_id must not be empty".to_string(),
            ));
        }
        if self.action.to_string().trim().is_empty() {
            return Err(crate::BoxtrackError::InvalidInput(
                "action must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of recording one action: the box status after the action, the
/// ledger entry that was appended, and the alert raised (if any).
#[derive(Debug, Clone, Serialize)]
pub struct ActionOutcome {
    pub status: BoxStatus,
    pub entry: HistoryEntry,
    pub alert: Option<Alert>,
}

/// Monthly check-in/check-out series for the dashboard turnover chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnoverSeries {
    /// `YYYY-MM` labels, oldest first.
    pub labels: Vec<String>,
    pub checked_in: Vec<i64>,
    pub checked_out: Vec<i64>,
}

/// Read-side dashboard aggregates. Convenience view, not an authority:
/// counts may lag concurrent writes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_boxes: i64,
    pub active_boxes: i64,
    pub needs_inspection: i64,
    pub end_of_life: i64,
    pub missing_boxes: i64,
    /// `[active, needs_inspection, end_of_life]`, the shape the usage donut expects.
    pub usage_chart: [i64; 3],
    pub turnover_chart: TurnoverSeries,
}
