// SPDX-FileCopyrightText: 2026 Boxtrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for storage entities.
//!
//! The canonical types are defined in `boxtrack-core::types` for use across
//! the store trait boundary. This module re-exports them for convenience
//! within the storage crate.

pub use boxtrack_core::types::{
    ActionInput, ActionOutcome, Alert, BoxRecord, BoxUpdate, DashboardStats, HistoryEntry, NewBox,
    TurnoverSeries, User,
};
