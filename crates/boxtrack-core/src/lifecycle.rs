// SPDX-FileCopyrightText: 2026 Boxtrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pure lifecycle state machine over box statuses.
//!
//! Maps (current status, action kind) to the status after the action plus
//! the set of field updates the action carries. No IO: the storage layer
//! applies the returned transition and the ledger append inside one
//! transaction so neither is ever observed without the other.

use crate::types::{ActionKind, BoxStatus};

/// The effect of one action on a box.
///
/// Every action is appended to the ledger regardless of whether it mutates
/// the box; `mutates_box` is false only for audit-only kinds (`scan` and
/// unrecognized kinds).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Status after the action.
    pub new_status: BoxStatus,
    /// Whether `cycle_count` increments by one.
    pub increments_cycle: bool,
    /// Whether `last_used` is set to the action timestamp.
    pub touches_last_used: bool,
    /// Whether `location` is replaced with the supplied value.
    pub updates_location: bool,
}

impl Transition {
    /// True when the action writes any box field at all.
    pub fn mutates_box(&self, current: BoxStatus) -> bool {
        self.new_status != current
            || self.increments_cycle
            || self.touches_last_used
            || self.updates_location
    }
}

/// Compute the transition for one action against a box in `current` status.
///
/// All kinds are total: there is no rejected action. Unrecognized kinds map
/// to a no-op transition and are still recorded by the caller.
pub fn apply(current: BoxStatus, action: &ActionKind) -> Transition {
    match action {
        ActionKind::CheckIn => Transition {
            new_status: current,
            increments_cycle: true,
            touches_last_used: true,
            updates_location: true,
        },
        ActionKind::CheckOut => Transition {
            new_status: current,
            increments_cycle: false,
            touches_last_used: true,
            updates_location: true,
        },
        ActionKind::Inspection => Transition {
            new_status: BoxStatus::NeedsInspection,
            increments_cycle: false,
            touches_last_used: false,
            updates_location: false,
        },
        ActionKind::Retire => Transition {
            new_status: BoxStatus::Retired,
            increments_cycle: false,
            touches_last_used: false,
            updates_location: false,
        },
        ActionKind::Scan | ActionKind::Unknown(_) => Transition {
            new_status: current,
            increments_cycle: false,
            touches_last_used: false,
            updates_location: false,
        },
    }
}
