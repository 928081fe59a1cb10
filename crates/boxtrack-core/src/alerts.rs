// SPDX-FileCopyrightText: 2026 Boxtrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Threshold-based alert evaluation.
//!
//! Classification is advisory and derived: it never mutates box status.
//! Status only moves through explicit `inspection`/`retire` actions.
//! Thresholds are passed in explicitly; callers resolve them from settings
//! (falling back to the per-material defaults) before evaluating.

use crate::types::{AlertKind, BoxType};

/// Per-material cycle thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Cycle count at which a box reaches end of life.
    pub max_cycles: u32,
    /// Cycle count at which a box should be inspected.
    pub inspection_threshold: u32,
}

impl Thresholds {
    /// Compiled defaults, used when the settings table has no override.
    pub fn defaults_for(box_type: BoxType) -> Self {
        match box_type {
            BoxType::PlasticContainer => Self {
                max_cycles: 150,
                inspection_threshold: 135,
            },
            BoxType::MetalCrate => Self {
                max_cycles: 200,
                inspection_threshold: 180,
            },
            BoxType::WoodenPallet => Self {
                max_cycles: 100,
                inspection_threshold: 90,
            },
        }
    }
}

/// Classify a cycle count against thresholds.
///
/// `max_cycles` wins when the two bands overlap, so a box at or past end of
/// life is always `Eol`, never `Inspection`.
pub fn evaluate(cycle_count: u32, thresholds: &Thresholds) -> Option<AlertKind> {
    if cycle_count >= thresholds.max_cycles {
        Some(AlertKind::Eol)
    } else if cycle_count >= thresholds.inspection_threshold {
        Some(AlertKind::Inspection)
    } else {
        None
    }
}

/// Human-readable message for an alert row.
pub fn alert_message(box_id: &str, kind: AlertKind, cycle_count: u32) -> String {
    match kind {
        AlertKind::Inspection => {
            format!("Box {box_id} approaching cycle limit ({cycle_count} cycles)")
        }
        AlertKind::Eol => format!("Box {box_id} reached end of life ({cycle_count} cycles)"),
    }
}
