// SPDX-FileCopyrightText: 2026 Boxtrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Boxtrack asset tracker.
//!
//! Provides the domain types, error taxonomy, pure lifecycle state machine,
//! and threshold alert evaluation used throughout the Boxtrack workspace,
//! plus the [`BoxStore`] trait the storage backend implements.

pub mod alerts;
pub mod error;
pub mod lifecycle;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use alerts::Thresholds;
pub use error::BoxtrackError;
pub use traits::BoxStore;
pub use types::{ActionKind, AlertKind, BoxStatus, BoxType};

/// ISO 8601 timestamp with millisecond precision, the format used for every
/// server-assigned timestamp in the system.
pub fn now_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_format_is_sortable_iso8601() {
        let ts = now_timestamp();
        assert_eq!(ts.len(), "2026-01-01T00:00:00.000Z".len());
        assert!(ts.ends_with('Z'));
        assert_eq!(&ts[10..11], "T");
    }

    #[test]
    fn error_and_types_are_exported_at_root() {
        let _err = BoxtrackError::Internal("test".into());
        let _status = BoxStatus::Active;
        let _kind = ActionKind::Scan;
        let _alert = AlertKind::Eol;
        let _thresholds = Thresholds::defaults_for(BoxType::MetalCrate);
        fn _assert_store<T: BoxStore>() {}
    }
}
