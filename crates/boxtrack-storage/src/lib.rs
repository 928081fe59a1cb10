// SPDX-FileCopyrightText: 2026 Boxtrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Boxtrack asset tracker.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a
//! single-writer concurrency model via `tokio-rusqlite`, and typed
//! operations for the box registry, the append-only history ledger, alerts,
//! settings, and users. The record-action path commits the registry update
//! and the ledger append in one transaction.

pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;
pub mod store;

pub use database::Database;
pub use models::*;
pub use store::SqliteStore;
