// SPDX-FileCopyrightText: 2026 Boxtrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP API server for the Boxtrack asset tracker.
//!
//! Thin glue over the core: routing, request validation, error-to-status
//! mapping, and QR rendering. The lifecycle, ledger, and alert semantics
//! all live behind the [`boxtrack_core::BoxStore`] trait.

pub mod error;
pub mod handlers;
pub mod qr;
pub mod server;

pub use error::ApiError;
pub use server::{AppState, ServerConfig, build_router, start_server};
