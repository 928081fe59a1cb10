// SPDX-FileCopyrightText: 2026 Boxtrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait boundaries between the Boxtrack core and its collaborators.
//!
//! Traits use `#[async_trait]` for dynamic dispatch compatibility so the
//! HTTP layer can hold an `Arc<dyn BoxStore>`.

pub mod store;

pub use store::BoxStore;
