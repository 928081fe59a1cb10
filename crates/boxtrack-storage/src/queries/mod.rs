// SPDX-FileCopyrightText: 2026 Boxtrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules for the Boxtrack storage entities.

pub mod actions;
pub mod alerts;
pub mod boxes;
pub mod dashboard;
pub mod history;
pub mod settings;
pub mod users;
