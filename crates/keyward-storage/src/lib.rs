// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store collaborators for the Keyward credential vault.
//!
//! Both stores implement [`keyward_core::KeyValueStore`]: an in-memory map
//! and a SQLite table with embedded migrations.

pub mod database;
pub mod memory;
pub mod migrations;

pub use database::SqliteStore;
pub use memory::MemoryStore;
