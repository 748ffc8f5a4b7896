// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Keyward credential vault.
//!
//! This crate provides the error taxonomy, the domain types shared by every
//! other crate, and the [`KeyValueStore`] trait that persistence backends
//! implement.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{DecryptError, KeywardError, ValidationError};
pub use traits::KeyValueStore;
pub use types::{CipherText, Field, NamespaceKey, Record, Theme, MASK, THEME_KEY, VAULT_KEY_PREFIX};
