// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vault engine for the Keyward credential vault.
//!
//! A passphrase selects a storage namespace (SHA-256) and keys every field
//! independently (Argon2id per field, AES-256-GCM). [`VaultSession`] holds the
//! unlocked record list and writes it through to a
//! [`KeyValueStore`](keyward_core::KeyValueStore) on every mutation.

pub mod cipher;
pub mod crypto;
pub mod kdf;
pub mod namespace;
pub mod preferences;
pub mod prompt;
pub mod reconcile;
pub mod reveal;
pub mod session;
pub mod strength;

pub use cipher::{decrypt, is_well_formed, FieldCipher};
pub use kdf::KdfParams;
pub use namespace::derive_namespace;
pub use preferences::{load_theme, save_theme, toggle_theme};
pub use reconcile::{merge, parse_backup, ImportReport, MergeOutcome};
pub use reveal::{FieldView, RevealController, RevealState};
pub use session::VaultSession;
pub use strength::{is_strong, validate_strength};
