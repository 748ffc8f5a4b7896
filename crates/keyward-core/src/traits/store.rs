// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store collaborator trait for the raw key-value persistence substrate.

use crate::error::KeywardError;

/// Opaque string-keyed blob store holding UTF-8 text.
///
/// The vault engine treats the store as synchronous and single-writer: every
/// call runs to completion before the next engine operation begins.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, KeywardError>;

    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), KeywardError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, KeywardError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), KeywardError> {
        (**self).set(key, value)
    }
}
