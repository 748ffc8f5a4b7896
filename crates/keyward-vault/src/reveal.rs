// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-record masked/revealed display state.
//!
//! All three fields of a record are revealed together and only after every
//! one of them decrypts. State is never persisted.

use std::collections::HashMap;
use std::fmt;

use keyward_core::{CipherText, Field, KeywardError, Record, MASK};
use secrecy::{ExposeSecret, SecretString};

use crate::cipher::FieldCipher;

/// Display state of one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Masked,
    Revealed,
}

/// Decrypted fields of a revealed record.
pub struct RevealedRecord {
    identity: SecretString,
    secret: SecretString,
    label: SecretString,
}

impl RevealedRecord {
    fn field(&self, field: Field) -> &SecretString {
        match field {
            Field::Identity => &self.identity,
            Field::Secret => &self.secret,
            Field::Label => &self.label,
        }
    }
}

impl fmt::Debug for RevealedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RevealedRecord([REDACTED])")
    }
}

/// What a caller should display for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldView<'a> {
    Masked,
    Plain(&'a str),
}

impl fmt::Display for FieldView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldView::Masked => f.write_str(MASK),
            FieldView::Plain(text) => f.write_str(text),
        }
    }
}

/// Reveal state keyed by record identity ciphertext. Absent means masked.
#[derive(Debug, Default)]
pub struct RevealController {
    revealed: HashMap<CipherText, RevealedRecord>,
}

impl RevealController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip `record` between masked and revealed.
    ///
    /// Revealing decrypts all three fields; if any fails the record stays
    /// masked and [`KeywardError::IncorrectPassphrase`] is returned. Masking
    /// never decrypts.
    pub fn toggle(
        &mut self,
        record: &Record,
        cipher: &FieldCipher,
        passphrase: &SecretString,
    ) -> Result<RevealState, KeywardError> {
        if self.revealed.remove(&record.identity).is_some() {
            return Ok(RevealState::Masked);
        }

        let open = |field: Field| {
            cipher
                .decrypt(record.field(field), passphrase)
                .map_err(|_| KeywardError::IncorrectPassphrase)
        };
        let revealed = RevealedRecord {
            identity: open(Field::Identity)?,
            secret: open(Field::Secret)?,
            label: open(Field::Label)?,
        };
        self.revealed.insert(record.identity.clone(), revealed);
        Ok(RevealState::Revealed)
    }

    pub fn state(&self, identity: &CipherText) -> RevealState {
        if self.revealed.contains_key(identity) {
            RevealState::Revealed
        } else {
            RevealState::Masked
        }
    }

    pub fn field_view(&self, identity: &CipherText, field: Field) -> FieldView<'_> {
        match self.revealed.get(identity) {
            Some(record) => FieldView::Plain(record.field(field).expose_secret()),
            None => FieldView::Masked,
        }
    }

    /// Drop any revealed state for `identity`.
    pub fn forget(&mut self, identity: &CipherText) {
        self.revealed.remove(identity);
    }

    /// Mask every record.
    pub fn reset(&mut self) {
        self.revealed.clear();
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }
}
