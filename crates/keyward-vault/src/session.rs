// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The unlocked vault for one passphrase namespace.
//!
//! A [`VaultSession`] owns the ordered record list and the reveal state for
//! the lifetime of an unlock. Every mutation writes the full vault to the
//! store before the in-memory list is replaced, so a failed write leaves
//! both sides unchanged.

use std::fmt;

use keyward_core::{CipherText, Field, KeyValueStore, KeywardError, NamespaceKey, Record, ValidationError};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, warn};

use crate::cipher::FieldCipher;
use crate::namespace::derive_namespace;
use crate::reconcile::{self, ImportReport};
use crate::reveal::{FieldView, RevealController, RevealState};
use crate::strength::validate_strength;

pub struct VaultSession<'s, S: KeyValueStore + ?Sized> {
    store: &'s mut S,
    passphrase: SecretString,
    namespace: NamespaceKey,
    cipher: FieldCipher,
    records: Vec<Record>,
    reveal: RevealController,
}

impl<S: KeyValueStore + ?Sized> fmt::Debug for VaultSession<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultSession")
            .field("namespace", &self.namespace)
            .field("records", &self.records.len())
            .field("passphrase", &"[REDACTED]")
            .finish()
    }
}

impl<'s, S: KeyValueStore + ?Sized> VaultSession<'s, S> {
    /// Open the vault stored under `passphrase`'s namespace.
    ///
    /// A namespace with no stored vault starts empty. Whether the passphrase
    /// decrypts any existing record is only discovered on reveal.
    pub fn unlock(
        store: &'s mut S,
        passphrase: SecretString,
        cipher: FieldCipher,
    ) -> Result<Self, KeywardError> {
        if passphrase.expose_secret().is_empty() {
            return Err(ValidationError::MissingPassphrase.into());
        }

        let namespace = derive_namespace(&passphrase);
        let records = load_vault(&*store, &namespace)?;
        info!(namespace = namespace.short(), records = records.len(), "vault unlocked");

        Ok(Self {
            store,
            passphrase,
            namespace,
            cipher,
            records,
            reveal: RevealController::new(),
        })
    }

    /// Validate `passphrase` against `confirmation` and the strength policy,
    /// then [`unlock`](Self::unlock).
    pub fn unlock_validated(
        store: &'s mut S,
        passphrase: SecretString,
        confirmation: &SecretString,
        cipher: FieldCipher,
    ) -> Result<Self, KeywardError> {
        validate_strength(&passphrase, confirmation)?;
        Self::unlock(store, passphrase, cipher)
    }

    pub fn namespace(&self) -> &NamespaceKey {
        &self.namespace
    }

    pub fn cipher(&self) -> &FieldCipher {
        &self.cipher
    }

    /// Records in insertion order.
    pub fn list(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Encrypt and append a new record, then persist the vault.
    pub fn add(
        &mut self,
        identity: &str,
        secret: &SecretString,
        label: &str,
    ) -> Result<Record, KeywardError> {
        let secret = secret.expose_secret();
        for (field, value) in [
            (Field::Identity, identity),
            (Field::Secret, secret),
            (Field::Label, label),
        ] {
            if value.is_empty() {
                return Err(KeywardError::IncompleteInput { field });
            }
        }

        let record = Record {
            identity: self.cipher.encrypt(identity, &self.passphrase)?,
            secret: self.cipher.encrypt(secret, &self.passphrase)?,
            label: self.cipher.encrypt(label, &self.passphrase)?,
        };

        let mut next = self.records.clone();
        next.push(record.clone());
        self.commit(next)?;

        debug!(namespace = self.namespace.short(), records = self.records.len(), "record added");
        Ok(record)
    }

    /// Remove the first record whose identity ciphertext equals `identity`.
    ///
    /// Returns `false` without writing when no record matches.
    pub fn delete(&mut self, identity: &CipherText) -> Result<bool, KeywardError> {
        let Some(index) = self.records.iter().position(|r| &r.identity == identity) else {
            debug!(namespace = self.namespace.short(), "delete: no matching record");
            return Ok(false);
        };

        let mut next = self.records.clone();
        next.remove(index);
        self.commit(next)?;
        self.reveal.forget(identity);

        debug!(namespace = self.namespace.short(), records = self.records.len(), "record deleted");
        Ok(true)
    }

    /// Reveal or re-mask the record with identity ciphertext `identity`.
    pub fn toggle_reveal(&mut self, identity: &CipherText) -> Result<RevealState, KeywardError> {
        let record = self
            .records
            .iter()
            .find(|r| &r.identity == identity)
            .ok_or(KeywardError::RecordNotFound)?;

        let result = self.reveal.toggle(record, &self.cipher, &self.passphrase);
        if let Err(KeywardError::IncorrectPassphrase) = &result {
            warn!(namespace = self.namespace.short(), "reveal failed: passphrase does not decrypt record");
        }
        result
    }

    pub fn reveal_state(&self, identity: &CipherText) -> RevealState {
        self.reveal.state(identity)
    }

    pub fn field_view(&self, identity: &CipherText, field: Field) -> FieldView<'_> {
        self.reveal.field_view(identity, field)
    }

    /// Serialize the current records, still encrypted, as pretty JSON.
    pub fn export_backup(&self) -> Result<Vec<u8>, KeywardError> {
        let bytes = serde_json::to_vec_pretty(&self.records)?;
        info!(namespace = self.namespace.short(), records = self.records.len(), "backup exported");
        Ok(bytes)
    }

    /// Parse `bytes` as a backup and merge it into the vault.
    ///
    /// A parse failure leaves the vault and the store untouched.
    pub fn import_backup(&mut self, bytes: &[u8]) -> Result<ImportReport, KeywardError> {
        let incoming = reconcile::parse_backup(bytes)?;
        let outcome = reconcile::merge(&self.records, incoming);
        let report = ImportReport::from(&outcome);

        if outcome.added > 0 {
            self.commit(outcome.records)?;
        }

        info!(
            namespace = self.namespace.short(),
            added = report.added,
            skipped = report.skipped,
            "backup imported"
        );
        Ok(report)
    }

    /// End the session, discarding the passphrase and reveal state.
    pub fn lock(self) {
        info!(namespace = self.namespace.short(), "vault locked");
    }

    fn commit(&mut self, next: Vec<Record>) -> Result<(), KeywardError> {
        write_vault(&mut *self.store, &self.namespace, &next)?;
        self.records = next;
        Ok(())
    }
}

fn load_vault<S: KeyValueStore + ?Sized>(
    store: &S,
    namespace: &NamespaceKey,
) -> Result<Vec<Record>, KeywardError> {
    match store.get(&namespace.storage_key())? {
        None => Ok(Vec::new()),
        Some(text) => serde_json::from_str(&text)
            .map_err(|e| KeywardError::CorruptVault(e.to_string())),
    }
}

/// Overwrite the stored vault for `namespace` with `records`.
pub fn write_vault<S: KeyValueStore + ?Sized>(
    store: &mut S,
    namespace: &NamespaceKey,
    records: &[Record],
) -> Result<(), KeywardError> {
    let json = serde_json::to_string(records)?;
    store.set(&namespace.storage_key(), &json)
}
