// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Keyward credential vault.

use thiserror::Error;

use crate::types::Field;

/// Passphrase validation failures reported back to the user at unlock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The passphrase or its confirmation was left empty.
    #[error("Please enter and confirm the encryption key.")]
    MissingPassphrase,

    /// The passphrase does not meet the strength policy.
    #[error(
        "Encryption key must be at least 8 characters long, contain uppercase, lowercase, number, and special character."
    )]
    WeakPassphrase,

    /// The passphrase and its confirmation differ.
    #[error("Encryption key and confirmation do not match.")]
    Mismatch,
}

/// Failure to recover plaintext from a [`CipherText`](crate::types::CipherText).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecryptError {
    /// Authentication failed, or the recovered text was empty or not UTF-8.
    #[error("wrong key -- unable to decrypt")]
    WrongKey,

    /// The ciphertext string is not a recognizable envelope. Carries the
    /// parse failure (bad base64, unknown version, truncation, KDF bounds).
    #[error("malformed ciphertext: {0}")]
    Malformed(String),
}

/// The primary error type used across the vault engine and its collaborators.
#[derive(Debug, Error)]
pub enum KeywardError {
    /// Passphrase validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A record could not be created because a field was left empty.
    #[error("Please enter ID, password, and description ({field} is empty).")]
    IncompleteInput {
        /// The first empty field, in id, password, description order.
        field: Field,
    },

    /// A single field could not be decrypted.
    #[error(transparent)]
    Decrypt(#[from] DecryptError),

    /// A reveal attempt failed to decrypt one of the record's fields.
    #[error("Incorrect encryption key. Unable to decrypt.")]
    IncorrectPassphrase,

    /// A backup buffer could not be parsed; nothing was imported. Carries the
    /// failing record index or parser message.
    #[error("backup import failed: {0}")]
    ImportParse(String),

    /// No record with the given identity ciphertext exists in the vault.
    #[error("record not found")]
    RecordNotFound,

    /// Stored vault contents for the namespace could not be parsed. Carries
    /// the JSON error.
    #[error("stored vault is corrupted: {0}")]
    CorruptVault(String),

    /// Store collaborator failure (database, filesystem).
    #[error("storage error: {source}")]
    Storage {
        /// The underlying database or filesystem error.
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Vault contents could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key derivation, random generation, or encryption failed, including
    /// KDF parameters outside the accepted bounds. Carries the reason.
    #[error("crypto error: {0}")]
    Crypto(String),

    /// Terminal or backup-file I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl KeywardError {
    /// Wrap any error as a storage failure.
    pub fn storage(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Storage {
            source: source.into(),
        }
    }
}
