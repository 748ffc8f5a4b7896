// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Passphrase strength policy.

use keyward_core::ValidationError;
use secrecy::{ExposeSecret, SecretString};

pub const MIN_PASSPHRASE_LEN: usize = 8;

/// Characters that satisfy the "special character" requirement.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Whether `passphrase` meets the length and character-class policy.
pub fn is_strong(passphrase: &str) -> bool {
    passphrase.chars().count() >= MIN_PASSPHRASE_LEN
        && passphrase.chars().any(|c| c.is_ascii_uppercase())
        && passphrase.chars().any(|c| c.is_ascii_lowercase())
        && passphrase.chars().any(|c| c.is_ascii_digit())
        && passphrase.chars().any(|c| SPECIAL_CHARACTERS.contains(c))
}

/// Validate a passphrase and its confirmation.
///
/// Checks run in order and the first failure wins: an empty value, then the
/// strength policy, then equality.
pub fn validate_strength(
    passphrase: &SecretString,
    confirmation: &SecretString,
) -> Result<(), ValidationError> {
    let passphrase = passphrase.expose_secret();
    let confirmation = confirmation.expose_secret();

    if passphrase.is_empty() || confirmation.is_empty() {
        return Err(ValidationError::MissingPassphrase);
    }
    if !is_strong(passphrase) {
        return Err(ValidationError::WeakPassphrase);
    }
    if passphrase != confirmation {
        return Err(ValidationError::Mismatch);
    }
    Ok(())
}
