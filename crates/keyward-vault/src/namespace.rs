// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Passphrase to storage-namespace derivation.

use keyward_core::NamespaceKey;
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

/// Derive the storage namespace for `passphrase` as lowercase SHA-256 hex.
///
/// The namespace only partitions the store. Cipher keys are derived per field
/// with Argon2id and never from this value.
pub fn derive_namespace(passphrase: &SecretString) -> NamespaceKey {
    let digest = Sha256::digest(passphrase.expose_secret().as_bytes());
    NamespaceKey::new(hex::encode(digest))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ns(s: &str) -> NamespaceKey {
        derive_namespace(&SecretString::from(s.to_string()))
    }

    #[test]
    fn known_vector() {
        assert_eq!(
            ns("Abcdef1!").as_str(),
            "a5150e724a1858d6117e6bc98753dd79ce70e48df9d51cda9bc52e752917724b"
        );
    }

    #[test]
    fn deterministic() {
        assert_eq!(ns("Correct-Horse-9"), ns("Correct-Horse-9"));
    }

    #[test]
    fn distinct_passphrases_distinct_namespaces() {
        assert_ne!(ns("Abcdef1!"), ns("Abcdef2!"));
    }

    #[test]
    fn fixed_length_hex() {
        let key = ns("x");
        assert_eq!(key.as_str().len(), 64);
        assert!(key.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert!(key.storage_key().starts_with("passwords_"));
    }
}
