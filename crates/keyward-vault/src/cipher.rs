// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-field passphrase encryption producing self-describing [`CipherText`]s.
//!
//! Envelope layout before base64 encoding:
//!
//! ```text
//! version (1) | memory_cost (4, BE) | iterations (4, BE) | parallelism (4, BE)
//!   | salt (16) | nonce (12) | ciphertext + tag (16)
//! ```
//!
//! The bytes before the nonce are authenticated as additional data. Decryption
//! reads the KDF parameters from the envelope, never from configuration, so
//! records stay readable after the configured costs change.

use base64::{engine::general_purpose::STANDARD, Engine};
use keyward_config::VaultConfig;
use keyward_core::{CipherText, DecryptError, KeywardError};
use ring::aead::NONCE_LEN;
use secrecy::{ExposeSecret, SecretString};
use zeroize::Zeroizing;

use crate::crypto::{self, TAG_LEN};
use crate::kdf::{self, KdfParams, SALT_LEN};

pub const ENVELOPE_VERSION: u8 = 1;

const PREFIX_LEN: usize = 1 + 4 + 4 + 4 + SALT_LEN;
const MIN_ENVELOPE_LEN: usize = PREFIX_LEN + NONCE_LEN + TAG_LEN;

/// Encrypts fields under a passphrase with a fresh salt and nonce per call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldCipher {
    params: KdfParams,
}

impl FieldCipher {
    pub fn new(params: KdfParams) -> Self {
        Self { params }
    }

    pub fn from_config(config: &VaultConfig) -> Self {
        Self::new(KdfParams::from(config))
    }

    /// Parameters applied to new ciphertexts.
    pub fn params(&self) -> &KdfParams {
        &self.params
    }

    /// Encrypt `plaintext` under `passphrase`.
    ///
    /// Encrypting the same plaintext twice yields different ciphertexts.
    /// Parameters that a later [`decrypt`] would refuse are rejected here
    /// with [`KeywardError::Crypto`].
    pub fn encrypt(
        &self,
        plaintext: &str,
        passphrase: &SecretString,
    ) -> Result<CipherText, KeywardError> {
        self.params.check_bounds().map_err(KeywardError::Crypto)?;

        let salt = kdf::generate_salt()?;
        let key = kdf::derive_key(passphrase.expose_secret().as_bytes(), &salt, &self.params)?;

        let mut envelope = Vec::with_capacity(MIN_ENVELOPE_LEN + plaintext.len());
        envelope.push(ENVELOPE_VERSION);
        envelope.extend_from_slice(&self.params.memory_cost.to_be_bytes());
        envelope.extend_from_slice(&self.params.iterations.to_be_bytes());
        envelope.extend_from_slice(&self.params.parallelism.to_be_bytes());
        envelope.extend_from_slice(&salt);

        let (sealed, nonce) = crypto::seal(&key, &envelope, plaintext.as_bytes())?;
        envelope.extend_from_slice(&nonce);
        envelope.extend_from_slice(&sealed);

        Ok(CipherText::new(STANDARD.encode(envelope)))
    }

    /// Decrypt `cipher` under `passphrase`. See [`decrypt`].
    pub fn decrypt(
        &self,
        cipher: &CipherText,
        passphrase: &SecretString,
    ) -> Result<SecretString, DecryptError> {
        decrypt(cipher, passphrase)
    }
}

/// Parsed view of an envelope.
struct Envelope {
    bytes: Vec<u8>,
    params: KdfParams,
}

impl Envelope {
    fn parse(cipher: &CipherText) -> Result<Self, DecryptError> {
        let bytes = STANDARD
            .decode(cipher.as_str())
            .map_err(|e| DecryptError::Malformed(format!("invalid base64: {e}")))?;

        if bytes.len() < MIN_ENVELOPE_LEN {
            return Err(DecryptError::Malformed(format!(
                "envelope too short ({} bytes)",
                bytes.len()
            )));
        }
        if bytes[0] != ENVELOPE_VERSION {
            return Err(DecryptError::Malformed(format!(
                "unsupported envelope version {}",
                bytes[0]
            )));
        }

        let params = KdfParams {
            memory_cost: read_u32(&bytes[1..5]),
            iterations: read_u32(&bytes[5..9]),
            parallelism: read_u32(&bytes[9..13]),
        };
        params.check_bounds().map_err(DecryptError::Malformed)?;

        Ok(Self { bytes, params })
    }

    fn prefix(&self) -> &[u8] {
        &self.bytes[..PREFIX_LEN]
    }

    fn salt(&self) -> [u8; SALT_LEN] {
        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(&self.bytes[PREFIX_LEN - SALT_LEN..PREFIX_LEN]);
        salt
    }

    fn nonce(&self) -> [u8; NONCE_LEN] {
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&self.bytes[PREFIX_LEN..PREFIX_LEN + NONCE_LEN]);
        nonce
    }

    fn sealed(&self) -> &[u8] {
        &self.bytes[PREFIX_LEN + NONCE_LEN..]
    }
}

fn read_u32(bytes: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(bytes);
    u32::from_be_bytes(buf)
}

/// Decrypt `cipher` under `passphrase`.
///
/// An empty recovered string is indistinguishable from a wrong-key failure
/// and is rejected as [`DecryptError::WrongKey`], as is non-UTF-8 output.
pub fn decrypt(cipher: &CipherText, passphrase: &SecretString) -> Result<SecretString, DecryptError> {
    let envelope = Envelope::parse(cipher)?;
    let key = kdf::derive_key(
        passphrase.expose_secret().as_bytes(),
        &envelope.salt(),
        &envelope.params,
    )
    .map_err(|e| DecryptError::Malformed(e.to_string()))?;

    let plaintext = Zeroizing::new(crypto::open(
        &key,
        &envelope.nonce(),
        envelope.prefix(),
        envelope.sealed(),
    )?);

    match std::str::from_utf8(&plaintext) {
        Ok(text) if !text.is_empty() => Ok(SecretString::from(text.to_owned())),
        _ => Err(DecryptError::WrongKey),
    }
}

/// Structural check of an envelope without deriving keys or decrypting.
pub fn is_well_formed(cipher: &CipherText) -> bool {
    Envelope::parse(cipher).is_ok()
}
