// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Argon2id key derivation from a passphrase.
//!
//! Every encrypted field gets its own random salt, so the 32-byte cipher key
//! differs per field even under one passphrase.

use keyward_config::validation::{MAX_KDF_ITERATIONS, MAX_KDF_MEMORY_COST, MAX_KDF_PARALLELISM};
use keyward_config::VaultConfig;
use keyward_core::KeywardError;
use ring::rand::{SecureRandom, SystemRandom};
use zeroize::Zeroizing;

pub const SALT_LEN: usize = 16;
pub const KEY_LEN: usize = 32;

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Memory cost in KiB.
    pub memory_cost: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self::from(&VaultConfig::default())
    }
}

impl From<&VaultConfig> for KdfParams {
    fn from(config: &VaultConfig) -> Self {
        Self {
            memory_cost: config.kdf_memory_cost,
            iterations: config.kdf_iterations,
            parallelism: config.kdf_parallelism,
        }
    }
}

impl KdfParams {
    /// Reject parameters that Argon2 cannot run or that exceed the ceilings
    /// shared with configuration validation.
    ///
    /// Applied both before encrypting and to parameters read from a stored
    /// envelope, so whatever is written can be read back.
    pub fn check_bounds(&self) -> Result<(), String> {
        if self.parallelism == 0 || self.parallelism > MAX_KDF_PARALLELISM {
            return Err(format!("parallelism {} out of range", self.parallelism));
        }
        if self.iterations == 0 || self.iterations > MAX_KDF_ITERATIONS {
            return Err(format!("iterations {} out of range", self.iterations));
        }
        if self.memory_cost < 8 * self.parallelism || self.memory_cost > MAX_KDF_MEMORY_COST {
            return Err(format!("memory cost {} KiB out of range", self.memory_cost));
        }
        Ok(())
    }
}

/// Derive a 32-byte key from `passphrase` and `salt` with Argon2id.
///
/// The key is wrapped in [`Zeroizing`] and wiped on drop.
pub fn derive_key(
    passphrase: &[u8],
    salt: &[u8; SALT_LEN],
    params: &KdfParams,
) -> Result<Zeroizing<[u8; KEY_LEN]>, KeywardError> {
    let argon_params = argon2::Params::new(
        params.memory_cost,
        params.iterations,
        params.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| KeywardError::Crypto(format!("invalid Argon2id parameters: {e}")))?;

    let argon2 =
        argon2::Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, argon_params);

    let mut output = Zeroizing::new([0u8; KEY_LEN]);
    argon2
        .hash_password_into(passphrase, salt, output.as_mut())
        .map_err(|e| KeywardError::Crypto(format!("Argon2id key derivation failed: {e}")))?;

    Ok(output)
}

/// Generate a random salt from the system CSPRNG.
pub fn generate_salt() -> Result<[u8; SALT_LEN], KeywardError> {
    let mut salt = [0u8; SALT_LEN];
    SystemRandom::new()
        .fill(&mut salt)
        .map_err(|_| KeywardError::Crypto("failed to generate random salt".to_string()))?;
    Ok(salt)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAST: KdfParams = KdfParams {
        memory_cost: 8192,
        iterations: 1,
        parallelism: 1,
    };

    #[test]
    fn same_inputs_give_same_key() {
        let salt = [1u8; SALT_LEN];
        let a = derive_key(b"Abcdef1!", &salt, &FAST).unwrap();
        let b = derive_key(b"Abcdef1!", &salt, &FAST).unwrap();
        assert_eq!(*a, *b);
    }

    #[test]
    fn different_passphrase_gives_different_key() {
        let salt = [2u8; SALT_LEN];
        let a = derive_key(b"Abcdef1!", &salt, &FAST).unwrap();
        let b = derive_key(b"Abcdef2!", &salt, &FAST).unwrap();
        assert_ne!(*a, *b);
    }

    #[test]
    fn different_salt_gives_different_key() {
        let a = derive_key(b"Abcdef1!", &[1u8; SALT_LEN], &FAST).unwrap();
        let b = derive_key(b"Abcdef1!", &[2u8; SALT_LEN], &FAST).unwrap();
        assert_ne!(*a, *b);
    }

    #[test]
    fn salts_are_random() {
        assert_ne!(generate_salt().unwrap(), generate_salt().unwrap());
    }

    #[test]
    fn params_follow_vault_config() {
        let config = VaultConfig {
            kdf_memory_cost: 32768,
            kdf_iterations: 2,
            kdf_parallelism: 1,
        };
        let params = KdfParams::from(&config);
        assert_eq!(params.memory_cost, 32768);
        assert_eq!(params.iterations, 2);
        assert_eq!(params.parallelism, 1);
        assert!(params.check_bounds().is_ok());
    }

    #[test]
    fn bounds_reject_hostile_values() {
        let mut params = FAST;
        params.memory_cost = u32::MAX;
        assert!(params.check_bounds().is_err());

        let mut params = FAST;
        params.iterations = 0;
        assert!(params.check_bounds().is_err());

        let mut params = FAST;
        params.parallelism = 0;
        assert!(params.check_bounds().is_err());

        let mut params = FAST;
        params.memory_cost = 8;
        params.parallelism = 4;
        assert!(params.check_bounds().is_err());
    }

    #[test]
    fn bounds_match_config_ceilings() {
        let mut params = FAST;
        params.iterations = MAX_KDF_ITERATIONS;
        params.memory_cost = MAX_KDF_MEMORY_COST;
        assert!(params.check_bounds().is_ok());

        params.iterations = MAX_KDF_ITERATIONS + 1;
        assert!(params.check_bounds().is_err());

        params.iterations = 1;
        params.memory_cost = MAX_KDF_MEMORY_COST + 1;
        assert!(params.check_bounds().is_err());
    }

    #[test]
    fn invalid_params_surface_as_crypto_error() {
        let params = KdfParams {
            memory_cost: 1,
            iterations: 1,
            parallelism: 1,
        };
        let err = derive_key(b"x", &[0u8; SALT_LEN], &params).unwrap_err();
        assert!(matches!(err, KeywardError::Crypto(_)));
    }
}
