// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::KeywardConfig;

/// OWASP minimum Argon2id memory cost (19 MiB).
pub const MIN_KDF_MEMORY_COST: u32 = 19 * 1024;

/// Upper bound on Argon2id memory cost (1 GiB).
///
/// Also the ceiling enforced on parameters read back from stored ciphertext,
/// so anything this validator accepts can be decrypted again.
pub const MAX_KDF_MEMORY_COST: u32 = 1024 * 1024;

/// Upper bound on Argon2id passes.
pub const MAX_KDF_ITERATIONS: u32 = 10;

/// Upper bound on Argon2id lanes.
pub const MAX_KDF_PARALLELISM: u32 = 255;

/// Above this memory cost a single Argon2id pass is acceptable.
const SINGLE_PASS_MEMORY_COST: u32 = 46 * 1024;

pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every violation instead of failing fast.
pub fn validate_config(config: &KeywardConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let vault = &config.vault;

    if vault.kdf_memory_cost < MIN_KDF_MEMORY_COST {
        errors.push(ConfigError::Validation {
            message: format!(
                "vault.kdf_memory_cost must be at least {MIN_KDF_MEMORY_COST} (19 MiB), got {}",
                vault.kdf_memory_cost
            ),
        });
    }

    if vault.kdf_memory_cost > MAX_KDF_MEMORY_COST {
        errors.push(ConfigError::Validation {
            message: format!(
                "vault.kdf_memory_cost must be at most {MAX_KDF_MEMORY_COST} (1 GiB), got {}",
                vault.kdf_memory_cost
            ),
        });
    }

    let min_iterations = if vault.kdf_memory_cost >= SINGLE_PASS_MEMORY_COST {
        1
    } else {
        2
    };
    if vault.kdf_iterations < min_iterations {
        errors.push(ConfigError::Validation {
            message: format!(
                "vault.kdf_iterations must be at least {min_iterations} for a memory cost of {} KiB, got {}",
                vault.kdf_memory_cost, vault.kdf_iterations
            ),
        });
    }

    if vault.kdf_iterations > MAX_KDF_ITERATIONS {
        errors.push(ConfigError::Validation {
            message: format!(
                "vault.kdf_iterations must be at most {MAX_KDF_ITERATIONS}, got {}",
                vault.kdf_iterations
            ),
        });
    }

    if !(1..=MAX_KDF_PARALLELISM).contains(&vault.kdf_parallelism) {
        errors.push(ConfigError::Validation {
            message: format!(
                "vault.kdf_parallelism must be between 1 and {MAX_KDF_PARALLELISM}, got {}",
                vault.kdf_parallelism
            ),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
