// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Hierarchy: `./keyward.toml` > `~/.config/keyward/keyward.toml` >
//! `/etc/keyward/keyward.toml`, with `KEYWARD_` environment overrides on top.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::KeywardConfig;

/// Local config file name, also used under the XDG and system directories.
pub const CONFIG_FILE_NAME: &str = "keyward.toml";

/// Configuration sections that may be overridden from the environment.
///
/// Other `KEYWARD_*` variables (the passphrase, entry secrets) are not
/// configuration and must never reach the extractor.
const ENV_SECTIONS: [&str; 3] = ["vault_", "storage_", "logging_"];

/// System-wide config file path.
pub fn system_config_path() -> PathBuf {
    Path::new("/etc/keyward").join(CONFIG_FILE_NAME)
}

/// Per-user config file path, if the platform has a config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("keyward").join(CONFIG_FILE_NAME))
}

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/keyward/keyward.toml`
/// 3. `~/.config/keyward/keyward.toml`
/// 4. `./keyward.toml`
/// 5. `KEYWARD_*` environment variables
pub fn load_config() -> Result<KeywardConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no environment).
pub fn load_config_from_str(toml_content: &str) -> Result<KeywardConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KeywardConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from an explicit file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<KeywardConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KeywardConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the layered Figment before extraction.
pub fn build_figment() -> Figment {
    let mut figment = Figment::new()
        .merge(Serialized::defaults(KeywardConfig::default()))
        .merge(Toml::file(system_config_path()));
    if let Some(user) = user_config_path() {
        figment = figment.merge(Toml::file(user));
    }
    figment
        .merge(Toml::file(CONFIG_FILE_NAME))
        .merge(env_provider())
}

/// Environment provider mapping `KEYWARD_VAULT_KDF_ITERATIONS` to
/// `vault.kdf_iterations`.
///
/// Uses an explicit section mapping rather than `Env::split("_")` because the
/// field names themselves contain underscores.
fn env_provider() -> Env {
    Env::prefixed("KEYWARD_")
        .filter(|key| {
            let key = key.as_str().to_ascii_lowercase();
            ENV_SECTIONS.iter().any(|section| key.starts_with(section))
        })
        .map(|key| {
            let key = key.as_str().to_ascii_lowercase();
            ENV_SECTIONS
                .iter()
                .find_map(|section| {
                    key.strip_prefix(section)
                        .map(|rest| format!("{}.{rest}", section.trim_end_matches('_')))
                })
                .unwrap_or(key)
                .into()
        })
}
