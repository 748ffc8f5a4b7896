// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Keyward workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Store key prefix under which each namespace's vault is persisted.
pub const VAULT_KEY_PREFIX: &str = "passwords_";

/// Store key holding the UI theme preference.
pub const THEME_KEY: &str = "theme";

/// Placeholder shown in place of any field that has not been revealed.
pub const MASK: &str = "********";

/// An opaque, self-describing encrypted field.
///
/// Equality is exact string equality; two encryptions of the same plaintext
/// never compare equal because every encryption uses a fresh salt and nonce.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CipherText(String);

impl CipherText {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for CipherText {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One-way hash of a passphrase identifying a storage partition.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct NamespaceKey(String);

impl NamespaceKey {
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short prefix suitable for log lines.
    pub fn short(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.0.len());
        &self.0[..end]
    }

    /// Key under which this namespace's vault lives in the store.
    pub fn storage_key(&self) -> String {
        format!("{VAULT_KEY_PREFIX}{}", self.0)
    }
}

impl std::fmt::Debug for NamespaceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("NamespaceKey").field(&self.short()).finish()
    }
}

/// One stored credential. All three fields are encrypted under the same
/// passphrase at creation time.
///
/// The serialized field names match the persisted and backup wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Record {
    #[serde(rename = "id")]
    pub identity: CipherText,
    #[serde(rename = "password")]
    pub secret: CipherText,
    #[serde(rename = "description")]
    pub label: CipherText,
}

impl Record {
    pub fn field(&self, field: Field) -> &CipherText {
        match field {
            Field::Identity => &self.identity,
            Field::Secret => &self.secret,
            Field::Label => &self.label,
        }
    }
}

/// The three fields of a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum Field {
    #[strum(serialize = "id")]
    Identity,
    #[strum(serialize = "password")]
    Secret,
    #[strum(serialize = "description")]
    Label,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Identity, Field::Secret, Field::Label];
}

/// UI theme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}
