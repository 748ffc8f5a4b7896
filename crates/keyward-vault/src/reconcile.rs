// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Backup parsing and duplicate-free merging of imported records.
//!
//! Nothing here decrypts. Duplicates are detected by exact identity
//! ciphertext equality, so a record re-encrypted from the same plaintext is
//! not recognised as a duplicate.

use std::collections::HashSet;

use keyward_core::{CipherText, Field, KeywardError, Record};

use crate::cipher;

/// Result of merging an incoming record set into the current vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub records: Vec<Record>,
    pub added: usize,
    pub skipped: usize,
}

/// Counts reported back to the caller after a restore.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub added: usize,
    pub skipped: usize,
}

impl From<&MergeOutcome> for ImportReport {
    fn from(outcome: &MergeOutcome) -> Self {
        Self {
            added: outcome.added,
            skipped: outcome.skipped,
        }
    }
}

/// Append every incoming record whose identity ciphertext is not already
/// present, either in `current` or earlier in `incoming`.
///
/// Skipping repeats within `incoming` is stricter than a plain "absent from
/// `current`" filter: a backup listing the same identity ciphertext twice
/// imports it once.
pub fn merge(current: &[Record], incoming: Vec<Record>) -> MergeOutcome {
    let mut seen: HashSet<CipherText> = current.iter().map(|r| r.identity.clone()).collect();
    let mut records = current.to_vec();
    let mut skipped = 0;

    for record in incoming {
        if seen.insert(record.identity.clone()) {
            records.push(record);
        } else {
            skipped += 1;
        }
    }

    let added = records.len() - current.len();
    MergeOutcome {
        records,
        added,
        skipped,
    }
}

/// Parse a backup buffer into records.
///
/// The buffer must be UTF-8 JSON holding an array of objects with exactly
/// the string fields `id`, `password` and `description`, each a structurally
/// valid ciphertext envelope.
pub fn parse_backup(bytes: &[u8]) -> Result<Vec<Record>, KeywardError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| KeywardError::ImportParse(format!("backup is not UTF-8: {e}")))?;
    let records: Vec<Record> = serde_json::from_str(text)
        .map_err(|e| KeywardError::ImportParse(format!("invalid backup JSON: {e}")))?;

    for (index, record) in records.iter().enumerate() {
        for field in Field::ALL {
            if !cipher::is_well_formed(record.field(field)) {
                return Err(KeywardError::ImportParse(format!(
                    "record {index}: field '{field}' is not a valid ciphertext"
                )));
            }
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str) -> Record {
        Record {
            identity: CipherText::new(id),
            secret: CipherText::new(format!("{id}-secret")),
            label: CipherText::new(format!("{id}-label")),
        }
    }

    fn ids(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.identity.as_str()).collect()
    }

    #[test]
    fn merge_skips_exact_identity_matches() {
        let outcome = merge(&[rec("A"), rec("B")], vec![rec("B"), rec("C")]);
        assert_eq!(ids(&outcome.records), ["A", "B", "C"]);
        assert_eq!(outcome.added, 1);
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn merge_keeps_reencrypted_duplicates() {
        let outcome = merge(&[rec("A"), rec("B")], vec![rec("B'"), rec("C")]);
        assert_eq!(ids(&outcome.records), ["A", "B", "B'", "C"]);
        assert_eq!(outcome.skipped, 0);
    }

    #[test]
    fn merge_dedups_within_incoming() {
        let outcome = merge(&[], vec![rec("A"), rec("A"), rec("B")]);
        assert_eq!(ids(&outcome.records), ["A", "B"]);
        assert_eq!(outcome.added, 2);
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn merge_into_empty_reproduces_incoming() {
        let incoming = vec![rec("A"), rec("B")];
        let outcome = merge(&[], incoming.clone());
        assert_eq!(outcome.records, incoming);
    }

    #[test]
    fn current_existing_entry_wins_over_incoming() {
        let mut incoming_b = rec("B");
        incoming_b.secret = CipherText::new("different");
        let outcome = merge(&[rec("B")], vec![incoming_b]);
        assert_eq!(outcome.records, vec![rec("B")]);
    }

    #[test]
    fn report_mirrors_outcome_counts() {
        let outcome = merge(&[rec("A")], vec![rec("A"), rec("B")]);
        assert_eq!(
            ImportReport::from(&outcome),
            ImportReport {
                added: 1,
                skipped: 1
            }
        );
    }

    #[test]
    fn parse_rejects_non_utf8() {
        let err = parse_backup(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, KeywardError::ImportParse(m) if m.contains("UTF-8")));
    }

    #[test]
    fn parse_rejects_non_array() {
        let err = parse_backup(br#"{"id":"a"}"#).unwrap_err();
        assert!(matches!(err, KeywardError::ImportParse(_)));
    }

    #[test]
    fn parse_rejects_missing_and_extra_fields() {
        assert!(parse_backup(br#"[{"id":"a","password":"b"}]"#).is_err());
        assert!(parse_backup(br#"[{"id":"a","password":"b","description":"c","x":1}]"#).is_err());
        assert!(parse_backup(br#"[{"id":1,"password":"b","description":"c"}]"#).is_err());
    }

    #[test]
    fn parse_rejects_non_envelope_strings() {
        let err = parse_backup(br#"[{"id":"a","password":"b","description":"c"}]"#).unwrap_err();
        assert!(matches!(err, KeywardError::ImportParse(m) if m.contains("record 0")));
    }

    #[test]
    fn parse_rejects_envelope_above_kdf_ceiling() {
        use base64::{engine::general_purpose::STANDARD, Engine};
        use keyward_config::validation::MAX_KDF_MEMORY_COST;
        use secrecy::SecretString;

        use crate::cipher::FieldCipher;
        use crate::kdf::KdfParams;

        let cipher = FieldCipher::new(KdfParams {
            memory_cost: 8192,
            iterations: 1,
            parallelism: 1,
        });
        let key = SecretString::from("Abcdef1!".to_string());
        let valid = cipher.encrypt("alice", &key).unwrap();
        let mut bytes = STANDARD.decode(valid.as_str()).unwrap();
        bytes[1..5].copy_from_slice(&(MAX_KDF_MEMORY_COST + 1).to_be_bytes());
        let hostile = STANDARD.encode(bytes);

        let backup = format!(
            r#"[{{"id":"{}","password":"{}","description":"{}"}}]"#,
            hostile,
            valid.as_str(),
            valid.as_str()
        );
        let err = parse_backup(backup.as_bytes()).unwrap_err();
        assert!(matches!(err, KeywardError::ImportParse(m) if m.contains("field 'id'")));

        let accepted = format!(
            r#"[{{"id":"{0}","password":"{0}","description":"{0}"}}]"#,
            valid.as_str()
        );
        assert_eq!(parse_backup(accepted.as_bytes()).unwrap().len(), 1);
    }

    #[test]
    fn parse_accepts_empty_array() {
        assert!(parse_backup(b"[]").unwrap().is_empty());
    }
}
