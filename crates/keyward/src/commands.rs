// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations over an unlocked [`VaultSession`].

use std::io::Write;
use std::path::Path;

use keyward_core::{Field, KeyValueStore, KeywardError, Record, MASK};
use keyward_vault::{preferences, VaultSession};
use secrecy::SecretString;
use tracing::info;

/// Resolve a 1-based position from `list` to its record.
fn record_at<'a, S: KeyValueStore + ?Sized>(
    session: &'a VaultSession<'_, S>,
    index: usize,
) -> Result<&'a Record, KeywardError> {
    index
        .checked_sub(1)
        .and_then(|i| session.list().get(i))
        .ok_or(KeywardError::RecordNotFound)
}

fn write_row(out: &mut impl Write, index: usize, fields: [&dyn std::fmt::Display; 3]) -> std::io::Result<()> {
    writeln!(
        out,
        "{index}. {}: {} | {}: {} | {}: {}",
        Field::Identity,
        fields[0],
        Field::Secret,
        fields[1],
        Field::Label,
        fields[2]
    )
}

pub fn add<S: KeyValueStore + ?Sized>(
    session: &mut VaultSession<'_, S>,
    identity: &str,
    secret: &SecretString,
    label: &str,
    out: &mut impl Write,
) -> Result<(), KeywardError> {
    session.add(identity, secret, label)?;
    writeln!(out, "Stored credential #{}.", session.len())?;
    Ok(())
}

pub fn list<S: KeyValueStore + ?Sized>(
    session: &VaultSession<'_, S>,
    out: &mut impl Write,
) -> Result<(), KeywardError> {
    if session.is_empty() {
        writeln!(out, "No credentials stored.")?;
        return Ok(());
    }
    for index in 1..=session.len() {
        write_row(out, index, [&MASK, &MASK, &MASK])?;
    }
    Ok(())
}

pub fn show<S: KeyValueStore + ?Sized>(
    session: &mut VaultSession<'_, S>,
    index: usize,
    out: &mut impl Write,
) -> Result<(), KeywardError> {
    let identity = record_at(session, index)?.identity.clone();
    session.toggle_reveal(&identity)?;
    write_row(
        out,
        index,
        [
            &session.field_view(&identity, Field::Identity),
            &session.field_view(&identity, Field::Secret),
            &session.field_view(&identity, Field::Label),
        ],
    )?;
    Ok(())
}

pub fn delete<S: KeyValueStore + ?Sized>(
    session: &mut VaultSession<'_, S>,
    index: usize,
    out: &mut impl Write,
) -> Result<(), KeywardError> {
    let identity = record_at(session, index)?.identity.clone();
    session.delete(&identity)?;
    writeln!(out, "Deleted credential #{index}.")?;
    Ok(())
}

pub fn backup<S: KeyValueStore + ?Sized>(
    session: &VaultSession<'_, S>,
    path: &Path,
    out: &mut impl Write,
) -> Result<(), KeywardError> {
    let bytes = session.export_backup()?;
    std::fs::write(path, &bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "backup written");
    writeln!(out, "Backed up {} credentials to {}.", session.len(), path.display())?;
    Ok(())
}

pub fn restore<S: KeyValueStore + ?Sized>(
    session: &mut VaultSession<'_, S>,
    path: &Path,
    out: &mut impl Write,
) -> Result<(), KeywardError> {
    let bytes = std::fs::read(path)?;
    let report = session.import_backup(&bytes)?;
    writeln!(
        out,
        "Restored {} credentials ({} already present).",
        report.added, report.skipped
    )?;
    Ok(())
}

pub fn theme<S: KeyValueStore + ?Sized>(
    store: &mut S,
    toggle: bool,
    out: &mut impl Write,
) -> Result<(), KeywardError> {
    let theme = if toggle {
        preferences::toggle_theme(store)?
    } else {
        preferences::load_theme(store)?
    };
    writeln!(out, "theme: {theme}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyward_storage::MemoryStore;
    use keyward_vault::{FieldCipher, KdfParams};

    const FAST: KdfParams = KdfParams {
        memory_cost: 8192,
        iterations: 1,
        parallelism: 1,
    };

    fn pass(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    fn session(store: &mut MemoryStore) -> VaultSession<'_, MemoryStore> {
        VaultSession::unlock(store, pass("Abcdef1!"), FieldCipher::new(FAST)).unwrap()
    }

    fn output(f: impl FnOnce(&mut Vec<u8>) -> Result<(), KeywardError>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn list_masks_every_field() {
        let mut store = MemoryStore::new();
        let mut s = session(&mut store);
        assert_eq!(output(|o| list(&s, o)), "No credentials stored.\n");

        add(&mut s, "alice", &pass("hunter2"), "mail", &mut Vec::new()).unwrap();
        let text = output(|o| list(&s, o));
        assert_eq!(text, "1. id: ******** | password: ******** | description: ********\n");
    }

    #[test]
    fn show_reveals_plaintext() {
        let mut store = MemoryStore::new();
        let mut s = session(&mut store);
        add(&mut s, "alice", &pass("hunter2"), "mail", &mut Vec::new()).unwrap();

        let text = output(|o| show(&mut s, 1, o));
        assert_eq!(text, "1. id: alice | password: hunter2 | description: mail\n");
    }

    #[test]
    fn out_of_range_index_is_not_found() {
        let mut store = MemoryStore::new();
        let mut s = session(&mut store);
        for index in [0, 1, 7] {
            let err = show(&mut s, index, &mut Vec::new()).unwrap_err();
            assert!(matches!(err, KeywardError::RecordNotFound));
        }
    }

    #[test]
    fn delete_by_position() {
        let mut store = MemoryStore::new();
        let mut s = session(&mut store);
        add(&mut s, "a", &pass("1"), "x", &mut Vec::new()).unwrap();
        add(&mut s, "b", &pass("2"), "y", &mut Vec::new()).unwrap();

        assert_eq!(output(|o| delete(&mut s, 1, o)), "Deleted credential #1.\n");
        assert_eq!(output(|o| show(&mut s, 1, o)), "1. id: b | password: 2 | description: y\n");
    }

    #[test]
    fn backup_then_restore_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup.json");

        let mut source = MemoryStore::new();
        let mut s = session(&mut source);
        add(&mut s, "a", &pass("1"), "x", &mut Vec::new()).unwrap();
        backup(&s, &path, &mut Vec::new()).unwrap();

        let mut target = MemoryStore::new();
        let mut t = session(&mut target);
        let text = output(|o| restore(&mut t, &path, o));
        assert_eq!(text, "Restored 1 credentials (0 already present).\n");
        assert_eq!(t.list(), s.list());
    }

    #[test]
    fn restore_missing_file_is_io_error() {
        let mut store = MemoryStore::new();
        let mut s = session(&mut store);
        let err = restore(&mut s, Path::new("/nonexistent/backup.json"), &mut Vec::new()).unwrap_err();
        assert!(matches!(err, KeywardError::Io(_)));
    }

    #[test]
    fn theme_show_and_toggle() {
        let mut store = MemoryStore::new();
        assert_eq!(output(|o| theme(&mut store, false, o)), "theme: light\n");
        assert_eq!(output(|o| theme(&mut store, true, o)), "theme: dark\n");
        assert_eq!(output(|o| theme(&mut store, false, o)), "theme: dark\n");
    }
}
