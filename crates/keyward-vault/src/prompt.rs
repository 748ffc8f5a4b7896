// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Passphrase and entry-secret acquisition via environment variable or TTY prompt.

use keyward_core::{KeywardError, ValidationError};
use secrecy::SecretString;

/// Environment variable providing the vault passphrase non-interactively.
pub const PASSPHRASE_ENV_VAR: &str = "KEYWARD_PASSPHRASE";

/// Environment variable providing the secret for `add` non-interactively.
pub const ENTRY_SECRET_ENV_VAR: &str = "KEYWARD_ENTRY_SECRET";

fn stdin_is_terminal() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stdin())
}

fn read_hidden(prompt: &str) -> Result<String, KeywardError> {
    Ok(rpassword::prompt_password(prompt)?)
}

/// Get the passphrase and its confirmation.
///
/// `KEYWARD_PASSPHRASE` wins and serves as its own confirmation. Otherwise
/// the user is prompted twice on the terminal. The pair is returned
/// unchecked so the caller can apply the strength policy.
pub fn read_passphrase_with_confirm() -> Result<(SecretString, SecretString), KeywardError> {
    if let Ok(value) = std::env::var(PASSPHRASE_ENV_VAR)
        && !value.is_empty()
    {
        return Ok((SecretString::from(value.clone()), SecretString::from(value)));
    }

    if stdin_is_terminal() {
        let first = read_hidden("Encryption key: ")?;
        let second = read_hidden("Confirm encryption key: ")?;
        return Ok((SecretString::from(first), SecretString::from(second)));
    }

    Err(ValidationError::MissingPassphrase.into())
}

/// Get the secret for a new record from `KEYWARD_ENTRY_SECRET` or a hidden prompt.
pub fn read_entry_secret() -> Result<SecretString, KeywardError> {
    if let Ok(value) = std::env::var(ENTRY_SECRET_ENV_VAR)
        && !value.is_empty()
    {
        return Ok(SecretString::from(value));
    }

    if stdin_is_terminal() {
        return Ok(SecretString::from(read_hidden("Password: ")?));
    }

    Err(KeywardError::IncompleteInput {
        field: keyward_core::Field::Secret,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use serial_test::serial;

    #[test]
    #[serial]
    fn passphrase_from_env_var_confirms_itself() {
        // SAFETY: test-only env mutation, serialized.
        unsafe { std::env::set_var(PASSPHRASE_ENV_VAR, "Abcdef1!") };
        let result = read_passphrase_with_confirm();
        unsafe { std::env::remove_var(PASSPHRASE_ENV_VAR) };

        let (pass, confirm) = result.unwrap();
        assert_eq!(pass.expose_secret(), "Abcdef1!");
        assert_eq!(confirm.expose_secret(), "Abcdef1!");
    }

    #[test]
    #[serial]
    fn empty_env_var_without_terminal_is_missing() {
        unsafe { std::env::set_var(PASSPHRASE_ENV_VAR, "") };
        // Test runners do not attach a terminal to stdin.
        let result = read_passphrase_with_confirm();
        unsafe { std::env::remove_var(PASSPHRASE_ENV_VAR) };

        if !stdin_is_terminal() {
            assert!(matches!(
                result,
                Err(KeywardError::Validation(ValidationError::MissingPassphrase))
            ));
        }
    }

    #[test]
    #[serial]
    fn entry_secret_from_env_var() {
        unsafe { std::env::set_var(ENTRY_SECRET_ENV_VAR, "hunter2") };
        let result = read_entry_secret();
        unsafe { std::env::remove_var(ENTRY_SECRET_ENV_VAR) };

        assert_eq!(result.unwrap().expose_secret(), "hunter2");
    }
}
