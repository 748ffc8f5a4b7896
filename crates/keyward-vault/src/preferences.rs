// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Theme preference kept alongside the vaults in the same store.

use std::str::FromStr;

use keyward_core::{KeyValueStore, KeywardError, Theme, THEME_KEY};
use tracing::{debug, warn};

/// Read the stored theme. Absent or unrecognised values fall back to light.
pub fn load_theme<S: KeyValueStore + ?Sized>(store: &S) -> Result<Theme, KeywardError> {
    let Some(value) = store.get(THEME_KEY)? else {
        return Ok(Theme::default());
    };
    match Theme::from_str(&value) {
        Ok(theme) => Ok(theme),
        Err(_) => {
            warn!(value = %value, "unknown theme preference, using default");
            Ok(Theme::default())
        }
    }
}

pub fn save_theme<S: KeyValueStore + ?Sized>(store: &mut S, theme: Theme) -> Result<(), KeywardError> {
    store.set(THEME_KEY, &theme.to_string())?;
    debug!(theme = %theme, "theme saved");
    Ok(())
}

/// Flip the stored theme and return the new value.
pub fn toggle_theme<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<Theme, KeywardError> {
    let theme = load_theme(&*store)?.toggled();
    save_theme(store, theme)?;
    Ok(theme)
}
