// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyward - a local encrypted credential vault.
//!
//! This is the binary entry point.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use keyward_config::KeywardConfig;
use keyward_core::KeywardError;
use keyward_storage::SqliteStore;
use keyward_vault::{prompt, FieldCipher, VaultSession};

/// Keyward - a local encrypted credential vault.
#[derive(Parser, Debug)]
#[command(name = "keyward", version, about, long_about = None)]
struct Cli {
    /// Use this configuration file instead of the default search path.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Store a new credential. The password is read from a hidden prompt
    /// or KEYWARD_ENTRY_SECRET.
    Add {
        #[arg(long)]
        id: String,
        #[arg(long)]
        description: String,
    },
    /// List stored credentials with every field masked.
    List,
    /// Decrypt and print one credential.
    Show {
        /// Position as printed by `list`, starting at 1.
        index: usize,
    },
    /// Delete one credential.
    Delete {
        /// Position as printed by `list`, starting at 1.
        index: usize,
    },
    /// Write the encrypted vault to a JSON backup file.
    Backup { path: PathBuf },
    /// Merge a JSON backup file into the vault.
    Restore { path: PathBuf },
    /// Show or toggle the theme preference.
    Theme {
        #[arg(long)]
        toggle: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => keyward_config::load_and_validate_path(path),
        None => keyward_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            keyward_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.level);

    if let Err(e) = run(cli.command, &config) {
        eprintln!("keyward: {e}");
        std::process::exit(1);
    }
}

fn run(command: Commands, config: &KeywardConfig) -> Result<(), KeywardError> {
    let mut store = SqliteStore::from_config(&config.storage)?;
    let mut out = std::io::stdout().lock();

    if let Commands::Theme { toggle } = command {
        return commands::theme(&mut store, toggle, &mut out);
    }

    let (passphrase, confirmation) = prompt::read_passphrase_with_confirm()?;
    let cipher = FieldCipher::from_config(&config.vault);
    let mut session = VaultSession::unlock_validated(&mut store, passphrase, &confirmation, cipher)?;

    match command {
        Commands::Add { id, description } => {
            let secret = prompt::read_entry_secret()?;
            commands::add(&mut session, &id, &secret, &description, &mut out)
        }
        Commands::List => commands::list(&session, &mut out),
        Commands::Show { index } => commands::show(&mut session, index, &mut out),
        Commands::Delete { index } => commands::delete(&mut session, index, &mut out),
        Commands::Backup { path } => commands::backup(&session, &path, &mut out),
        Commands::Restore { path } => commands::restore(&mut session, &path, &mut out),
        Commands::Theme { .. } => Ok(()),
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("keyward={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
