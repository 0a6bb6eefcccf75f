//! `linkcheck token` - manage saved API tokens from the shell.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::config::Config;
use crate::fs::{CredentialStore, FileCredentialStore};
use crate::validation::validate_token;

/// Save a token for a user
pub fn set(config_path: Option<&Path>, user_id: i64, token: String) -> Result<()> {
    validate_token(&token)?;
    let config = Config::load(config_path)?;
    super::prepare_data_dir(&config)?;

    FileCredentialStore::new(&config.data_dir).save(user_id, &token)?;
    println!("{} Token saved for user {}", "✓".green(), user_id.to_string().cyan());
    Ok(())
}

/// Show a user's token, masked
pub fn show(config_path: Option<&Path>, user_id: i64) -> Result<()> {
    let config = Config::load(config_path)?;
    let store = FileCredentialStore::new(&config.data_dir);

    match store.entry(user_id)? {
        Some(entry) => {
            println!("{}: {}", user_id.to_string().cyan(), mask(&entry.token));
            println!(
                "  {} saved {}",
                "→".dimmed(),
                entry
                    .saved_at
                    .format("%Y-%m-%dT%H:%M:%SZ")
                    .to_string()
                    .dimmed()
            );
            Ok(())
        }
        None => {
            eprintln!("{} No token saved for user {}", "✗".red(), user_id);
            std::process::exit(1);
        }
    }
}

/// Keep the first and last four characters of long tokens.
fn mask(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}…{tail}")
}
