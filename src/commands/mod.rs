//! CLI subcommand implementations.

pub mod check;
pub mod serve;
pub mod token;
pub mod user;

use anyhow::{Context, Result};
use std::fs;

use crate::config::Config;

/// Create the configured data directory if it doesn't exist yet.
pub(crate) fn prepare_data_dir(config: &Config) -> Result<()> {
    fs::create_dir_all(&config.data_dir).with_context(|| {
        format!(
            "Failed to create data directory: {}",
            config.data_dir.display()
        )
    })
}
