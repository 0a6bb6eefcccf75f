//! `linkcheck serve` - run the bot until interrupted.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

use super::prepare_data_dir;
use crate::bot::{serve, Bot};
use crate::check::{HttpCheckService, RdapClient};
use crate::config::Config;
use crate::fs::{FileCredentialStore, FileUserDirectory};
use crate::reporter::ThreadPacer;
use crate::telegram::TelegramClient;

pub fn execute(config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;
    config.validate_for_serve()?;
    prepare_data_dir(&config)?;

    let telegram = TelegramClient::new(&config.bot_token, config.poll_timeout())?;
    let users = FileUserDirectory::new(&config.data_dir);
    let credentials = FileCredentialStore::new(&config.data_dir);
    let lookup = RdapClient::new(&config.rdap_base_url)?;
    let service = HttpCheckService::new(&config.check_url, config.verify_timeout())?;
    let pacer = ThreadPacer;

    let bot = Bot {
        transport: &telegram,
        users: &users,
        credentials: &credentials,
        lookup: &lookup,
        service: &service,
        pacer: &pacer,
        admin_ids: &config.admin_ids,
        edit_pace: config.edit_pace(),
    };

    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&shutdown);
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    })
    .context("Failed to install Ctrl-C handler")?;

    println!(
        "{} linkcheck serving (data: {}). Press Ctrl-C to stop.",
        "→".cyan(),
        config.data_dir.display()
    );
    info!(check_url = %config.check_url, admins = config.admin_ids.len(), "bot starting");

    serve(&bot, &telegram, &shutdown, 0);

    println!("{} Stopped.", "✓".green());
    Ok(())
}
