//! `linkcheck check` - run one batch from the terminal.
//!
//! Targets are read from a file or stdin, one per line. The report is printed
//! as each target finishes.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::batch::batch_from_lines;
use crate::check::{HttpCheckService, ItemProcessor, RdapClient};
use crate::config::Config;
use crate::fs::{CredentialStore, FileCredentialStore};
use crate::reporter::{IncrementalReporter, ReportSink, ThreadPacer};
use crate::session::run_batch;
use crate::utils::strip_html;

/// Prints the newest entry of each republished report.
struct TerminalSink {
    printed: usize,
}

impl ReportSink for TerminalSink {
    fn edit(&mut self, text: &str) -> Result<()> {
        let plain = strip_html(text);
        let entries: Vec<&str> = plain.split("\n\n").collect();
        for entry in entries.iter().skip(self.printed) {
            println!("{entry}\n");
        }
        self.printed = entries.len();
        Ok(())
    }
}

pub fn execute(
    config_path: Option<&Path>,
    file: Option<&Path>,
    token: Option<String>,
    user_id: Option<i64>,
) -> Result<()> {
    let config = Config::load(config_path)?;
    config.validate()?;

    let token = match (token, user_id) {
        (Some(token), _) => token,
        (None, Some(id)) => FileCredentialStore::new(&config.data_dir)
            .get(id)?
            .with_context(|| format!("No token saved for user {id}"))?,
        (None, None) => bail!("Provide --token or --user"),
    };

    let input = match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read targets file: {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read targets from stdin")?;
            buf
        }
    };
    let batch = batch_from_lines(input.lines()).map_err(|e| anyhow::anyhow!(e.user_message()))?;

    let lookup = RdapClient::new(&config.rdap_base_url)?;
    let service = HttpCheckService::new(&config.check_url, config.verify_timeout())?;
    let processor = ItemProcessor::new(&lookup, &service);
    let mut sink = TerminalSink { printed: 0 };
    let pacer = ThreadPacer;
    let mut reporter = IncrementalReporter::new(&mut sink, &pacer, std::time::Duration::ZERO);

    println!("{} Checking {} target(s)\n", "→".cyan(), batch.len());
    let summary = run_batch(&batch, &token, &processor, &mut reporter);

    let ok = summary.outcomes.iter().filter(|o| o.is_ok()).count();
    let failed = summary.outcomes.len() - ok;
    if failed == 0 {
        println!("{} {} checked", "✓".green(), ok);
    } else {
        println!("{} {} checked, {} failed", "✗".red(), ok, failed);
    }
    Ok(())
}
