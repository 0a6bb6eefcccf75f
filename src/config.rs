//! Bot configuration loaded from a TOML file.
//!
//! Default location is `<config_dir>/linkcheck/config.toml`. The Telegram
//! token can come from `LINKCHECK_BOT_TOKEN` instead of the file.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::check::service::DEFAULT_VERIFY_TIMEOUT_SECS;

pub const BOT_TOKEN_ENV: &str = "LINKCHECK_BOT_TOKEN";

const DEFAULT_RDAP_BASE_URL: &str = "https://rdap.org";
const DEFAULT_EDIT_PACE_MILLIS: u64 = 2000;
const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Telegram Bot API token
    #[serde(default)]
    pub bot_token: String,

    /// Check service endpoint receiving `target` and `token` form fields
    pub check_url: String,

    #[serde(default = "default_rdap_base_url")]
    pub rdap_base_url: String,

    /// Telegram user ids allowed to run admin commands
    #[serde(default)]
    pub admin_ids: Vec<i64>,

    /// Directory holding `credentials.toml` and `users.toml`
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_verify_timeout_secs")]
    pub verify_timeout_secs: u64,

    #[serde(default = "default_edit_pace_millis")]
    pub edit_pace_millis: u64,

    #[serde(default = "default_poll_timeout_secs")]
    pub poll_timeout_secs: u64,
}

fn default_rdap_base_url() -> String {
    DEFAULT_RDAP_BASE_URL.to_string()
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("linkcheck"))
        .unwrap_or_else(|| PathBuf::from(".linkcheck"))
}

fn default_verify_timeout_secs() -> u64 {
    DEFAULT_VERIFY_TIMEOUT_SECS
}

fn default_edit_pace_millis() -> u64 {
    DEFAULT_EDIT_PACE_MILLIS
}

fn default_poll_timeout_secs() -> u64 {
    DEFAULT_POLL_TIMEOUT_SECS
}

impl Config {
    /// Default config file path
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("Failed to determine config directory")?;
        Ok(dir.join("linkcheck").join("config.toml"))
    }

    /// Load from `path`, or from [`Config::default_path`] when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.apply_env();
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.data_dir = PathBuf::from(expand_tilde(&config.data_dir.to_string_lossy()));
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(token) = env::var(BOT_TOKEN_ENV) {
            if !token.trim().is_empty() {
                self.bot_token = token.trim().to_string();
            }
        }
    }

    /// Checks needed before the stores and HTTP clients are built.
    pub fn validate(&self) -> Result<()> {
        validate_http_url(&self.check_url, "check_url")?;
        validate_http_url(&self.rdap_base_url, "rdap_base_url")?;
        if self.verify_timeout_secs == 0 {
            bail!("verify_timeout_secs must be greater than 0");
        }
        Ok(())
    }

    /// Like [`Config::validate`], plus a bot token for serving.
    pub fn validate_for_serve(&self) -> Result<()> {
        self.validate()?;
        if self.bot_token.is_empty() {
            bail!("bot_token is not set (config file or {BOT_TOKEN_ENV})");
        }
        Ok(())
    }

    pub fn is_admin(&self, user_id: i64) -> bool {
        self.admin_ids.contains(&user_id)
    }

    pub fn verify_timeout(&self) -> Duration {
        Duration::from_secs(self.verify_timeout_secs)
    }

    pub fn edit_pace(&self) -> Duration {
        Duration::from_millis(self.edit_pace_millis)
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout_secs)
    }
}

fn validate_http_url(url: &str, field: &str) -> Result<()> {
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        bail!("{field} must be an http(s) URL, got '{url}'");
    }
    Ok(())
}

/// Expand ~ to home directory in paths
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}
