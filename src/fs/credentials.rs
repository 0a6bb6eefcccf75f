//! Per-user API token storage.
//!
//! Tokens are opaque: they are stored and handed to the check service
//! unmodified. The file store persists them in `<data_dir>/credentials.toml`.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::locking::{locked_read, locked_update};

/// Keyed store of user credentials.
pub trait CredentialStore {
    fn get(&self, user_id: i64) -> Result<Option<String>>;

    /// Insert or replace the user's token.
    fn save(&self, user_id: i64, token: &str) -> Result<()>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialEntry {
    pub token: String,
    pub saved_at: DateTime<Utc>,
}

/// On-disk layout. TOML keys must be strings, so ids are stored as text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CredentialFile {
    #[serde(default)]
    credentials: BTreeMap<String, CredentialEntry>,
}

pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("credentials.toml"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full entry including when it was saved.
    pub fn entry(&self, user_id: i64) -> Result<Option<CredentialEntry>> {
        Ok(self.load()?.credentials.remove(&user_id.to_string()))
    }

    fn load(&self) -> Result<CredentialFile> {
        match locked_read(&self.path)? {
            Some(content) => parse(&content, &self.path),
            None => Ok(CredentialFile::default()),
        }
    }
}

fn parse(content: &str, path: &Path) -> Result<CredentialFile> {
    toml::from_str(content)
        .with_context(|| format!("Failed to parse credentials file: {}", path.display()))
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, user_id: i64) -> Result<Option<String>> {
        Ok(self.entry(user_id)?.map(|entry| entry.token))
    }

    fn save(&self, user_id: i64, token: &str) -> Result<()> {
        locked_update(&self.path, |current| {
            let mut file = parse(current, &self.path)?;
            file.credentials.insert(
                user_id.to_string(),
                CredentialEntry {
                    token: token.to_string(),
                    saved_at: Utc::now(),
                },
            );
            toml::to_string_pretty(&file).context("Failed to serialize credentials to TOML")
        })
    }
}
