//! User directory backing the access gate.
//!
//! Persisted in `<data_dir>/users.toml`.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::locking::{locked_read, locked_update};

/// Subscription plan of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    #[default]
    Free,
    Premium,
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Plan::Free => write!(f, "free"),
            Plan::Premium => write!(f, "premium"),
        }
    }
}

impl std::str::FromStr for Plan {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(Plan::Free),
            "premium" => Ok(Plan::Premium),
            _ => anyhow::bail!("Invalid plan: {s}. Use: free, premium"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub plan: Plan,
    #[serde(default)]
    pub banned: bool,
    pub registered_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn new(id: i64, username: Option<String>) -> Self {
        Self {
            id,
            username,
            plan: Plan::Free,
            banned: false,
            registered_at: Utc::now(),
        }
    }
}

/// Keyed store of user records.
pub trait UserDirectory {
    fn get(&self, user_id: i64) -> Result<Option<UserRecord>>;

    /// Create the record if missing. Returns the stored record and whether it
    /// was newly created.
    fn register(&self, user_id: i64, username: Option<&str>) -> Result<(UserRecord, bool)>;

    /// Apply `change` to an existing record. Returns `None` for unknown users.
    fn modify(
        &self,
        user_id: i64,
        change: &dyn Fn(&mut UserRecord),
    ) -> Result<Option<UserRecord>>;

    fn list(&self) -> Result<Vec<UserRecord>>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct UserFile {
    #[serde(default)]
    users: BTreeMap<String, UserRecord>,
}

pub struct FileUserDirectory {
    path: PathBuf,
}

impl FileUserDirectory {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("users.toml"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<UserFile> {
        match locked_read(&self.path)? {
            Some(content) => parse(&content, &self.path),
            None => Ok(UserFile::default()),
        }
    }

    /// Locked read-modify-write of the whole file, returning what `f` returns.
    fn update<T>(&self, f: impl FnOnce(&mut UserFile) -> T) -> Result<T> {
        let mut out = None;
        locked_update(&self.path, |current| {
            let mut file = parse(current, &self.path)?;
            out = Some(f(&mut file));
            toml::to_string_pretty(&file).context("Failed to serialize users to TOML")
        })?;
        out.context("User update did not run")
    }
}

fn parse(content: &str, path: &Path) -> Result<UserFile> {
    toml::from_str(content)
        .with_context(|| format!("Failed to parse users file: {}", path.display()))
}

impl UserDirectory for FileUserDirectory {
    fn get(&self, user_id: i64) -> Result<Option<UserRecord>> {
        Ok(self.load()?.users.remove(&user_id.to_string()))
    }

    fn register(&self, user_id: i64, username: Option<&str>) -> Result<(UserRecord, bool)> {
        self.update(|file| {
            let key = user_id.to_string();
            if let Some(existing) = file.users.get(&key) {
                return (existing.clone(), false);
            }
            let record = UserRecord::new(user_id, username.map(str::to_string));
            file.users.insert(key, record.clone());
            (record, true)
        })
    }

    fn modify(
        &self,
        user_id: i64,
        change: &dyn Fn(&mut UserRecord),
    ) -> Result<Option<UserRecord>> {
        self.update(|file| {
            file.users.get_mut(&user_id.to_string()).map(|record| {
                change(record);
                record.clone()
            })
        })
    }

    fn list(&self) -> Result<Vec<UserRecord>> {
        let mut users: Vec<UserRecord> = self.load()?.users.into_values().collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }
}
