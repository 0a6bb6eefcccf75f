//! A single check target parsed from one line of chat input.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// `host|port|/path|expected_status`
static TARGET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([A-Za-z0-9-]{1,63}(?:\.[A-Za-z0-9-]{1,63})+)\|(\d{1,5})\|(/[^\s|]*)\|([1-5]\d{2})$",
    )
    .expect("target pattern is valid")
});

/// One endpoint to check. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    host: String,
    port: u16,
    path: String,
    expected_status: u16,
}

impl Target {
    /// Parse a trimmed line, returning `None` if it doesn't match the target format.
    pub fn parse(line: &str) -> Option<Self> {
        let caps = TARGET_PATTERN.captures(line)?;
        let port: u16 = caps[2].parse().ok()?;
        if port == 0 {
            return None;
        }
        Some(Self {
            host: caps[1].to_ascii_lowercase(),
            port,
            path: caps[3].to_string(),
            expected_status: caps[4].parse().ok()?,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn expected_status(&self) -> u16 {
        self.expected_status
    }

    /// The domain registration lookups are keyed by: the last two host labels.
    pub fn registrable_domain(&self) -> &str {
        let mut dots = self.host.rmatch_indices('.');
        dots.next();
        match dots.next() {
            Some((idx, _)) => &self.host[idx + 1..],
            None => &self.host,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}",
            self.host, self.port, self.path, self.expected_status
        )
    }
}

impl FromStr for Target {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Target::parse(s.trim()).ok_or_else(|| {
            anyhow::anyhow!("Invalid target: {s}. Use: host|port|/path|expected_status")
        })
    }
}
