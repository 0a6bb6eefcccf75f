//! Classification of check-service responses.
//!
//! The service answers with a small HTML fragment. Outcomes are decided by an
//! ordered rule table: the first rule whose markers appear in the body wins.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Closed set of outcomes for one checked target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Up,
    Down,
    InvalidCredential,
    AuthRequired,
    InternalError,
    InvalidFormat,
    Unclassified,
}

impl CheckStatus {
    pub fn label(self) -> &'static str {
        match self {
            CheckStatus::Up => "UP ✅",
            CheckStatus::Down => "DOWN ❌",
            CheckStatus::InvalidCredential => "INVALID TOKEN 🔑",
            CheckStatus::AuthRequired => "AUTH REQUIRED 🔒",
            CheckStatus::InternalError => "SERVICE ERROR ⚠️",
            CheckStatus::InvalidFormat => "INVALID TARGET ⚠️",
            CheckStatus::Unclassified => "UNKNOWN ❔",
        }
    }
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Up => write!(f, "up"),
            CheckStatus::Down => write!(f, "down"),
            CheckStatus::InvalidCredential => write!(f, "invalid_credential"),
            CheckStatus::AuthRequired => write!(f, "auth_required"),
            CheckStatus::InternalError => write!(f, "internal_error"),
            CheckStatus::InvalidFormat => write!(f, "invalid_format"),
            CheckStatus::Unclassified => write!(f, "unclassified"),
        }
    }
}

/// Classified response for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub status: CheckStatus,
    pub message: String,
    pub monitor_removed: bool,
}

/// One entry of the rule table. Markers are matched case-insensitively.
pub struct Rule {
    pub markers: &'static [&'static str],
    pub status: CheckStatus,
    pub fallback_message: &'static str,
}

impl Rule {
    fn matches(&self, lowered_body: &str) -> bool {
        self.markers.iter().any(|m| lowered_body.contains(m))
    }
}

/// Rules in priority order. Credential problems beat the up/down marker,
/// which beats service and format errors.
pub const RULES: &[Rule] = &[
    Rule {
        markers: &["invalid api token", "token expired", "token revoked"],
        status: CheckStatus::InvalidCredential,
        fallback_message: "API token rejected by the check service",
    },
    Rule {
        markers: &["class=\"result up\"", "status: up"],
        status: CheckStatus::Up,
        fallback_message: "Endpoint responded as expected",
    },
    Rule {
        markers: &["class=\"result down\"", "status: down"],
        status: CheckStatus::Down,
        fallback_message: "Endpoint did not respond as expected",
    },
    Rule {
        markers: &["authentication required", "www-authenticate"],
        status: CheckStatus::AuthRequired,
        fallback_message: "Endpoint requires authentication",
    },
    Rule {
        markers: &["internal error", "service unavailable"],
        status: CheckStatus::InternalError,
        fallback_message: "Check service reported an internal error",
    },
    Rule {
        markers: &["invalid target", "malformed target"],
        status: CheckStatus::InvalidFormat,
        fallback_message: "Check service rejected the target format",
    },
];

const REMOVED_MARKER: &str = "monitor removed";
const UNCLASSIFIED_MESSAGE: &str = "Unrecognized response from check service";
const MAX_MESSAGE_CHARS: usize = 120;

static MESSAGE_OPEN_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<([a-z][a-z0-9]*)[^>]*class="message"[^>]*>"#)
        .expect("message pattern is valid")
});
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Classify a response body against [`RULES`].
pub fn classify(body: &str) -> Verdict {
    classify_with(RULES, body)
}

/// Classify a response body against an explicit rule table.
pub fn classify_with(rules: &[Rule], body: &str) -> Verdict {
    let lowered = body.to_lowercase();
    let monitor_removed = lowered.contains(REMOVED_MARKER);

    match rules.iter().find(|rule| rule.matches(&lowered)) {
        Some(rule) => Verdict {
            status: rule.status,
            message: extract_message(body).unwrap_or_else(|| rule.fallback_message.to_string()),
            monitor_removed,
        },
        None => Verdict {
            status: CheckStatus::Unclassified,
            message: UNCLASSIFIED_MESSAGE.to_string(),
            monitor_removed,
        },
    }
}

/// Pull the human-readable text out of the fragment's `class="message"` element.
fn extract_message(body: &str) -> Option<String> {
    let caps = MESSAGE_OPEN_TAG.captures(body)?;
    let start = caps.get(0)?.end();
    let closing = format!("</{}>", caps[1].to_ascii_lowercase());
    let rest = &body[start..];
    let end = rest.to_ascii_lowercase().find(&closing).unwrap_or(rest.len());
    let inner = &rest[..end];
    let text = TAG.replace_all(inner, " ");
    let text = WHITESPACE.replace_all(text.trim(), " ");
    if text.is_empty() {
        return None;
    }
    Some(crate::utils::truncate(&text, MAX_MESSAGE_CHARS))
}
