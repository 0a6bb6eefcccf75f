//! Input validation for values users hand to the bot or the CLI.

use anyhow::{bail, Context, Result};

/// Maximum allowed length for a saved API token.
pub const MAX_TOKEN_LENGTH: usize = 512;

/// Validates a user-supplied API token before it is stored.
///
/// A token is valid if:
/// - It is not empty
/// - It is no longer than MAX_TOKEN_LENGTH characters
/// - It contains no whitespace or control characters
///
/// # Examples
///
/// ```
/// use linkcheck::validation::validate_token;
///
/// assert!(validate_token("lc_live_4f9a2b").is_ok());
/// assert!(validate_token("").is_err());
/// assert!(validate_token("two words").is_err());
/// ```
pub fn validate_token(token: &str) -> Result<()> {
    if token.is_empty() {
        bail!("Token cannot be empty");
    }

    let len = token.chars().count();
    if len > MAX_TOKEN_LENGTH {
        bail!("Token too long: {len} characters (max {MAX_TOKEN_LENGTH})");
    }

    if token.chars().any(|c| c.is_whitespace() || c.is_control()) {
        bail!("Token must not contain spaces or control characters");
    }

    Ok(())
}

/// Parses a Telegram user id argument.
pub fn parse_user_id(s: &str) -> Result<i64> {
    let id: i64 = s
        .trim()
        .parse()
        .with_context(|| format!("Invalid user id: '{s}'"))?;
    if id == 0 {
        bail!("Invalid user id: 0");
    }
    Ok(id)
}

/// Clap value parser for token arguments.
pub fn clap_token_validator(s: &str) -> Result<String, String> {
    validate_token(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}
