//! Shared HTTP client construction for outbound lookups and checks.

use anyhow::{bail, Context, Result};
use reqwest::blocking::{Client, Response};
use std::io::Read;
use std::time::Duration;

pub(crate) const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Upper bound for a check-service response body.
pub(crate) const MAX_BODY_BYTES: u64 = 256 * 1024;

/// Create an HTTP client with a connect timeout and a total request timeout.
pub(crate) fn create_http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
        .timeout(timeout)
        .user_agent(concat!("linkcheck/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to create HTTP client")
}

/// Validate HTTP response status code and return a descriptive error if not successful.
pub(crate) fn validate_response_status(response: &Response, context: &str) -> Result<()> {
    if !response.status().is_success() {
        let status = response.status();
        bail!(
            "{}: HTTP {} - {}",
            context,
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown error")
        );
    }
    Ok(())
}

/// Read a text body, refusing anything larger than `max_size` bytes.
pub(crate) fn read_text_with_limit(response: Response, max_size: u64, context: &str) -> Result<String> {
    if let Some(content_length) = response.content_length() {
        if content_length > max_size {
            bail!("{context}: Content-Length {content_length} bytes exceeds limit of {max_size} bytes");
        }
    }

    let mut bytes = Vec::new();
    response
        .take(max_size + 1)
        .read_to_end(&mut bytes)
        .with_context(|| format!("{context}: failed to read response body"))?;
    if bytes.len() as u64 > max_size {
        bail!("{context}: body exceeds limit of {max_size} bytes");
    }

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
