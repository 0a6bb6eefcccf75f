//! Client for the user-facing uptime check service.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

use super::http::{create_http_client, read_text_with_limit, validate_response_status, MAX_BODY_BYTES};

/// Default wait for a synchronous check result.
pub const DEFAULT_VERIFY_TIMEOUT_SECS: u64 = 180;

/// Submits one target line with the caller's API token and returns the raw
/// response fragment.
pub trait CheckService {
    fn submit(&self, target: &str, token: &str) -> Result<String>;
}

pub struct HttpCheckService {
    client: Client,
    url: String,
}

impl HttpCheckService {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: create_http_client(timeout)?,
            url: url.to_string(),
        })
    }
}

impl CheckService for HttpCheckService {
    fn submit(&self, target: &str, token: &str) -> Result<String> {
        debug!(target_line = target, url = %self.url, "submitting check");
        let response = self
            .client
            .post(&self.url)
            .form(&[("target", target), ("token", token)])
            .send()
            .context("Check request failed")?;
        validate_response_status(&response, "Check service")?;
        read_text_with_limit(response, MAX_BODY_BYTES, "Check service")
    }
}
