//! Blocking Telegram Bot API client.

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;

use super::types::{ApiResponse, Message, Update};
use super::ChatTransport;

const API_BASE: &str = "https://api.telegram.org";
const SEND_TIMEOUT_SECS: u64 = 30;

pub struct TelegramClient {
    client: Client,
    base_url: String,
    poll_timeout: Duration,
}

impl TelegramClient {
    pub fn new(bot_token: &str, poll_timeout: Duration) -> Result<Self> {
        Self::with_base_url(API_BASE, bot_token, poll_timeout)
    }

    pub fn with_base_url(api_base: &str, bot_token: &str, poll_timeout: Duration) -> Result<Self> {
        // Long polls hold the request open for poll_timeout, so the HTTP
        // timeout has to outlast it.
        let client = Client::builder()
            .timeout(poll_timeout + Duration::from_secs(SEND_TIMEOUT_SECS))
            .build()
            .context("Failed to create Telegram HTTP client")?;
        Ok(Self {
            client,
            base_url: format!("{}/bot{}", api_base.trim_end_matches('/'), bot_token),
            poll_timeout,
        })
    }

    fn call<T: DeserializeOwned>(&self, method: &str, payload: &Value) -> Result<T> {
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, method))
            .json(payload)
            .send()
            .with_context(|| format!("Telegram {method} request failed"))?;
        let body: ApiResponse<T> = response
            .json()
            .with_context(|| format!("Telegram {method} returned invalid JSON"))?;
        unwrap_response(method, body)
    }

    /// Long-poll for updates after `offset`.
    pub fn get_updates(&self, offset: i64) -> Result<Vec<Update>> {
        self.call(
            "getUpdates",
            &json!({
                "offset": offset,
                "timeout": self.poll_timeout.as_secs(),
                "allowed_updates": ["message"],
            }),
        )
    }
}

fn unwrap_response<T>(method: &str, body: ApiResponse<T>) -> Result<T> {
    if !body.ok {
        bail!(
            "Telegram {method} failed ({}): {}",
            body.error_code.unwrap_or_default(),
            body.description.as_deref().unwrap_or("no description")
        );
    }
    body.result
        .with_context(|| format!("Telegram {method} returned no result"))
}

impl ChatTransport for TelegramClient {
    fn send_message(&self, chat_id: i64, text: &str) -> Result<i64> {
        let message: Message = self.call(
            "sendMessage",
            &json!({
                "chat_id": chat_id,
                "text": text,
                "parse_mode": "HTML",
                "disable_web_page_preview": true,
            }),
        )?;
        Ok(message.message_id)
    }

    fn edit_message(&self, chat_id: i64, message_id: i64, text: &str) -> Result<()> {
        // Returns the edited Message, or `true` for inline messages.
        let _: Value = self.call(
            "editMessageText",
            &json!({
                "chat_id": chat_id,
                "message_id": message_id,
                "text": text,
                "parse_mode": "HTML",
                "disable_web_page_preview": true,
            }),
        )?;
        Ok(())
    }
}
