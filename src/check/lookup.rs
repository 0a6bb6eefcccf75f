//! Domain registration lookups over RDAP.
//!
//! Results only decorate the report, so callers treat every failure here as
//! a missing `DomainInfo` rather than an item error.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;

use super::http::{create_http_client, validate_response_status};

const LOOKUP_TIMEOUT_SECS: u64 = 15;

/// Registration metadata for a domain. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainInfo {
    pub registrar: Option<String>,
    pub status: Vec<String>,
    pub registered: Option<String>,
    pub expires: Option<String>,
    pub nameservers: Vec<String>,
}

/// Source of domain registration metadata.
pub trait DomainLookup {
    fn lookup(&self, domain: &str) -> Result<DomainInfo>;
}

/// RDAP client (`GET {base}/domain/{domain}`).
pub struct RdapClient {
    client: Client,
    base_url: String,
}

impl RdapClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            client: create_http_client(Duration::from_secs(LOOKUP_TIMEOUT_SECS))?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl DomainLookup for RdapClient {
    fn lookup(&self, domain: &str) -> Result<DomainInfo> {
        let url = format!("{}/domain/{}", self.base_url, domain);
        let response = self
            .client
            .get(&url)
            .header("Accept", "application/rdap+json, application/json")
            .send()
            .with_context(|| format!("RDAP request failed for {domain}"))?;
        validate_response_status(&response, "RDAP lookup")?;
        let body: Value = response
            .json()
            .with_context(|| format!("RDAP response for {domain} is not JSON"))?;
        Ok(parse_rdap(&body))
    }
}

/// Extract the fields we report from an RDAP domain object.
pub fn parse_rdap(body: &Value) -> DomainInfo {
    DomainInfo {
        registrar: registrar_name(body),
        status: string_array(body.get("status")),
        registered: event_date(body, "registration"),
        expires: event_date(body, "expiration"),
        nameservers: body
            .get("nameservers")
            .and_then(Value::as_array)
            .map(|servers| {
                servers
                    .iter()
                    .filter_map(|ns| ns.get("ldhName").and_then(Value::as_str))
                    .map(|name| name.to_lowercase())
                    .collect()
            })
            .unwrap_or_default(),
    }
}

fn string_array(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Date part of the first event with the given action.
fn event_date(body: &Value, action: &str) -> Option<String> {
    body.get("events")?
        .as_array()?
        .iter()
        .find(|event| event.get("eventAction").and_then(Value::as_str) == Some(action))
        .and_then(|event| event.get("eventDate").and_then(Value::as_str))
        .map(|date| date.split('T').next().unwrap_or(date).to_string())
}

/// The `fn` vCard property of the entity carrying the `registrar` role.
fn registrar_name(body: &Value) -> Option<String> {
    let entity = body.get("entities")?.as_array()?.iter().find(|entity| {
        entity
            .get("roles")
            .and_then(Value::as_array)
            .is_some_and(|roles| roles.iter().any(|r| r.as_str() == Some("registrar")))
    })?;

    // vcardArray = ["vcard", [[name, params, type, value], ...]]
    entity
        .get("vcardArray")?
        .get(1)?
        .as_array()?
        .iter()
        .find(|prop| prop.get(0).and_then(Value::as_str) == Some("fn"))
        .and_then(|prop| prop.get(3).and_then(Value::as_str))
        .map(str::to_string)
}
