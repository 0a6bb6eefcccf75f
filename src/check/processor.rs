//! Per-target processing: enrich, submit, classify.

use std::time::{Duration, Instant};
use tracing::{info, warn};

use super::classify::{classify, Verdict};
use super::lookup::{DomainInfo, DomainLookup};
use super::service::CheckService;
use crate::batch::Target;
use crate::error::BotError;

/// Successful outcome for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemReport {
    pub target: Target,
    pub verdict: Verdict,
    pub info: Option<DomainInfo>,
    pub elapsed: Duration,
}

/// Transport failure for one target. The batch carries on after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemError {
    pub target: Target,
    pub error: BotError,
    pub elapsed: Duration,
}

pub type ItemOutcome = Result<ItemReport, ItemError>;

pub struct ItemProcessor<'a> {
    lookup: &'a dyn DomainLookup,
    service: &'a dyn CheckService,
}

impl<'a> ItemProcessor<'a> {
    pub fn new(lookup: &'a dyn DomainLookup, service: &'a dyn CheckService) -> Self {
        Self { lookup, service }
    }

    /// Process one target. Lookup failures only degrade the report; check
    /// transport failures become an [`ItemError`].
    pub fn process(&self, target: &Target, token: &str) -> ItemOutcome {
        let started = Instant::now();

        let domain = target.registrable_domain();
        let info = match self.lookup.lookup(domain) {
            Ok(info) => Some(info),
            Err(err) => {
                warn!(domain, error = %format!("{err:#}"), "domain lookup failed");
                None
            }
        };

        let line = target.to_string();
        match self.service.submit(&line, token) {
            Ok(body) => {
                let verdict = classify(&body);
                let elapsed = started.elapsed();
                info!(target_line = %line, status = %verdict.status, ?elapsed, "target checked");
                Ok(ItemReport {
                    target: target.clone(),
                    verdict,
                    info,
                    elapsed,
                })
            }
            Err(err) => {
                let elapsed = started.elapsed();
                warn!(target_line = %line, error = %format!("{err:#}"), "check transport failed");
                Err(ItemError {
                    target: target.clone(),
                    error: BotError::ItemTransport(format!("{err:#}")),
                    elapsed,
                })
            }
        }
    }
}
