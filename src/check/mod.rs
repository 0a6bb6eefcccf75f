//! Checking a single target: domain lookup, check submission and
//! classification of the service's answer.

pub mod classify;
pub(crate) mod http;
pub mod lookup;
pub mod processor;
pub mod render;
pub mod service;

pub use classify::{classify, CheckStatus, Verdict};
pub use lookup::{DomainInfo, DomainLookup, RdapClient};
pub use processor::{ItemError, ItemOutcome, ItemProcessor, ItemReport};
pub use service::{CheckService, HttpCheckService};
