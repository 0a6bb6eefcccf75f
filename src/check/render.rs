//! Chat rendering of item outcomes (Telegram HTML parse mode).

use super::lookup::DomainInfo;
use super::processor::{ItemError, ItemOutcome, ItemReport};
use crate::utils::{escape_html, format_elapsed};

const UNKNOWN: &str = "unknown";

/// Longer status and nameserver lists are cut to keep 15 entries in one message.
const MAX_LIST_ITEMS: usize = 2;

pub fn render_outcome(outcome: &ItemOutcome) -> String {
    match outcome {
        Ok(report) => render_report(report),
        Err(err) => render_error(err),
    }
}

pub fn render_report(report: &ItemReport) -> String {
    let verdict = &report.verdict;
    let mut out = String::new();
    out.push_str(&format!(
        "<b>Target:</b> <code>{}</code>\n",
        escape_html(&report.target.to_string())
    ));
    out.push_str(&format!("<b>Status:</b> {}\n", verdict.status.label()));
    out.push_str(&format!(
        "<b>Message:</b> {}\n",
        escape_html(&verdict.message)
    ));
    out.push_str(&format!(
        "<b>Monitor removed:</b> {}\n",
        if verdict.monitor_removed { "yes" } else { "no" }
    ));
    out.push_str(&render_info(report.info.as_ref()));
    out.push_str(&format!("<b>Took:</b> {}", format_elapsed(report.elapsed)));
    out
}

pub fn render_error(err: &ItemError) -> String {
    format!(
        "<b>Target:</b> <code>{}</code>\n<b>Status:</b> ERROR ⚠️\n<b>Message:</b> {}\n<b>Took:</b> {}",
        escape_html(&err.target.to_string()),
        escape_html(&err.error.to_string()),
        format_elapsed(err.elapsed)
    )
}

fn render_info(info: Option<&DomainInfo>) -> String {
    let default = DomainInfo::default();
    let info = info.unwrap_or(&default);

    let or_unknown = |value: Option<&String>| {
        value
            .map(|v| escape_html(v))
            .unwrap_or_else(|| UNKNOWN.to_string())
    };
    let join_or_unknown = |values: &[String]| {
        if values.is_empty() {
            UNKNOWN.to_string()
        } else {
            let shown = &values[..values.len().min(MAX_LIST_ITEMS)];
            let mut joined = shown.join(", ");
            if values.len() > MAX_LIST_ITEMS {
                joined.push_str(&format!(" (+{})", values.len() - MAX_LIST_ITEMS));
            }
            escape_html(&joined)
        }
    };

    format!(
        "<b>Registrar:</b> {}\n<b>Domain status:</b> {}\n<b>Registered:</b> {} | <b>Expires:</b> {}\n<b>Nameservers:</b> {}\n",
        or_unknown(info.registrar.as_ref()),
        join_or_unknown(&info.status),
        or_unknown(info.registered.as_ref()),
        or_unknown(info.expires.as_ref()),
        join_or_unknown(&info.nameservers),
    )
}
