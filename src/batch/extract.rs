//! Batch extraction from free-form command text.

use super::target::Target;
use crate::error::BotError;

/// Maximum number of targets checked per command.
pub const MAX_BATCH: usize = 15;

/// Lines scanned after the command line.
const SCANNED_LINES: usize = MAX_BATCH - 1;

/// An ordered, non-empty set of targets from one command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    targets: Vec<Target>,
}

impl Batch {
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl IntoIterator for Batch {
    type Item = Target;
    type IntoIter = std::vec::IntoIter<Target>;

    fn into_iter(self) -> Self::IntoIter {
        self.targets.into_iter()
    }
}

/// Extract targets from a command message.
///
/// The command line may carry one target as its second whitespace token.
/// Only the next [`SCANNED_LINES`] lines are examined; lines that don't parse
/// are skipped without error.
pub fn extract_batch(text: &str) -> Result<Batch, BotError> {
    let mut lines = text.lines();
    let mut targets = Vec::new();

    if let Some(first) = lines.next() {
        if let Some(target) = first.split_whitespace().nth(1).and_then(Target::parse) {
            targets.push(target);
        }
    }

    targets.extend(
        lines
            .take(SCANNED_LINES)
            .filter_map(|line| Target::parse(line.trim())),
    );

    if targets.is_empty() {
        return Err(BotError::EmptyBatch);
    }
    if targets.len() > MAX_BATCH {
        return Err(BotError::BatchTooLarge { max: MAX_BATCH });
    }

    Ok(Batch { targets })
}

/// Build a batch from already-split lines, as the CLI reads them from a file.
///
/// Unlike [`extract_batch`] every line is considered, so oversized input is
/// rejected rather than cut at the scan window.
pub fn batch_from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Result<Batch, BotError> {
    let targets: Vec<Target> = lines
        .into_iter()
        .filter_map(|line| Target::parse(line.trim()))
        .collect();

    if targets.is_empty() {
        return Err(BotError::EmptyBatch);
    }
    if targets.len() > MAX_BATCH {
        return Err(BotError::BatchTooLarge { max: MAX_BATCH });
    }

    Ok(Batch { targets })
}
