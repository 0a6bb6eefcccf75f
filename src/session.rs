//! One batch run: process targets in order, report after each.

use tracing::{debug, info};

use crate::batch::Batch;
use crate::check::render::render_outcome;
use crate::check::{ItemOutcome, ItemProcessor};
use crate::reporter::IncrementalReporter;

/// Progress of a batch. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchPhase {
    Created,
    Processing(usize),
    Done,
}

impl BatchPhase {
    fn advance(self, total: usize) -> Self {
        match self {
            BatchPhase::Created if total > 0 => BatchPhase::Processing(0),
            BatchPhase::Processing(i) if i + 1 < total => BatchPhase::Processing(i + 1),
            _ => BatchPhase::Done,
        }
    }
}

/// Summary of a finished batch.
#[derive(Debug)]
pub struct BatchSummary {
    pub outcomes: Vec<ItemOutcome>,
    /// Items whose report edit failed and are missing from the message.
    pub dropped_reports: usize,
}

/// Run every target through the processor, strictly sequentially.
///
/// Item and edit failures are contained here; nothing in the loop aborts the
/// batch.
pub fn run_batch(
    batch: &Batch,
    token: &str,
    processor: &ItemProcessor<'_>,
    reporter: &mut IncrementalReporter<'_>,
) -> BatchSummary {
    let total = batch.len();
    let mut phase = BatchPhase::Created;
    let mut outcomes = Vec::with_capacity(total);
    let mut dropped_reports = 0;

    info!(total, "batch started");
    for target in batch.targets() {
        phase = phase.advance(total);
        debug!(?phase, target_line = %target, "processing target");

        let outcome = processor.process(target, token);
        if reporter.push(render_outcome(&outcome)).is_err() {
            dropped_reports += 1;
        }
        outcomes.push(outcome);
    }
    phase = phase.advance(total);
    debug_assert_eq!(phase, BatchPhase::Done);

    let ok = outcomes.iter().filter(|o| o.is_ok()).count();
    info!(
        total,
        ok,
        failed = total - ok,
        dropped_reports,
        "batch finished"
    );

    BatchSummary {
        outcomes,
        dropped_reports,
    }
}
