//! Incremental reporting into a single, repeatedly edited message.

use anyhow::Result;
use std::thread;
use std::time::Duration;
use tracing::warn;

use crate::error::BotError;

/// Default pause after each edit.
pub const DEFAULT_EDIT_PACE: Duration = Duration::from_secs(2);

/// Destination of the accumulated report text.
pub trait ReportSink {
    fn edit(&mut self, text: &str) -> Result<()>;
}

/// Rate limiting between edits.
pub trait Pacer {
    fn pause(&self, duration: Duration);
}

/// Blocks the current thread for the pause.
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}

/// Append-only list of rendered entries, pushed as a whole after each item.
pub struct IncrementalReporter<'a> {
    sink: &'a mut dyn ReportSink,
    pacer: &'a dyn Pacer,
    pace: Duration,
    entries: Vec<String>,
}

impl<'a> IncrementalReporter<'a> {
    pub fn new(sink: &'a mut dyn ReportSink, pacer: &'a dyn Pacer, pace: Duration) -> Self {
        Self {
            sink,
            pacer,
            pace,
            entries: Vec::new(),
        }
    }

    /// Append an entry and publish the full text.
    ///
    /// If the edit fails the entry is dropped again, so the visible text only
    /// ever holds entries whose edit went through. The pause happens either way.
    pub fn push(&mut self, entry: String) -> Result<(), BotError> {
        self.entries.push(entry);
        let text = self.render();
        let result = self.sink.edit(&text);
        self.pacer.pause(self.pace);

        match result {
            Ok(()) => Ok(()),
            Err(err) => {
                self.entries.pop();
                let err = BotError::ReportEdit(format!("{err:#}"));
                warn!(error = %err, "report edit failed, entry dropped");
                Err(err)
            }
        }
    }

    /// The accumulated text as it was last successfully published.
    pub fn render(&self) -> String {
        self.entries.join("\n\n")
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}
