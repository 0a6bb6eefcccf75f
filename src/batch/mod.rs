//! Parsing chat input into bounded batches of check targets.

pub mod extract;
pub mod target;

pub use extract::{batch_from_lines, extract_batch, Batch, MAX_BATCH};
pub use target::Target;
