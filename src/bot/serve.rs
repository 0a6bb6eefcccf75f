//! Long-polling update loop.

use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::handler::Bot;
use crate::telegram::types::Update;

/// Back-off after a failed poll.
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Source of updates; the Telegram client in production.
pub trait UpdateSource {
    fn poll(&self, offset: i64) -> Result<Vec<Update>>;
}

impl UpdateSource for crate::telegram::TelegramClient {
    fn poll(&self, offset: i64) -> Result<Vec<Update>> {
        self.get_updates(offset)
    }
}

/// Poll and handle updates one at a time until `shutdown` is set.
///
/// Returns the next offset to poll from.
pub fn serve(
    bot: &Bot<'_>,
    source: &dyn UpdateSource,
    shutdown: &AtomicBool,
    mut offset: i64,
) -> i64 {
    info!(offset, "polling for updates");
    while !shutdown.load(Ordering::SeqCst) {
        let updates = match source.poll(offset) {
            Ok(updates) => updates,
            Err(err) => {
                warn!(error = %format!("{err:#}"), "poll failed, retrying");
                thread::sleep(POLL_RETRY_DELAY);
                continue;
            }
        };

        for update in updates {
            offset = offset.max(update.update_id + 1);
            match update.message {
                Some(ref message) => bot.handle_message(message),
                None => debug!(update_id = update.update_id, "ignoring non-message update"),
            }
            if shutdown.load(Ordering::SeqCst) {
                break;
            }
        }
    }
    info!(offset, "update loop stopped");
    offset
}
