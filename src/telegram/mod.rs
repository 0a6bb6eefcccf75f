//! Telegram transport.

pub mod api;
pub mod types;

use anyhow::Result;

use crate::reporter::ReportSink;

pub use api::TelegramClient;

/// Outbound chat operations used by the bot.
pub trait ChatTransport {
    /// Send a new HTML message, returning its id.
    fn send_message(&self, chat_id: i64, text: &str) -> Result<i64>;

    fn edit_message(&self, chat_id: i64, message_id: i64, text: &str) -> Result<()>;
}

/// A report sink that edits one existing chat message.
pub struct MessageSink<'a> {
    transport: &'a dyn ChatTransport,
    chat_id: i64,
    message_id: i64,
}

impl<'a> MessageSink<'a> {
    pub fn new(transport: &'a dyn ChatTransport, chat_id: i64, message_id: i64) -> Self {
        Self {
            transport,
            chat_id,
            message_id,
        }
    }
}

impl ReportSink for MessageSink<'_> {
    fn edit(&mut self, text: &str) -> Result<()> {
        self.transport
            .edit_message(self.chat_id, self.message_id, text)
    }
}
