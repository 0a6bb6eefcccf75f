//! Telegram bot: command parsing, access control, dispatch and the update loop.

pub mod access;
pub mod commands;
pub mod handler;
pub mod serve;

pub use commands::Command;
pub use handler::Bot;
pub use serve::{serve, UpdateSource};
