pub mod batch;
pub mod bot;
pub mod check;
pub mod commands;
pub mod config;
pub mod error;
pub mod fs;
pub mod logging;
pub mod reporter;
pub mod session;
pub mod telegram;
pub mod utils;
pub mod validation;
