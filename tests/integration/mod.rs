//! Integration tests for linkcheck
//!
//! These tests drive the bot handler end to end with in-memory chat and HTTP
//! fakes and real file-backed stores in a temp directory.

pub mod access_flow;
pub mod check_flow;
pub mod helpers;
pub mod serve_loop;
