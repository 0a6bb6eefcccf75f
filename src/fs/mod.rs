//! File-backed stores under the bot's data directory.

pub mod credentials;
pub mod locking;
pub mod users;

pub use credentials::{CredentialStore, FileCredentialStore};
pub use users::{FileUserDirectory, Plan, UserDirectory, UserRecord};
