//! Access gate for the check command.

use crate::error::BotError;
use crate::fs::{CredentialStore, Plan, UserDirectory};

/// Decide whether `user_id` may run a batch check.
///
/// Order: registration, ban, plan. Administrators skip registration and plan
/// checks but are still subject to bans.
pub fn authorize(users: &dyn UserDirectory, user_id: i64, is_admin: bool) -> Result<(), BotError> {
    let record = users.get(user_id)?;
    match record {
        None if is_admin => Ok(()),
        None => Err(BotError::NotRegistered),
        Some(user) if user.banned => Err(BotError::Banned),
        Some(user) if user.plan == Plan::Free && !is_admin => Err(BotError::PlanRestricted),
        Some(_) => Ok(()),
    }
}

/// The caller's saved token, or `MissingCredential`.
pub fn require_credential(
    credentials: &dyn CredentialStore,
    user_id: i64,
) -> Result<String, BotError> {
    credentials
        .get(user_id)?
        .filter(|token| !token.is_empty())
        .ok_or(BotError::MissingCredential)
}
