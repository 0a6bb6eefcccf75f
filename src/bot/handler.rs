//! Message dispatch: one incoming message, one command invocation.

use std::time::Duration;
use tracing::{error, info, warn};

use super::access::{authorize, require_credential};
use super::commands::{Command, HELP_TEXT};
use crate::batch::extract_batch;
use crate::check::{CheckService, DomainLookup, ItemProcessor};
use crate::error::BotError;
use crate::fs::{CredentialStore, Plan, UserDirectory, UserRecord};
use crate::reporter::{IncrementalReporter, Pacer};
use crate::session::{run_batch, BatchSummary};
use crate::telegram::types::Message;
use crate::telegram::{ChatTransport, MessageSink};
use crate::utils::escape_html;
use crate::validation::{parse_user_id, validate_token};

/// Collaborators and settings for handling messages.
pub struct Bot<'a> {
    pub transport: &'a dyn ChatTransport,
    pub users: &'a dyn UserDirectory,
    pub credentials: &'a dyn CredentialStore,
    pub lookup: &'a dyn DomainLookup,
    pub service: &'a dyn CheckService,
    pub pacer: &'a dyn Pacer,
    pub admin_ids: &'a [i64],
    pub edit_pace: Duration,
}

/// Who sent a command, and where to answer.
#[derive(Debug, Clone)]
struct Caller {
    chat_id: i64,
    user_id: i64,
    username: Option<String>,
}

impl Bot<'_> {
    /// Handle one message. Never fails: every error ends as a chat reply or a
    /// log line.
    pub fn handle_message(&self, message: &Message) {
        let (Some(text), Some(from)) = (message.text.as_deref(), message.from.as_ref()) else {
            return;
        };
        let Some(command) = Command::parse(text) else {
            return;
        };
        let caller = Caller {
            chat_id: message.chat.id,
            user_id: from.id,
            username: from.username.clone(),
        };
        info!(user_id = caller.user_id, ?command, "command received");

        if let Err(err) = self.dispatch(&caller, &command, text) {
            match &err {
                BotError::Generic(detail) => {
                    error!(user_id = caller.user_id, ?command, %detail, "command failed")
                }
                _ => info!(user_id = caller.user_id, ?command, %err, "command rejected"),
            }
            self.reply(caller.chat_id, &escape_html(&err.user_message()));
        }
    }

    fn dispatch(&self, caller: &Caller, command: &Command, text: &str) -> Result<(), BotError> {
        if command.is_admin_only() && !self.is_admin(caller.user_id) {
            return Err(BotError::AdminOnly);
        }

        match command {
            Command::Start | Command::Help => {
                self.reply(caller.chat_id, HELP_TEXT);
                Ok(())
            }
            Command::Register => self.register(caller),
            Command::Token(token) => self.save_token(caller, token),
            Command::Check => self.check(caller, text).map(|_| ()),
            Command::Ban(id) => self.set_banned(caller, id, true),
            Command::Unban(id) => self.set_banned(caller, id, false),
            Command::Plan(id, plan) => self.set_plan(caller, id, plan),
        }
    }

    fn is_admin(&self, user_id: i64) -> bool {
        self.admin_ids.contains(&user_id)
    }

    fn reply(&self, chat_id: i64, html: &str) {
        if let Err(err) = self.transport.send_message(chat_id, html) {
            warn!(chat_id, error = %format!("{err:#}"), "failed to send reply");
        }
    }

    fn register(&self, caller: &Caller) -> Result<(), BotError> {
        let (record, created) = self
            .users
            .register(caller.user_id, caller.username.as_deref())?;
        let text = if created {
            info!(user_id = caller.user_id, "user registered");
            "Registered on the free plan. Save your check service token with /token.".to_string()
        } else {
            format!("Already registered (plan: {}).", record.plan)
        };
        self.reply(caller.chat_id, &text);
        Ok(())
    }

    /// `/token`: registered, non-banned users only.
    fn save_token(&self, caller: &Caller, token: &str) -> Result<(), BotError> {
        match self.users.get(caller.user_id)? {
            Some(user) if user.banned => return Err(BotError::Banned),
            None if !self.is_admin(caller.user_id) => return Err(BotError::NotRegistered),
            _ => {}
        }
        validate_token(token).map_err(|e| BotError::InvalidArgument(e.to_string()))?;

        self.credentials.save(caller.user_id, token)?;
        info!(user_id = caller.user_id, "token saved");
        self.reply(caller.chat_id, "✅ Token saved.");
        Ok(())
    }

    /// `/check`: gate, extract, then process the batch into one edited message.
    fn check(&self, caller: &Caller, text: &str) -> Result<BatchSummary, BotError> {
        authorize(self.users, caller.user_id, self.is_admin(caller.user_id))?;
        let token = require_credential(self.credentials, caller.user_id)?;
        let batch = extract_batch(text)?;

        let message_id = self
            .transport
            .send_message(
                caller.chat_id,
                &format!("⏳ Checking {} target(s)...", batch.len()),
            )
            .map_err(BotError::from)?;

        let processor = ItemProcessor::new(self.lookup, self.service);
        let mut sink = MessageSink::new(self.transport, caller.chat_id, message_id);
        let mut reporter = IncrementalReporter::new(&mut sink, self.pacer, self.edit_pace);
        Ok(run_batch(&batch, &token, &processor, &mut reporter))
    }

    fn set_banned(&self, caller: &Caller, id: &str, banned: bool) -> Result<(), BotError> {
        let target_id = parse_user_id(id).map_err(|e| BotError::InvalidArgument(e.to_string()))?;
        let change = move |user: &mut UserRecord| user.banned = banned;
        self.users
            .modify(target_id, &change)?
            .ok_or_else(|| BotError::InvalidArgument(format!("User {target_id} not found")))?;

        let action = if banned { "banned" } else { "unbanned" };
        info!(admin_id = caller.user_id, target_id, action, "user access changed");
        self.reply(caller.chat_id, &format!("User {target_id} {action}."));
        Ok(())
    }

    fn set_plan(&self, caller: &Caller, id: &str, plan: &str) -> Result<(), BotError> {
        let target_id = parse_user_id(id).map_err(|e| BotError::InvalidArgument(e.to_string()))?;
        let plan: Plan = plan
            .parse()
            .map_err(|e: anyhow::Error| BotError::InvalidArgument(e.to_string()))?;
        let change = move |user: &mut UserRecord| user.plan = plan;
        self.users
            .modify(target_id, &change)?
            .ok_or_else(|| BotError::InvalidArgument(format!("User {target_id} not found")))?;

        info!(admin_id = caller.user_id, target_id, %plan, "user plan changed");
        self.reply(caller.chat_id, &format!("User {target_id} is now on the {plan} plan."));
        Ok(())
    }
}
