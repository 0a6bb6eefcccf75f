//! Shared test helpers: fake chat transport, fake lookup and check service.

use anyhow::{bail, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::time::Duration;
use tempfile::TempDir;

use linkcheck::bot::Bot;
use linkcheck::check::{CheckService, DomainInfo, DomainLookup};
use linkcheck::fs::{
    CredentialStore, FileCredentialStore, FileUserDirectory, Plan, UserDirectory, UserRecord,
};
use linkcheck::reporter::Pacer;
use linkcheck::telegram::types::{Chat, Message, User};
use linkcheck::telegram::ChatTransport;

pub const ADMIN_ID: i64 = 1;
pub const USER_ID: i64 = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Message { chat_id: i64, text: String },
    Edit { message_id: i64, text: String },
}

/// Records outgoing chat traffic. Edits listed in `fail_edits` (1-based) fail.
#[derive(Default)]
pub struct FakeChat {
    pub sent: RefCell<Vec<Sent>>,
    pub fail_edits: HashSet<usize>,
    edit_attempts: Cell<usize>,
    next_id: Cell<i64>,
}

impl FakeChat {
    pub fn failing_edits(attempts: &[usize]) -> Self {
        Self {
            fail_edits: attempts.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.sent
            .borrow()
            .iter()
            .filter_map(|s| match s {
                Sent::Message { text, .. } => Some(text.clone()),
                Sent::Edit { .. } => None,
            })
            .collect()
    }

    pub fn edits(&self) -> Vec<String> {
        self.sent
            .borrow()
            .iter()
            .filter_map(|s| match s {
                Sent::Edit { text, .. } => Some(text.clone()),
                Sent::Message { .. } => None,
            })
            .collect()
    }

    pub fn last_message(&self) -> String {
        self.messages().last().cloned().unwrap_or_default()
    }
}

impl ChatTransport for FakeChat {
    fn send_message(&self, chat_id: i64, text: &str) -> Result<i64> {
        self.next_id.set(self.next_id.get() + 1);
        self.sent.borrow_mut().push(Sent::Message {
            chat_id,
            text: text.to_string(),
        });
        Ok(self.next_id.get())
    }

    fn edit_message(&self, _chat_id: i64, message_id: i64, text: &str) -> Result<()> {
        self.edit_attempts.set(self.edit_attempts.get() + 1);
        if self.fail_edits.contains(&self.edit_attempts.get()) {
            bail!("Bad Request: message to edit not found");
        }
        self.sent.borrow_mut().push(Sent::Edit {
            message_id,
            text: text.to_string(),
        });
        Ok(())
    }
}

/// Returns a fixed registrar; fails for domains listed in `offline`.
#[derive(Default)]
pub struct FakeLookup {
    pub calls: RefCell<Vec<String>>,
    pub offline: Vec<String>,
}

impl DomainLookup for FakeLookup {
    fn lookup(&self, domain: &str) -> Result<DomainInfo> {
        self.calls.borrow_mut().push(domain.to_string());
        if self.offline.iter().any(|d| d == domain) {
            bail!("RDAP lookup: HTTP 404 - Not Found");
        }
        Ok(DomainInfo {
            registrar: Some("Example Registrar, Inc.".into()),
            status: vec!["active".into()],
            registered: Some("2001-02-03".into()),
            expires: Some("2030-02-03".into()),
            nameservers: vec!["ns1.example.net".into()],
        })
    }
}

/// Answers by host prefix: `down.` → down, `auth.` → auth required,
/// `timeout.` → transport error, anything else → up.
#[derive(Default)]
pub struct FakeService {
    pub calls: RefCell<Vec<(String, String)>>,
}

impl CheckService for FakeService {
    fn submit(&self, target: &str, token: &str) -> Result<String> {
        self.calls
            .borrow_mut()
            .push((target.to_string(), token.to_string()));
        if token == "expired" {
            return Ok(r#"<div class="error">Token expired</div>"#.to_string());
        }
        if target.starts_with("timeout.") {
            bail!("Check request failed: operation timed out");
        }
        if target.starts_with("down.") {
            return Ok(r#"<div class="result down"><span class="message">HTTP 503</span></div>"#.to_string());
        }
        if target.starts_with("auth.") {
            return Ok("<p>Authentication required</p><small>Monitor removed</small>".to_string());
        }
        Ok(r#"<div class="result up"><span class="message">200 OK in 42 ms</span></div>"#.to_string())
    }
}

#[derive(Default)]
pub struct CountingPacer {
    pub pauses: RefCell<Vec<Duration>>,
}

impl Pacer for CountingPacer {
    fn pause(&self, duration: Duration) {
        self.pauses.borrow_mut().push(duration);
    }
}

/// All collaborators of a bot under test, owning a temp data directory.
pub struct Harness {
    pub _temp: TempDir,
    pub chat: FakeChat,
    pub users: FileUserDirectory,
    pub credentials: FileCredentialStore,
    pub lookup: FakeLookup,
    pub service: FakeService,
    pub pacer: CountingPacer,
    pub admin_ids: Vec<i64>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_chat(FakeChat::default())
    }

    pub fn with_chat(chat: FakeChat) -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let users = FileUserDirectory::new(temp.path());
        let credentials = FileCredentialStore::new(temp.path());
        Self {
            _temp: temp,
            chat,
            users,
            credentials,
            lookup: FakeLookup::default(),
            service: FakeService::default(),
            pacer: CountingPacer::default(),
            admin_ids: vec![ADMIN_ID],
        }
    }

    pub fn bot(&self) -> Bot<'_> {
        Bot {
            transport: &self.chat,
            users: &self.users,
            credentials: &self.credentials,
            lookup: &self.lookup,
            service: &self.service,
            pacer: &self.pacer,
            admin_ids: &self.admin_ids,
            edit_pace: Duration::from_secs(2),
        }
    }

    /// Deliver a text message from `user_id` in their private chat.
    pub fn send(&self, user_id: i64, text: &str) {
        self.bot().handle_message(&message(user_id, text));
    }

    pub fn premium_user(&self, user_id: i64, token: &str) {
        self.users.register(user_id, None).unwrap();
        self.users
            .modify(user_id, &|u: &mut UserRecord| u.plan = Plan::Premium)
            .unwrap();
        self.credentials.save(user_id, token).unwrap();
    }
}

pub fn message(user_id: i64, text: &str) -> Message {
    Message {
        message_id: 1,
        chat: Chat { id: user_id },
        from: Some(User {
            id: user_id,
            username: Some(format!("user{user_id}")),
        }),
        text: Some(text.to_string()),
    }
}
