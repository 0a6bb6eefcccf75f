//! `/check` end to end: extraction, per-target processing, in-place report.

use linkcheck::fs::CredentialStore;
use std::time::Duration;

use super::helpers::{FakeChat, Harness, ADMIN_ID, USER_ID};

#[test]
fn test_single_target_lookup_and_payload() {
    let h = Harness::new();
    h.premium_user(USER_ID, "tok-abc");

    h.send(USER_ID, "/check status.example.com|443|/health|200");

    assert_eq!(*h.lookup.calls.borrow(), vec!["example.com"]);
    assert_eq!(
        *h.service.calls.borrow(),
        vec![(
            "status.example.com|443|/health|200".to_string(),
            "tok-abc".to_string()
        )]
    );

    let messages = h.chat.messages();
    assert_eq!(messages, vec!["⏳ Checking 1 target(s)..."]);
    let edits = h.chat.edits();
    assert_eq!(edits.len(), 1);
    assert!(edits[0].contains("UP ✅"));
    assert!(edits[0].contains("200 OK in 42 ms"));
    assert!(edits[0].contains("Example Registrar, Inc."));
}

#[test]
fn test_report_accumulates_in_order() {
    let h = Harness::new();
    h.premium_user(USER_ID, "tok");

    h.send(
        USER_ID,
        "/check a.example.com|443|/|200\ndown.example.com|443|/|200\nauth.example.org|443|/admin|200",
    );

    let edits = h.chat.edits();
    assert_eq!(edits.len(), 3);
    let last = edits.last().unwrap();
    let a = last.find("a.example.com").unwrap();
    let down = last.find("down.example.com").unwrap();
    let auth = last.find("auth.example.org").unwrap();
    assert!(a < down && down < auth);
    assert!(last.contains("DOWN ❌"));
    assert!(last.contains("AUTH REQUIRED 🔒"));
    assert!(last.contains("<b>Monitor removed:</b> yes"));
    // Every edit extends the previous one.
    assert!(edits[1].starts_with(&edits[0]));
    assert!(edits[2].starts_with(&edits[1]));
}

#[test]
fn test_transport_failure_continues_with_next_target() {
    let h = Harness::new();
    h.premium_user(USER_ID, "tok");

    h.send(
        USER_ID,
        "/check\ntimeout.example.com|443|/|200\nb.example.com|443|/|200",
    );

    assert_eq!(h.service.calls.borrow().len(), 2);
    let last = h.chat.edits().pop().unwrap();
    assert!(last.contains("ERROR ⚠️"));
    assert!(last.contains("operation timed out"));
    assert!(last.contains("b.example.com"));
    assert!(last.contains("UP ✅"));
}

#[test]
fn test_lookup_failure_renders_placeholders() {
    let mut h = Harness::new();
    h.lookup.offline = vec!["example.com".to_string()];
    h.premium_user(USER_ID, "tok");

    h.send(USER_ID, "/check example.com|80|/|200");

    let last = h.chat.edits().pop().unwrap();
    assert!(last.contains("<b>Registrar:</b> unknown"));
    assert!(last.contains("UP ✅"));
}

#[test]
fn test_invalid_token_marker_reported_per_target() {
    let h = Harness::new();
    h.premium_user(USER_ID, "expired");

    h.send(USER_ID, "/check example.com|443|/|200");

    let last = h.chat.edits().pop().unwrap();
    assert!(last.contains("INVALID TOKEN 🔑"));
}

#[test]
fn test_failed_edit_drops_that_report_only() {
    let h = Harness::with_chat(FakeChat::failing_edits(&[2]));
    h.premium_user(USER_ID, "tok");

    h.send(
        USER_ID,
        "/check a.example.com|443|/|200\nb.example.com|443|/|200\nc.example.com|443|/|200",
    );

    assert_eq!(h.service.calls.borrow().len(), 3);
    let edits = h.chat.edits();
    assert_eq!(edits.len(), 2);
    let last = edits.last().unwrap();
    assert!(last.contains("a.example.com"));
    assert!(!last.contains("b.example.com"));
    assert!(last.contains("c.example.com"));
    // Paced after every edit attempt, failed or not.
    assert_eq!(*h.pacer.pauses.borrow(), vec![Duration::from_secs(2); 3]);
}

#[test]
fn test_sixteenth_target_never_processed() {
    let h = Harness::new();
    h.premium_user(USER_ID, "tok");
    let lines: Vec<String> = (0..16)
        .map(|i| format!("h{i}.example.com|443|/|200"))
        .collect();

    h.send(USER_ID, &format!("/check {}", lines.join("\n")));

    let calls = h.service.calls.borrow();
    assert!(calls.len() <= 15);
    assert!(calls.iter().all(|(target, _)| !target.starts_with("h15.")));
}

#[test]
fn test_no_valid_targets_replies_once() {
    let h = Harness::new();
    h.premium_user(USER_ID, "tok");

    h.send(USER_ID, "/check\nhello\nexample.com");

    assert!(h.service.calls.borrow().is_empty());
    assert_eq!(h.chat.messages().len(), 1);
    assert!(h.chat.last_message().contains("No valid targets found"));
    assert!(h.chat.edits().is_empty());
}

#[test]
fn test_token_command_saves_and_is_used() {
    let h = Harness::new();
    h.send(ADMIN_ID, "/token first");
    h.send(ADMIN_ID, "/token second");

    assert_eq!(
        h.credentials.get(ADMIN_ID).unwrap().as_deref(),
        Some("second")
    );
    assert!(h.chat.last_message().contains("Token saved"));

    h.send(ADMIN_ID, "/check example.com|443|/|200");
    assert_eq!(h.service.calls.borrow()[0].1, "second");
}

#[test]
fn test_token_command_rejects_bad_input() {
    let h = Harness::new();
    h.send(ADMIN_ID, "/token");
    assert!(h.chat.last_message().contains("Token cannot be empty"));

    h.send(ADMIN_ID, "/token two words");
    assert!(h.chat.last_message().contains("spaces"));
    assert!(h.credentials.get(ADMIN_ID).unwrap().is_none());
}
