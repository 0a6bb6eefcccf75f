//! Access gate and admin commands through the bot handler.

use linkcheck::fs::{Plan, UserDirectory};

use super::helpers::{Harness, ADMIN_ID, USER_ID};

#[test]
fn test_unregistered_user_is_told_to_register() {
    let h = Harness::new();
    h.send(USER_ID, "/check example.com|443|/|200");

    assert!(h.chat.last_message().contains("/register"));
    assert!(h.service.calls.borrow().is_empty());
}

#[test]
fn test_free_plan_is_restricted() {
    let h = Harness::new();
    h.send(USER_ID, "/register");
    assert!(h.chat.last_message().contains("free plan"));
    h.send(USER_ID, "/token tok");

    h.send(USER_ID, "/check example.com|443|/|200");

    assert!(h.chat.last_message().contains("premium plan"));
    assert!(h.service.calls.borrow().is_empty());
}

#[test]
fn test_premium_without_token_is_missing_credential() {
    let h = Harness::new();
    h.send(USER_ID, "/register");
    h.send(ADMIN_ID, &format!("/plan {USER_ID} premium"));

    h.send(USER_ID, "/check example.com|443|/|200");

    // Reply text is HTML-escaped for Telegram.
    assert!(h.chat.last_message().contains("/token &lt;your-token&gt;"));
    assert!(h.service.calls.borrow().is_empty());
}

#[test]
fn test_admin_bypasses_registration_and_plan() {
    let h = Harness::new();
    h.send(ADMIN_ID, "/token admin-tok");
    h.send(ADMIN_ID, "/check example.com|443|/|200");

    assert_eq!(h.service.calls.borrow().len(), 1);
}

#[test]
fn test_banned_user_is_rejected_everywhere() {
    let h = Harness::new();
    h.premium_user(USER_ID, "tok");
    h.send(ADMIN_ID, &format!("/ban {USER_ID}"));
    assert!(h.chat.last_message().contains("banned"));

    h.send(USER_ID, "/check example.com|443|/|200");
    assert!(h.chat.last_message().contains("You are banned"));
    h.send(USER_ID, "/token new");
    assert!(h.chat.last_message().contains("You are banned"));
    assert!(h.service.calls.borrow().is_empty());

    h.send(ADMIN_ID, &format!("/unban {USER_ID}"));
    h.send(USER_ID, "/check example.com|443|/|200");
    assert_eq!(h.service.calls.borrow().len(), 1);
}

#[test]
fn test_admin_commands_require_admin() {
    let h = Harness::new();
    h.premium_user(USER_ID, "tok");

    h.send(USER_ID, &format!("/ban {ADMIN_ID}"));

    assert!(h.chat.last_message().contains("restricted to administrators"));
}

#[test]
fn test_plan_command_updates_user() {
    let h = Harness::new();
    h.send(USER_ID, "/register");

    h.send(ADMIN_ID, &format!("/plan {USER_ID} premium"));

    assert_eq!(h.users.get(USER_ID).unwrap().unwrap().plan, Plan::Premium);
    assert!(h.chat.last_message().contains("premium plan"));
}

#[test]
fn test_admin_command_argument_errors() {
    let h = Harness::new();
    h.send(ADMIN_ID, "/ban abc");
    assert!(h.chat.last_message().contains("Invalid user id"));

    h.send(ADMIN_ID, "/ban 999");
    assert!(h.chat.last_message().contains("User 999 not found"));

    h.send(USER_ID, "/register");
    h.send(ADMIN_ID, &format!("/plan {USER_ID} gold"));
    assert!(h.chat.last_message().contains("Invalid plan"));
}

#[test]
fn test_register_twice_reports_existing_plan() {
    let h = Harness::new();
    h.send(USER_ID, "/register");
    h.send(USER_ID, "/register");
    assert!(h.chat.last_message().contains("Already registered (plan: free)"));
}

#[test]
fn test_help_and_plain_text() {
    let h = Harness::new();
    h.send(USER_ID, "hello there");
    assert!(h.chat.messages().is_empty());

    h.send(USER_ID, "/help");
    assert!(h.chat.last_message().contains("host|port|/path|expected_status"));
}
