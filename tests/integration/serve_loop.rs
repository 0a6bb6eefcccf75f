//! Update loop behaviour with a scripted update source.

use anyhow::Result;
use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};

use linkcheck::bot::{serve, UpdateSource};
use linkcheck::telegram::types::Update;

use super::helpers::{message, Harness, ADMIN_ID};

/// Hands out one scripted batch per poll and raises `shutdown` once drained.
struct ScriptedSource<'a> {
    batches: RefCell<Vec<Vec<Update>>>,
    offsets: RefCell<Vec<i64>>,
    shutdown: &'a AtomicBool,
}

impl UpdateSource for ScriptedSource<'_> {
    fn poll(&self, offset: i64) -> Result<Vec<Update>> {
        self.offsets.borrow_mut().push(offset);
        let mut batches = self.batches.borrow_mut();
        if batches.is_empty() {
            self.shutdown.store(true, Ordering::SeqCst);
            return Ok(Vec::new());
        }
        Ok(batches.remove(0))
    }
}

fn update(update_id: i64, text: Option<&str>) -> Update {
    Update {
        update_id,
        message: text.map(|t| message(ADMIN_ID, t)),
    }
}

#[test]
fn test_offsets_advance_and_messages_are_handled() {
    let h = Harness::new();
    let shutdown = AtomicBool::new(false);
    let source = ScriptedSource {
        batches: RefCell::new(vec![
            vec![update(10, Some("/help")), update(11, None)],
            vec![update(12, Some("/token abc"))],
        ]),
        offsets: RefCell::new(Vec::new()),
        shutdown: &shutdown,
    };

    let next = serve(&h.bot(), &source, &shutdown, 0);

    assert_eq!(next, 13);
    assert_eq!(*source.offsets.borrow(), vec![0, 12, 13]);
    assert_eq!(h.chat.messages().len(), 2);
    assert!(h.chat.last_message().contains("Token saved"));
}

#[test]
fn test_preset_shutdown_skips_polling() {
    let h = Harness::new();
    let shutdown = AtomicBool::new(true);
    let source = ScriptedSource {
        batches: RefCell::new(vec![vec![update(1, Some("/help"))]]),
        offsets: RefCell::new(Vec::new()),
        shutdown: &shutdown,
    };

    assert_eq!(serve(&h.bot(), &source, &shutdown, 7), 7);
    assert!(source.offsets.borrow().is_empty());
    assert!(h.chat.messages().is_empty());
}
