//! End-to-end composition flows exercised through the library API.

use std::fs;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use parking_lot::Mutex;
use tempfile::TempDir;

use promptstack::app::composition::CompositionStore;
use promptstack::app::preset::PresetRepository;
use promptstack::app::render::render;
use promptstack::app::squash::SquashEngine;
use promptstack::domain::model::CompositionItem;
use promptstack::infra::clipboard::ClipboardPort;

/// In-memory clipboard: a single slot plus a queue of pending "user copies".
#[derive(Default)]
struct MemoryClipboard {
    slot: Mutex<String>,
    pending: Mutex<Vec<String>>,
}

impl MemoryClipboard {
    fn push_copy(&self, text: &str) {
        self.pending.lock().push(text.to_owned());
    }

    fn slot(&self) -> String {
        self.slot.lock().clone()
    }
}

impl ClipboardPort for MemoryClipboard {
    fn get_text(&self) -> String {
        let mut pending = self.pending.lock();
        if !pending.is_empty() {
            let next = pending.remove(0);
            *self.slot.lock() = next.clone();
            return next;
        }
        self.slot.lock().clone()
    }

    fn set_text(&self, text: &str) -> Result<()> {
        *self.slot.lock() = text.to_owned();
        Ok(())
    }
}

fn wait_until(mut done: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !done() && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn file_then_placeholder_renders_with_live_clipboard() {
    let temp = TempDir::new().unwrap();
    let notes = temp.path().join("notes.md");
    fs::write(&notes, "hello").unwrap();

    let mut store = CompositionStore::new();
    store.add(CompositionItem::File(notes)).unwrap();
    store.add(CompositionItem::Clipboard).unwrap();

    let rendered = render(store.items(), "world");
    insta::assert_snapshot!(rendered.text, @"hello\n\nworld");
}

#[test]
fn preset_round_trip_survives_a_new_repository_instance() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("daily.md");
    fs::write(&file, "daily").unwrap();

    let items = vec![CompositionItem::File(file), CompositionItem::Clipboard];
    {
        let repo = PresetRepository::new(temp.path().join(".config"), temp.path());
        repo.save("daily", &items).unwrap();
    }

    // Fresh instance, as after a process restart.
    let repo = PresetRepository::new(temp.path().join(".config"), temp.path());
    assert_eq!(repo.load("daily").unwrap(), items);

    let summaries = repo.list().unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].name, "daily");
    assert_eq!(summaries[0].item_count, 2);
}

#[test]
fn render_uses_the_live_clipboard_not_the_squash_buffer() {
    let temp = TempDir::new().unwrap();
    let intro = temp.path().join("intro.md");
    fs::write(&intro, "intro").unwrap();

    let clipboard = Arc::new(MemoryClipboard::default());
    let mut engine = SquashEngine::new(clipboard.clone(), Duration::from_millis(2), None);

    engine.start();
    clipboard.push_copy("first");
    clipboard.push_copy("second");
    wait_until(|| engine.captured_count() == 2);
    engine.stop();

    // The preview surface would show the squashed pair...
    assert_eq!(engine.current_content(), "first\n---\nsecond");

    // ...but the final render pulls whatever is live in the clipboard now.
    clipboard.set_text("live value").unwrap();
    let mut store = CompositionStore::new();
    store.add(CompositionItem::File(intro)).unwrap();
    store.add(CompositionItem::Clipboard).unwrap();

    let rendered = render(store.items(), &clipboard.get_text());
    assert_eq!(rendered.text, "intro\n\nlive value");
}

#[test]
fn squash_then_copy_round_trip_through_the_clipboard() {
    let clipboard = Arc::new(MemoryClipboard::default());
    let mut engine = SquashEngine::new(clipboard.clone(), Duration::from_millis(2), None);

    engine.start();
    for snippet in ["alpha", "beta", "alpha"] {
        clipboard.push_copy(snippet);
    }
    wait_until(|| engine.captured_count() == 2);
    engine.stop();

    clipboard.set_text(&engine.current_content()).unwrap();
    assert_eq!(clipboard.slot(), "alpha\n---\nbeta");
}
