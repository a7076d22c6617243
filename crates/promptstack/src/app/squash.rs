//! Clipboard squashing: a background loop draining distinct copy events.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::infra::clipboard::ClipboardPort;

/// Separator between captured snippets in the joined buffer.
pub const SQUASH_SEPARATOR: &str = "\n---\n";

const STOP_TIMEOUT: Duration = Duration::from_secs(1);
const STOP_POLL: Duration = Duration::from_millis(10);

/// Continuously samples the clipboard while active, capturing every distinct
/// non-empty value exactly once in first-seen order.
///
/// Each capture clears the clipboard again, so a sequence of external copy
/// operations lands in the buffer without the user doing anything in between
/// and without a lingering value being captured twice.
pub struct SquashEngine {
    clipboard: Arc<dyn ClipboardPort>,
    buffer: Arc<Mutex<Vec<String>>>,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
    poll_interval: Duration,
    scratch_file: Option<PathBuf>,
}

impl SquashEngine {
    /// Create an engine over the given clipboard. `scratch_file`, when set,
    /// receives the joined buffer after every capture as a crash-recovery aid.
    pub fn new(
        clipboard: Arc<dyn ClipboardPort>,
        poll_interval: Duration,
        scratch_file: Option<PathBuf>,
    ) -> Self {
        Self {
            clipboard,
            buffer: Arc::new(Mutex::new(Vec::new())),
            running: Arc::new(AtomicBool::new(false)),
            worker: None,
            poll_interval,
            scratch_file,
        }
    }

    /// Begin a squash session. Calling while already running is a no-op and
    /// does not disturb the accumulating buffer.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }

        self.buffer.lock().clear();
        // Discard whatever was left in the clipboard before the session.
        self.clipboard.clear();
        self.running.store(true, Ordering::SeqCst);

        let clipboard = Arc::clone(&self.clipboard);
        let buffer = Arc::clone(&self.buffer);
        let running = Arc::clone(&self.running);
        let interval = self.poll_interval;
        let scratch = self.scratch_file.clone();

        self.worker = Some(thread::spawn(move || {
            poll_loop(clipboard, buffer, running, interval, scratch);
        }));
        debug!("clipboard squashing started");
    }

    /// End the squash session, waiting (bounded) for the in-flight poll
    /// iteration to finish so a capture cannot race with later buffer reads.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);

        let Some(worker) = self.worker.take() else {
            return;
        };

        let deadline = Instant::now() + STOP_TIMEOUT;
        while !worker.is_finished() && Instant::now() < deadline {
            thread::sleep(STOP_POLL);
        }

        if worker.is_finished() {
            let _ = worker.join();
            debug!("clipboard squashing stopped");
        } else {
            // Detach rather than hang teardown on a stuck clipboard read.
            warn!("squash worker did not exit within {STOP_TIMEOUT:?}, detaching");
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Captured snippets joined in capture order. Reads a consistent snapshot
    /// and is safe to call while the loop is running.
    pub fn current_content(&self) -> String {
        self.buffer.lock().join(SQUASH_SEPARATOR)
    }

    /// Number of captured snippets so far.
    pub fn captured_count(&self) -> usize {
        self.buffer.lock().len()
    }
}

impl Drop for SquashEngine {
    fn drop(&mut self) {
        self.stop();
    }
}

fn poll_loop(
    clipboard: Arc<dyn ClipboardPort>,
    buffer: Arc<Mutex<Vec<String>>>,
    running: Arc<AtomicBool>,
    interval: Duration,
    scratch: Option<PathBuf>,
) {
    let mut last_seen = String::new();

    while running.load(Ordering::SeqCst) {
        let current = clipboard.get_text();

        if !current.is_empty() && current != last_seen {
            let appended = {
                let mut guard = buffer.lock();
                if guard.iter().any(|existing| *existing == current) {
                    None
                } else {
                    guard.push(current.clone());
                    Some((guard.len(), guard.join(SQUASH_SEPARATOR)))
                }
            };

            if let Some((count, joined)) = appended {
                if let Some(path) = &scratch
                    && let Err(err) = fs::write(path, &joined)
                {
                    debug!(error = %err, "failed to persist squash scratch file");
                }
                clipboard.clear();
                debug!(items = count, "squashed clipboard content");
            }
        }

        last_seen = current;
        thread::sleep(interval);
    }
}
