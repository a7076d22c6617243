//! Clipboard integration utilities.

use std::io::{Read, Write};
use std::process::{Command, Stdio};

use anyhow::{Context, Result, anyhow};
use parking_lot::Mutex;
use tracing::debug;

/// Text access to the system clipboard.
///
/// Implementations degrade rather than fail: a host without any clipboard
/// mechanism reads as empty and swallows writes, which is what lets the
/// squash loop run as a harmless no-op there.
pub trait ClipboardPort: Send + Sync {
    /// Current clipboard text, empty when unavailable.
    fn get_text(&self) -> String;
    /// Replace the clipboard text.
    fn set_text(&self, text: &str) -> Result<()>;
    /// Discard the clipboard text.
    fn clear(&self) {
        let _ = self.set_text("");
    }
}

/// Cross-platform clipboard backed by `arboard`, with shell-utility fallbacks
/// for headless environments.
pub struct SystemClipboard {
    primary: Mutex<Option<arboard::Clipboard>>,
}

impl SystemClipboard {
    /// Attempt to initialize the system clipboard. When unavailable we fall
    /// back to platform clipboard executables.
    pub fn new() -> Self {
        let primary = arboard::Clipboard::new().ok();
        if primary.is_none() {
            debug!("arboard unavailable, relying on clipboard executables");
        }
        Self {
            primary: Mutex::new(primary),
        }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardPort for SystemClipboard {
    fn get_text(&self) -> String {
        {
            let mut primary = self.primary.lock();
            if let Some(clipboard) = primary.as_mut()
                && let Ok(text) = clipboard.get_text()
            {
                return text.trim().to_owned();
            }
        }

        fallback_paste().unwrap_or_default()
    }

    fn set_text(&self, text: &str) -> Result<()> {
        {
            let mut primary = self.primary.lock();
            if let Some(clipboard) = primary.as_mut()
                && clipboard.set_text(text.to_owned()).is_ok()
            {
                return Ok(());
            }
            // Backend is broken; stop retrying it for this process.
            *primary = None;
        }

        fallback_copy(text)
    }
}

fn fallback_copy(text: &str) -> Result<()> {
    for command in copy_commands() {
        if try_command_copy(command, text).is_ok() {
            return Ok(());
        }
    }

    Err(anyhow!(
        "failed to copy text to clipboard using available backends"
    ))
}

fn fallback_paste() -> Option<String> {
    for command in paste_commands() {
        if let Ok(text) = try_command_paste(command) {
            return Some(text.trim().to_owned());
        }
    }
    None
}

fn try_command_copy(command: &[&str], text: &str) -> Result<()> {
    let (program, args) = command
        .split_first()
        .context("clipboard command missing program")?;

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to spawn clipboard command: {program}"))?;

    if let Some(stdin) = child.stdin.as_mut() {
        stdin
            .write_all(text.as_bytes())
            .context("failed to write clipboard contents")?;
    }

    let status = child
        .wait()
        .with_context(|| format!("clipboard command did not exit cleanly: {program}"))?;
    if status.success() {
        Ok(())
    } else {
        Err(anyhow!("clipboard command exited with status {status}"))
    }
}

fn try_command_paste(command: &[&str]) -> Result<String> {
    let (program, args) = command
        .split_first()
        .context("clipboard command missing program")?;

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to spawn clipboard command: {program}"))?;

    let mut output = String::new();
    if let Some(stdout) = child.stdout.as_mut() {
        stdout
            .read_to_string(&mut output)
            .context("failed to read clipboard contents")?;
    }

    let status = child
        .wait()
        .with_context(|| format!("clipboard command did not exit cleanly: {program}"))?;
    if status.success() {
        Ok(output)
    } else {
        Err(anyhow!("clipboard command exited with status {status}"))
    }
}

#[cfg(target_os = "macos")]
fn copy_commands() -> Vec<&'static [&'static str]> {
    vec![&["pbcopy"]]
}

#[cfg(target_os = "macos")]
fn paste_commands() -> Vec<&'static [&'static str]> {
    vec![&["pbpaste"]]
}

#[cfg(all(unix, not(target_os = "macos")))]
fn copy_commands() -> Vec<&'static [&'static str]> {
    vec![&["wl-copy"], &["xclip", "-selection", "clipboard"]]
}

#[cfg(all(unix, not(target_os = "macos")))]
fn paste_commands() -> Vec<&'static [&'static str]> {
    vec![
        &["wl-paste", "--no-newline"],
        &["xclip", "-selection", "clipboard", "-o"],
    ]
}

#[cfg(target_os = "windows")]
fn copy_commands() -> Vec<&'static [&'static str]> {
    vec![&["powershell.exe", "-NoProfile", "-Command", "Set-Clipboard"]]
}

#[cfg(target_os = "windows")]
fn paste_commands() -> Vec<&'static [&'static str]> {
    vec![&["powershell.exe", "-NoProfile", "-Command", "Get-Clipboard"]]
}

#[cfg(not(any(unix, target_os = "windows")))]
fn copy_commands() -> Vec<&'static [&'static str]> {
    Vec::new()
}

#[cfg(not(any(unix, target_os = "windows")))]
fn paste_commands() -> Vec<&'static [&'static str]> {
    Vec::new()
}
