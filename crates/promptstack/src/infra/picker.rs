//! External fuzzy selection via `fzf`.

use std::env;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::debug;

use crate::app::scan::PromptFile;

const FZF_PROGRAM: &str = "fzf";
const WAIT_POLL: Duration = Duration::from_millis(50);

/// Outcome of asking the user to pick something. Declining (ESC, timeout, or
/// an empty candidate list) is a valid result, never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    Chosen(T),
    Cancelled,
}

/// Whether `fzf` can be found on the PATH.
pub fn fzf_available() -> bool {
    let Some(paths) = env::var_os("PATH") else {
        return false;
    };
    env::split_paths(&paths).any(|dir| {
        let candidate = dir.join(FZF_PROGRAM);
        candidate.is_file() || dir.join(format!("{FZF_PROGRAM}.exe")).is_file()
    })
}

/// Runs `fzf` over candidate lists with a bounded wait.
#[derive(Debug, Clone)]
pub struct FuzzyPicker {
    timeout: Duration,
}

impl FuzzyPicker {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Pick one prompt file. Rows show the display path, with a short content
    /// preview, while the selection resolves to the full path.
    pub fn pick_file(&self, files: &[PromptFile]) -> Result<Selection<PathBuf>> {
        if files.is_empty() {
            return Ok(Selection::Cancelled);
        }

        let input: String = files
            .iter()
            .map(|file| format!("{}\t{}\n", file.display_path, file.path.display()))
            .collect();
        let args = [
            "--delimiter=\t",
            "--with-nth=1",
            "--preview",
            "head -20 {2}",
        ];

        match self.run_fzf(&args, &input)? {
            Some(line) => Ok(match line.split('\t').nth(1) {
                Some(path) => Selection::Chosen(PathBuf::from(path)),
                None => Selection::Cancelled,
            }),
            None => Ok(Selection::Cancelled),
        }
    }

    /// Pick one name from a plain list, e.g. a preset name.
    pub fn pick_name(&self, names: &[String]) -> Result<Selection<String>> {
        if names.is_empty() {
            return Ok(Selection::Cancelled);
        }

        let input: String = names.iter().map(|name| format!("{name}\n")).collect();
        match self.run_fzf(&[], &input)? {
            Some(line) => Ok(Selection::Chosen(line)),
            None => Ok(Selection::Cancelled),
        }
    }

    /// Run fzf with the candidate rows on stdin, waiting at most the
    /// configured timeout. Expiry, non-zero exit, and empty output all map to
    /// `None`.
    fn run_fzf(&self, args: &[&str], input: &str) -> Result<Option<String>> {
        let mut child = Command::new(FZF_PROGRAM)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .context("failed to launch fzf")?;

        if let Some(mut stdin) = child.stdin.take() {
            // fzf exits early when the user picks before the list is fully
            // written; a failed write is not an error then.
            let _ = stdin.write_all(input.as_bytes());
        }

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            if let Some(status) = child.try_wait().context("failed to wait for fzf")? {
                break status;
            }
            if Instant::now() >= deadline {
                debug!("fzf selection timed out, treating as cancelled");
                let _ = child.kill();
                let _ = child.wait();
                return Ok(None);
            }
            thread::sleep(WAIT_POLL);
        };

        if !status.success() {
            return Ok(None);
        }

        let mut output = String::new();
        if let Some(mut stdout) = child.stdout.take() {
            stdout
                .read_to_string(&mut output)
                .context("failed to read fzf selection")?;
        }

        let line = output.lines().next().unwrap_or("").trim().to_owned();
        if line.is_empty() {
            Ok(None)
        } else {
            Ok(Some(line))
        }
    }
}
