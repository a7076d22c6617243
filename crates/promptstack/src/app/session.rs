//! Session-scoped state: the scratch directory and the remembered last action.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;
use tracing::debug;

const LAST_ACTION_FILE: &str = ".last_action";
const SQUASH_SCRATCH_FILE: &str = "clipboard_content.txt";

/// The most recently confirmed menu command, driving ENTER defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LastAction {
    NewComposition,
    LoadPreset,
    LoadPresetSquash,
    CopyPreset,
    ListPresets,
    #[default]
    Copy,
    SavePreset,
    SaveAndCopy,
}

impl LastAction {
    /// Token persisted to disk and typed at the menu prompt.
    pub fn token(self) -> &'static str {
        match self {
            LastAction::NewComposition => "n",
            LastAction::LoadPreset => "cd",
            LastAction::LoadPresetSquash => "cds",
            LastAction::CopyPreset => "cp",
            LastAction::ListPresets => "ls",
            LastAction::Copy => "c",
            LastAction::SavePreset => "s",
            LastAction::SaveAndCopy => "x",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "n" => Some(LastAction::NewComposition),
            "cd" => Some(LastAction::LoadPreset),
            "cds" => Some(LastAction::LoadPresetSquash),
            "cp" => Some(LastAction::CopyPreset),
            "ls" => Some(LastAction::ListPresets),
            "c" => Some(LastAction::Copy),
            "s" => Some(LastAction::SavePreset),
            "x" => Some(LastAction::SaveAndCopy),
            _ => None,
        }
    }
}

/// Per-process session lifecycle.
///
/// Owns the scratch directory used for the squash crash-aid file; the
/// directory is removed on drop, on every exit path. Also loads and persists
/// the last confirmed action so it can be threaded explicitly through the
/// control loop instead of living in a global.
#[derive(Debug)]
pub struct Session {
    scratch: TempDir,
    last_action_path: PathBuf,
    last_action: LastAction,
}

impl Session {
    /// Open a session, creating `state_dir` if needed and reading the
    /// persisted last action (falling back to the default token).
    pub fn open(state_dir: &Path) -> Result<Self> {
        fs::create_dir_all(state_dir)
            .with_context(|| format!("failed to create state directory {}", state_dir.display()))?;

        let scratch = tempfile::Builder::new()
            .prefix("promptstack-")
            .tempdir()
            .context("failed to create session scratch directory")?;

        let last_action_path = state_dir.join(LAST_ACTION_FILE);
        let last_action = fs::read_to_string(&last_action_path)
            .ok()
            .and_then(|token| LastAction::parse(token.trim()))
            .unwrap_or_default();
        debug!(token = last_action.token(), "session opened");

        Ok(Self {
            scratch,
            last_action_path,
            last_action,
        })
    }

    pub fn last_action(&self) -> LastAction {
        self.last_action
    }

    /// Record a confirmed action, overwriting the persisted token.
    pub fn record_action(&mut self, action: LastAction) -> Result<()> {
        self.last_action = action;
        fs::write(&self.last_action_path, action.token()).with_context(|| {
            format!(
                "failed to persist last action to {}",
                self.last_action_path.display()
            )
        })
    }

    /// Location of the squash crash-aid file inside the scratch directory.
    pub fn squash_scratch_file(&self) -> PathBuf {
        self.scratch.path().join(SQUASH_SCRATCH_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn defaults_to_copy_when_no_token_is_persisted() {
        let state = TempDir::new().unwrap();
        let session = Session::open(state.path()).unwrap();
        assert_eq!(session.last_action(), LastAction::Copy);
    }

    #[test]
    fn recorded_action_survives_reopening() {
        let state = TempDir::new().unwrap();
        {
            let mut session = Session::open(state.path()).unwrap();
            session.record_action(LastAction::LoadPresetSquash).unwrap();
        }
        let session = Session::open(state.path()).unwrap();
        assert_eq!(session.last_action(), LastAction::LoadPresetSquash);
    }

    #[test]
    fn garbage_token_falls_back_to_the_default() {
        let state = TempDir::new().unwrap();
        fs::write(state.path().join(LAST_ACTION_FILE), "bogus").unwrap();
        let session = Session::open(state.path()).unwrap();
        assert_eq!(session.last_action(), LastAction::Copy);
    }

    #[test]
    fn scratch_directory_is_removed_when_the_session_ends() {
        let state = TempDir::new().unwrap();
        let scratch_file;
        {
            let session = Session::open(state.path()).unwrap();
            scratch_file = session.squash_scratch_file();
            fs::write(&scratch_file, "partial").unwrap();
        }
        assert!(!scratch_file.exists());
    }

    #[test]
    fn tokens_round_trip() {
        for action in [
            LastAction::NewComposition,
            LastAction::LoadPreset,
            LastAction::LoadPresetSquash,
            LastAction::CopyPreset,
            LastAction::ListPresets,
            LastAction::Copy,
            LastAction::SavePreset,
            LastAction::SaveAndCopy,
        ] {
            assert_eq!(LastAction::parse(action.token()), Some(action));
        }
    }
}
