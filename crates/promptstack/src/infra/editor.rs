//! External text editor invocation.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};

/// Open `path` in the configured editor and block until the user is done.
///
/// `command` may carry arguments, e.g. `"code --wait"`.
pub fn edit_file(command: &str, path: &Path) -> Result<()> {
    let mut parts = command.split_whitespace();
    let Some(program) = parts.next() else {
        bail!("editor command is empty");
    };

    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .with_context(|| format!("failed to launch editor '{command}'"))?;

    if !status.success() {
        bail!("editor '{command}' exited with status {status}");
    }
    Ok(())
}
