//! Prompt library scanning.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use tracing::warn;

const PROMPT_EXTENSIONS: &[&str] = &["md", "txt", "prompt"];
const CONFIG_DIR_NAME: &str = ".config";

/// A prompt file discovered under the prompts root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptFile {
    pub path: PathBuf,
    /// Path relative to the prompts root, used for picker display.
    pub display_path: String,
}

/// Walks the prompts root collecting prompt files, excluding the preset
/// storage directory and user-configured ignore globs.
#[derive(Debug)]
pub struct PromptScanner {
    root: PathBuf,
    ignore: Option<GlobSet>,
}

impl PromptScanner {
    pub fn new(root: impl Into<PathBuf>, ignore_globs: &[String]) -> Result<Self> {
        let ignore = if ignore_globs.is_empty() {
            None
        } else {
            let mut builder = GlobSetBuilder::new();
            for glob in ignore_globs {
                builder.add(Glob::new(glob).context("invalid ignore glob")?);
            }
            Some(builder.build().context("failed to build ignore globs")?)
        };

        Ok(Self {
            root: root.into(),
            ignore,
        })
    }

    /// All prompt files under the root, sorted by display path.
    pub fn scan(&self) -> Result<Vec<PromptFile>> {
        let root = self.root.clone();
        let walker = WalkBuilder::new(&self.root)
            .git_ignore(false)
            .hidden(true)
            .filter_entry(move |entry| entry.file_name() != CONFIG_DIR_NAME)
            .build();

        let mut files = Vec::new();
        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "scanner error");
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_some_and(|ty| ty.is_file()) || !is_prompt_file(path) {
                continue;
            }
            let rel = path.strip_prefix(&root).unwrap_or(path);
            if self.ignore.as_ref().is_some_and(|set| set.is_match(rel)) {
                continue;
            }
            files.push(PromptFile {
                path: path.to_path_buf(),
                display_path: rel.display().to_string(),
            });
        }

        files.sort_by(|a, b| a.display_path.cmp(&b.display_path));
        Ok(files)
    }
}

fn is_prompt_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| PROMPT_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use tempfile::TempDir;

    #[test]
    fn collects_prompt_extensions_sorted_and_skips_config_dir() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.md"), "").unwrap();
        fs::write(temp.path().join("a.txt"), "").unwrap();
        fs::write(temp.path().join("c.prompt"), "").unwrap();
        fs::write(temp.path().join("skip.rs"), "").unwrap();
        fs::create_dir_all(temp.path().join(".config")).unwrap();
        fs::write(temp.path().join(".config/hidden.md"), "").unwrap();

        let scanner = PromptScanner::new(temp.path(), &[]).unwrap();
        let files = scanner.scan().unwrap();
        let names: Vec<_> = files.iter().map(|f| f.display_path.as_str()).collect();
        assert_eq!(names, ["a.txt", "b.md", "c.prompt"]);
    }

    #[test]
    fn honors_ignore_globs() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("keep.md"), "").unwrap();
        fs::write(temp.path().join("drop.md"), "").unwrap();

        let scanner = PromptScanner::new(temp.path(), &["drop.*".to_owned()]).unwrap();
        let files = scanner.scan().unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].display_path, "keep.md");
    }

    #[test]
    fn invalid_glob_is_an_error() {
        let temp = TempDir::new().unwrap();
        assert!(PromptScanner::new(temp.path(), &["[".to_owned()]).is_err());
    }
}
