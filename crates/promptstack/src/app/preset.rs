//! Durable named presets for composition reference lists.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::errors::PresetError;
use crate::domain::model::{CLIPBOARD_TOKEN, CompositionItem, PresetSummary};

const PRESET_EXTENSION: &str = "preset";

/// Strip every character outside `[A-Za-z0-9_-]` from a preset name.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// Stores presets as one plain-text record per name, one item token per line.
///
/// Saving silently overwrites an existing record of the same name; loading
/// silently drops file entries that no longer resolve to an existing file.
#[derive(Debug, Clone)]
pub struct PresetRepository {
    dir: PathBuf,
    prompts_root: PathBuf,
}

impl PresetRepository {
    /// Create a repository storing records under `dir`, resolving relative
    /// record paths against `prompts_root`.
    pub fn new(dir: impl Into<PathBuf>, prompts_root: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prompts_root: prompts_root.into(),
        }
    }

    /// Persist `items` under the sanitized `name`, returning the name actually
    /// used. Last write wins on duplicate names.
    pub fn save(&self, name: &str, items: &[CompositionItem]) -> Result<String, PresetError> {
        let sanitized = sanitize_name(name);
        if sanitized.is_empty() {
            return Err(PresetError::InvalidName);
        }

        fs::create_dir_all(&self.dir)?;

        let mut record = String::new();
        for item in items {
            record.push_str(&item.record_token());
            record.push('\n');
        }
        fs::write(self.record_path(&sanitized), record)?;
        Ok(sanitized)
    }

    /// Load the record for `name`. Blank lines are skipped and file entries
    /// whose path no longer exists are dropped without error, so the returned
    /// sequence may be shorter than the stored record.
    pub fn load(&self, name: &str) -> Result<Vec<CompositionItem>, PresetError> {
        let path = self.record_path(name);
        if !path.exists() {
            return Err(PresetError::NotFound(name.to_owned()));
        }

        let record = fs::read_to_string(&path)?;
        let mut items = Vec::new();
        for line in record.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line == CLIPBOARD_TOKEN {
                items.push(CompositionItem::Clipboard);
                continue;
            }
            match self.resolve_path(line) {
                Some(resolved) => items.push(CompositionItem::File(resolved)),
                None => debug!(preset = name, entry = line, "dropping unresolvable entry"),
            }
        }
        Ok(items)
    }

    /// Summaries of all stored presets, sorted by name. Item counts reflect
    /// what `load` would return today, not the raw record length.
    pub fn list(&self) -> Result<Vec<PresetSummary>, PresetError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut summaries = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(PRESET_EXTENSION) {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let item_count = self.load(name)?.len();
            summaries.push(PresetSummary {
                name: name.to_owned(),
                item_count,
            });
        }
        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(summaries)
    }

    /// Remove the record for `name`.
    pub fn delete(&self, name: &str) -> Result<(), PresetError> {
        let path = self.record_path(name);
        if !path.exists() {
            return Err(PresetError::NotFound(name.to_owned()));
        }
        fs::remove_file(path)?;
        Ok(())
    }

    /// Whether a record for `name` exists.
    pub fn exists(&self, name: &str) -> bool {
        self.record_path(name).exists()
    }

    fn record_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{PRESET_EXTENSION}"))
    }

    fn resolve_path(&self, entry: &str) -> Option<PathBuf> {
        let direct = Path::new(entry);
        if direct.exists() {
            return Some(direct.to_path_buf());
        }
        let relative = self.prompts_root.join(entry);
        relative.exists().then_some(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn repo(temp: &TempDir) -> PresetRepository {
        PresetRepository::new(temp.path().join(".config"), temp.path())
    }

    #[test]
    fn sanitize_keeps_only_identifier_characters() {
        assert_eq!(sanitize_name("my preset!"), "mypreset");
        assert_eq!(sanitize_name("a_b-c.9"), "a_b-c9");
        assert_eq!(sanitize_name("!!!"), "");
    }

    #[test]
    fn save_rejects_names_that_sanitize_to_nothing() {
        let temp = TempDir::new().unwrap();
        let err = repo(&temp).save("...", &[]).unwrap_err();
        assert!(matches!(err, PresetError::InvalidName));
    }

    #[test]
    fn round_trip_preserves_items_and_order() {
        let temp = TempDir::new().unwrap();
        let repo = repo(&temp);

        let first = temp.path().join("one.md");
        let second = temp.path().join("two.md");
        fs::write(&first, "one").unwrap();
        fs::write(&second, "two").unwrap();

        let items = vec![
            CompositionItem::File(first),
            CompositionItem::Clipboard,
            CompositionItem::File(second),
        ];
        let name = repo.save("daily", &items).unwrap();
        assert_eq!(name, "daily");

        assert_eq!(repo.load("daily").unwrap(), items);
    }

    #[test]
    fn load_drops_deleted_files_but_keeps_the_rest() {
        let temp = TempDir::new().unwrap();
        let repo = repo(&temp);

        let gone = temp.path().join("q.md");
        fs::write(&gone, "q").unwrap();
        repo.save(
            "x",
            &[CompositionItem::File(gone.clone()), CompositionItem::Clipboard],
        )
        .unwrap();

        fs::remove_file(&gone).unwrap();
        assert_eq!(repo.load("x").unwrap(), vec![CompositionItem::Clipboard]);
    }

    #[test]
    fn load_resolves_entries_relative_to_the_prompts_root() {
        let temp = TempDir::new().unwrap();
        let repo = repo(&temp);

        fs::write(temp.path().join("notes.md"), "n").unwrap();
        fs::create_dir_all(temp.path().join(".config")).unwrap();
        fs::write(temp.path().join(".config/rel.preset"), "notes.md\n").unwrap();

        assert_eq!(
            repo.load("rel").unwrap(),
            vec![CompositionItem::File(temp.path().join("notes.md"))]
        );
    }

    #[test]
    fn load_and_delete_report_missing_presets() {
        let temp = TempDir::new().unwrap();
        let repo = repo(&temp);
        assert!(matches!(
            repo.load("nope"),
            Err(PresetError::NotFound(name)) if name == "nope"
        ));
        assert!(matches!(repo.delete("nope"), Err(PresetError::NotFound(_))));
    }

    #[test]
    fn save_overwrites_existing_record() {
        let temp = TempDir::new().unwrap();
        let repo = repo(&temp);

        repo.save("p", &[CompositionItem::Clipboard]).unwrap();
        let file = temp.path().join("a.md");
        fs::write(&file, "a").unwrap();
        repo.save("p", &[CompositionItem::File(file.clone())]).unwrap();

        assert_eq!(repo.load("p").unwrap(), vec![CompositionItem::File(file)]);
    }

    #[test]
    fn list_reports_resolved_item_counts_sorted_by_name() {
        let temp = TempDir::new().unwrap();
        let repo = repo(&temp);

        let file = temp.path().join("a.md");
        fs::write(&file, "a").unwrap();
        repo.save("beta", &[CompositionItem::Clipboard]).unwrap();
        repo.save(
            "alpha",
            &[CompositionItem::File(file), CompositionItem::Clipboard],
        )
        .unwrap();

        let summaries = repo.list().unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].name, "alpha");
        assert_eq!(summaries[0].item_count, 2);
        assert_eq!(summaries[1].name, "beta");
        assert_eq!(summaries[1].item_count, 1);
    }

    #[test]
    fn delete_removes_the_record() {
        let temp = TempDir::new().unwrap();
        let repo = repo(&temp);
        repo.save("gone", &[CompositionItem::Clipboard]).unwrap();
        repo.delete("gone").unwrap();
        assert!(!repo.exists("gone"));
    }
}
