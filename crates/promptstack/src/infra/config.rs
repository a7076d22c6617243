//! Configuration management utilities.

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use dirs_next::{config_dir, home_dir};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));

const DEFAULT_PROMPTS_SUBDIR: &str = "Documents/Notes/prompts";
const STATE_DIR_NAME: &str = ".config";

/// Layered configuration loaded from defaults, user config, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: Paths,
    #[serde(default)]
    pub clipboard: ClipboardSettings,
    #[serde(default)]
    pub picker: Picker,
    #[serde(default)]
    pub editor: Editor,
    #[serde(default)]
    pub ignore: Ignore,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Paths {
    /// Root directory scanned for prompt files. Unset means
    /// `~/Documents/Notes/prompts`.
    #[serde(default)]
    pub prompts_root: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardSettings {
    #[serde(default = "ClipboardSettings::default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl ClipboardSettings {
    fn default_poll_interval_ms() -> u64 {
        200
    }
}

impl Default for ClipboardSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: Self::default_poll_interval_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Picker {
    #[serde(default = "Picker::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Picker {
    fn default_timeout_secs() -> u64 {
        30
    }
}

impl Default for Picker {
    fn default() -> Self {
        Self {
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Editor {
    #[serde(default = "Editor::default_command")]
    pub command: String,
}

impl Editor {
    fn default_command() -> String {
        "nvim".into()
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self {
            command: Self::default_command(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Ignore {
    #[serde(default)]
    pub globs: Vec<String>,
}

/// Environment overrides for critical settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    prompts_root: Option<String>,
    editor: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            prompts_root: env::var("PROMPTSTACK_PROMPTS_DIR").ok(),
            editor: env::var("EDITOR").ok(),
        }
    }

    #[cfg(test)]
    fn for_tests(prompts_root: &str, editor: &str) -> Self {
        Self {
            prompts_root: Some(prompts_root.to_owned()),
            editor: Some(editor.to_owned()),
        }
    }
}

impl Config {
    /// Load configuration from embedded defaults, the user config file, and
    /// environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_with_layers(user_config_path(), EnvOverrides::from_env())
    }

    fn load_with_layers(user: Option<PathBuf>, env_overrides: EnvOverrides) -> Result<Self> {
        let mut config = Self::from_str(&DEFAULT_CONFIG)?;

        if let Some(user_path) = user.filter(|path| path.exists()) {
            config = config.merge(Self::from_file(&user_path)?);
        }

        Ok(apply_env_overrides(config, env_overrides))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            paths: Paths {
                prompts_root: other.paths.prompts_root.or(self.paths.prompts_root),
            },
            clipboard: if other.clipboard != ClipboardSettings::default() {
                other.clipboard
            } else {
                self.clipboard
            },
            picker: if other.picker != Picker::default() {
                other.picker
            } else {
                self.picker
            },
            editor: if other.editor != Editor::default() {
                other.editor
            } else {
                self.editor
            },
            ignore: merge_ignore(self.ignore, other.ignore),
        }
    }

    /// Root directory scanned for prompt files.
    pub fn prompts_root(&self) -> PathBuf {
        match &self.paths.prompts_root {
            Some(root) => PathBuf::from(root),
            None => home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(DEFAULT_PROMPTS_SUBDIR),
        }
    }

    /// Directory holding presets and the last-action token, kept inside the
    /// prompts root so the whole library travels as one tree.
    pub fn state_dir(&self) -> PathBuf {
        self.prompts_root().join(STATE_DIR_NAME)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.clipboard.poll_interval_ms)
    }

    pub fn picker_timeout(&self) -> Duration {
        Duration::from_secs(self.picker.timeout_secs)
    }
}

fn merge_ignore(base: Ignore, overlay: Ignore) -> Ignore {
    let mut globs: BTreeSet<String> = base.globs.into_iter().collect();
    globs.extend(overlay.globs);
    Ignore {
        globs: globs.into_iter().collect(),
    }
}

fn user_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("promptstack/config.toml"))
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Config {
    if let Some(prompts_root) = env.prompts_root {
        config.paths.prompts_root = Some(prompts_root);
    }
    if let Some(editor) = env.editor {
        config.editor.command = editor;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_uses_defaults_when_no_files() {
        let config =
            Config::load_with_layers(None, EnvOverrides::default()).expect("load default config");
        assert_eq!(config.clipboard.poll_interval_ms, 200);
        assert_eq!(config.picker.timeout_secs, 30);
        assert_eq!(config.editor.command, "nvim");
        assert!(config.ignore.globs.contains(&"*.bak".into()));
        assert!(config.prompts_root().ends_with(DEFAULT_PROMPTS_SUBDIR));
    }

    #[test]
    fn user_file_overlays_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let user = temp.path().join("config.toml");
        fs::write(
            &user,
            r#"
[paths]
prompts_root = "/srv/prompts"
[clipboard]
poll_interval_ms = 50
[ignore]
globs = ["*.draft"]
"#,
        )?;

        let config = Config::load_with_layers(Some(user), EnvOverrides::default())?;
        assert_eq!(config.prompts_root(), PathBuf::from("/srv/prompts"));
        assert_eq!(config.poll_interval(), Duration::from_millis(50));
        assert!(config.ignore.globs.contains(&"*.draft".into()));
        assert!(config.ignore.globs.contains(&"*.bak".into()));
        Ok(())
    }

    #[test]
    fn env_overrides_take_precedence() -> Result<()> {
        let overrides = EnvOverrides::for_tests("/tmp/elsewhere", "vi");
        let config = Config::load_with_layers(None, overrides)?;
        assert_eq!(config.prompts_root(), PathBuf::from("/tmp/elsewhere"));
        assert_eq!(config.editor.command, "vi");
        Ok(())
    }

    #[test]
    fn state_dir_lives_inside_the_prompts_root() -> Result<()> {
        let overrides = EnvOverrides::for_tests("/srv/prompts", "vi");
        let config = Config::load_with_layers(None, overrides)?;
        assert_eq!(config.state_dir(), PathBuf::from("/srv/prompts/.config"));
        Ok(())
    }

    #[test]
    fn invalid_config_returns_error() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file = temp.path().join("broken.toml");
        fs::write(&file, "this is not toml")?;
        let result = Config::from_file(&file);
        assert!(result.is_err());
        Ok(())
    }
}
