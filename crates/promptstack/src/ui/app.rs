//! Interactive menu shell around the composition core.

use std::fs;
use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};

use crate::app::composition::CompositionStore;
use crate::app::preset::PresetRepository;
use crate::app::render::render;
use crate::app::scan::PromptScanner;
use crate::app::session::{LastAction, Session};
use crate::app::squash::SquashEngine;
use crate::domain::errors::{CompositionError, PresetError};
use crate::domain::model::CompositionItem;
use crate::infra::clipboard::{ClipboardPort, SystemClipboard};
use crate::infra::config::Config;
use crate::infra::editor::edit_file;
use crate::infra::picker::{FuzzyPicker, Selection, fzf_available};

const PREVIEW_WIDTH: usize = 100;
const LIST_PREVIEW_WIDTH: usize = 50;

/// The interactive application: owns the session, the in-progress
/// composition, and the squash engine, and drives them from menu input.
pub struct ShellApp {
    config: Config,
    session: Session,
    store: CompositionStore,
    presets: PresetRepository,
    scanner: PromptScanner,
    picker: FuzzyPicker,
    clipboard: Arc<dyn ClipboardPort>,
    squash: SquashEngine,
}

impl ShellApp {
    /// Wire up the application. Fails fast when the prompts root is missing
    /// or `fzf` is not installed; everything else degrades at use time.
    pub fn new(config: Config) -> Result<Self> {
        let prompts_root = config.prompts_root();
        if !prompts_root.exists() {
            bail!("prompts directory not found: {}", prompts_root.display());
        }
        if !fzf_available() {
            bail!("fzf is required but not installed");
        }

        let session = Session::open(&config.state_dir())?;
        let clipboard: Arc<dyn ClipboardPort> = Arc::new(SystemClipboard::new());
        let squash = SquashEngine::new(
            Arc::clone(&clipboard),
            config.poll_interval(),
            Some(session.squash_scratch_file()),
        );
        let presets = PresetRepository::new(config.state_dir(), &prompts_root);
        let scanner = PromptScanner::new(&prompts_root, &config.ignore.globs)?;
        let picker = FuzzyPicker::new(config.picker_timeout());

        Ok(Self {
            config,
            session,
            store: CompositionStore::new(),
            presets,
            scanner,
            picker,
            clipboard,
            squash,
        })
    }

    /// Non-interactive entry point: load `name`, render, copy, exit. An
    /// unknown name is a visible but non-fatal error.
    pub fn run_preset(&mut self, name: &str) -> Result<()> {
        if !self.presets.exists(name) {
            println!("{}", format!("Preset not found: {name}").red());
            return Ok(());
        }
        let items = self.presets.load(name)?;
        if items.is_empty() {
            println!("{}", "Preset is empty or files not found".yellow());
            return Ok(());
        }
        self.store = CompositionStore::from_items(items);
        self.copy_to_clipboard()
    }

    /// Main menu loop.
    pub fn run(&mut self) -> Result<()> {
        loop {
            clear_screen();
            println!("{}\n", "=== Prompt Composer ===".cyan().bold());
            println!("{}", "Options:".bold());
            println!("  {}) Create new composition", "n".green());
            println!("  {}) Load preset", "cd".green());
            println!("  {}) Load preset with squash ON", "cds".green());
            println!("  {}) Load preset and copy immediately", "cp".green());
            println!("  {}) List presets", "ls".green());
            println!("  {}) Delete preset", "rm".green());
            println!("  {}) Quit", "q".green());
            println!();

            let default = self.session.last_action();
            if let Some(hint) = main_menu_hint(default) {
                println!("{}", format!("Press ENTER for last action: {hint}").dim());
            }

            let mut choice = prompt("Choice: ")?.to_lowercase();
            if choice.is_empty() && main_menu_hint(default).is_some() {
                choice = default.token().to_owned();
            }

            match choice.as_str() {
                "n" => {
                    self.create_composition()?;
                    self.session.record_action(LastAction::NewComposition)?;
                }
                "cd" => {
                    if let Some(name) = self.load_preset_flow()? {
                        self.session.record_action(LastAction::LoadPreset)?;
                        self.preview_preset(&name, false)?;
                    }
                }
                "cds" => {
                    if let Some(name) = self.load_preset_flow()? {
                        self.session.record_action(LastAction::LoadPresetSquash)?;
                        self.preview_preset(&name, true)?;
                    }
                }
                "cp" => {
                    if self.load_preset_flow()?.is_some() {
                        self.copy_to_clipboard()?;
                        pause()?;
                    }
                    self.session.record_action(LastAction::CopyPreset)?;
                }
                "ls" => self.list_presets()?,
                "rm" => self.delete_preset_flow()?,
                "q" | "quit" => {
                    println!("{}", "Goodbye!".green());
                    break;
                }
                _ => {
                    println!("{}", "Invalid choice".red());
                    pause()?;
                }
            }
        }

        self.squash.stop();
        Ok(())
    }

    fn create_composition(&mut self) -> Result<()> {
        self.store.clear();
        if !self.manage_files()? {
            return Ok(());
        }

        loop {
            self.show_composition_preview();
            let default = self.session.last_action();
            if let Some(hint) = preview_hint(default) {
                println!("{}", format!("Press ENTER for last action: {hint}").dim());
            }

            let mut choice = prompt("Choice: ")?.to_lowercase();
            if choice.is_empty() && preview_hint(default).is_some() {
                choice = default.token().to_owned();
            }

            match choice.as_str() {
                "c" => {
                    self.copy_to_clipboard()?;
                    pause()?;
                }
                "s" => {
                    self.save_preset_flow(None)?;
                    pause()?;
                }
                "x" => {
                    if self.save_preset_flow(None)?.is_some() {
                        self.copy_to_clipboard()?;
                        self.session.record_action(LastAction::SaveAndCopy)?;
                    }
                    pause()?;
                }
                "e" => {
                    if !self.manage_files()? {
                        return Ok(());
                    }
                }
                "b" => return Ok(()),
                _ => {
                    println!("{}", "Invalid choice".red());
                    pause()?;
                }
            }
        }
    }

    /// File management menu. Returns `false` when the user backs out.
    fn manage_files(&mut self) -> Result<bool> {
        loop {
            clear_screen();
            println!("{}\n", "=== File Management ===".cyan().bold());
            self.show_item_list();

            println!("{}", "Options:".bold());
            println!("  {}) Add file", "a".green());
            println!("  {}) Create new file", "n".green());
            println!("  {}) Edit file", "e".green());
            println!("  {}) Add clipboard placeholder", "c".green());
            println!("  {}) Remove file", "r".green());
            println!("  {}) Reorder files", "o".green());
            println!("  {}) Clear all", "x".green());
            println!("  {}) Done (continue to preview)", "d".green());
            println!("  {}) Back to main menu", "b".green());
            println!();
            if self.store.is_empty() {
                println!("{}", "Press ENTER to add first file".dim());
            } else {
                println!("{}", "Press ENTER to add another file".dim());
            }

            let mut choice = prompt("Choice: ")?.to_lowercase();
            if choice.is_empty() {
                choice = "a".into();
            }

            match choice.as_str() {
                "a" => self.add_file()?,
                "n" => self.create_new_file()?,
                "e" => self.edit_selected_file()?,
                "c" => self.add_placeholder()?,
                "r" => self.remove_item()?,
                "o" => self.reorder_items()?,
                "x" => {
                    self.store.clear();
                    println!("{}", "All files cleared".green());
                    pause()?;
                }
                "d" => {
                    if self.store.is_empty() {
                        println!("{}", "No files selected".yellow());
                        pause()?;
                    } else {
                        return Ok(true);
                    }
                }
                "b" => return Ok(false),
                _ => {
                    println!("{}", "Invalid choice".red());
                    pause()?;
                }
            }
        }
    }

    /// Variant of the file menu used while editing a stored preset: `s`
    /// persists the changes, `q` reloads the stored record.
    fn manage_files_preset(&mut self, name: &str) -> Result<bool> {
        loop {
            clear_screen();
            println!("{}\n", format!("=== Editing Preset: {name} ===").cyan().bold());
            self.show_item_list();

            println!("{}", "Options:".bold());
            println!("  {}) Add file", "a".green());
            println!("  {}) Create new file", "n".green());
            println!("  {}) Edit file", "e".green());
            println!("  {}) Add clipboard placeholder", "c".green());
            println!("  {}) Remove file", "r".green());
            println!("  {}) Reorder files", "o".green());
            println!("  {}) Clear all", "x".green());
            println!("  {}) Save changes", "s".green());
            println!("  {}) Quit without saving", "q".green());
            println!();

            match prompt("Choice: ")?.to_lowercase().as_str() {
                "a" => self.add_file()?,
                "n" => self.create_new_file()?,
                "e" => self.edit_selected_file()?,
                "c" => self.add_placeholder()?,
                "r" => self.remove_item()?,
                "o" => self.reorder_items()?,
                "x" => {
                    self.store.clear();
                    println!("{}", "All files cleared".green());
                    pause()?;
                }
                "s" => {
                    if self.save_preset_flow(Some(name))?.is_some() {
                        pause()?;
                        return Ok(true);
                    }
                    pause()?;
                }
                "q" => {
                    let items = self.presets.load(name).unwrap_or_default();
                    self.store = CompositionStore::from_items(items);
                    return Ok(false);
                }
                _ => {
                    println!("{}", "Invalid choice".red());
                    pause()?;
                }
            }
        }
    }

    /// Dedicated preview menu for a loaded preset. The placeholder row shows
    /// squashed content here for visibility; the final copy still pulls the
    /// live clipboard.
    fn preview_preset(&mut self, name: &str, start_with_squash: bool) -> Result<()> {
        if start_with_squash && !self.squash.is_running() {
            self.squash.start();
            println!("{}", "Clipboard squashing started".green());
        }

        loop {
            clear_screen();
            println!("{}\n", format!("=== Preset Preview: {name} ===").cyan().bold());

            if self.store.is_empty() {
                println!("{}\n", "No files in preset".yellow());
            } else {
                println!("{}", "Preset content:".bold());
                let items = self.store.snapshot();
                for (i, item) in items.iter().enumerate() {
                    self.show_item_row(i, item, LIST_PREVIEW_WIDTH);
                }
                println!();
            }

            println!("{}", "Options:".bold());
            println!("  {}) Copy to clipboard", "c".green());
            let squash_status = if self.squash.is_running() { "ON" } else { "OFF" };
            println!(
                "  {}) Toggle squash mode (currently: {squash_status})",
                "s".green()
            );
            println!("  {}) Edit preset", "e".green());
            println!("  {}) Remove preset", "r".green());
            println!("  {}) Back to main menu", "b".green());
            println!();
            println!("{}", "Press ENTER to copy to clipboard".dim());

            let mut choice = prompt("Choice: ")?.to_lowercase();
            if choice.is_empty() {
                choice = "c".into();
            }

            match choice.as_str() {
                "c" => {
                    self.copy_to_clipboard()?;
                    pause()?;
                }
                "s" => {
                    if self.squash.is_running() {
                        self.squash.stop();
                        println!("{}", "Clipboard squashing stopped".yellow());
                    } else {
                        self.squash.start();
                        println!("{}", "Clipboard squashing started".green());
                    }
                }
                "e" => {
                    if self.manage_files_preset(name)? {
                        let items = self.presets.load(name)?;
                        self.store = CompositionStore::from_items(items);
                    }
                }
                "r" => {
                    let confirm = prompt(&format!("Delete preset '{name}'? (y/N): "))?;
                    if confirm.eq_ignore_ascii_case("y") {
                        self.presets.delete(name)?;
                        println!("{}", format!("Preset deleted: {name}").green());
                        pause()?;
                        return Ok(());
                    }
                }
                "b" => return Ok(()),
                _ => {
                    println!("{}", "Invalid choice".red());
                    pause()?;
                }
            }
        }
    }

    fn add_file(&mut self) -> Result<()> {
        let files = self.scanner.scan()?;
        if files.is_empty() {
            println!("{}", "No prompt files found".yellow());
            return pause();
        }

        println!("{}", "Select file to add (using fzf):".bold());
        match self.picker.pick_file(&files)? {
            Selection::Chosen(path) => match self.store.add(CompositionItem::File(path.clone())) {
                Ok(()) => {
                    let name = CompositionItem::File(path).display_name();
                    println!("{}", format!("Added: {name}").green());
                }
                Err(CompositionError::DuplicateItem) => {
                    println!("{}", "File already in composition".yellow());
                }
                Err(err) => println!("{}", err.to_string().red()),
            },
            Selection::Cancelled => println!("{}", "No file selected".yellow()),
        }
        pause()
    }

    fn create_new_file(&mut self) -> Result<()> {
        println!("{}", "Create new file:".bold());
        let mut filename = prompt("Filename: ")?;
        if filename.is_empty() {
            return Ok(());
        }
        if !["md", "txt", "prompt"]
            .iter()
            .any(|ext| filename.ends_with(&format!(".{ext}")))
        {
            filename.push_str(".md");
        }

        let path = self.config.prompts_root().join(&filename);
        if path.exists() {
            let overwrite = prompt("File exists. Overwrite? (y/N): ")?;
            if !overwrite.eq_ignore_ascii_case("y") {
                return Ok(());
            }
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        match edit_file(&self.config.editor.command, &path) {
            Ok(()) => {
                let has_content = fs::metadata(&path).map(|m| m.len() > 0).unwrap_or(false);
                if has_content {
                    match self.store.add(CompositionItem::File(path)) {
                        Ok(()) => println!("{}", format!("Created and added: {filename}").green()),
                        Err(CompositionError::DuplicateItem) => {
                            println!("{}", "File already in composition".yellow());
                        }
                        Err(err) => println!("{}", err.to_string().red()),
                    }
                } else {
                    println!("{}", "File creation cancelled or empty".yellow());
                }
            }
            Err(err) => println!("{}", format!("Failed to open editor: {err}").red()),
        }
        pause()
    }

    fn edit_selected_file(&mut self) -> Result<()> {
        let Some(index) = self.select_item_index("Select file to edit:")? else {
            return pause();
        };
        match &self.store.snapshot()[index] {
            CompositionItem::Clipboard => {
                println!("{}", "Cannot edit clipboard placeholder".yellow());
            }
            CompositionItem::File(path) => match edit_file(&self.config.editor.command, path) {
                Ok(()) => println!(
                    "{}",
                    format!("Edited: {}", CompositionItem::File(path.clone()).display_name())
                        .green()
                ),
                Err(err) => println!("{}", format!("Failed to open editor: {err}").red()),
            },
        }
        pause()
    }

    fn add_placeholder(&mut self) -> Result<()> {
        match self.store.add(CompositionItem::Clipboard) {
            Ok(()) => println!("{}", "Added clipboard placeholder".green()),
            Err(CompositionError::DuplicateItem) => {
                println!("{}", "Clipboard placeholder already in composition".yellow());
            }
            Err(err) => println!("{}", err.to_string().red()),
        }
        pause()
    }

    fn remove_item(&mut self) -> Result<()> {
        let Some(index) = self.select_item_index("Select file to remove:")? else {
            return pause();
        };
        match self.store.remove_at(index) {
            Ok(removed) => {
                println!("{}", format!("Removed: {}", removed.display_name()).green());
            }
            Err(err) => println!("{}", err.to_string().red()),
        }
        pause()
    }

    fn reorder_items(&mut self) -> Result<()> {
        if self.store.is_empty() {
            println!("{}", "No files to reorder".yellow());
            return pause();
        }

        println!("{}", "Current order:".bold());
        for (i, item) in self.store.snapshot().iter().enumerate() {
            println!("  {}) {}", i + 1, item.display_name());
        }
        println!("\n{}", "Reorder options:".bold());
        println!("  {}) Keep current order", "k".green());
        println!("  {}) Swap two files", "s".green());
        println!("  {}) Move file to position", "m".green());
        println!("  {}) Reverse order", "r".green());

        match prompt("Choice: ")?.to_lowercase().as_str() {
            "k" => println!("{}", "Order kept".green()),
            "s" => {
                let a = prompt_position("First file position: ")?;
                let b = prompt_position("Second file position: ")?;
                match (a, b) {
                    (Some(a), Some(b)) => match self.store.swap(a, b) {
                        Ok(()) => println!("{}", "Files swapped".green()),
                        Err(err) => println!("{}", err.to_string().red()),
                    },
                    _ => println!("{}", "Invalid numbers".red()),
                }
            }
            "m" => {
                let from = prompt_position("File to move (position): ")?;
                let to = prompt_position("New position: ")?;
                match (from, to) {
                    (Some(from), Some(to)) => match self.store.move_to(from, to) {
                        Ok(()) => println!("{}", "File moved".green()),
                        Err(err) => println!("{}", err.to_string().red()),
                    },
                    _ => println!("{}", "Invalid numbers".red()),
                }
            }
            "r" => {
                self.store.reverse();
                println!("{}", "Order reversed".green());
            }
            _ => println!("{}", "Invalid choice".red()),
        }
        pause()
    }

    /// Stop any active squash session, render the composition against the
    /// live clipboard, and copy the result.
    fn copy_to_clipboard(&mut self) -> Result<()> {
        if self.squash.is_running() {
            self.squash.stop();
            println!("{}", "Clipboard squashing stopped".yellow());
        }

        let rendered = render(self.store.items(), &self.clipboard.get_text());
        for warning in &rendered.warnings {
            println!("{}", warning.as_str().yellow());
        }
        self.clipboard
            .set_text(&rendered.text)
            .context("failed to copy composition to clipboard")?;
        println!("{}", "Composition copied to clipboard".green());
        self.session.record_action(LastAction::Copy)
    }

    /// Save the composition under `existing` or a prompted name. Returns the
    /// sanitized name on success.
    fn save_preset_flow(&mut self, existing: Option<&str>) -> Result<Option<String>> {
        let name = match existing {
            Some(name) => name.to_owned(),
            None => prompt("Preset name: ")?,
        };

        match self.presets.save(&name, &self.store.snapshot()) {
            Ok(sanitized) => {
                println!("{}", format!("Preset saved: {sanitized}").green());
                self.session.record_action(LastAction::SavePreset)?;
                Ok(Some(sanitized))
            }
            Err(PresetError::InvalidName) => {
                println!("{}", "Invalid preset name".red());
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Pick a preset and load it into the store. Returns the chosen name, or
    /// `None` when nothing usable was selected.
    fn load_preset_flow(&mut self) -> Result<Option<String>> {
        let summaries = self.presets.list()?;
        if summaries.is_empty() {
            println!("{}", "No presets found".yellow());
            pause()?;
            return Ok(None);
        }

        println!("{}", "Select preset (using fzf):".bold());
        let names: Vec<String> = summaries.into_iter().map(|s| s.name).collect();
        let name = match self.picker.pick_name(&names)? {
            Selection::Chosen(name) => name,
            Selection::Cancelled => {
                println!("{}", "No preset selected".yellow());
                pause()?;
                return Ok(None);
            }
        };

        let items = self.presets.load(&name)?;
        if items.is_empty() {
            println!("{}", "Preset is empty or files not found".yellow());
            pause()?;
            return Ok(None);
        }

        println!("{}", format!("Loaded preset: {name}").green());
        println!("{}", format!("Loaded {} items", items.len()).green());
        self.store = CompositionStore::from_items(items);
        Ok(Some(name))
    }

    fn list_presets(&mut self) -> Result<()> {
        clear_screen();
        println!("{}\n", "=== Available Presets ===".cyan().bold());

        let summaries = self.presets.list()?;
        if summaries.is_empty() {
            println!("{}", "No presets found".yellow());
        } else {
            for summary in summaries {
                println!(
                    "{} {}",
                    summary.name.as_str().green(),
                    format!("({} items)", summary.item_count).dim()
                );
                let items = self.presets.load(&summary.name)?;
                for item in items.iter().take(3) {
                    println!("  - {}", item.display_name());
                }
                if summary.item_count > 3 {
                    println!("{}", format!("  ... and {} more", summary.item_count - 3).dim());
                }
                println!();
            }
        }

        pause()?;
        self.session.record_action(LastAction::ListPresets)
    }

    fn delete_preset_flow(&mut self) -> Result<()> {
        let summaries = self.presets.list()?;
        if summaries.is_empty() {
            println!("{}", "No presets found".yellow());
            return pause();
        }

        println!("{}", "Select preset to delete (using fzf):".bold());
        let names: Vec<String> = summaries.into_iter().map(|s| s.name).collect();
        match self.picker.pick_name(&names)? {
            Selection::Chosen(name) => {
                let confirm = prompt(&format!("Delete preset '{name}'? (y/N): "))?;
                if confirm.eq_ignore_ascii_case("y") {
                    self.presets.delete(&name)?;
                    println!("{}", format!("Preset deleted: {name}").green());
                } else {
                    println!("{}", "Deletion cancelled".yellow());
                }
            }
            Selection::Cancelled => println!("{}", "No preset selected".yellow()),
        }
        pause()
    }

    fn show_composition_preview(&self) {
        clear_screen();
        println!("{}\n", "=== Composition Preview ===".cyan().bold());

        for (i, item) in self.store.snapshot().iter().enumerate() {
            self.show_item_row(i, item, PREVIEW_WIDTH);
            println!();
        }

        println!("{}", "Actions:".bold());
        println!("  {}) Copy to clipboard", "c".green());
        println!("  {}) Save as preset", "s".green());
        println!("  {}) Save as preset and copy", "x".green());
        println!("  {}) Edit composition", "e".green());
        println!("  {}) Back to main menu", "b".green());
        println!();
    }

    fn show_item_row(&self, index: usize, item: &CompositionItem, width: usize) {
        match item {
            CompositionItem::Clipboard => {
                println!(
                    "  {}) {}",
                    (index + 1).to_string().green(),
                    item.display_name().yellow()
                );
                let squashed = self.squash.current_content();
                if squashed.is_empty() {
                    println!("      {}", "Clipboard content will be inserted here".dim());
                } else {
                    println!("      {}", format!("{}...", one_line(&squashed, width)).dim());
                }
            }
            CompositionItem::File(path) => {
                println!(
                    "  {}) {}",
                    (index + 1).to_string().green(),
                    item.display_name()
                );
                match fs::read_to_string(path) {
                    Ok(contents) => {
                        println!("      {}", format!("{}...", one_line(&contents, width)).dim());
                    }
                    Err(_) => println!("      {}", "Error reading file".red()),
                }
            }
        }
    }

    fn show_item_list(&self) {
        if self.store.is_empty() {
            println!("{}\n", "No files selected yet".dim());
            return;
        }
        println!("{}", "Current files:".bold());
        for (i, item) in self.store.snapshot().iter().enumerate() {
            if item.is_clipboard() {
                println!("  {}) {}", (i + 1).to_string().green(), item.display_name().yellow());
            } else {
                println!("  {}) {}", (i + 1).to_string().green(), item.display_name());
            }
        }
        println!();
    }

    /// Print the current items and read a 1-based position. `None` covers an
    /// empty store and unparsable or out-of-range input.
    fn select_item_index(&self, title: &str) -> Result<Option<usize>> {
        if self.store.is_empty() {
            println!("{}", "No files selected".yellow());
            return Ok(None);
        }
        println!("{}", title.bold());
        for (i, item) in self.store.snapshot().iter().enumerate() {
            println!("  {}) {}", i + 1, item.display_name());
        }
        let Some(index) = prompt_position("File number: ")? else {
            println!("{}", "Invalid number".red());
            return Ok(None);
        };
        if index >= self.store.len() {
            println!("{}", "Invalid selection".red());
            return Ok(None);
        }
        Ok(Some(index))
    }
}

impl Drop for ShellApp {
    fn drop(&mut self) {
        self.squash.stop();
    }
}

fn main_menu_hint(action: LastAction) -> Option<&'static str> {
    match action {
        LastAction::NewComposition => Some("new composition"),
        LastAction::LoadPreset => Some("load preset"),
        LastAction::LoadPresetSquash => Some("load preset with squash"),
        LastAction::CopyPreset => Some("copy preset"),
        LastAction::ListPresets => Some("list presets"),
        _ => None,
    }
}

fn preview_hint(action: LastAction) -> Option<&'static str> {
    match action {
        LastAction::Copy => Some("copy to clipboard"),
        LastAction::SavePreset => Some("save preset"),
        LastAction::SaveAndCopy => Some("save and copy"),
        _ => None,
    }
}

fn clear_screen() {
    let _ = execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0));
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush().context("failed to flush stdout")?;
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("failed to read input")?;
    Ok(line.trim().to_owned())
}

/// Read a 1-based position, returning the 0-based index.
fn prompt_position(label: &str) -> Result<Option<usize>> {
    let input = prompt(label)?;
    Ok(input.parse::<usize>().ok().and_then(|n| n.checked_sub(1)))
}

fn pause() -> Result<()> {
    prompt("Press ENTER to continue...").map(|_| ())
}

fn one_line(text: &str, width: usize) -> String {
    text.chars()
        .take(width)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect()
}
