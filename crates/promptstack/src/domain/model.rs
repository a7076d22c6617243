//! Domain models for compositions and presets.

use std::path::PathBuf;

/// Sentinel token used for the clipboard placeholder in preset records.
pub const CLIPBOARD_TOKEN: &str = "[CLIPBOARD]";

/// One content source within a composition.
///
/// The placeholder is a distinct variant rather than a magic path so a real
/// file named `[CLIPBOARD]` can never collide with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompositionItem {
    /// A file whose full text is inlined at render time.
    File(PathBuf),
    /// Resolved to the live clipboard text at render time.
    Clipboard,
}

impl CompositionItem {
    /// Short name used in menus and listings.
    pub fn display_name(&self) -> String {
        match self {
            CompositionItem::File(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            CompositionItem::Clipboard => CLIPBOARD_TOKEN.to_owned(),
        }
    }

    /// Token written to a preset record, one per line.
    pub fn record_token(&self) -> String {
        match self {
            CompositionItem::File(path) => path.display().to_string(),
            CompositionItem::Clipboard => CLIPBOARD_TOKEN.to_owned(),
        }
    }

    pub fn is_clipboard(&self) -> bool {
        matches!(self, CompositionItem::Clipboard)
    }
}

/// Summary of a stored preset as shown by listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetSummary {
    pub name: String,
    pub item_count: usize,
}
