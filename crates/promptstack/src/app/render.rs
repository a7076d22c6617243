//! Final composition text assembly.

use std::fs;

use tracing::warn;

use crate::domain::model::CompositionItem;

/// Separator between content blocks in the rendered output.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Output of a render pass: the joined text plus per-item soft failures.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub warnings: Vec<String>,
}

/// Assemble the final text for `items` in order.
///
/// File items contribute their full contents; an unreadable file is skipped
/// with a warning rather than aborting the render. The placeholder contributes
/// `clipboard_text` exactly once — callers pass the live clipboard value here,
/// not the squash buffer. An empty item list (or one where everything failed)
/// renders to the empty string.
pub fn render(items: &[CompositionItem], clipboard_text: &str) -> Rendered {
    let mut blocks = Vec::with_capacity(items.len());
    let mut warnings = Vec::new();

    for item in items {
        match item {
            CompositionItem::File(path) => match fs::read_to_string(path) {
                Ok(contents) => blocks.push(contents),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping unreadable file");
                    warnings.push(format!("could not read {}: {err}", path.display()));
                }
            },
            CompositionItem::Clipboard => {
                if !clipboard_text.is_empty() {
                    blocks.push(clipboard_text.to_owned());
                }
            }
        }
    }

    Rendered {
        text: blocks.join(BLOCK_SEPARATOR),
        warnings,
    }
}
