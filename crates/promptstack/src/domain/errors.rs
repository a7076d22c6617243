//! Domain-specific errors.

use thiserror::Error;

/// Recoverable failures while editing a composition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompositionError {
    #[error("item is already part of the composition")]
    DuplicateItem,
    #[error("position {index} is out of range (composition has {len} items)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Recoverable failures while working with the preset repository.
#[derive(Debug, Error)]
pub enum PresetError {
    #[error("preset name is empty after removing unsupported characters")]
    InvalidName,
    #[error("no preset named '{0}'")]
    NotFound(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
