//! Infrastructure adapters for the host system.

pub mod clipboard;
pub mod config;
pub mod editor;
pub mod picker;
