//! Application layer orchestrating domain logic and infrastructure.

pub mod composition;
pub mod preset;
pub mod render;
pub mod scan;
pub mod session;
pub mod squash;
