//! CLI command implementations.

pub mod common;
pub mod lower;
pub mod version;
