//! Loaders turning TOML rule files into `rules-core` types.
//!
//! Only [`RulesConfig`](rules_core::RulesConfig) is data-driven today: the
//! point-buy table, the ability and hit point floors, and the synergy rule.
//! Every loader reports failures as [`LoadResult`] with the offending path in
//! the error chain.

pub mod config;

pub use config::ConfigLoader;

use std::path::Path;

use anyhow::Context;

/// Result type shared by the rule loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Reads a whole rule file, naming the path on failure.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rules file {}", path.display()))
}
