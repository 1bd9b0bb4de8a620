//! Data-driven rule content and loaders.
//!
//! This crate reads rule constants for `rules-core` from TOML data files:
//! - Point-buy cost table
//! - Ability score and hit point floors
//! - Skill synergy threshold and bonus
//!
//! The standard values ship in `data/rules.toml` and are also embedded as
//! [`STANDARD_RULES`].

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LoadResult};

/// Contents of the bundled `data/rules.toml`.
pub const STANDARD_RULES: &str = include_str!("../data/rules.toml");
