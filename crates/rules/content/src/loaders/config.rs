//! Rules configuration loader.

use std::path::Path;

use anyhow::Context;
use rules_core::RulesConfig;

use crate::STANDARD_RULES;
use crate::loaders::{LoadResult, read_file};

/// Loader for [`RulesConfig`] from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load rules from a TOML file.
    ///
    /// Keys missing from the file keep their built-in defaults.
    pub fn load(path: &Path) -> LoadResult<RulesConfig> {
        let content = read_file(path)?;
        let config = Self::from_str(&content)
            .with_context(|| format!("Invalid rules file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded rules configuration");
        Ok(config)
    }

    /// Parse rules from TOML text.
    pub fn from_str(content: &str) -> LoadResult<RulesConfig> {
        let config: RulesConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rules TOML: {}", e))?;
        validate(&config)?;
        Ok(config)
    }

    /// The bundled standard rules.
    pub fn standard() -> LoadResult<RulesConfig> {
        Self::from_str(STANDARD_RULES)
    }
}

fn validate(config: &RulesConfig) -> LoadResult<()> {
    let mut seen = std::collections::BTreeSet::new();
    for entry in config.point_costs.entries() {
        anyhow::ensure!(
            seen.insert(entry.score),
            "duplicate point cost for score {}",
            entry.score
        );
    }
    anyhow::ensure!(
        config.max_hp_min >= 0,
        "max_hp_min must not be negative, got {}",
        config.max_hp_min
    );
    Ok(())
}
