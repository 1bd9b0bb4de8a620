//! Rules configuration constants and tunable parameters.

use crate::error::LookupError;

/// One row of the point-buy table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointCost {
    pub score: i32,
    pub cost: u32,
}

/// Ability score → build-point cost. A finite table: scores outside it have
/// no cost and are never extrapolated.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PointCostTable {
    entries: Vec<PointCost>,
}

impl PointCostTable {
    /// The standard 8–18 point-buy costs.
    pub const STANDARD: [(i32, u32); 11] = [
        (8, 0),
        (9, 1),
        (10, 2),
        (11, 3),
        (12, 4),
        (13, 5),
        (14, 6),
        (15, 8),
        (16, 10),
        (17, 13),
        (18, 16),
    ];

    pub fn new(entries: impl IntoIterator<Item = PointCost>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn standard() -> Self {
        Self::new(
            Self::STANDARD
                .into_iter()
                .map(|(score, cost)| PointCost { score, cost }),
        )
    }

    pub fn cost(&self, score: i32) -> Result<u32, LookupError> {
        self.entries
            .iter()
            .find(|entry| entry.score == score)
            .map(|entry| entry.cost)
            .ok_or(LookupError::PointCost { score })
    }

    pub fn entries(&self) -> &[PointCost] {
        &self.entries
    }
}

impl Default for PointCostTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Bonus granted by a well-ranked related skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SynergyRule {
    /// Minimum rank in the related skill.
    pub threshold: i32,
    /// Bonus added per qualifying related skill.
    pub bonus: i32,
}

impl Default for SynergyRule {
    fn default() -> Self {
        Self {
            threshold: 5,
            bonus: 2,
        }
    }
}

/// Rule constants shared by every character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RulesConfig {
    /// Point-buy costs for unbonused ability scores.
    pub point_costs: PointCostTable,
    /// Floor for ability scores.
    pub ability_min: i32,
    /// Floor for maximum hit points.
    pub max_hp_min: i32,
    pub synergy: SynergyRule,
}

impl RulesConfig {
    pub const DEFAULT_ABILITY_MIN: i32 = 0;
    pub const DEFAULT_MAX_HP_MIN: i32 = 1;

    pub fn new() -> Self {
        Self {
            point_costs: PointCostTable::standard(),
            ability_min: Self::DEFAULT_ABILITY_MIN,
            max_hp_min: Self::DEFAULT_MAX_HP_MIN,
            synergy: SynergyRule::default(),
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::new()
    }
}
