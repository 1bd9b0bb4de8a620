//! Ability-derived bonuses.
//!
//! A value such as an attack bonus or a skill adds its owner's ability
//! modifier. The bonus is registered as a dynamic ledger entry that looks the
//! modifier up on every read, so it tracks ability changes with nothing to
//! invalidate.

use std::rc::Weak;

use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

use super::{Bonus, Category, Ledger, Query};
use crate::error::ConfigError;

/// The six ability scores.
///
/// Parsed from and printed as their short lowercase names (`"str"`,
/// `"dex"`, ...), which double as ledger categories.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Ability {
    Str,
    Dex,
    Con,
    Int,
    Wis,
    Cha,
}

impl Ability {
    /// Ledger category under which derived bonuses are registered.
    pub fn category(self) -> Category {
        let name: &'static str = self.into();
        Category::from_static(name)
    }

    /// Parses a short ability name.
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        name.parse()
            .map_err(|_| ConfigError::UnknownAbility(name.to_owned()))
    }
}

/// An entity that owns ability scores.
pub trait AbilityHost {
    /// The ability's current modifier under `query`.
    fn ability_modifier(&self, ability: Ability, query: &Query) -> i32;
}

/// A resolved ability key, ready to register its dynamic entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AbilityDerived {
    ability: Ability,
}

impl AbilityDerived {
    pub const fn new(ability: Ability) -> Self {
        Self { ability }
    }

    /// Resolves the key from the one supplied at construction, falling back
    /// to the value type's fixed key.
    pub fn resolve(fixed: Option<Ability>, supplied: Option<Ability>) -> Result<Self, ConfigError> {
        supplied
            .or(fixed)
            .map(Self::new)
            .ok_or(ConfigError::MissingAbility)
    }

    pub const fn ability(&self) -> Ability {
        self.ability
    }

    /// The dynamic entry reading `owner`'s modifier on every call.
    ///
    /// Once the owner is gone the entry contributes nothing.
    pub fn evaluator(&self, owner: Weak<dyn AbilityHost>) -> Bonus {
        let ability = self.ability;
        Bonus::dynamic(move |query| match owner.upgrade() {
            Some(owner) => owner.ability_modifier(ability, query),
            None => {
                tracing::warn!(%ability, "ability-derived bonus outlived its owner");
                0
            }
        })
    }

    /// Registers the entry on `ledger` under the ability's category.
    pub fn register<L: Ledger>(&self, ledger: &mut L, owner: Weak<dyn AbilityHost>) {
        ledger.add_bonus(self.ability.category(), self.evaluator(owner));
    }
}
