//! Skills.
//!
//! A skill is a conditional ledger over its ranks, with the key ability's
//! modifier as a default-active entry. On top of the ledger:
//!
//! - **synergies**: +`bonus` for each related skill with rank ≥ `threshold`
//! - **armor penalty**: −`armor_penalty × owner armor check penalty`
//!
//! Both can be switched off per read with the `synergies` and
//! `armor_penalty` query flags.

use std::rc::Weak;

use super::Character;
use crate::config::SynergyRule;
use crate::dice::{CheckOptions, Checkable, RandomSource, check_value};
use crate::error::ConfigError;
use crate::value::{
    Ability, AbilityDerived, AbilityHost, Base, Bonus, Category, ConditionalLedger, Ledger, Query,
    Value,
};

/// Query flag toggling synergy bonuses (default on).
pub const SYNERGIES: &str = "synergies";

/// Query flag toggling the armor check penalty (default on).
pub const ARMOR_PENALTY: &str = "armor_penalty";

/// Definition of a skill a character can rank in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillSpec {
    pub name: String,
    pub ability: Option<Ability>,
    pub synergies: Vec<String>,
    /// Multiplier applied to the owner's armor check penalty.
    pub armor_penalty: i32,
    /// Whether the skill can be used with zero ranks.
    pub untrained: bool,
}

impl SkillSpec {
    pub fn new(name: impl Into<String>, ability: Ability) -> Self {
        Self {
            name: name.into(),
            ability: Some(ability),
            synergies: Vec::new(),
            armor_penalty: 0,
            untrained: true,
        }
    }

    /// A definition whose key ability is not known yet.
    pub fn without_ability(name: impl Into<String>) -> Self {
        Self {
            ability: None,
            ..Self::new(name, Ability::Str)
        }
    }

    pub fn with_synergy(mut self, skill: impl Into<String>) -> Self {
        self.synergies.push(skill.into());
        self
    }

    pub fn with_armor_penalty(mut self, multiplier: i32) -> Self {
        self.armor_penalty = multiplier;
        self
    }

    pub fn trained_only(mut self) -> Self {
        self.untrained = false;
        self
    }
}

pub struct Skill {
    owner: Weak<Character>,
    name: String,
    ability: Ability,
    value: ConditionalLedger<Base>,
    synergies: Vec<String>,
    armor_penalty: i32,
    untrained: bool,
    synergy: SynergyRule,
}

impl Skill {
    pub(crate) fn new(
        owner: Weak<Character>,
        spec: &SkillSpec,
        synergy: SynergyRule,
    ) -> Result<Self, ConfigError> {
        let derived = AbilityDerived::resolve(None, spec.ability)?;
        let mut value = ConditionalLedger::new(Base::default());
        let host: Weak<dyn AbilityHost> = owner.clone();
        derived.register(&mut value, host);

        Ok(Self {
            owner,
            name: spec.name.clone(),
            ability: derived.ability(),
            value,
            synergies: spec.synergies.clone(),
            armor_penalty: spec.armor_penalty,
            untrained: spec.untrained,
            synergy,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ability(&self) -> Ability {
        self.ability
    }

    /// Ranks bought, without ability, bonuses, synergies or penalties.
    pub fn rank(&self) -> i32 {
        let query = Query::default()
            .without_defaults()
            .with_flag(SYNERGIES, false)
            .with_flag(ARMOR_PENALTY, false);
        self.get(&query)
    }

    pub fn set_rank(&mut self, rank: i32) {
        self.set(rank);
    }

    pub fn add_ranks(&mut self, ranks: i32) {
        let rank = self.raw();
        self.set(rank + ranks);
    }

    /// A bonus that only applies when a read names it in `include`.
    pub fn add_situational(&mut self, category: impl Into<Category>, bonus: impl Into<Bonus>) {
        self.value.add(category, bonus, false);
    }

    fn synergy_bonus(&self, owner: &Character) -> i32 {
        self.synergies
            .iter()
            .filter(|name| match owner.skill(name) {
                Ok(skill) => skill.borrow().rank() >= self.synergy.threshold,
                Err(error) => {
                    tracing::warn!(skill = %self.name, %error, "synergy skill unavailable");
                    false
                }
            })
            .map(|_| self.synergy.bonus)
            .sum()
    }
}

impl Value for Skill {
    fn get(&self, query: &Query) -> i32 {
        let mut total = self.value.get(query);
        let applies_synergies = query.flag(SYNERGIES, true) && !self.synergies.is_empty();
        let applies_armor = query.flag(ARMOR_PENALTY, true) && self.armor_penalty != 0;
        if !(applies_synergies || applies_armor) {
            return total;
        }

        let Some(owner) = self.owner.upgrade() else {
            return total;
        };
        if applies_synergies {
            total += self.synergy_bonus(&owner);
        }
        if applies_armor {
            total -= self.armor_penalty * owner.armor_check_penalty();
        }
        total
    }

    fn set(&mut self, raw: i32) {
        self.value.set(raw);
    }

    fn raw(&self) -> i32 {
        self.value.raw()
    }
}

impl Ledger for Skill {
    fn add_bonus(&mut self, category: impl Into<Category>, bonus: impl Into<Bonus>) {
        self.value.add_bonus(category, bonus);
    }

    fn bonus(&self, category: &str) -> Option<&Bonus> {
        self.value.bonus(category)
    }

    fn remove_bonus(&mut self, category: &str) -> Option<Bonus> {
        self.value.remove_bonus(category)
    }
}

impl Checkable for Skill {
    fn check_modifier(&self, query: &Query) -> i32 {
        self.get(query)
    }

    /// Trained-only skills fail outright at rank 0.
    fn check<R: RandomSource + ?Sized>(
        &self,
        source: &mut R,
        dc: i32,
        options: CheckOptions,
        query: &Query,
    ) -> bool {
        if !self.untrained && self.rank() == 0 {
            tracing::debug!(skill = %self.name, "untrained use of trained-only skill");
            return false;
        }
        check_value(self, source, dc, options, query)
    }
}

impl std::fmt::Debug for Skill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Skill")
            .field("name", &self.name)
            .field("ability", &self.ability)
            .field("value", &self.value)
            .field("synergies", &self.synergies)
            .field("armor_penalty", &self.armor_penalty)
            .field("untrained", &self.untrained)
            .finish_non_exhaustive()
    }
}
