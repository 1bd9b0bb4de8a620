//! Ability scores.
//!
//! `AbilityScore = Overriding<Bounded<BonusLedger<Base>>>`
//!
//! modifier = floor(score / 2) − 5

use crate::config::PointCostTable;
use crate::dice::Checkable;
use crate::error::LookupError;
use crate::value::{
    Ability, Base, Bonus, BonusLedger, Bounded, Bounds, Category, Ledger, Overriding, Query, Value,
};

/// Bonus category for racial adjustments.
pub const RACIAL: &str = "racial";

/// Bonus category for points gained on level advancement.
pub const FROM_LEVEL: &str = "from level";

/// Starting scores for the six abilities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AbilityScores {
    pub str: i32,
    pub dex: i32,
    pub con: i32,
    pub int: i32,
    pub wis: i32,
    pub cha: i32,
}

impl AbilityScores {
    pub fn new(str: i32, dex: i32, con: i32, int: i32, wis: i32, cha: i32) -> Self {
        Self {
            str,
            dex,
            con,
            int,
            wis,
            cha,
        }
    }

    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Str => self.str,
            Ability::Dex => self.dex,
            Ability::Con => self.con,
            Ability::Int => self.int,
            Ability::Wis => self.wis,
            Ability::Cha => self.cha,
        }
    }
}

impl Default for AbilityScores {
    /// Default scores: all 10
    fn default() -> Self {
        Self::new(10, 10, 10, 10, 10, 10)
    }
}

/// A single ability score with overrides, bounds and bonuses.
#[derive(Clone, Debug)]
pub struct AbilityScore {
    value: Overriding<Bounded<BonusLedger<Base>>>,
}

impl AbilityScore {
    /// A score floored at `min`.
    pub fn new(score: i32, min: i32) -> Self {
        Self::with_bounds(score, min, Bounds::UNBOUNDED)
    }

    /// A score floored at `min`; `supplied` may add a cap but cannot move
    /// the floor.
    pub fn with_bounds(score: i32, min: i32, supplied: Bounds) -> Self {
        let bounds = Bounds::at_least(min).or(supplied);
        Self {
            value: Overriding::new(Bounded::new(BonusLedger::new(Base::new(score)), bounds)),
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.value.inner().bounds()
    }

    pub fn modifier(&self, query: &Query) -> i32 {
        self.get(query).div_euclid(2) - 5
    }

    /// Score with only permanent adjustments, ignoring any override.
    pub fn true_value(&self) -> i32 {
        self.get(&Self::permanent())
    }

    pub fn true_modifier(&self) -> i32 {
        self.modifier(&Self::permanent())
    }

    /// Build-point cost of the score before any bonus.
    pub fn point_cost(&self, table: &PointCostTable) -> Result<u32, LookupError> {
        table.cost(self.get(&Query::default().include_none()))
    }

    pub fn override_with(&mut self, value: i32) {
        self.value.override_with(value);
    }

    pub fn clear_override(&mut self) {
        self.value.clear_override();
    }

    pub fn is_overridden(&self) -> bool {
        self.value.is_overridden()
    }

    fn permanent() -> Query {
        Query::default().unmasked().include(RACIAL).include(FROM_LEVEL)
    }
}

impl Value for AbilityScore {
    fn get(&self, query: &Query) -> i32 {
        self.value.get(query)
    }

    fn set(&mut self, raw: i32) {
        self.value.set(raw);
    }

    fn raw(&self) -> i32 {
        self.value.raw()
    }
}

impl Ledger for AbilityScore {
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

impl Checkable for AbilityScore {
    fn check_modifier(&self, query: &Query) -> i32 {
        self.modifier(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{CheckOptions, ScriptedSource};

    #[test]
    fn modifier_follows_score() {
        let cases = [(0, -5), (1, -5), (8, -1), (9, -1), (10, 0), (11, 0), (12, 1), (18, 4), (25, 7)];
        for (score, expected) in cases {
            assert_eq!(AbilityScore::new(score, 0).modifier(&Query::default()), expected);
        }
    }

    #[test]
    fn floor_applies_to_bonused_total() {
        let mut score = AbilityScore::new(4, 0);
        score.add_bonus("drained", -6);
        assert_eq!(score.value(), 0);
        assert_eq!(score.get(&Query::default().unbounded()), -2);
    }

    #[test]
    fn fixed_floor_beats_supplied_floor() {
        let score = AbilityScore::with_bounds(12, 0, Bounds::new(Some(3), Some(30)));
        assert_eq!(score.bounds(), Bounds::new(Some(0), Some(30)));
    }

    #[test]
    fn true_value_ignores_temporary_effects() {
        let mut score = AbilityScore::new(14, 0);
        score.add_bonus(RACIAL, 2);
        score.add_bonus(FROM_LEVEL, 1);
        score.add_bonus("enhancement", 4);
        score.override_with(30);

        assert_eq!(score.value(), 30);
        assert_eq!(score.true_value(), 17);
        assert_eq!(score.true_modifier(), 3);
    }

    #[test]
    fn point_cost_uses_unbonused_score() {
        let table = PointCostTable::standard();
        let mut score = AbilityScore::new(15, 0);
        score.add_bonus(RACIAL, 2);
        assert_eq!(score.point_cost(&table), Ok(8));

        score.set(20);
        assert_eq!(score.point_cost(&table), Err(LookupError::PointCost { score: 20 }));
    }

    #[test]
    fn check_adds_modifier() {
        let score = AbilityScore::new(16, 0);
        let mut source = ScriptedSource::constant(10);
        // 10 + 3 = 13 against DC 12
        assert!(score.check(&mut source, 12, CheckOptions::default(), &Query::default()));
        assert!(!score.check(&mut source, 13, CheckOptions::default(), &Query::default()));
    }
}
