//! Conditional ledger - bonuses that only apply when switched on.
//!
//! Permanent bonuses are added as default-active; situational ones (charge,
//! flanking, a favored enemy) stay dormant until a read names them in
//! `include`. For a conditional ledger the query keys read as:
//!
//! ```text
//! applied = (defaults if with_defaults else ∅) ∪ include − exclude
//! ```

use std::collections::BTreeSet;

use super::{Bonus, BonusLedger, Category, Ledger, Query, Selection, Value};

#[derive(Clone, Debug)]
pub struct ConditionalLedger<V> {
    ledger: BonusLedger<V>,
    defaults: BTreeSet<Category>,
}

impl<V> ConditionalLedger<V> {
    pub fn new(inner: V) -> Self {
        Self {
            ledger: BonusLedger::new(inner),
            defaults: BTreeSet::new(),
        }
    }

    /// Adds a bonus; `default` marks the category as active without being
    /// named in `include`.
    pub fn add(&mut self, category: impl Into<Category>, bonus: impl Into<Bonus>, default: bool) {
        let category = category.into();
        if default {
            self.defaults.insert(category.clone());
        }
        self.ledger.add(category, bonus);
    }

    /// Switches a category's default activation after the fact.
    pub fn set_default(&mut self, category: impl Into<Category>, default: bool) {
        let category = category.into();
        if default {
            self.defaults.insert(category);
        } else {
            self.defaults.remove(&category);
        }
    }

    pub fn is_default(&self, category: &str) -> bool {
        self.defaults.contains(category)
    }

    pub fn ledger(&self) -> &BonusLedger<V> {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut BonusLedger<V> {
        &mut self.ledger
    }

    fn applied(&self, query: &Query) -> BTreeSet<Category> {
        let mut applied = if query.with_defaults {
            self.defaults.clone()
        } else {
            BTreeSet::new()
        };
        applied.extend(query.include.iter().flatten().cloned());
        applied.retain(|category| !query.exclude.contains(category));
        applied
    }
}

impl<V: Value> Value for ConditionalLedger<V> {
    fn get(&self, query: &Query) -> i32 {
        let applied = self.applied(query);
        self.ledger.get_selected(Selection::Only(&applied), query)
    }

    fn set(&mut self, raw: i32) {
        self.ledger.set(raw);
    }

    fn raw(&self) -> i32 {
        self.ledger.raw()
    }
}

impl<V> Ledger for ConditionalLedger<V> {
    fn add_bonus(&mut self, category: impl Into<Category>, bonus: impl Into<Bonus>) {
        self.add(category, bonus, true);
    }

    fn bonus(&self, category: &str) -> Option<&Bonus> {
        self.ledger.get_bonus(category)
    }

    fn remove_bonus(&mut self, category: &str) -> Option<Bonus> {
        self.defaults.remove(category);
        self.ledger.remove(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Base;

    fn attack() -> ConditionalLedger<Base> {
        let mut value = ConditionalLedger::new(Base::new(5));
        value.add("enhancement", 1, true);
        value.add("charge", 2, false);
        value.add("flanking", Bonus::dynamic(|_| 2), false);
        value
    }

    #[test]
    fn defaults_apply_without_include() {
        assert_eq!(attack().value(), 6);
    }

    #[test]
    fn situational_bonuses_need_include() {
        let value = attack();
        assert_eq!(value.get(&Query::default().include("charge")), 8);
        assert_eq!(
            value.get(&Query::default().include("charge").include("flanking")),
            10
        );
    }

    #[test]
    fn without_defaults_drops_default_categories() {
        let value = attack();
        let query = Query::default().without_defaults();
        assert_eq!(value.get(&query), 5);
        assert_eq!(value.get(&query.include("enhancement")), 6);
    }

    #[test]
    fn exclude_beats_include_and_defaults() {
        let value = attack();
        let query = Query::default()
            .include("charge")
            .exclude("charge")
            .exclude("enhancement");
        assert_eq!(value.get(&query), 5);
    }

    #[test]
    fn default_flag_can_be_switched_off() {
        let mut value = attack();
        value.set_default("enhancement", false);
        assert!(!value.is_default("enhancement"));
        assert_eq!(value.value(), 5);
    }

    #[test]
    fn removed_default_category_is_forgotten() {
        let mut value = attack();
        assert!(value.remove_bonus("enhancement").is_some());
        assert!(!value.is_default("enhancement"));
        assert_eq!(value.value(), 5);
    }
}
