//! Bonus ledger - category-keyed bonuses with stacking rules.
//!
//! Each category holds at most one [`Bonus`]:
//!
//! | existing | incoming | stored |
//! |----------|----------|--------|
//! | none     | any      | incoming |
//! | static   | static   | sum |
//! | dynamic  | any      | incoming |
//! | any      | dynamic  | incoming |
//!
//! A static entry that nets to exactly zero is removed.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::rc::Rc;

use super::{Category, Ledger, Query, Value};

/// Re-evaluated on every read. Receives the pass-through query.
pub type Evaluator = Rc<dyn Fn(&Query) -> i32>;

/// A single ledger entry.
#[derive(Clone)]
pub enum Bonus {
    /// Fixed amount, summed with later static amounts of the same category.
    Static(i32),

    /// Computed on every read, never cached.
    Dynamic(Evaluator),
}

impl Bonus {
    pub fn dynamic(evaluator: impl Fn(&Query) -> i32 + 'static) -> Self {
        Bonus::Dynamic(Rc::new(evaluator))
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, Bonus::Dynamic(_))
    }

    pub fn as_static(&self) -> Option<i32> {
        match self {
            Bonus::Static(amount) => Some(*amount),
            Bonus::Dynamic(_) => None,
        }
    }

    /// The amount this entry contributes right now.
    pub fn resolve(&self, query: &Query) -> i32 {
        match self {
            Bonus::Static(amount) => *amount,
            Bonus::Dynamic(evaluator) => evaluator(query),
        }
    }
}

impl From<i32> for Bonus {
    fn from(amount: i32) -> Self {
        Bonus::Static(amount)
    }
}

impl fmt::Debug for Bonus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bonus::Static(amount) => f.debug_tuple("Static").field(amount).finish(),
            Bonus::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// Which ledger categories a read should sum.
#[derive(Clone, Copy, Debug)]
pub enum Selection<'a> {
    /// Exactly these categories (absent ones contribute nothing).
    Only(&'a BTreeSet<Category>),

    /// Every present category except these.
    AllExcept(&'a BTreeSet<Category>),
}

impl Selection<'_> {
    fn admits(&self, category: &Category) -> bool {
        match self {
            Selection::Only(include) => include.contains(category),
            Selection::AllExcept(exclude) => !exclude.contains(category),
        }
    }
}

/// Adds selected bonuses on top of the inner value.
#[derive(Clone, Debug)]
pub struct BonusLedger<V> {
    bonuses: BTreeMap<Category, Bonus>,
    inner: V,
}

impl<V> BonusLedger<V> {
    pub fn new(inner: V) -> Self {
        Self {
            bonuses: BTreeMap::new(),
            inner,
        }
    }

    /// Adds a bonus following the stacking table in the module docs.
    pub fn add(&mut self, category: impl Into<Category>, bonus: impl Into<Bonus>) {
        let category = category.into();
        let merged = match (self.bonuses.remove(&category), bonus.into()) {
            (Some(Bonus::Static(old)), Bonus::Static(new)) => {
                Bonus::Static(old.saturating_add(new))
            }
            (_, incoming) => incoming,
        };

        if let Bonus::Static(0) = merged {
            tracing::debug!(category = %category, "bonus netted to zero, removing");
            return;
        }
        self.bonuses.insert(category, merged);
    }

    pub fn remove(&mut self, category: &str) -> Option<Bonus> {
        self.bonuses.remove(category)
    }

    pub fn get_bonus(&self, category: &str) -> Option<&Bonus> {
        self.bonuses.get(category)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.bonuses.contains_key(category)
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.bonuses.keys()
    }

    pub fn len(&self) -> usize {
        self.bonuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }

    pub fn inner(&self) -> &V {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut V {
        &mut self.inner
    }

    /// Sum of the selected entries, without the inner value.
    pub fn total(&self, selection: Selection<'_>, query: &Query) -> i32 {
        let passthrough = query.passthrough();
        self.bonuses
            .iter()
            .filter(|(category, _)| selection.admits(category))
            .map(|(_, bonus)| bonus.resolve(&passthrough))
            .fold(0, i32::saturating_add)
    }
}

impl<V: Default> Default for BonusLedger<V> {
    fn default() -> Self {
        Self::new(V::default())
    }
}

impl<V: Value> BonusLedger<V> {
    /// Inner value plus the selected entries.
    pub fn get_selected(&self, selection: Selection<'_>, query: &Query) -> i32 {
        self.inner.get(query).saturating_add(self.total(selection, query))
    }
}

impl<V: Value> Value for BonusLedger<V> {
    fn get(&self, query: &Query) -> i32 {
        let selection = match &query.include {
            Some(include) => Selection::Only(include),
            None => Selection::AllExcept(&query.exclude),
        };
        self.get_selected(selection, query)
    }

    fn set(&mut self, raw: i32) {
        self.inner.set(raw);
    }

    fn raw(&self) -> i32 {
        self.inner.raw()
    }
}

impl<V> Ledger for BonusLedger<V> {
    fn add_bonus(&mut self, category: impl Into<Category>, bonus: impl Into<Bonus>) {
        self.add(category, bonus);
    }

    fn bonus(&self, category: &str) -> Option<&Bonus> {
        self.get_bonus(category)
    }

    fn remove_bonus(&mut self, category: &str) -> Option<Bonus> {
        self.remove(category)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::value::{Base, Bounded, Bounds};

    fn ledger(base: i32) -> BonusLedger<Base> {
        BonusLedger::new(Base::new(base))
    }

    #[test]
    fn static_bonuses_in_one_category_sum() {
        let mut value = ledger(5);
        value.add("racial", 2);
        value.add("racial", 3);
        assert_eq!(value.get_bonus("racial").and_then(Bonus::as_static), Some(5));
        assert_eq!(value.value(), 10);
    }

    #[test]
    fn netting_to_zero_removes_the_category() {
        let mut value = ledger(5);
        value.add("racial", 2);
        value.add("racial", -2);
        assert!(!value.contains("racial"));
        assert!(value.is_empty());
        assert_eq!(value.get(&Query::default().include("racial")), 5);
    }

    #[test]
    fn distinct_categories_stack() {
        let mut value = ledger(10);
        value.add("racial", 2);
        value.add("morale", 1);
        value.add("enhancement", 4);
        assert_eq!(value.value(), 17);
        assert_eq!(value.get(&Query::default().exclude("morale")), 16);
    }

    #[test]
    fn include_selects_exactly_one_category() {
        let mut value = ledger(10);
        value.add("racial", 2);
        value.add("morale", 1);
        value.add("luck", Bonus::dynamic(|_| 7));

        assert_eq!(value.get(&Query::default().include("racial")), 12);
        assert_eq!(value.get(&Query::default().include("luck")), 17);
        // Include wins over exclude for a plain ledger.
        let query = Query::default().include("racial").exclude("racial");
        assert_eq!(value.get(&query), 12);
    }

    #[test]
    fn unknown_include_contributes_nothing() {
        let mut value = ledger(3);
        value.add("racial", 2);
        assert_eq!(value.get(&Query::default().include("sacred")), 3);
        assert_eq!(value.get(&Query::default().include_none()), 3);
    }

    #[test]
    fn dynamic_replaces_static() {
        let mut value = ledger(0);
        value.add("level", 4);
        value.add("level", Bonus::dynamic(|_| 1));
        value.add("level", Bonus::dynamic(|_| 2));
        assert_eq!(value.value(), 2);
    }

    #[test]
    fn static_replaces_dynamic() {
        let mut value = ledger(0);
        value.add("level", Bonus::dynamic(|_| 9));
        value.add("level", 3);
        assert_eq!(value.value(), 3);

        value.add("level", Bonus::dynamic(|_| 9));
        value.add("level", 0);
        assert!(!value.contains("level"));
    }

    #[test]
    fn dynamic_bonus_is_evaluated_on_every_read() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let mut value = ledger(1);
        value.add(
            "haste",
            Bonus::dynamic(move |_| {
                counter.set(counter.get() + 1);
                counter.get()
            }),
        );

        assert_eq!(value.value(), 2);
        assert_eq!(value.value(), 3);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn dynamic_bonus_sees_domain_flags_only() {
        let mut value = ledger(0);
        value.add(
            "flanking",
            Bonus::dynamic(|query| {
                assert!(query.exclude.is_empty());
                assert!(query.bounded);
                if query.flag("melee", true) { 2 } else { 0 }
            }),
        );

        let ranged = Query::default().unbounded().exclude("morale").with_flag("melee", false);
        assert_eq!(value.get(&ranged), 0);
        assert_eq!(value.value(), 2);
    }

    #[test]
    fn extreme_amounts_saturate() {
        let mut value = ledger(0);
        value.add("racial", i32::MAX);
        value.add("racial", 1);
        assert_eq!(value.get_bonus("racial").and_then(Bonus::as_static), Some(i32::MAX));

        value.add("morale", i32::MAX);
        value.set(i32::MAX);
        assert_eq!(value.value(), i32::MAX);
    }

    #[test]
    fn end_to_end_bounded_total() {
        let mut value = Bounded::new(ledger(10), Bounds::new(Some(0), Some(20)));
        value.add_bonus("racial", 2);
        value.add_bonus("level", Bonus::dynamic(|_| 3));
        assert_eq!(value.value(), 15);

        value.add_bonus("racial", -12);
        assert_eq!(value.bonus("racial").and_then(Bonus::as_static), Some(-10));
        assert_eq!(value.value(), 3);
    }
}
