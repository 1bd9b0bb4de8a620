//! Overriding layer - a temporary fixed value masking the chain beneath.

use super::{Bonus, Category, Ledger, Query, Value};

/// Holds an optional mask. While set, masked reads return it without
/// evaluating anything below.
#[derive(Clone, Debug)]
pub struct Overriding<V> {
    mask: Option<i32>,
    inner: V,
}

impl<V> Overriding<V> {
    pub fn new(inner: V) -> Self {
        Self { mask: None, inner }
    }

    pub fn override_with(&mut self, value: i32) {
        self.mask = Some(value);
    }

    pub fn clear_override(&mut self) {
        self.mask = None;
    }

    pub fn is_overridden(&self) -> bool {
        self.mask.is_some()
    }

    pub fn mask(&self) -> Option<i32> {
        self.mask
    }

    pub fn inner(&self) -> &V {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut V {
        &mut self.inner
    }
}

impl<V: Value> Value for Overriding<V> {
    fn get(&self, query: &Query) -> i32 {
        match self.mask {
            Some(mask) if query.masked => mask,
            _ => self.inner.get(query),
        }
    }

    fn set(&mut self, raw: i32) {
        self.inner.set(raw);
    }

    fn raw(&self) -> i32 {
        self.inner.raw()
    }
}

impl<V: Ledger> Ledger for Overriding<V> {
    fn add_bonus(&mut self, category: impl Into<Category>, bonus: impl Into<Bonus>) {
        self.inner.add_bonus(category, bonus);
    }

    fn bonus(&self, category: &str) -> Option<&Bonus> {
        self.inner.bonus(category)
    }

    fn remove_bonus(&mut self, category: &str) -> Option<Bonus> {
        self.inner.remove_bonus(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Base, BonusLedger, Bounded, Bounds};

    fn chain() -> Overriding<Bounded<BonusLedger<Base>>> {
        let mut value = Overriding::new(Bounded::new(
            BonusLedger::new(Base::new(10)),
            Bounds::new(Some(0), Some(20)),
        ));
        value.add_bonus("enhancement", 4);
        value
    }

    #[test]
    fn mask_wins_over_bounds_and_bonuses() {
        let mut value = chain();
        value.override_with(99);
        assert_eq!(value.value(), 99);
        assert!(value.is_overridden());
    }

    #[test]
    fn unmasked_read_sees_computed_value() {
        let mut value = chain();
        value.override_with(-5);
        assert_eq!(value.get(&Query::default().unmasked()), 14);
    }

    #[test]
    fn clearing_restores_previous_behavior() {
        let mut value = chain();
        let before = value.value();
        value.override_with(1);
        value.clear_override();
        assert_eq!(value.value(), before);
        assert_eq!(value.mask(), None);
    }

    #[test]
    fn masked_read_skips_inner_chain() {
        // Inverted bounds would panic if the inner chain were evaluated.
        let mut value = Overriding::new(Bounded::new(
            Base::new(0),
            Bounds::new(Some(5), Some(1)),
        ));
        value.override_with(3);
        assert_eq!(value.value(), 3);
    }
}
