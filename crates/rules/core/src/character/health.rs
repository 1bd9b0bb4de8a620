//! Hit points.

use std::collections::VecDeque;
use std::rc::Weak;

use crate::value::{
    Ability, AbilityDerived, AbilityHost, Base, Bonus, BonusLedger, Bounded, Bounds, Category,
    Ledger, Query, Value,
};

/// An ability host that also has a character level.
pub trait Leveled: AbilityHost {
    fn level(&self) -> i32;
}

/// Maximum hit points: rolled hit dice plus `level × CON modifier`,
/// floored at the configured minimum.
#[derive(Clone, Debug)]
pub struct MaxHp {
    value: Bounded<BonusLedger<Base>>,
}

impl MaxHp {
    pub fn new<O: Leveled + 'static>(owner: Weak<O>, min_hp: i32) -> Self {
        let mut value = Bounded::new(BonusLedger::new(Base::default()), Bounds::at_least(min_hp));
        let host: Weak<dyn AbilityHost> = owner.clone();
        let con = AbilityDerived::new(Ability::Con).evaluator(host);
        value.add_bonus(
            Ability::Con.category(),
            Bonus::dynamic(move |query| {
                let level = owner.upgrade().map_or(0, |owner| owner.level());
                level * con.resolve(query)
            }),
        );
        Self { value }
    }

    /// Adds rolled hit points to the base.
    pub fn gain(&mut self, hp: i32) {
        let raw = self.value.raw();
        self.value.set(raw + hp);
    }
}

impl Value for MaxHp {
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

impl Ledger for MaxHp {
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

/// Temporary hit points, one static pool per source.
///
/// Damage drains the oldest source first.
#[derive(Clone, Debug, Default)]
pub struct TemporaryHp {
    pools: BonusLedger<Base>,
    sources: VecDeque<Category>,
}

impl TemporaryHp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds to (or starts) the pool for `source`.
    pub fn add(&mut self, source: impl Into<Category>, amount: i32) {
        let source = source.into();
        let existed = self.pools.contains(source.as_str());
        self.pools.add(source.clone(), amount);

        match (existed, self.pools.contains(source.as_str())) {
            (false, true) => self.sources.push_back(source),
            (true, false) => self.sources.retain(|s| *s != source),
            _ => {}
        }
    }

    /// Remaining temporary hit points across all sources.
    pub fn total(&self) -> i32 {
        self.pools.value()
    }

    pub fn pool(&self, source: &str) -> i32 {
        self.pools
            .get_bonus(source)
            .and_then(Bonus::as_static)
            .unwrap_or(0)
    }

    /// Soaks up to `amount` damage. Returns the part that got through.
    pub fn absorb(&mut self, mut amount: i32) -> i32 {
        while amount > 0 {
            let Some(source) = self.sources.front().cloned() else {
                break;
            };
            let pool = self.pool(source.as_str()).max(0);
            if amount >= pool {
                amount -= pool;
                self.pools.remove(source.as_str());
                self.sources.pop_front();
            } else {
                self.pools.add(source, -amount);
                amount = 0;
            }
        }
        amount
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    struct Owner {
        level: Cell<i32>,
        con_mod: Cell<i32>,
    }

    impl AbilityHost for Owner {
        fn ability_modifier(&self, ability: Ability, _query: &Query) -> i32 {
            match ability {
                Ability::Con => self.con_mod.get(),
                _ => 0,
            }
        }
    }

    impl Leveled for Owner {
        fn level(&self) -> i32 {
            self.level.get()
        }
    }

    fn owner(level: i32, con_mod: i32) -> Rc<Owner> {
        Rc::new(Owner {
            level: Cell::new(level),
            con_mod: Cell::new(con_mod),
        })
    }

    #[test]
    fn constitution_scales_with_level() {
        let owner = owner(3, 2);
        let mut hp = MaxHp::new(Rc::downgrade(&owner), 1);
        hp.gain(10);
        hp.gain(6);
        assert_eq!(hp.value(), 22);

        owner.level.set(4);
        assert_eq!(hp.value(), 24);
    }

    #[test]
    fn never_drops_below_minimum() {
        let owner = owner(5, -3);
        let mut hp = MaxHp::new(Rc::downgrade(&owner), 1);
        hp.gain(4);
        assert_eq!(hp.value(), 1);
        assert_eq!(hp.get(&Query::default().unbounded()), -11);
    }

    #[test]
    fn absorbs_oldest_source_first() {
        let mut temp = TemporaryHp::new();
        temp.add("false life", 5);
        temp.add("aid", 3);
        assert_eq!(temp.total(), 8);

        assert_eq!(temp.absorb(2), 0);
        assert_eq!(temp.pool("false life"), 3);

        assert_eq!(temp.absorb(4), 0);
        assert_eq!(temp.pool("false life"), 0);
        assert_eq!(temp.pool("aid"), 2);

        assert_eq!(temp.absorb(7), 5);
        assert_eq!(temp.total(), 0);
    }

    #[test]
    fn topping_up_keeps_source_order() {
        let mut temp = TemporaryHp::new();
        temp.add("aid", 2);
        temp.add("false life", 4);
        temp.add("aid", 2);
        assert_eq!(temp.absorb(5), 0);
        assert_eq!(temp.pool("aid"), 0);
        assert_eq!(temp.pool("false life"), 3);
    }

    #[test]
    fn spent_source_is_forgotten() {
        let mut temp = TemporaryHp::new();
        temp.add("aid", 3);
        temp.add("aid", -3);
        temp.add("vigor", 2);
        assert_eq!(temp.absorb(3), 1);
    }
}
