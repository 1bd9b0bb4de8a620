//! Attack bonus, attack damage and initiative.
//!
//! The weapon abilities are registered as conditional entries that stay off
//! by default; the `melee` (default on) and `ranged` (default off) query
//! flags switch them on.

use std::rc::Weak;

use crate::binding::Bind;
use crate::dice::Checkable;
use crate::value::{
    Ability, AbilityDerived, AbilityHost, Base, Bonus, BonusLedger, Category, ConditionalLedger,
    Ledger, Query, Value,
};

/// Query flag for melee attacks (default on). Adds STR.
pub const MELEE: &str = "melee";

/// Query flag for ranged attacks (default off). Adds DEX to hit.
pub const RANGED: &str = "ranged";

fn register_dormant(
    value: &mut ConditionalLedger<Base>,
    owner: &Weak<dyn AbilityHost>,
    ability: Ability,
) {
    AbilityDerived::new(ability).register(value, owner.clone());
    value.set_default(ability.category(), false);
}

/// Bonus to hit.
#[derive(Clone, Debug)]
pub struct AttackBonus {
    value: ConditionalLedger<Base>,
}

impl AttackBonus {
    pub fn new(owner: Weak<dyn AbilityHost>) -> Self {
        let mut value = ConditionalLedger::new(Base::default());
        register_dormant(&mut value, &owner, Ability::Str);
        register_dormant(&mut value, &owner, Ability::Dex);
        Self { value }
    }

    /// A bonus that only applies when a read names it in `include`.
    pub fn add_situational(&mut self, category: impl Into<Category>, bonus: impl Into<Bonus>) {
        self.value.add(category, bonus, false);
    }

    fn weapon_query(query: &Query) -> Query {
        let mut query = query.clone();
        if query.flag(MELEE, true) {
            query = query.include(Ability::Str.category());
        }
        if query.flag(RANGED, false) {
            query = query.include(Ability::Dex.category());
        }
        query
    }
}

impl<O: AbilityHost + 'static> Bind<O> for AttackBonus {
    fn bind(owner: Weak<O>) -> Self {
        Self::new(owner)
    }
}

impl Value for AttackBonus {
    fn get(&self, query: &Query) -> i32 {
        self.value.get(&Self::weapon_query(query))
    }

    fn set(&mut self, raw: i32) {
        self.value.set(raw);
    }

    fn raw(&self) -> i32 {
        self.value.raw()
    }
}

impl Ledger for AttackBonus {
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

impl Checkable for AttackBonus {
    fn check_modifier(&self, query: &Query) -> i32 {
        self.get(query)
    }
}

/// Bonus to damage. Melee attacks add STR.
#[derive(Clone, Debug)]
pub struct AttackDamage {
    value: ConditionalLedger<Base>,
}

impl AttackDamage {
    pub fn new(owner: Weak<dyn AbilityHost>) -> Self {
        let mut value = ConditionalLedger::new(Base::default());
        register_dormant(&mut value, &owner, Ability::Str);
        Self { value }
    }

    pub fn add_situational(&mut self, category: impl Into<Category>, bonus: impl Into<Bonus>) {
        self.value.add(category, bonus, false);
    }
}

impl<O: AbilityHost + 'static> Bind<O> for AttackDamage {
    fn bind(owner: Weak<O>) -> Self {
        Self::new(owner)
    }
}

impl Value for AttackDamage {
    fn get(&self, query: &Query) -> i32 {
        if query.flag(MELEE, true) {
            self.value.get(&query.clone().include(Ability::Str.category()))
        } else {
            self.value.get(query)
        }
    }

    fn set(&mut self, raw: i32) {
        self.value.set(raw);
    }

    fn raw(&self) -> i32 {
        self.value.raw()
    }
}

impl Ledger for AttackDamage {
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

/// Initiative: DEX modifier plus bonuses.
#[derive(Clone, Debug)]
pub struct Initiative {
    value: BonusLedger<Base>,
}

impl Initiative {
    pub fn new(owner: Weak<dyn AbilityHost>) -> Self {
        let mut value = BonusLedger::new(Base::default());
        AbilityDerived::new(Ability::Dex).register(&mut value, owner);
        Self { value }
    }
}

impl<O: AbilityHost + 'static> Bind<O> for Initiative {
    fn bind(owner: Weak<O>) -> Self {
        Self::new(owner)
    }
}

impl Value for Initiative {
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

impl Ledger for Initiative {
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

impl Checkable for Initiative {
    fn check_modifier(&self, query: &Query) -> i32 {
        self.get(query)
    }
}
