//! Value composition - layered attribute architecture.
//!
//! Every derived number on a character sheet is a chain of small layers,
//! each wrapping the next and implementing the same [`Value`] capability.
//!
//! # Canonical Order
//!
//! ```text
//! [ Overriding ]            mask short-circuits everything below
//!      ↓
//! [ Bounded ]               clamps the fully bonused total
//!      ↓
//! [ (Conditional)Ledger ]   category-keyed bonuses, stacking rules
//!      ↓
//! [ AbilityDerived ]        dynamic ledger entries reading the owner
//!      ↓
//! [ Base ]                  raw stored number
//! ```
//!
//! The order is load-bearing: bounds apply to the bonused total, not the raw
//! base, and an override hides bounds as well as bonuses. Ability-derived
//! bonuses have no `get` of their own; they live inside the ledger as
//! dynamic entries.
//!
//! ```
//! # use rules_core::value::*;
//! let mut score = Overriding::new(Bounded::new(
//!     BonusLedger::new(Base::new(10)),
//!     Bounds::new(Some(0), Some(20)),
//! ));
//! score.add_bonus("racial", 2);
//! score.add_bonus("level", Bonus::dynamic(|_| 3));
//! assert_eq!(score.value(), 15);
//!
//! score.override_with(4);
//! assert_eq!(score.value(), 4);
//! assert_eq!(score.get(&Query::default().unmasked()), 15);
//! ```

pub mod ability;
pub mod base;
pub mod bounded;
pub mod conditional;
pub mod ledger;
pub mod overriding;
pub mod query;

pub use ability::{Ability, AbilityDerived, AbilityHost};
pub use base::Base;
pub use bounded::{Bounded, Bounds};
pub use conditional::ConditionalLedger;
pub use ledger::{Bonus, BonusLedger, Evaluator, Selection};
pub use overriding::Overriding;
pub use query::{Category, Query};

/// The shared capability of every layer.
///
/// Reads flow outermost to innermost, writes always land on the innermost
/// [`Base`].
pub trait Value {
    /// Computes the value under the given query.
    fn get(&self, query: &Query) -> i32;

    /// Overwrites the raw stored number.
    fn set(&mut self, raw: i32);

    /// The raw stored number, bypassing every layer.
    fn raw(&self) -> i32;

    /// Computes the value with default query options.
    fn value(&self) -> i32 {
        self.get(&Query::default())
    }
}

/// Layers that hold (or wrap something that holds) a bonus ledger.
///
/// Outer layers forward to the ledger beneath them so a composed value can
/// take bonuses without the caller unwrapping the chain.
pub trait Ledger {
    /// Adds a bonus under the stacking rules of [`BonusLedger::add`].
    ///
    /// Conditional ledgers mark the category as active by default.
    fn add_bonus(&mut self, category: impl Into<Category>, bonus: impl Into<Bonus>);

    /// The current entry for a category, if any.
    fn bonus(&self, category: &str) -> Option<&Bonus>;

    /// Drops a category outright. Returns the removed entry.
    fn remove_bonus(&mut self, category: &str) -> Option<Bonus>;
}
