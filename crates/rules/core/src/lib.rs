//! Layered attribute composition for tabletop role-playing rules.
//!
//! `rules-core` builds character statistics out of small value layers
//! ([`value`]): a raw base, a category-keyed bonus ledger, optional clamping
//! bounds and an override mask. Ability-derived bonuses read back into their
//! owner through weak handles, and owner-bound children are constructed
//! lazily through [`binding::Deferred`]. The [`dice`] module resolves checks
//! against a pluggable [`dice::RandomSource`], and [`character`] assembles
//! everything into a playable [`character::Character`].
pub mod binding;
pub mod character;
pub mod config;
pub mod dice;
pub mod error;
pub mod value;

pub use binding::{Bind, Deferred};
pub use character::{
    AbilityScore, AbilityScores, AttackBonus, AttackDamage, Character, CharacterBuilder,
    Initiative, Leveled, MaxHp, Skill, SkillSpec, TemporaryHp,
};
pub use config::{PointCost, PointCostTable, RulesConfig, SynergyRule};
pub use dice::{
    CheckOptions, Checkable, D20, DiceExpr, PcgSource, RandomSource, ScriptedSource, check,
    check_value, roll, roll_notation,
};
pub use error::{ConfigError, DiceFormatError, ErrorSeverity, LookupError, RulesError};
pub use value::{
    Ability, AbilityDerived, AbilityHost, Base, Bonus, BonusLedger, Bounded, Bounds, Category,
    ConditionalLedger, Ledger, Overriding, Query, Selection, Value,
};
