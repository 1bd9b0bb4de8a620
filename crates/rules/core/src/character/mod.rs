//! Characters - the owning entity of every composed value.
//!
//! A [`Character`] lives behind an `Rc` and keeps a weak handle to itself.
//! Ability scores are built in the constructor; every value that needs to
//! read back into the character (hit points, attack, initiative, skills) is
//! a [`Deferred`] slot bound on first access.
//!
//! ```
//! # use rules_core::character::{AbilityScores, Character};
//! # use rules_core::value::{Ability, Ledger, Value};
//! let hero = Character::builder()
//!     .scores(AbilityScores::new(16, 14, 12, 10, 10, 8))
//!     .build();
//!
//! assert_eq!(hero.attack().borrow().value(), 3);
//! hero.ability(Ability::Str).borrow_mut().add_bonus("enhancement", 4);
//! assert_eq!(hero.attack().borrow().value(), 5);
//! ```
//!
//! Values hand out `RefCell`s. Reading a value borrows the abilities and
//! skills it depends on, so hold no mutable borrow across such a read.

pub mod abilities;
pub mod combat;
pub mod health;
pub mod skills;

pub use abilities::{AbilityScore, AbilityScores, FROM_LEVEL, RACIAL};
pub use combat::{AttackBonus, AttackDamage, Initiative, MELEE, RANGED};
pub use health::{Leveled, MaxHp, TemporaryHp};
pub use skills::{ARMOR_PENALTY, SYNERGIES, Skill, SkillSpec};

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use strum::IntoEnumIterator;

use crate::binding::Deferred;
use crate::config::RulesConfig;
use crate::error::{ConfigError, LookupError};
use crate::value::{Ability, AbilityHost, Query, Value};

/// The six ability scores of one character.
#[derive(Debug)]
struct AbilitySet {
    str: RefCell<AbilityScore>,
    dex: RefCell<AbilityScore>,
    con: RefCell<AbilityScore>,
    int: RefCell<AbilityScore>,
    wis: RefCell<AbilityScore>,
    cha: RefCell<AbilityScore>,
}

impl AbilitySet {
    fn new(scores: &AbilityScores, min: i32) -> Self {
        let score = |ability| RefCell::new(AbilityScore::new(scores.get(ability), min));
        Self {
            str: score(Ability::Str),
            dex: score(Ability::Dex),
            con: score(Ability::Con),
            int: score(Ability::Int),
            wis: score(Ability::Wis),
            cha: score(Ability::Cha),
        }
    }

    fn get(&self, ability: Ability) -> &RefCell<AbilityScore> {
        match ability {
            Ability::Str => &self.str,
            Ability::Dex => &self.dex,
            Ability::Con => &self.con,
            Ability::Int => &self.int,
            Ability::Wis => &self.wis,
            Ability::Cha => &self.cha,
        }
    }
}

struct SkillSlot {
    spec: SkillSpec,
    slot: Deferred<RefCell<Skill>>,
}

pub struct Character {
    this: Weak<Character>,
    config: RulesConfig,
    abilities: AbilitySet,
    class_levels: RefCell<BTreeMap<String, i32>>,
    damage: Cell<i32>,
    armor_check_penalty: Cell<i32>,
    temporary_hp: RefCell<TemporaryHp>,
    max_hp: Deferred<RefCell<MaxHp>>,
    initiative: Deferred<RefCell<Initiative>>,
    attack: Deferred<RefCell<AttackBonus>>,
    attack_damage: Deferred<RefCell<AttackDamage>>,
    skills: BTreeMap<String, SkillSlot>,
}

impl Character {
    pub fn builder() -> CharacterBuilder {
        CharacterBuilder::default()
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    pub fn ability(&self, ability: Ability) -> &RefCell<AbilityScore> {
        self.abilities.get(ability)
    }

    pub fn max_hp(&self) -> &RefCell<MaxHp> {
        let min_hp = self.config.max_hp_min;
        self.max_hp
            .get_with(&self.this, |owner| RefCell::new(MaxHp::new(owner, min_hp)))
    }

    pub fn initiative(&self) -> &RefCell<Initiative> {
        self.initiative.get(&self.this)
    }

    /// Alias of [`Character::initiative`].
    pub fn init(&self) -> &RefCell<Initiative> {
        self.initiative()
    }

    pub fn attack(&self) -> &RefCell<AttackBonus> {
        self.attack.get(&self.this)
    }

    /// Alias of [`Character::attack`].
    pub fn attack_bonus(&self) -> &RefCell<AttackBonus> {
        self.attack()
    }

    pub fn attack_damage(&self) -> &RefCell<AttackDamage> {
        self.attack_damage.get(&self.this)
    }

    pub fn temporary_hp(&self) -> &RefCell<TemporaryHp> {
        &self.temporary_hp
    }

    /// The named skill, bound on first access.
    pub fn skill(&self, name: &str) -> Result<&RefCell<Skill>, ConfigError> {
        let entry = self
            .skills
            .get(name)
            .ok_or_else(|| ConfigError::UnknownSkill(name.to_owned()))?;

        if let Some(missing) = entry
            .spec
            .synergies
            .iter()
            .find(|synergy| !self.skills.contains_key(synergy.as_str()))
        {
            return Err(ConfigError::UnknownSynergy {
                skill: name.to_owned(),
                synergy: missing.clone(),
            });
        }

        let synergy = self.config.synergy;
        entry.slot.try_get_with(&self.this, |owner| {
            Skill::new(owner, &entry.spec, synergy).map(RefCell::new)
        })
    }

    pub fn skill_names(&self) -> impl Iterator<Item = &str> {
        self.skills.keys().map(String::as_str)
    }

    /// Records one more level in `class`. Returns the new level in it.
    pub fn add_class_level(&self, class: impl Into<String>) -> i32 {
        let mut levels = self.class_levels.borrow_mut();
        let level = levels.entry(class.into()).or_insert(0);
        *level += 1;
        *level
    }

    pub fn class_level(&self, class: &str) -> i32 {
        self.class_levels.borrow().get(class).copied().unwrap_or(0)
    }

    /// Character level: the sum of all class levels.
    pub fn level(&self) -> i32 {
        self.class_levels.borrow().values().sum()
    }

    pub fn damage(&self) -> i32 {
        self.damage.get()
    }

    /// Sets accumulated damage, never below zero.
    pub fn set_damage(&self, damage: i32) {
        self.damage.set(damage.max(0));
    }

    /// Applies damage, draining temporary hit points first.
    pub fn take_damage(&self, amount: i32) {
        let through = self.temporary_hp.borrow_mut().absorb(amount);
        self.set_damage(self.damage() + through);
    }

    pub fn heal(&self, amount: i32) {
        self.set_damage(self.damage() - amount);
    }

    pub fn hp(&self) -> i32 {
        self.max_hp().borrow().value() - self.damage()
    }

    pub fn armor_check_penalty(&self) -> i32 {
        self.armor_check_penalty.get()
    }

    pub fn set_armor_check_penalty(&self, penalty: i32) {
        self.armor_check_penalty.set(penalty);
    }

    pub fn point_cost(&self, ability: Ability) -> Result<u32, LookupError> {
        self.ability(ability)
            .borrow()
            .point_cost(&self.config.point_costs)
    }

    /// Build points spent across all six abilities.
    pub fn point_buy_total(&self) -> Result<u32, LookupError> {
        Ability::iter().map(|ability| self.point_cost(ability)).sum()
    }
}

impl AbilityHost for Character {
    fn ability_modifier(&self, ability: Ability, query: &Query) -> i32 {
        self.ability(ability).borrow().modifier(query)
    }
}

impl Leveled for Character {
    fn level(&self) -> i32 {
        Character::level(self)
    }
}

impl std::fmt::Debug for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Character")
            .field("abilities", &self.abilities)
            .field("class_levels", &self.class_levels)
            .field("damage", &self.damage)
            .field("skills", &self.skills.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// Builder for constructing characters fluently
#[derive(Clone, Debug, Default)]
pub struct CharacterBuilder {
    config: RulesConfig,
    scores: AbilityScores,
    skills: Vec<SkillSpec>,
}

impl CharacterBuilder {
    pub fn config(mut self, config: RulesConfig) -> Self {
        self.config = config;
        self
    }

    pub fn scores(mut self, scores: AbilityScores) -> Self {
        self.scores = scores;
        self
    }

    pub fn skill(mut self, spec: SkillSpec) -> Self {
        self.skills.push(spec);
        self
    }

    pub fn skills(mut self, specs: impl IntoIterator<Item = SkillSpec>) -> Self {
        self.skills.extend(specs);
        self
    }

    pub fn build(self) -> Rc<Character> {
        let abilities = AbilitySet::new(&self.scores, self.config.ability_min);
        let skills = self
            .skills
            .into_iter()
            .map(|spec| {
                let name = spec.name.clone();
                let slot = SkillSlot {
                    spec,
                    slot: Deferred::new("skill"),
                };
                (name, slot)
            })
            .collect();

        Rc::new_cyclic(|this| Character {
            this: this.clone(),
            config: self.config,
            abilities,
            class_levels: RefCell::new(BTreeMap::new()),
            damage: Cell::new(0),
            armor_check_penalty: Cell::new(0),
            temporary_hp: RefCell::new(TemporaryHp::new()),
            max_hp: Deferred::new("max_hp"),
            initiative: Deferred::new("initiative"),
            attack: Deferred::new("attack"),
            attack_damage: Deferred::new("attack_damage"),
            skills,
        })
    }
}
