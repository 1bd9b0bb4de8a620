//! Query configuration threaded through every layer of a composed value.

use std::borrow::{Borrow, Cow};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Stacking key of a bonus (e.g. `"racial"`, `"enhancement"`, `"str"`).
///
/// Two bonuses with the same category never apply independently: static
/// amounts sum into one entry, dynamic ones replace the previous entry.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Category(Cow<'static, str>);

impl Category {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for Category {
    fn from(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

impl From<String> for Category {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl Borrow<str> for Category {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Options for a single read of a composed value.
///
/// The layer keys (`masked`, `bounded`, `exclude`, `include`,
/// `with_defaults`) are consumed by the layer that understands them.
/// Domain flags (`melee`, `ranged`, ...) are opaque to the engine and reach
/// dynamic bonus evaluators untouched via [`Query::passthrough`].
///
/// ```
/// # use rules_core::value::Query;
/// let query = Query::default()
///     .unbounded()
///     .exclude("racial")
///     .with_flag("ranged", true);
/// assert!(!query.bounded);
/// assert!(query.flag("ranged", false));
/// assert!(query.flag("melee", true));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    /// Let an override mask short-circuit the chain.
    pub masked: bool,
    /// Clamp into the bounding layer's range.
    pub bounded: bool,
    /// Categories to leave out.
    pub exclude: BTreeSet<Category>,
    /// For a plain ledger: only these categories. For a conditional ledger:
    /// categories to switch on in addition to the defaults.
    pub include: Option<BTreeSet<Category>>,
    /// Start a conditional ledger from its default-active categories.
    pub with_defaults: bool,
    flags: BTreeMap<Cow<'static, str>, bool>,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            masked: true,
            bounded: true,
            exclude: BTreeSet::new(),
            include: None,
            with_defaults: true,
            flags: BTreeMap::new(),
        }
    }
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignore any override mask.
    pub fn unmasked(mut self) -> Self {
        self.masked = false;
        self
    }

    /// Skip clamping.
    pub fn unbounded(mut self) -> Self {
        self.bounded = false;
        self
    }

    /// Don't start from a conditional ledger's default-active set.
    pub fn without_defaults(mut self) -> Self {
        self.with_defaults = false;
        self
    }

    pub fn exclude(mut self, category: impl Into<Category>) -> Self {
        self.exclude.insert(category.into());
        self
    }

    pub fn include(mut self, category: impl Into<Category>) -> Self {
        self.include
            .get_or_insert_with(BTreeSet::new)
            .insert(category.into());
        self
    }

    /// An explicit, empty include set: no bonus category applies.
    pub fn include_none(mut self) -> Self {
        self.include = Some(BTreeSet::new());
        self
    }

    pub fn with_flag(mut self, name: impl Into<Cow<'static, str>>, value: bool) -> Self {
        self.flags.insert(name.into(), value);
        self
    }

    /// Reads a domain flag, falling back to `default` when unset.
    pub fn flag(&self, name: &str, default: bool) -> bool {
        self.flags.get(name).copied().unwrap_or(default)
    }

    /// The query handed to dynamic evaluators: layer keys back at their
    /// defaults, domain flags preserved.
    pub fn passthrough(&self) -> Self {
        Self {
            flags: self.flags.clone(),
            ..Self::default()
        }
    }
}
