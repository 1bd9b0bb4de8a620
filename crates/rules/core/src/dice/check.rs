//! d20 checks against a difficulty class.

use super::RandomSource;
use crate::value::Query;

/// Sides on the check die.
pub const D20: u32 = 20;

/// How a single check is resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckOptions {
    /// Added to the natural roll.
    pub bonus: i32,
    /// A total equal to the DC succeeds.
    pub tie_win: bool,
    /// A natural 1 always fails and a natural 20 always succeeds.
    pub extremes: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            bonus: 0,
            tie_win: false,
            extremes: true,
        }
    }
}

impl CheckOptions {
    pub fn with_bonus(mut self, bonus: i32) -> Self {
        self.bonus = bonus;
        self
    }

    /// Adds to whatever bonus is already set.
    pub fn plus(mut self, extra: i32) -> Self {
        self.bonus = self.bonus.saturating_add(extra);
        self
    }

    pub fn tie_wins(mut self) -> Self {
        self.tie_win = true;
        self
    }

    pub fn without_extremes(mut self) -> Self {
        self.extremes = false;
        self
    }

    /// Resolves an already-drawn natural roll.
    pub fn resolve(&self, raw: u32, dc: i32) -> bool {
        if self.extremes {
            match raw {
                1 => return false,
                D20 => return true,
                _ => {}
            }
        }
        let total = i32::try_from(raw).unwrap_or(i32::MAX).saturating_add(self.bonus);
        total > dc || (self.tie_win && total == dc)
    }
}

/// Rolls one d20 and resolves it against `dc`.
pub fn check<R: RandomSource + ?Sized>(source: &mut R, dc: i32, options: CheckOptions) -> bool {
    let raw = source.draw(D20);
    let success = options.resolve(raw, dc);
    tracing::trace!(raw, bonus = options.bonus, dc, success, "check resolved");
    success
}

/// A value that can be rolled against with a d20 check.
///
/// Implementors supply the modifier; the provided [`Checkable::check`] adds
/// it to the options' bonus before rolling.
pub trait Checkable {
    /// The amount this value adds to a check under `query`.
    fn check_modifier(&self, query: &Query) -> i32;

    fn check<R: RandomSource + ?Sized>(
        &self,
        source: &mut R,
        dc: i32,
        options: CheckOptions,
        query: &Query,
    ) -> bool {
        check_value(self, source, dc, options, query)
    }
}

/// Rolls a check for `value` with its modifier added to the options' bonus.
///
/// The body of the provided [`Checkable::check`], callable from overrides
/// that add a precondition.
pub fn check_value<C, R>(
    value: &C,
    source: &mut R,
    dc: i32,
    options: CheckOptions,
    query: &Query,
) -> bool
where
    C: Checkable + ?Sized,
    R: RandomSource + ?Sized,
{
    check(source, dc, options.plus(value.check_modifier(query)))
}
