//! Dice and checks.
//!
//! Everything random funnels through a [`RandomSource`], so the same rules
//! run identically on a seeded PCG stream, a scripted sequence, or an
//! OS-seeded generator.

pub mod check;
pub mod notation;
pub mod source;

pub use check::{CheckOptions, Checkable, D20, check, check_value};
pub use notation::{DiceExpr, roll_notation};
#[cfg(feature = "rand")]
pub use source::ThreadRngSource;
pub use source::{PcgSource, RandomSource, ScriptedSource};

/// Sum of `count` draws of a `sides`-sided die, plus `bonus`.
///
/// # Panics
///
/// If `sides` is zero.
pub fn roll<R: RandomSource + ?Sized>(source: &mut R, count: u32, sides: u32, bonus: i32) -> i32 {
    assert!(sides > 0, "a die needs at least one side");
    let total = (0..count)
        .map(|_| i32::try_from(source.draw(sides)).unwrap_or(i32::MAX))
        .fold(bonus, i32::saturating_add);
    tracing::trace!(count, sides, bonus, total, "rolled");
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_draws_plus_bonus() {
        let mut source = ScriptedSource::new([1, 6, 3]);
        assert_eq!(roll(&mut source, 3, 6, 2), 12);
    }

    #[test]
    fn zero_dice_is_just_the_bonus() {
        let mut source = ScriptedSource::constant(6);
        assert_eq!(roll(&mut source, 0, 6, 4), 4);
    }

    #[test]
    fn totals_stay_within_dice_range() {
        let mut source = PcgSource::new(99);
        for _ in 0..100 {
            let total = roll(&mut source, 4, 6, -2);
            assert!((2..=22).contains(&total));
        }
    }

    #[test]
    fn huge_totals_saturate() {
        let mut source = ScriptedSource::constant(u32::MAX);
        assert_eq!(roll(&mut source, 100_000, 100_000, 0), i32::MAX);
        assert_eq!(roll(&mut source, 1, u32::MAX, 0), i32::MAX);
    }

    #[test]
    #[should_panic(expected = "at least one side")]
    fn zero_sided_die_panics() {
        let mut source = PcgSource::new(1);
        let _ = roll(&mut source, 1, 0, 0);
    }
}
