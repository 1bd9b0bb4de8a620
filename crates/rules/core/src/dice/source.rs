//! Random sources for die draws.
//!
//! The check engine only needs `draw(sides) -> [1, sides]`. Which generator
//! backs it is the caller's choice:
//!
//! - [`PcgSource`]: deterministic, seeded (replays, simulations)
//! - [`ScriptedSource`]: fixed sequence of results (tests, forced rolls)
//! - [`ThreadRngSource`]: OS-seeded `rand` generator (feature `rand`)

use std::collections::VecDeque;

/// Uniform integer draws for dice.
pub trait RandomSource {
    /// Draws one value uniformly from `1..=sides`. `sides` is at least 1.
    fn draw(&mut self, sides: u32) -> u32;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn draw(&mut self, sides: u32) -> u32 {
        (**self).draw(sides)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn draw(&mut self, sides: u32) -> u32 {
        (**self).draw(sides)
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 64 bits of state, 32-bit output. The same seed always
/// produces the same sequence of draws.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PcgSource {
    state: u64,
}

impl PcgSource {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Advance the PCG state by one step.
    ///
    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation (xorshift high, random rotate).
    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = Self::step(self.state);
        Self::output(self.state)
    }
}

impl RandomSource for PcgSource {
    fn draw(&mut self, sides: u32) -> u32 {
        (self.next_u32() % sides) + 1
    }
}

/// Replays a fixed script of results, cycling when it runs out.
///
/// Each scripted value is clamped into `1..=sides` for the die being drawn.
///
/// ```
/// # use rules_core::dice::{RandomSource, ScriptedSource};
/// let mut source = ScriptedSource::new([20, 1]);
/// assert_eq!(source.draw(20), 20);
/// assert_eq!(source.draw(20), 1);
/// assert_eq!(source.draw(6), 6);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptedSource {
    script: VecDeque<u32>,
}

impl ScriptedSource {
    /// # Panics
    ///
    /// If `script` is empty.
    pub fn new(script: impl IntoIterator<Item = u32>) -> Self {
        let script: VecDeque<u32> = script.into_iter().collect();
        assert!(!script.is_empty(), "scripted source needs at least one roll");
        Self { script }
    }

    /// Every draw yields `roll`.
    pub fn constant(roll: u32) -> Self {
        Self::new([roll])
    }
}

impl RandomSource for ScriptedSource {
    fn draw(&mut self, sides: u32) -> u32 {
        let roll = self.script.front().copied().unwrap_or(1);
        self.script.rotate_left(1);
        roll.clamp(1, sides)
    }
}

/// Draws from `rand::thread_rng()`.
#[cfg(feature = "rand")]
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadRngSource;

#[cfg(feature = "rand")]
impl RandomSource for ThreadRngSource {
    fn draw(&mut self, sides: u32) -> u32 {
        use rand::Rng;
        rand::thread_rng().gen_range(1..=sides)
    }
}
