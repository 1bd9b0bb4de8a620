//! Dice notation: `[N]dS[(+|-)B]`, e.g. `d20`, `3d6`, `2d8+4`, `1d4-1`.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use super::{RandomSource, roll};
use crate::error::DiceFormatError;

static PATTERN: OnceLock<Regex> = OnceLock::new();

fn pattern() -> &'static Regex {
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*(\d*)d(\d+)(?:\s*([+-])\s*(\d+))?\s*$").expect("dice pattern is valid")
    })
}

/// A parsed dice expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiceExpr {
    pub count: u32,
    pub sides: u32,
    pub modifier: i32,
}

impl DiceExpr {
    pub const fn new(count: u32, sides: u32, modifier: i32) -> Self {
        Self {
            count,
            sides,
            modifier,
        }
    }

    /// Rolls the expression against `source`.
    pub fn roll<R: RandomSource + ?Sized>(&self, source: &mut R) -> i32 {
        roll(source, self.count, self.sides, self.modifier)
    }

    /// Smallest possible total.
    pub fn min(&self) -> i32 {
        i32::try_from(self.count)
            .unwrap_or(i32::MAX)
            .saturating_add(self.modifier)
    }

    /// Largest possible total.
    pub fn max(&self) -> i32 {
        self.count
            .checked_mul(self.sides)
            .and_then(|faces| i32::try_from(faces).ok())
            .unwrap_or(i32::MAX)
            .saturating_add(self.modifier)
    }
}

impl FromStr for DiceExpr {
    type Err = DiceFormatError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || DiceFormatError::new(input);
        let captures = pattern().captures(input).ok_or_else(invalid)?;

        let count: u32 = match captures.get(1).map(|m| m.as_str()) {
            None | Some("") => 1,
            Some(digits) => digits.parse().map_err(|_| invalid())?,
        };
        let sides: u32 = captures
            .get(2)
            .ok_or_else(invalid)?
            .as_str()
            .parse()
            .map_err(|_| invalid())?;
        if sides == 0 {
            return Err(invalid());
        }
        // Every total must fit in an i32.
        let faces = count.checked_mul(sides).ok_or_else(invalid)?;
        i32::try_from(faces).map_err(|_| invalid())?;
        let modifier = match (captures.get(3), captures.get(4)) {
            (Some(sign), Some(amount)) => {
                let amount: i32 = amount.as_str().parse().map_err(|_| invalid())?;
                if sign.as_str() == "-" { -amount } else { amount }
            }
            _ => 0,
        };

        Ok(Self::new(count, sides, modifier))
    }
}

impl fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{m}"),
            m => write!(f, "{m}"),
        }
    }
}

/// Parses and rolls `notation` in one step.
pub fn roll_notation<R: RandomSource + ?Sized>(
    source: &mut R,
    notation: &str,
) -> Result<i32, DiceFormatError> {
    let expr: DiceExpr = notation.parse()?;
    Ok(expr.roll(source))
}
