//! Bounding layer - clamps the value computed beneath it.

use super::{Bonus, Category, Ledger, Query, Value};

/// Optional inclusive bounds.
///
/// Bounds are fixed when the layer is constructed. Value types that hard-code
/// a bound build it with [`Bounds::or`], so the fixed side always wins over
/// whatever the caller supplies.
///
/// ```
/// # use rules_core::value::Bounds;
/// let fixed = Bounds::at_least(1);
/// let merged = fixed.or(Bounds::new(Some(5), Some(40)));
/// assert_eq!(merged, Bounds::new(Some(1), Some(40)));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: Option<i32>,
    pub max: Option<i32>,
}

impl Bounds {
    /// No clamping on either side.
    pub const UNBOUNDED: Self = Self {
        min: None,
        max: None,
    };

    pub const fn new(min: Option<i32>, max: Option<i32>) -> Self {
        Self { min, max }
    }

    pub const fn at_least(min: i32) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub const fn at_most(max: i32) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// Fills the sides left open here from `supplied`.
    pub const fn or(self, supplied: Bounds) -> Self {
        Self {
            min: match self.min {
                Some(min) => Some(min),
                None => supplied.min,
            },
            max: match self.max {
                Some(max) => Some(max),
                None => supplied.max,
            },
        }
    }

    /// Clamps `value` using whichever bounds are present.
    ///
    /// # Panics
    ///
    /// If both bounds are present and `min > max`.
    pub fn clamp(&self, value: i32) -> i32 {
        if let (Some(min), Some(max)) = (self.min, self.max) {
            assert!(min <= max, "bad bounds: min {min} exceeds max {max}");
        }
        let value = self.min.map_or(value, |min| value.max(min));
        self.max.map_or(value, |max| value.min(max))
    }
}

/// Clamps the inner value into [`Bounds`] unless the query disables it.
#[derive(Clone, Debug)]
pub struct Bounded<V> {
    bounds: Bounds,
    inner: V,
}

impl<V> Bounded<V> {
    pub fn new(inner: V, bounds: Bounds) -> Self {
        Self { bounds, inner }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn inner(&self) -> &V {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut V {
        &mut self.inner
    }
}

impl<V: Value> Value for Bounded<V> {
    fn get(&self, query: &Query) -> i32 {
        let value = self.inner.get(query);
        if !query.bounded {
            return value;
        }
        self.bounds.clamp(value)
    }

    fn set(&mut self, raw: i32) {
        self.inner.set(raw);
    }

    fn raw(&self) -> i32 {
        self.inner.raw()
    }
}

impl<V: Ledger> Ledger for Bounded<V> {
    fn add_bonus(&mut self, category: impl Into<Category>, bonus: impl Into<Bonus>) {
        self.inner.add_bonus(category, bonus);
    }

    fn bonus(&self, category: &str) -> Option<&Bonus> {
        self.inner.bonus(category)
    }

    fn remove_bonus(&mut self, category: &str) -> Option<Bonus> {
        self.inner.remove_bonus(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Base;

    #[test]
    fn clamps_each_present_side() {
        let low = Bounded::new(Base::new(-4), Bounds::new(Some(0), Some(20)));
        let high = Bounded::new(Base::new(25), Bounds::new(Some(0), Some(20)));
        let open = Bounded::new(Base::new(25), Bounds::at_least(0));

        assert_eq!(low.value(), 0);
        assert_eq!(high.value(), 20);
        assert_eq!(open.value(), 25);
    }

    #[test]
    fn unbounded_query_sees_raw_result() {
        for raw in [-50, 0, 7, 20, 99] {
            let value = Bounded::new(Base::new(raw), Bounds::new(Some(0), Some(20)));
            assert_eq!(value.get(&Query::default().unbounded()), raw);
        }
    }

    #[test]
    #[should_panic(expected = "bad bounds")]
    fn inverted_bounds_panic_on_evaluation() {
        let value = Bounded::new(Base::new(3), Bounds::new(Some(10), Some(5)));
        let _ = value.value();
    }

    #[test]
    fn inverted_bounds_are_ignored_when_unbounded() {
        let value = Bounded::new(Base::new(3), Bounds::new(Some(10), Some(5)));
        assert_eq!(value.get(&Query::default().unbounded()), 3);
    }

    #[test]
    fn set_writes_through_to_base() {
        let mut value = Bounded::new(Base::new(3), Bounds::at_most(5));
        value.set(9);
        assert_eq!(value.raw(), 9);
        assert_eq!(value.value(), 5);
    }
}
