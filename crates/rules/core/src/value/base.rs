//! Raw storage - the innermost layer of every chain.

use super::{Query, Value};

/// Holds a raw number. Ignores the query entirely.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Base {
    raw: i32,
}

impl Base {
    pub const fn new(raw: i32) -> Self {
        Self { raw }
    }
}

impl Value for Base {
    fn get(&self, _query: &Query) -> i32 {
        self.raw
    }

    fn set(&mut self, raw: i32) {
        self.raw = raw;
    }

    fn raw(&self) -> i32 {
        self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_query_options() {
        let mut base = Base::new(7);
        let query = Query::default().unmasked().unbounded().include_none();
        assert_eq!(base.get(&query), 7);

        base.set(-3);
        assert_eq!(base.value(), -3);
        assert_eq!(base.raw(), -3);
    }
}
