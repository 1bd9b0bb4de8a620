//! Deferred per-owner binding.
//!
//! Child values such as a character's attack bonus need a handle to their
//! owner (to read ability modifiers, level, other skills). They are built on
//! first access through the owner rather than in its constructor:
//!
//! ```text
//! owner.attack()  ──first read──▶  factory(Weak<owner>)  ──▶  cached in slot
//! owner.attack()  ──later reads──────────────────────────────▶  same object
//! ```
//!
//! Each owner instance carries its own [`Deferred`] slot, so two owners of
//! the same type construct independently. Aliases are plain accessor methods
//! that read the same slot and therefore always return the identical object.
//!
//! # Threading
//!
//! `Deferred` is built on [`OnceCell`] and is deliberately `!Sync`. A port
//! to a multithreaded host must not replace it with an unsynchronized
//! check-then-set: two concurrent first reads would both construct, the later
//! write would win, and side effects of the discarded construction would be
//! lost silently.

use std::cell::{OnceCell, RefCell};
use std::fmt;
use std::rc::Weak;

/// Default construction for a deferred value: build it from its owner.
pub trait Bind<O: ?Sized> {
    fn bind(owner: Weak<O>) -> Self;
}

impl<O: ?Sized, T: Bind<O>> Bind<O> for RefCell<T> {
    fn bind(owner: Weak<O>) -> Self {
        RefCell::new(T::bind(owner))
    }
}

/// A lazily constructed, per-owner child value.
pub struct Deferred<T> {
    name: &'static str,
    slot: OnceCell<T>,
}

impl<T> Deferred<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            slot: OnceCell::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_bound(&self) -> bool {
        self.slot.get().is_some()
    }

    /// The value if it has already been constructed.
    pub fn peek(&self) -> Option<&T> {
        self.slot.get()
    }

    /// Returns the bound value, constructing it with [`Bind::bind`] on first
    /// access.
    pub fn get<O: ?Sized>(&self, owner: &Weak<O>) -> &T
    where
        T: Bind<O>,
    {
        self.get_with(owner, T::bind)
    }

    /// Returns the bound value, constructing it with `factory` on first
    /// access. Later calls ignore `factory`.
    pub fn get_with<O: ?Sized>(&self, owner: &Weak<O>, factory: impl FnOnce(Weak<O>) -> T) -> &T {
        self.slot.get_or_init(|| {
            tracing::debug!(slot = self.name, "binding deferred value");
            factory(owner.clone())
        })
    }

    /// Fallible form of [`Deferred::get_with`]. A failed construction leaves
    /// the slot empty so a later read retries.
    pub fn try_get_with<O: ?Sized, E>(
        &self,
        owner: &Weak<O>,
        factory: impl FnOnce(Weak<O>) -> Result<T, E>,
    ) -> Result<&T, E> {
        if let Some(value) = self.slot.get() {
            return Ok(value);
        }
        let value = factory(owner.clone())?;
        tracing::debug!(slot = self.name, "binding deferred value");
        Ok(self.slot.get_or_init(|| value))
    }
}

impl<T: fmt::Debug> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("name", &self.name)
            .field("value", &self.slot.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    struct Owner {
        this: Weak<Owner>,
        id: u32,
        constructed: Cell<u32>,
        child: Deferred<Child>,
    }

    impl Owner {
        fn new(id: u32) -> Rc<Self> {
            Rc::new_cyclic(|this| Owner {
                this: this.clone(),
                id,
                constructed: Cell::new(0),
                child: Deferred::new("child"),
            })
        }

        fn child(&self) -> &Child {
            self.child.get(&self.this)
        }

        // Alias reading the same slot.
        fn kid(&self) -> &Child {
            self.child()
        }
    }

    struct Child {
        owner: Weak<Owner>,
    }

    impl Bind<Owner> for Child {
        fn bind(owner: Weak<Owner>) -> Self {
            if let Some(owner) = owner.upgrade() {
                owner.constructed.set(owner.constructed.get() + 1);
            }
            Child { owner }
        }
    }

    impl Child {
        fn owner_id(&self) -> Option<u32> {
            self.owner.upgrade().map(|owner| owner.id)
        }
    }

    #[test]
    fn constructs_once_per_owner() {
        let owner = Owner::new(1);
        assert!(!owner.child.is_bound());

        let first: *const Child = owner.child();
        let second: *const Child = owner.child();
        assert!(std::ptr::eq(first, second));
        assert_eq!(owner.constructed.get(), 1);
    }

    #[test]
    fn distinct_owners_get_distinct_children() {
        let a = Owner::new(1);
        let b = Owner::new(2);

        assert!(!std::ptr::eq(a.child(), b.child()));
        assert_eq!(a.child().owner_id(), Some(1));
        assert_eq!(b.child().owner_id(), Some(2));
    }

    #[test]
    fn alias_returns_the_already_bound_object() {
        let owner = Owner::new(7);
        let via_name: *const Child = owner.child();
        let via_alias: *const Child = owner.kid();
        assert!(std::ptr::eq(via_name, via_alias));
        assert_eq!(owner.constructed.get(), 1);
    }

    #[test]
    fn failed_construction_leaves_slot_empty() {
        let owner = Owner::new(3);
        let slot: Deferred<u32> = Deferred::new("fallible");

        let failed: Result<&u32, &str> = slot.try_get_with(&owner.this, |_| Err("not yet"));
        assert_eq!(failed, Err("not yet"));
        assert!(!slot.is_bound());

        let bound: Result<&u32, &str> = slot.try_get_with(&owner.this, |_| Ok(5));
        assert_eq!(bound, Ok(&5));
        let again: Result<&u32, &str> = slot.try_get_with(&owner.this, |_| Ok(9));
        assert_eq!(again, Ok(&5));
    }

    #[test]
    fn refcell_binds_through_inner_type() {
        let owner = Owner::new(4);
        let slot: Deferred<RefCell<Child>> = Deferred::new("wrapped");
        assert_eq!(slot.get(&owner.this).borrow().owner_id(), Some(4));
        assert_eq!(owner.constructed.get(), 1);
    }
}
