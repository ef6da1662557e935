//! The exclusive-ownership wrapper binding storage, deleter and validity.
//!
//! [`Unique`] owns at most one live resource value. The deleter runs
//! exactly once per valid value over the handle's lifetime — on
//! [`Unique::reset`], [`Unique::replace`] or drop — and never for values
//! the validity predicate rejected. [`Unique::disown`] is the one way to
//! remove a value without releasing it.
//!
//! A validity predicate is taken instead of a single "invalid value"
//! because some libraries use a sentinel other than the storage's empty
//! marker: iconv returns `(iconv_t)-1`, several Win32 APIs return
//! `INVALID_HANDLE_VALUE` alongside null. The predicate layers domain
//! validity on top of storage occupancy, and every empty-or-invalid
//! handle is equivalent to every other one, whatever raw bit pattern it
//! was fed.

use std::fmt;
use std::mem;

use crate::slot::{Boxed, Direct, Slot};

/// A handle over [`Boxed`] storage: any value type, `Option`-backed.
pub type UniqueValue<T, D, P = fn(&T) -> bool> = Unique<Boxed<T>, D, P>;

/// A handle over [`Direct`] storage for a raw `*mut T`, null as empty.
pub type UniquePtr<T, D, P = fn(&*mut T) -> bool> = Unique<Direct<*mut T>, D, P>;

#[cold]
fn invalid_access() -> ! {
    panic!("accessed an empty or invalid handle");
}

/// Exclusive owner of a single resource value.
///
/// `S` is the storage strategy, `D` the deleter invoked exactly once per
/// valid value, `P` the validity predicate. Deleter and predicate are
/// ordinary function values — closures or fn pointers — injected at
/// construction. Per the external-interface contract they must be pure
/// and must not re-enter the handle they serve.
///
/// The handle is movable but not clonable: ownership is a tree, never
/// shared. Assigning over a holding handle drops the old one, which
/// releases its value; the moved-from side of an explicit [`take`] is
/// observably empty.
///
/// [`take`]: Unique::take
#[must_use]
pub struct Unique<S, D, P>
where
    S: Slot,
    D: FnMut(S::Value),
    P: Fn(&S::Value) -> bool,
{
    slot: S,
    deleter: D,
    validity: P,
}

impl<S, D> Unique<S, D, fn(&S::Value) -> bool>
where
    S: Slot,
    D: FnMut(S::Value),
{
    /// Construct from a raw value with storage occupancy as the only
    /// validity rule.
    ///
    /// Equivalent to [`with_validity`] with [`Slot::accepts`] as the
    /// predicate: a [`Direct`] handle rejects the null marker, a
    /// [`Boxed`] handle accepts anything.
    ///
    /// [`with_validity`]: Unique::with_validity
    pub fn new(value: S::Value, deleter: D) -> Self {
        Self::with_validity(value, deleter, S::accepts)
    }

    /// An empty handle with storage occupancy as the only validity rule.
    pub fn empty_accepting(deleter: D) -> Self {
        Self::empty(deleter, S::accepts)
    }
}

impl<S, D, P> Unique<S, D, P>
where
    S: Slot,
    D: FnMut(S::Value),
    P: Fn(&S::Value) -> bool,
{
    /// An empty handle.
    pub fn empty(deleter: D, validity: P) -> Self {
        Self {
            slot: S::default(),
            deleter,
            validity,
        }
    }

    /// Construct from a raw value.
    ///
    /// If `validity` rejects the value (or the storage reports it as its
    /// empty marker), the handle is empty and the value is simply
    /// dropped — the deleter does not run, because nothing valid is
    /// being released.
    pub fn with_validity(value: S::Value, deleter: D, validity: P) -> Self {
        let mut this = Self::empty(deleter, validity);
        this.adopt(value);
        this
    }

    /// Build the resource directly in storage, then test validity.
    ///
    /// If the freshly built value fails the predicate, the storage is
    /// cleared immediately: the value's own `Drop` runs, the domain
    /// deleter does not, since the value was never accepted as a
    /// resource.
    pub fn emplace_with(build: impl FnOnce() -> S::Value, deleter: D, validity: P) -> Self {
        let mut this = Self::empty(deleter, validity);
        this.slot.install(build());
        if !this.is_valid() {
            this.slot.clear();
        }
        this
    }

    /// Whether the handle holds a valid value.
    ///
    /// Re-evaluates the predicate on every call; validity is never
    /// cached.
    pub fn is_valid(&self) -> bool {
        self.value().is_some()
    }

    /// Shared access to the held value, or `None` if empty/invalid.
    pub fn value(&self) -> Option<&S::Value> {
        match self.slot.value() {
            Some(v) if (self.validity)(v) => Some(v),
            _ => None,
        }
    }

    /// Mutable access to the held value, or `None` if empty/invalid.
    pub fn value_mut(&mut self) -> Option<&mut S::Value> {
        if self.is_valid() {
            self.slot.value_mut()
        } else {
            None
        }
    }

    /// Shared access to the held value.
    ///
    /// # Panics
    ///
    /// Panics if the handle is empty or invalid. Callers are expected to
    /// have checked [`is_valid`](Unique::is_valid), or to use
    /// [`value`](Unique::value) and branch.
    pub fn get(&self) -> &S::Value {
        match self.value() {
            Some(v) => v,
            None => invalid_access(),
        }
    }

    /// Mutable access to the held value.
    ///
    /// # Panics
    ///
    /// Panics if the handle is empty or invalid.
    pub fn get_mut(&mut self) -> &mut S::Value {
        match self.value_mut() {
            Some(v) => v,
            None => invalid_access(),
        }
    }

    /// Release the held value, if any, and become empty.
    ///
    /// The deleter runs for a valid value and completes before this
    /// returns. An occupied-but-invalid slot is cleared without touching
    /// the deleter.
    pub fn reset(&mut self) {
        if self.is_valid() {
            if let Some(v) = self.slot.take() {
                (self.deleter)(v);
            }
        } else {
            self.slot.clear();
        }
    }

    /// Release the held value, then adopt `value`.
    ///
    /// The old value's deleter fires before `value` is tested against
    /// the predicate; a rejected `value` leaves the handle empty with no
    /// deleter call on its behalf.
    pub fn replace(&mut self, value: S::Value) {
        self.reset();
        self.adopt(value);
    }

    /// Extract the held value without invoking the deleter.
    ///
    /// Ownership transfers to the caller; the handle is empty
    /// afterwards. This is the sanctioned way to hand a resource to code
    /// that will manage it from then on. An occupied-but-invalid value
    /// is treated as absent.
    ///
    /// # Panics
    ///
    /// Panics if the handle is empty or invalid. Use
    /// [`try_disown`](Unique::try_disown) to branch instead.
    pub fn disown(&mut self) -> S::Value {
        match self.try_disown() {
            Some(v) => v,
            None => invalid_access(),
        }
    }

    /// Extract the held value without invoking the deleter, or `None`
    /// if the handle is empty or invalid.
    pub fn try_disown(&mut self) -> Option<S::Value> {
        if self.is_valid() {
            self.slot.take()
        } else {
            None
        }
    }

    /// Move the held value into a fresh handle, leaving this one empty.
    ///
    /// The observable form of a move: afterwards `self.is_valid()` is
    /// false and no deleter has run. Requires cloneable rules, which
    /// stateless deleters and predicates are.
    pub fn take(&mut self) -> Self
    where
        D: Clone,
        P: Clone,
    {
        Self {
            slot: mem::take(&mut self.slot),
            deleter: self.deleter.clone(),
            validity: self.validity.clone(),
        }
    }

    /// Convert into a read-only view of the same handle.
    ///
    /// Ownership transfers exactly like a move. The conversion is
    /// one-directional: [`ReadOnly`] exposes no mutable accessor and no
    /// way back, so a handle whose release semantics depend on the exact
    /// stored bit pattern cannot be corrupted through it.
    pub fn into_read_only(self) -> ReadOnly<S, D, P> {
        ReadOnly { inner: self }
    }

    /// Install `value` if the storage and the predicate both accept it.
    fn adopt(&mut self, value: S::Value) {
        if S::accepts(&value) && (self.validity)(&value) {
            self.slot.install(value);
        }
    }
}

impl<S, D, P> Drop for Unique<S, D, P>
where
    S: Slot,
    D: FnMut(S::Value),
    P: Fn(&S::Value) -> bool,
{
    fn drop(&mut self) {
        self.reset();
    }
}

impl<S, D, P> fmt::Debug for Unique<S, D, P>
where
    S: Slot,
    S::Value: fmt::Debug,
    D: FnMut(S::Value),
    P: Fn(&S::Value) -> bool,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(v) => f.debug_tuple("Unique").field(v).finish(),
            None => f.write_str("Unique(empty)"),
        }
    }
}

/// Empty/invalid handles form one equivalence class: a handle built from
/// `-1` and one built from `-2` under a "non-negative" predicate compare
/// equal to each other and to a never-filled handle.
impl<S, D, P> PartialEq for Unique<S, D, P>
where
    S: Slot,
    S::Value: PartialEq,
    D: FnMut(S::Value),
    P: Fn(&S::Value) -> bool,
{
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl<S, D, P> Eq for Unique<S, D, P>
where
    S: Slot,
    S::Value: Eq,
    D: FnMut(S::Value),
    P: Fn(&S::Value) -> bool,
{
}

/// Empty/invalid handles order before any valid value.
impl<S, D, P> PartialOrd for Unique<S, D, P>
where
    S: Slot,
    S::Value: PartialOrd,
    D: FnMut(S::Value),
    P: Fn(&S::Value) -> bool,
{
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.value().partial_cmp(&other.value())
    }
}

impl<S, D, P> Ord for Unique<S, D, P>
where
    S: Slot,
    S::Value: Ord,
    D: FnMut(S::Value),
    P: Fn(&S::Value) -> bool,
{
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value().cmp(&other.value())
    }
}

/// A read-only view of a [`Unique`], produced by
/// [`Unique::into_read_only`].
///
/// Owns the resource exactly as the original did — the deleter still
/// runs on drop or [`reset`](ReadOnly::reset) — but never yields a
/// mutable reference to the stored value, and cannot be converted back.
#[must_use]
pub struct ReadOnly<S, D, P>
where
    S: Slot,
    D: FnMut(S::Value),
    P: Fn(&S::Value) -> bool,
{
    inner: Unique<S, D, P>,
}

impl<S, D, P> ReadOnly<S, D, P>
where
    S: Slot,
    D: FnMut(S::Value),
    P: Fn(&S::Value) -> bool,
{
    /// Whether the handle holds a valid value.
    pub fn is_valid(&self) -> bool {
        self.inner.is_valid()
    }

    /// Shared access to the held value, or `None` if empty/invalid.
    pub fn value(&self) -> Option<&S::Value> {
        self.inner.value()
    }

    /// Shared access to the held value.
    ///
    /// # Panics
    ///
    /// Panics if the handle is empty or invalid.
    pub fn get(&self) -> &S::Value {
        self.inner.get()
    }

    /// Release the held value, if any, and become empty.
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Extract the held value without invoking the deleter.
    ///
    /// # Panics
    ///
    /// Panics if the handle is empty or invalid.
    pub fn disown(&mut self) -> S::Value {
        self.inner.disown()
    }

    /// Extract the held value without invoking the deleter, or `None`
    /// if the handle is empty or invalid.
    pub fn try_disown(&mut self) -> Option<S::Value> {
        self.inner.try_disown()
    }
}

impl<S, D, P> fmt::Debug for ReadOnly<S, D, P>
where
    S: Slot,
    S::Value: fmt::Debug,
    D: FnMut(S::Value),
    P: Fn(&S::Value) -> bool,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(v) => f.debug_tuple("ReadOnly").field(v).finish(),
            None => f.write_str("ReadOnly(empty)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haft_test_utils::DeleteTracker;

    // A macro rather than a fn so every handle it builds shares the
    // single opaque deleter type of `DeleteTracker::deleter`, and thus
    // compares against handles built from `tracker.deleter()` directly.
    macro_rules! fd_like {
        ($value:expr, $tracker:expr) => {{
            let h: UniqueValue<i32, _, fn(&i32) -> bool> =
                Unique::with_validity($value, $tracker.deleter(), |fd: &i32| *fd >= 0);
            h
        }};
    }

    #[test]
    fn holds_values() {
        let tracker = DeleteTracker::new();
        assert_eq!(*fd_like!(17, &tracker).get(), 17);
        assert_eq!(*fd_like!(23, &tracker).get(), 23);
    }

    #[test]
    fn predicate_rejects_without_deleting() {
        let tracker = DeleteTracker::new();
        {
            let valid = fd_like!(0, &tracker);
            let invalid = fd_like!(-1, &tracker);
            assert_eq!(tracker.count(), 0);
            assert!(valid.is_valid());
            assert!(!invalid.is_valid());
        }
        // Only the valid handle released anything.
        assert_eq!(tracker.count(), 1);
        assert_eq!(tracker.last(), Some(0));
    }

    #[test]
    fn deleter_fires_once_on_scope_exit() {
        let tracker = DeleteTracker::new();
        drop(fd_like!(42, &tracker));
        assert_eq!(tracker.count(), 1);
        assert_eq!(tracker.last(), Some(42));
    }

    #[test]
    fn take_empties_the_source() {
        let tracker = DeleteTracker::new();
        {
            let mut a = fd_like!(9, &tracker);
            let b = a.take();
            assert!(!a.is_valid());
            assert!(b.is_valid());
            assert_eq!(tracker.count(), 0);
        }
        assert_eq!(tracker.count(), 1);
        assert_eq!(tracker.last(), Some(9));
    }

    #[test]
    fn assigning_over_a_holding_handle_releases_it() {
        let tracker = DeleteTracker::new();
        {
            let mut a = fd_like!(1, &tracker);
            a = fd_like!(2, &tracker);
            assert_eq!(tracker.count(), 1);
            assert_eq!(tracker.last(), Some(1));
            assert_eq!(*a.get(), 2);
        }
        assert_eq!(tracker.count(), 2);
        assert_eq!(tracker.last(), Some(2));
    }

    #[test]
    fn reset_releases_then_empties() {
        let tracker = DeleteTracker::new();
        let mut h = fd_like!(5, &tracker);
        h.reset();
        assert!(!h.is_valid());
        assert_eq!(tracker.count(), 1);
        h.reset();
        assert_eq!(tracker.count(), 1);
    }

    #[test]
    fn replace_releases_old_before_adopting_new() {
        let tracker = DeleteTracker::new();
        let mut h = fd_like!(5, &tracker);
        h.replace(6);
        assert_eq!(tracker.count(), 1);
        assert_eq!(tracker.last(), Some(5));
        assert_eq!(*h.get(), 6);
    }

    #[test]
    fn replace_with_invalid_ends_empty() {
        let tracker = DeleteTracker::new();
        let mut h = fd_like!(5, &tracker);
        h.replace(-3);
        assert_eq!(tracker.count(), 1);
        assert_eq!(tracker.last(), Some(5));
        assert!(!h.is_valid());
        drop(h);
        assert_eq!(tracker.count(), 1);
    }

    #[test]
    fn disown_suppresses_the_deleter() {
        let tracker = DeleteTracker::new();
        let mut h = fd_like!(8, &tracker);
        assert_eq!(h.disown(), 8);
        assert!(!h.is_valid());
        drop(h);
        assert_eq!(tracker.count(), 0);
    }

    #[test]
    fn try_disown_on_invalid_is_none() {
        let tracker = DeleteTracker::new();
        let mut h = fd_like!(-1, &tracker);
        assert_eq!(h.try_disown(), None);
    }

    #[test]
    #[should_panic(expected = "empty or invalid handle")]
    fn disown_on_empty_panics() {
        let tracker = DeleteTracker::new();
        let mut h = fd_like!(-1, &tracker);
        let _ = h.disown();
    }

    #[test]
    #[should_panic(expected = "empty or invalid handle")]
    fn get_on_empty_panics() {
        let tracker = DeleteTracker::new();
        let h = fd_like!(-1, &tracker);
        let _ = h.get();
    }

    #[test]
    fn invalid_handles_are_one_equivalence_class() {
        let tracker = DeleteTracker::new();
        let a = fd_like!(-1, &tracker);
        let b = fd_like!(-2, &tracker);
        let empty: UniqueValue<i32, _, fn(&i32) -> bool> =
            Unique::empty(tracker.deleter(), |fd: &i32| *fd >= 0);
        assert_eq!(a, b);
        assert_eq!(a, empty);
        assert_eq!(tracker.count(), 0);
    }

    #[test]
    fn ordering_by_value_with_empty_first() {
        let tracker = DeleteTracker::new();
        assert!(fd_like!(0, &tracker) < fd_like!(1, &tracker));
        assert!(fd_like!(1, &tracker) > fd_like!(0, &tracker));
        assert!(fd_like!(0, &tracker) <= fd_like!(0, &tracker));
        assert!(fd_like!(-1, &tracker) < fd_like!(0, &tracker));
        assert_eq!(fd_like!(0, &tracker), fd_like!(0, &tracker));
        assert_ne!(fd_like!(0, &tracker), fd_like!(1, &tracker));
    }

    #[test]
    fn emplace_with_valid_value() {
        let tracker = DeleteTracker::new();
        let h = Unique::<Boxed<i32>, _, _>::emplace_with(|| 4, tracker.deleter(), |v: &i32| *v >= 0);
        assert_eq!(*h.get(), 4);
        drop(h);
        assert_eq!(tracker.count(), 1);
    }

    #[test]
    fn emplace_with_rejected_value_drops_without_deleter() {
        use std::rc::Rc;

        let tracker = DeleteTracker::new();
        let witness = Rc::new(());
        let built = Rc::clone(&witness);
        let h = Unique::<Boxed<Rc<()>>, _, _>::emplace_with(
            move || built,
            tracker.deleter(),
            |_: &Rc<()>| false,
        );
        assert!(!h.is_valid());
        // The built value's own Drop ran; the deleter never did.
        assert_eq!(Rc::strong_count(&witness), 1);
        assert_eq!(tracker.count(), 0);
    }

    #[test]
    fn read_only_still_owns_and_releases() {
        let tracker = DeleteTracker::new();
        {
            let ro = fd_like!(11, &tracker).into_read_only();
            assert!(ro.is_valid());
            assert_eq!(*ro.get(), 11);
            assert_eq!(tracker.count(), 0);
        }
        assert_eq!(tracker.count(), 1);
        assert_eq!(tracker.last(), Some(11));
    }

    #[test]
    fn read_only_disown_transfers_ownership() {
        let tracker = DeleteTracker::new();
        let mut ro = fd_like!(12, &tracker).into_read_only();
        assert_eq!(ro.disown(), 12);
        drop(ro);
        assert_eq!(tracker.count(), 0);
    }

    #[test]
    fn direct_storage_rejects_sentinel_via_predicate() {
        // Win32-style: both null and (T*)-1 are invalid.
        let tracker = DeleteTracker::new();
        let not_minus_one = |p: &*mut u8| *p as usize != usize::MAX;

        let null: UniquePtr<u8, _, _> =
            Unique::with_validity(std::ptr::null_mut(), tracker.deleter(), not_minus_one);
        let sentinel: UniquePtr<u8, _, _> =
            Unique::with_validity(usize::MAX as *mut u8, tracker.deleter(), not_minus_one);
        assert!(!null.is_valid());
        assert!(!sentinel.is_valid());
        assert_eq!(null, sentinel);
        drop(null);
        drop(sentinel);
        assert_eq!(tracker.count(), 0);
    }

    #[test]
    fn debug_shows_state() {
        let tracker = DeleteTracker::new();
        assert_eq!(format!("{:?}", fd_like!(3, &tracker)), "Unique(3)");
        assert_eq!(format!("{:?}", fd_like!(-1, &tracker)), "Unique(empty)");
    }
}
