//! Storage strategies: how a resource value and its empty state are held.
//!
//! A [`Slot`] owns at most one raw value and knows how to represent
//! "no value". Two strategies are provided:
//!
//! - [`Boxed`] wraps the value in an `Option`, for types that cannot
//!   self-represent absence (an `i32` file descriptor, an aggregate).
//! - [`Direct`] stores the value inline and lets it double as its own
//!   empty marker, for [`Nullable`] types such as raw pointers. No extra
//!   discriminant byte is spent.
//!
//! Slots know nothing about deleters or domain validity; clearing a slot
//! only runs the representation's own destructor (`Drop`). The ownership
//! layer in [`handle`](crate::handle) adds the rest.

use std::mem;

/// Types whose value space contains their own "no value" marker.
///
/// Implemented for raw pointers (null is the marker). Implement it for
/// platform handle types whose empty state is a well-known bit pattern
/// and which should be stored via [`Direct`].
///
/// `null()` must satisfy `Nullable::is_null(&Nullable::null())`.
pub trait Nullable {
    /// The empty marker value.
    fn null() -> Self;

    /// Whether this value is the empty marker.
    fn is_null(&self) -> bool;
}

impl<T> Nullable for *const T {
    fn null() -> Self {
        std::ptr::null()
    }

    fn is_null(&self) -> bool {
        <*const T>::is_null(*self)
    }
}

impl<T> Nullable for *mut T {
    fn null() -> Self {
        std::ptr::null_mut()
    }

    fn is_null(&self) -> bool {
        <*mut T>::is_null(*self)
    }
}

/// A storage strategy for one resource value plus its empty state.
///
/// `Default::default()` is the empty representation. After
/// `slot.install(v)`, `slot.is_occupied()` is true iff `v` was non-empty
/// by the strategy's own definition: always for [`Boxed`], non-null for
/// [`Direct`]. [`Slot::accepts`] reports that definition for a candidate
/// raw value without storing it.
pub trait Slot: Default {
    /// The raw resource value this slot holds.
    type Value;

    /// Install a value, overwriting any prior content.
    ///
    /// A displaced prior value is dropped; no deleter is involved at
    /// this layer.
    fn install(&mut self, value: Self::Value);

    /// Drop any held value and return to the empty representation.
    fn clear(&mut self);

    /// Whether the slot currently holds a value.
    fn is_occupied(&self) -> bool;

    /// Whether a candidate raw value is non-empty by this strategy's
    /// definition, i.e. whether installing it would occupy the slot.
    fn accepts(value: &Self::Value) -> bool;

    /// Shared access to the held value, or `None` if empty.
    fn value(&self) -> Option<&Self::Value>;

    /// Mutable access to the held value, or `None` if empty.
    fn value_mut(&mut self) -> Option<&mut Self::Value>;

    /// Move the held value out, leaving the slot empty.
    fn take(&mut self) -> Option<Self::Value>;
}

/// Option-backed storage for types that cannot self-represent absence.
///
/// Every installed value occupies the slot; `accepts` is always true.
#[derive(Debug)]
pub struct Boxed<T>(Option<T>);

impl<T> Default for Boxed<T> {
    fn default() -> Self {
        Self(None)
    }
}

impl<T> Slot for Boxed<T> {
    type Value = T;

    fn install(&mut self, value: T) {
        self.0 = Some(value);
    }

    fn clear(&mut self) {
        self.0 = None;
    }

    fn is_occupied(&self) -> bool {
        self.0.is_some()
    }

    fn accepts(_value: &T) -> bool {
        true
    }

    fn value(&self) -> Option<&T> {
        self.0.as_ref()
    }

    fn value_mut(&mut self) -> Option<&mut T> {
        self.0.as_mut()
    }

    fn take(&mut self) -> Option<T> {
        self.0.take()
    }
}

/// Inline storage where the value doubles as its own empty marker.
///
/// Installing the marker value itself leaves the slot empty, which is
/// exactly the semantics a null pointer should have. Costs no memory
/// beyond the value.
#[derive(Debug)]
pub struct Direct<T: Nullable>(T);

impl<T: Nullable> Default for Direct<T> {
    fn default() -> Self {
        Self(T::null())
    }
}

impl<T: Nullable> Slot for Direct<T> {
    type Value = T;

    fn install(&mut self, value: T) {
        self.0 = value;
    }

    fn clear(&mut self) {
        self.0 = T::null();
    }

    fn is_occupied(&self) -> bool {
        !self.0.is_null()
    }

    fn accepts(value: &T) -> bool {
        !value.is_null()
    }

    fn value(&self) -> Option<&T> {
        if self.is_occupied() {
            Some(&self.0)
        } else {
            None
        }
    }

    fn value_mut(&mut self) -> Option<&mut T> {
        if self.is_occupied() {
            Some(&mut self.0)
        } else {
            None
        }
    }

    fn take(&mut self) -> Option<T> {
        if self.is_occupied() {
            Some(mem::replace(&mut self.0, T::null()))
        } else {
            None
        }
    }
}
