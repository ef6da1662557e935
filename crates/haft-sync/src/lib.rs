//! Mutex-guarded values.
//!
//! [`Guarded`] hides its data so the only access path is
//! [`Guarded::lock`], which returns a scoped [`GuardedLock`] accessor.
//! The data cannot be reached while unlocked, and the lock cannot be
//! released twice: [`GuardedLock::unlock`] consumes the accessor, so
//! what the equivalent runtime-checked designs treat as a programmer
//! error is unrepresentable here.
//!
//! ```
//! use haft_sync::Guarded;
//!
//! let counter = Guarded::new(0u32);
//! *counter.lock() += 1;
//! assert_eq!(*counter.lock(), 1);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use std::ops::{Deref, DerefMut};

use parking_lot::{Mutex, MutexGuard};

/// A value reachable only through [`Guarded::lock`].
#[derive(Debug, Default)]
pub struct Guarded<T> {
    data: Mutex<T>,
}

impl<T> Guarded<T> {
    /// Wrap `value` behind a mutex.
    pub fn new(value: T) -> Self {
        Self {
            data: Mutex::new(value),
        }
    }

    /// Block until exclusive access is available.
    ///
    /// The returned accessor holds the lock until it is dropped or
    /// explicitly [`unlock`](GuardedLock::unlock)ed.
    pub fn lock(&self) -> GuardedLock<'_, T> {
        GuardedLock {
            guard: self.data.lock(),
        }
    }

    /// Consume the wrapper and return the inner value.
    pub fn into_inner(self) -> T {
        self.data.into_inner()
    }
}

/// Scoped exclusive access to the data inside a [`Guarded`].
#[must_use = "dropping the lock immediately releases it"]
pub struct GuardedLock<'a, T> {
    guard: MutexGuard<'a, T>,
}

impl<T> GuardedLock<'_, T> {
    /// Release the lock.
    ///
    /// Equivalent to dropping the accessor; consuming `self` makes a
    /// second unlock a compile error rather than a runtime one.
    pub fn unlock(self) {}
}

impl<T> Deref for GuardedLock<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.guard
    }
}

impl<T> DerefMut for GuardedLock<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.guard
    }
}
