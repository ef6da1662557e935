//! Scope-exit guards: run a callback when the enclosing scope ends.
//!
//! [`ScopeGuard`] holds a zero-argument callback and an [`ExitPolicy`]
//! deciding whether the callback runs on every exit, only while the
//! thread is unwinding from a panic, or only when it is not. The policy
//! is evaluated at drop time via [`std::thread::panicking`].
//!
//! ```
//! use haft_guard::defer;
//! use std::cell::Cell;
//!
//! let closed = Cell::new(false);
//! {
//!     let _guard = defer(|| closed.set(true));
//!     assert!(!closed.get());
//! } // guard fires here
//! assert!(closed.get());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use std::thread;

/// When a [`ScopeGuard`]'s callback runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitPolicy {
    /// On every scope exit.
    Always,
    /// Only while the thread is unwinding from a panic.
    OnUnwind,
    /// Only when the thread is not unwinding.
    OnSuccess,
}

/// Runs a callback when dropped, subject to an [`ExitPolicy`].
///
/// Must be bound to a named variable — a `let _guard = ...;` — or it
/// drops immediately; the `#[must_use]` attribute catches the
/// fully-unbound form.
#[must_use = "the guard fires on drop; bind it to a variable"]
pub struct ScopeGuard<F: FnOnce()> {
    callback: Option<F>,
    policy: ExitPolicy,
}

impl<F: FnOnce()> ScopeGuard<F> {
    /// A guard that runs `callback` on every scope exit.
    pub fn on_exit(callback: F) -> Self {
        Self::with_policy(ExitPolicy::Always, callback)
    }

    /// A guard that runs `callback` only if the scope is exited by a
    /// panic.
    pub fn on_unwind(callback: F) -> Self {
        Self::with_policy(ExitPolicy::OnUnwind, callback)
    }

    /// A guard that runs `callback` only if the scope exits normally.
    pub fn on_success(callback: F) -> Self {
        Self::with_policy(ExitPolicy::OnSuccess, callback)
    }

    /// A guard with an explicit policy.
    pub fn with_policy(policy: ExitPolicy, callback: F) -> Self {
        Self {
            callback: Some(callback),
            policy,
        }
    }

    /// Cancel the pending callback without invoking it.
    pub fn release(mut self) {
        self.callback = None;
    }
}

impl<F: FnOnce()> Drop for ScopeGuard<F> {
    fn drop(&mut self) {
        let run = match self.policy {
            ExitPolicy::Always => true,
            ExitPolicy::OnUnwind => thread::panicking(),
            ExitPolicy::OnSuccess => !thread::panicking(),
        };
        if run {
            if let Some(callback) = self.callback.take() {
                callback();
            }
        }
    }
}

/// Shorthand for [`ScopeGuard::on_exit`].
pub fn defer<F: FnOnce()>(callback: F) -> ScopeGuard<F> {
    ScopeGuard::on_exit(callback)
}

/// Shorthand for [`ScopeGuard::on_unwind`].
pub fn defer_on_unwind<F: FnOnce()>(callback: F) -> ScopeGuard<F> {
    ScopeGuard::on_unwind(callback)
}

/// Shorthand for [`ScopeGuard::on_success`].
pub fn defer_on_success<F: FnOnce()>(callback: F) -> ScopeGuard<F> {
    ScopeGuard::on_success(callback)
}
