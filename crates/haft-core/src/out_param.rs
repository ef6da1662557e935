//! Scoped out-parameter bridge between a handle and C-style APIs.
//!
//! Many system APIs return a resource by writing through an
//! out-parameter (`int pipe(int fd[2])`, `CreateFile`-style
//! `HANDLE*` fills, `iconv_open` wrappers). [`OutParam`] stages a raw
//! slot the external code can write into and adopts whatever it left
//! there when the adapter goes out of scope, so the handle's
//! exactly-once release guarantee survives the round trip.
//!
//! The adapter exists only for handles whose value type is
//! [`Nullable`] — there must be a raw "no value" bit pattern the
//! external API understands.

use crate::handle::Unique;
use crate::slot::{Nullable, Slot};

impl<S, D, P> Unique<S, D, P>
where
    S: Slot,
    S::Value: Nullable,
    D: FnMut(S::Value),
    P: Fn(&S::Value) -> bool,
{
    /// Write-only adapter: the staged slot starts as the null marker.
    ///
    /// On scope exit the staged value is adopted with
    /// [`replace`](Unique::replace) semantics. Intended for an empty
    /// handle; a still-held value is released during adoption rather
    /// than leaked.
    pub fn out_param(&mut self) -> OutParam<'_, S, D, P> {
        OutParam {
            staged: Nullable::null(),
            owner: self,
        }
    }

    /// Read-modify-write adapter: a held value is disowned into the
    /// staged slot so the external API sees it and may free or replace
    /// it.
    ///
    /// On scope exit the final slot contents are installed via
    /// [`replace`](Unique::replace), whatever the external call did —
    /// including failing.
    pub fn inout_param(&mut self) -> OutParam<'_, S, D, P> {
        let staged = self
            .try_disown()
            .unwrap_or_else(<S::Value as Nullable>::null);
        OutParam {
            staged,
            owner: self,
        }
    }
}

/// Scoped staging slot for an external API's out-parameter.
///
/// Created by [`Unique::out_param`] or [`Unique::inout_param`]; the
/// mutable borrow pins the owning handle for the adapter's lifetime.
/// Write-back runs in `Drop`, therefore on every exit path including
/// unwinding: nothing the external API left in the slot can leak.
#[must_use]
pub struct OutParam<'a, S, D, P>
where
    S: Slot,
    S::Value: Nullable,
    D: FnMut(S::Value),
    P: Fn(&S::Value) -> bool,
{
    owner: &'a mut Unique<S, D, P>,
    staged: S::Value,
}

impl<S, D, P> OutParam<'_, S, D, P>
where
    S: Slot,
    S::Value: Nullable,
    D: FnMut(S::Value),
    P: Fn(&S::Value) -> bool,
{
    /// The staged raw value, for external code that takes `&mut V`.
    pub fn slot_mut(&mut self) -> &mut S::Value {
        &mut self.staged
    }

    /// The staged raw value as a raw pointer, for FFI signatures that
    /// take `*mut V` (e.g. `*mut *mut c_void`).
    ///
    /// The pointer is valid until the adapter is dropped.
    pub fn as_out_ptr(&mut self) -> *mut S::Value {
        &mut self.staged
    }
}

impl<S, D, P> Drop for OutParam<'_, S, D, P>
where
    S: Slot,
    S::Value: Nullable,
    D: FnMut(S::Value),
    P: Fn(&S::Value) -> bool,
{
    fn drop(&mut self) {
        let staged = std::mem::replace(&mut self.staged, Nullable::null());
        self.owner.replace(staged);
    }
}
