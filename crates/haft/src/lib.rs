//! haft: exclusive-ownership handles for resources that aren't pointers.
//!
//! This is the facade crate re-exporting the public API from the haft
//! sub-crates. For most users, adding `haft` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use haft::prelude::*;
//!
//! // A POSIX-style descriptor: an i32 where only non-negative values
//! // are real resources. close() stands in for libc::close here.
//! fn close(fd: i32) { let _ = fd; }
//!
//! let fd: UniqueValue<i32, _, _> = Unique::with_validity(3, close, |fd: &i32| *fd >= 0);
//! assert!(fd.is_valid());
//! assert_eq!(*fd.get(), 3);
//!
//! // A failed open() produces -1; the handle normalizes it to empty
//! // and close() will never be called for it.
//! let failed: UniqueValue<i32, _, _> = Unique::with_validity(-1, close, |fd: &i32| *fd >= 0);
//! assert!(!failed.is_valid());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for items not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`handle`] | `haft-core` | [`Unique`](handle::Unique), storage strategies, out-parameter adapter |
//! | [`guard`] | `haft-guard` | [`ScopeGuard`](guard::ScopeGuard) and the `defer` helpers |
//! | [`sync`] | `haft-sync` | [`Guarded`](sync::Guarded) mutex-hidden values |
//! | [`num`] | `haft-num` | [`cast`](num::cast) checked numeric conversions |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Resource handles: storage strategies, the ownership wrapper, and the
/// out-parameter adapter. Re-export of `haft-core`.
pub mod handle {
    pub use haft_core::*;
}

/// Scope-exit guards. Re-export of `haft-guard`.
pub mod guard {
    pub use haft_guard::*;
}

/// Mutex-guarded values. Re-export of `haft-sync`.
pub mod sync {
    pub use haft_sync::*;
}

/// Checked numeric conversions. Re-export of `haft-num`.
pub mod num {
    pub use haft_num::*;
}

/// The most commonly used items, for glob import.
pub mod prelude {
    pub use haft_core::{
        Boxed, Direct, MovedFlag, Nullable, OutParam, ReadOnly, Slot, Unique, UniquePtr,
        UniqueValue,
    };
    pub use haft_guard::{defer, defer_on_success, defer_on_unwind, ScopeGuard};
    pub use haft_num::{cast, CastError};
    pub use haft_sync::Guarded;
}
