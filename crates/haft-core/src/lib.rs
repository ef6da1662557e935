//! Exclusive-ownership resource handles for values that are not pointers.
//!
//! `std` smart pointers assume the resource is a non-null pointer. Plenty
//! of real resources are not: POSIX file descriptors are `i32` with `-1`
//! as the failure value, `locale_t` may or may not be a pointer depending
//! on the platform, and some C libraries (iconv, Win32) use `(T*)-1` as
//! their sentinel instead of null. [`Unique`] generalises `unique_ptr`
//! semantics to any such value:
//!
//! - a pluggable [`Slot`](slot::Slot) decides how the value and its
//!   "no value" state are stored ([`Boxed`](slot::Boxed) or
//!   [`Direct`](slot::Direct));
//! - a validity predicate, independent of storage emptiness, decides
//!   which raw values count as resources at all;
//! - a deleter runs exactly once per valid value, on [`Unique::reset`],
//!   [`Unique::replace`] or drop — never for rejected values, and never
//!   after [`Unique::disown`].
//!
//! [`OutParam`](out_param::OutParam) bridges a handle to C-style APIs
//! that return a resource through an out-parameter.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod handle;
pub mod moved;
pub mod out_param;
pub mod slot;

pub use handle::{ReadOnly, Unique, UniquePtr, UniqueValue};
pub use moved::MovedFlag;
pub use out_param::OutParam;
pub use slot::{Boxed, Direct, Nullable, Slot};
