//! A "has this been moved from" diagnostic flag.

use std::mem;

/// Boolean-like diagnostic that records whether its owner was moved from.
///
/// Starts as "not moved". [`take`](MovedFlag::take) models a move: the
/// returned flag inherits the source's prior state and the source reads
/// as moved from then on. `Clone` models a copy and leaves both sides
/// unchanged.
///
/// Rust moves are destructive, so unlike its C++ ancestors this flag
/// cannot flip implicitly; the handle family exposes moves as explicit
/// `take`-style operations, and this type follows the same convention.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MovedFlag {
    moved: bool,
}

impl MovedFlag {
    /// A fresh, not-moved flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the owner has been moved from.
    pub fn is_moved(&self) -> bool {
        self.moved
    }

    /// Perform a move: the result carries this flag's prior state and
    /// this flag reads as moved afterwards.
    pub fn take(&mut self) -> Self {
        Self {
            moved: mem::replace(&mut self.moved, true),
        }
    }
}
