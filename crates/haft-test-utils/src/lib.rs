//! Shared fixtures for haft tests.
//!
//! The one fixture every crate needs is [`DeleteTracker`]: it hands out
//! cloneable deleter closures and records how often they ran and what
//! they last released, so tests can assert the exactly-once release
//! guarantee.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::rc::Rc;

struct State<V> {
    count: usize,
    last: Option<V>,
}

/// Records deleter invocations: how many, and the last released value.
///
/// Cloning the tracker shares the underlying counters, so a test can
/// keep one copy for assertions while its deleters live inside handles.
pub struct DeleteTracker<V> {
    state: Rc<RefCell<State<V>>>,
}

impl<V> Clone for DeleteTracker<V> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<V> Default for DeleteTracker<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> DeleteTracker<V> {
    /// A fresh tracker with zero recorded invocations.
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(State {
                count: 0,
                last: None,
            })),
        }
    }

    /// A deleter that records each value it is asked to release.
    pub fn deleter(&self) -> impl FnMut(V) + Clone {
        let state = Rc::clone(&self.state);
        move |value: V| {
            let mut state = state.borrow_mut();
            state.count += 1;
            state.last = Some(value);
        }
    }

    /// How many times any deleter from this tracker has run.
    pub fn count(&self) -> usize {
        self.state.borrow().count
    }

    /// Forget all recorded invocations.
    pub fn reset(&self) {
        let mut state = self.state.borrow_mut();
        state.count = 0;
        state.last = None;
    }
}

impl<V: Clone> DeleteTracker<V> {
    /// The most recently released value, if any.
    pub fn last(&self) -> Option<V> {
        self.state.borrow().last.clone()
    }
}
