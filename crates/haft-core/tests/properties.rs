//! Property coverage for handle comparison and validity semantics.

use haft_core::{Unique, UniqueValue};
use proptest::prelude::*;

fn drop_fd(_: i32) {}

fn is_open(fd: &i32) -> bool {
    *fd >= 0
}

type Fd = UniqueValue<i32, fn(i32), fn(&i32) -> bool>;

fn fd(value: i32) -> Fd {
    Unique::with_validity(value, drop_fd, is_open)
}

proptest! {
    #[test]
    fn validity_tracks_the_predicate(v in any::<i32>()) {
        prop_assert_eq!(fd(v).is_valid(), v >= 0);
    }

    #[test]
    fn all_invalid_values_compare_equal(a in i32::MIN..0, b in i32::MIN..0) {
        let empty: Fd = Unique::empty(drop_fd, is_open);
        prop_assert_eq!(fd(a), fd(b));
        prop_assert_eq!(fd(a), empty);
    }

    #[test]
    fn valid_handles_compare_like_their_values(a in 0..i32::MAX, b in 0..i32::MAX) {
        prop_assert_eq!(fd(a) == fd(b), a == b);
        prop_assert_eq!(fd(a) < fd(b), a < b);
        prop_assert_eq!(fd(a).cmp(&fd(b)), a.cmp(&b));
    }

    #[test]
    fn invalid_orders_before_any_valid_value(a in i32::MIN..0, b in 0..=i32::MAX) {
        prop_assert!(fd(a) < fd(b));
    }

    #[test]
    fn disown_returns_exactly_what_was_adopted(v in 0..=i32::MAX) {
        let mut h = fd(v);
        prop_assert_eq!(h.disown(), v);
        prop_assert!(!h.is_valid());
    }

    #[test]
    fn replace_leaves_the_handle_equal_to_a_fresh_one(v in any::<i32>(), w in any::<i32>()) {
        let mut h = fd(v);
        h.replace(w);
        prop_assert_eq!(h, fd(w));
    }
}
