//! Integration tests for the shared value types.

use atlantis_foundation::{Attitude, Direction};
use proptest::prelude::*;

#[test]
fn attitudes_round_trip_through_names() {
    for attitude in Attitude::ALL {
        assert_eq!(Attitude::from_name(attitude.name()), Some(attitude));
        assert_eq!(attitude.to_string(), attitude.name());
    }
    assert_eq!(Attitude::from_name("ALLY"), Some(Attitude::Ally));
    assert_eq!(Attitude::from_name("enemy"), None);
}

#[test]
fn attitudes_are_ordered_by_friendliness() {
    assert!(Attitude::Hostile < Attitude::Neutral);
    assert!(Attitude::Friendly < Attitude::Ally);
}

#[test]
fn directions_read_both_forms() {
    assert_eq!(Direction::from_name("NW"), Some(Direction::Northwest));
    assert_eq!(Direction::from_name("Southeast"), Some(Direction::Southeast));
    assert_eq!(Direction::from_name("up"), None);
    assert_eq!(Direction::South.to_string(), "s");
}

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

proptest! {
    #[test]
    fn opposite_is_an_involution(d in direction()) {
        prop_assert_eq!(d.opposite().opposite(), d);
        prop_assert_ne!(d.opposite(), d);
    }

    #[test]
    fn names_ignore_case(d in direction(), upper in any::<bool>()) {
        let name = if upper { d.name().to_uppercase() } else { d.name().to_string() };
        prop_assert_eq!(Direction::from_name(&name), Some(d));
        prop_assert_eq!(Direction::from_name(d.abbreviation()), Some(d));
    }
}
