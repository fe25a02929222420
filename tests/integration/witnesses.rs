//! Constrained wrappers and witness selection across crate boundaries

use attest::witness::{equals, hash};
use attest::{
    newtype, ByWitness, EqIgnoreCase, EqNewType, EqNewTypeBy, NonEmpty, OrdNewType, Positive,
};
use std::cmp::Ordering;
use std::collections::HashSet;

newtype!(PositiveInt: i32 where Positive;);
newtype!(Username: String where NonEmpty;);

#[test]
fn positive_int_rejects_negative() {
    let result = PositiveInt::new(-1);
    let err = result.unwrap_err();
    assert!(err.to_string().contains("greater than zero"));
}

#[test]
fn positive_int_accepts_five() {
    let five = PositiveInt::new(5).unwrap();
    assert_eq!(*five.value(), 5);
}

#[test]
fn equal_payloads_compare_equal() {
    let a = PositiveInt::new(5).unwrap();
    let b = PositiveInt::new(5).unwrap();
    let c = PositiveInt::new(6).unwrap();

    assert!(equals::<EqNewType<PositiveInt>, _>(&Some(&a), &Some(&b)));
    assert!(!equals::<EqNewType<PositiveInt>, _>(&Some(&a), &Some(&c)));
    assert_eq!(
        hash::<EqNewType<PositiveInt>, _>(&Some(&a)),
        hash::<EqNewType<PositiveInt>, _>(&Some(&b))
    );
}

#[test]
fn absent_references() {
    let a = PositiveInt::new(5).unwrap();
    assert!(equals::<EqNewType<PositiveInt>, _>(&None, &None));
    assert!(!equals::<EqNewType<PositiveInt>, _>(&Some(&a), &None));
    assert!(!equals::<EqNewType<PositiveInt>, _>(&None, &Some(&a)));
    assert_eq!(hash::<EqNewType<PositiveInt>, _>(&None), 0);
}

#[test]
fn absent_sorts_first() {
    use attest::witness::compare;

    let one = PositiveInt::new(1).unwrap();
    let two = PositiveInt::new(2).unwrap();
    let mut items = vec![Some(&two), None, Some(&one)];
    items.sort_by(|x, y| compare::<OrdNewType<PositiveInt>, _>(x, y));

    assert_eq!(items, vec![None, Some(&one), Some(&two)]);
    assert_eq!(
        compare::<OrdNewType<PositiveInt>, _>(&Some(&one), &Some(&one)),
        Ordering::Equal
    );
}

#[test]
fn strategy_selected_by_type() {
    let lower = Username::new("ada".to_string()).unwrap();
    let upper = Username::new("ADA".to_string()).unwrap();

    assert!(!equals::<EqNewType<Username>, _>(&Some(&lower), &Some(&upper)));
    assert!(equals::<EqNewTypeBy<EqIgnoreCase, Username>, _>(
        &Some(&lower),
        &Some(&upper)
    ));
    assert_eq!(
        hash::<EqNewTypeBy<EqIgnoreCase, Username>, _>(&Some(&lower)),
        hash::<EqNewTypeBy<EqIgnoreCase, Username>, _>(&Some(&upper))
    );
}

#[test]
fn case_insensitive_set_keys() {
    let mut seen: HashSet<ByWitness<EqIgnoreCase, String>> = HashSet::new();
    for name in ["Alice", "ALICE", "bob", "alice", "Bob"] {
        seen.insert(ByWitness::new(name.to_string()));
    }
    assert_eq!(seen.len(), 2);
    assert!(seen.contains(&ByWitness::new("BOB".to_string())));
}

#[test]
fn composed_witness_keys_a_set_of_wrappers() {
    let mut seen = HashSet::new();
    for name in ["alice", "ALICE", "bob"] {
        let user = Username::new(name.to_string()).unwrap();
        seen.insert(ByWitness::<EqNewTypeBy<EqIgnoreCase, Username>, _>::new(user));
    }
    assert_eq!(seen.len(), 2);
}

#[test]
fn empty_username_rejected() {
    assert!(Username::new(String::new()).is_err());
    assert!(Username::is_valid(&"x".to_string()));
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn construction_gate(raw in any::<i32>()) {
            prop_assert_eq!(PositiveInt::new(raw).is_ok(), raw > 0);
        }

        #[test]
        fn equality_follows_payload(x in 1..100i32, y in 1..100i32) {
            let a = PositiveInt::new(x).unwrap();
            let b = PositiveInt::new(y).unwrap();
            prop_assert_eq!(equals::<EqNewType<PositiveInt>, _>(&Some(&a), &Some(&b)), x == y);
        }
    }
}
