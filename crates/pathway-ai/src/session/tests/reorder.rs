use std::collections::BTreeSet;

use super::common::option;
use crate::session::reorder::{promote, ReorderError};

#[test]
fn promote_moves_chosen_key_to_rank_zero() {
    let options = vec![
        option("Germany", 92),
        option("Ireland", 85),
        option("UK", 71),
        option("USA", 64),
    ];

    let reordered = promote(&options, "UK").expect("UK is present");

    assert_eq!(reordered.len(), options.len());
    assert_eq!(reordered[0].key(), "UK");

    let keys: Vec<&str> = reordered.iter().map(|option| option.key()).collect();
    let unique: BTreeSet<&str> = keys.iter().copied().collect();
    assert_eq!(unique.len(), keys.len(), "promote introduced a duplicate");

    // Remainder keeps its original relative order.
    assert_eq!(&keys[1..], &["Germany", "Ireland", "USA"]);
}

#[test]
fn promote_of_current_rank_zero_is_identity() {
    let options = vec![option("Germany", 92), option("Ireland", 85)];
    let reordered = promote(&options, "Germany").expect("Germany is present");
    assert_eq!(reordered, options);
}

#[test]
fn promote_on_singleton_list_is_identity() {
    let options = vec![option("Germany", 92)];
    let reordered = promote(&options, "Germany").expect("Germany is present");
    assert_eq!(reordered, options);
}

#[test]
fn promote_rejects_unknown_keys() {
    let options = vec![option("Germany", 92), option("Ireland", 85)];
    match promote(&options, "Canada") {
        Err(ReorderError::KeyNotFound(key)) => assert_eq!(key, "Canada"),
        other => panic!("expected key-not-found, got {other:?}"),
    }
}
