#![cfg(test)]

// Property tests for IntKeyedTable kept inside the crate so they can check
// chain structure through crate-private helpers.

use crate::int_keyed_table::IntKeyedTable;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

#[derive(Clone, Debug)]
enum Op {
    Put(i32, i32),
    PutIfAbsent(i32, i32),
    Get(i32),
    Remove(i32),
    Iterate,
    Clear,
}

// Keys are drawn from a small pool scaled by `stride`, so a stride that is
// a multiple of the bucket count forces every key into one chain.
fn arb_scenario(stride: i32) -> impl Strategy<Value = (usize, Vec<Op>)> {
    let key = (-40i32..40).prop_map(move |k| k.wrapping_mul(stride));
    let op = prop_oneof![
        6 => (key.clone(), any::<i32>()).prop_map(|(k, v)| Op::Put(k, v)),
        2 => (key.clone(), any::<i32>()).prop_map(|(k, v)| Op::PutIfAbsent(k, v)),
        3 => key.clone().prop_map(Op::Get),
        3 => key.prop_map(Op::Remove),
        1 => Just(Op::Iterate),
        1 => Just(Op::Clear),
    ];
    (0usize..64, proptest::collection::vec(op, 1..120))
}

fn run(expected_size: usize, ops: Vec<Op>) -> Result<(), TestCaseError> {
    let mut sut: IntKeyedTable<i32> = IntKeyedTable::with_expected_size(expected_size);
    let mut model: HashMap<i32, i32> = HashMap::new();

    for op in ops {
        match op {
            Op::Put(k, v) => {
                let prev = sut
                    .manage_entry(k, || v)
                    .map(|e| core::mem::replace(e.payload_mut(), v));
                prop_assert_eq!(prev, model.insert(k, v));
            }
            Op::PutIfAbsent(k, v) => {
                let existing = sut.manage_entry(k, || v).map(|e| *e.payload());
                prop_assert_eq!(existing, model.get(&k).copied());
                model.entry(k).or_insert(v);
            }
            Op::Get(k) => {
                prop_assert_eq!(sut.get_entry(k).map(|e| *e.payload()), model.get(&k).copied());
                prop_assert_eq!(sut.contains_key(k), model.contains_key(&k));
            }
            Op::Remove(k) => {
                let removed = sut.remove_entry(k).map(|e| e.into_payload());
                prop_assert_eq!(removed, model.remove(&k));
            }
            Op::Iterate => {
                let mut visited = Vec::new();
                sut.for_each_key(|k| visited.push(k));
                let unique: BTreeSet<i32> = visited.iter().copied().collect();
                prop_assert_eq!(unique.len(), visited.len(), "key visited twice");
                let m_keys: BTreeSet<i32> = model.keys().copied().collect();
                prop_assert_eq!(unique, m_keys);
            }
            Op::Clear => {
                sut.clear();
                model.clear();
            }
        }

        // Post-conditions after each op
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert_eq!(sut.chained_len(), sut.len());
        prop_assert!(sut.bucket_count() % 2 == 1);
    }
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - `manage_entry` upserts mirror `HashMap::insert` / `entry().or_insert`.
// - `remove_entry` returns the payload the model held.
// - Traversal visits every live key exactly once.
// - `len` equals the entries reachable through the chains after every op.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((expected, ops) in arb_scenario(1)) {
        run(expected, ops)?;
    }
}

// Property: Same invariants when keys are multiples of 3 * 5 * 7, so they
// collide heavily in the small bucket counts early growth produces.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((expected, ops) in arb_scenario(105)) {
        run(expected, ops)?;
    }
}
