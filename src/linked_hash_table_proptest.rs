#![cfg(test)]

// Property tests for LinkedHashTable kept inside the crate so they can check
// the generation structure, not just the observable map behavior.

use crate::linked_hash_table::LinkedHashTable;
use crate::TableError;
use proptest::prelude::*;
use std::collections::BTreeMap;

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, String),
    Delete(usize),
    Search(usize),
    Contains(String),
    Enumerate,
    Reset,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,6}", 1..=80).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            8 => (idx.clone(), "[a-z0-9]{0,4}").prop_map(|(i, v)| OpI::Insert(i, v)),
            3 => idx.clone().prop_map(OpI::Delete),
            3 => idx.clone().prop_map(OpI::Search),
            1 => "[a-z]{0,6}".prop_map(OpI::Contains),
            1 => Just(OpI::Enumerate),
            1 => Just(OpI::Reset),
        ];
        proptest::collection::vec(op, 1..200).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Property: State-machine equivalence against std::collections::BTreeMap.
// Invariants exercised across random operation sequences:
// - insert either adds a key or overwrites the single existing entry.
// - search/delete report NotFound exactly when the model lacks the key.
// - keys()/values() equal the model's sorted keys and aligned values.
// - Structure: each key in one generation, bucket counts double, counters
//   match stored entries, newest generation at or below the threshold.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut = LinkedHashTable::new();
        let mut model: BTreeMap<String, String> = BTreeMap::new();

        for op in ops {
            match op {
                OpI::Insert(i, v) => {
                    let k = &pool[i];
                    let generations_before = sut.generation_count();
                    let existed = model.contains_key(k);
                    prop_assert_eq!(sut.insert(k, &v), Ok(()));
                    model.insert(k.clone(), v);
                    if existed {
                        prop_assert_eq!(sut.generation_count(), generations_before, "updates never expand");
                    } else {
                        prop_assert!(sut.generation_count() - generations_before <= 1, "at most one expansion per insert");
                    }
                }
                OpI::Delete(i) => {
                    let k = &pool[i];
                    let before = sut.key_count();
                    match model.remove(k) {
                        Some(_) => {
                            prop_assert_eq!(sut.delete(k), Ok(()));
                            prop_assert_eq!(sut.key_count(), before - 1);
                        }
                        None => {
                            prop_assert_eq!(sut.delete(k), Err(TableError::NotFound));
                            prop_assert_eq!(sut.key_count(), before);
                        }
                    }
                }
                OpI::Search(i) => {
                    let k = &pool[i];
                    let expected = model.get(k).cloned().ok_or(TableError::NotFound);
                    prop_assert_eq!(sut.search(k), expected);
                }
                OpI::Contains(s) => {
                    prop_assert_eq!(sut.contains_key(&s), model.contains_key(&s));
                }
                OpI::Enumerate => {
                    let m_keys: Vec<String> = model.keys().cloned().collect();
                    let m_values: Vec<String> = model.values().cloned().collect();
                    prop_assert_eq!(sut.keys(), m_keys);
                    prop_assert_eq!(sut.values(), m_values);
                }
                OpI::Reset => {
                    sut.reset();
                    model.clear();
                    prop_assert_eq!(sut.generation_count(), 1);
                }
            }

            // Post-conditions after each op
            prop_assert_eq!(sut.key_count(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            if let Err(msg) = sut.check_structure() {
                prop_assert!(false, "{}", msg);
            }
        }
    }
}

// Property: bucket_count is the sum of a doubling series and only grows
// between resets, regardless of how keys are deleted.
proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]
    #[test]
    fn prop_bucket_count_never_shrinks(n in 0usize..400, deletes in proptest::collection::vec(0usize..400, 0..100)) {
        let mut sut = LinkedHashTable::new();
        let mut last = sut.bucket_count();
        for i in 0..n {
            sut.insert(&format!("k{}", i), "v").unwrap();
            prop_assert!(sut.bucket_count() >= last);
            last = sut.bucket_count();
        }
        for d in deletes {
            let _ = sut.delete(&format!("k{}", d));
            prop_assert_eq!(sut.bucket_count(), last);
        }
        let gens = sut.generation_count();
        let expected = crate::INITIAL_BUCKETS * ((1usize << gens) - 1);
        prop_assert_eq!(sut.bucket_count(), expected);
    }
}
