#![cfg(test)]

// Property tests for both stores kept inside the crate so they can reach
// the hash store's bucket statistics without widening the public API.

use crate::hash::bucket_index;
use crate::{GrowthPolicy, HashSymTable, InsertError, ListSymTable, SymTableBuilder, SymbolTable};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::{BTreeMap, BTreeSet, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    Replace(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    Map,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-zA-Z0-9]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Replace(i, v)),
            idx.clone().prop_map(OpI::Remove),
            idx.clone().prop_map(OpI::Get),
            prop_oneof![contains_pool, "[a-z]{0,5}"].prop_map(OpI::Contains),
            (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            Just(OpI::Map),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

// State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - `put` succeeds exactly when the key is absent; duplicates leave the stored value.
// - `replace` returns the previous value when present and never inserts.
// - `remove` returns the model's value and unbinds the key; absent keys change nothing.
// - `get`/`contains` parity with the model.
// - `map` visits each live key exactly once and in-place mutation is observed.
// - `len`/`is_empty` parity with the model after each op.
fn run_state_machine<T: SymbolTable<i32>>(
    mut sut: T,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, i32> = HashMap::new();
    for op in ops {
        match op {
            OpI::Put(i, v) => {
                let k = &pool[i];
                let already = model.contains_key(k);
                match sut.put(k, v) {
                    Ok(()) => {
                        prop_assert!(!already, "put must fail on duplicate");
                        model.insert(k.clone(), v);
                    }
                    Err(InsertError::DuplicateKey) => {
                        prop_assert!(already, "duplicate error only when key exists");
                    }
                    Err(e) => prop_assert!(false, "unexpected error: {}", e),
                }
            }
            OpI::Replace(i, v) => {
                let k = &pool[i];
                let prev = sut.replace(k, v);
                let expected = model.get_mut(k).map(|mv| std::mem::replace(mv, v));
                prop_assert_eq!(prev, expected);
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.remove(k), model.remove(k));
                prop_assert!(!sut.contains(k));
            }
            OpI::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k));
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains(&s), model.contains_key(&s));
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                if let Some(v) = sut.get_mut(k) {
                    *v = v.wrapping_add(d);
                    let mv = model.get_mut(k).expect("present in model");
                    *mv = mv.wrapping_add(d);
                } else {
                    prop_assert!(!model.contains_key(k));
                }
            }
            OpI::Map => {
                let mut visits: BTreeMap<String, usize> = BTreeMap::new();
                sut.map(
                    |k, v, seen: &mut BTreeMap<String, usize>| {
                        *seen.entry(k.to_string()).or_default() += 1;
                        *v = v.wrapping_add(1);
                    },
                    &mut visits,
                );
                for mv in model.values_mut() {
                    *mv = mv.wrapping_add(1);
                }
                prop_assert!(visits.values().all(|&n| n == 1), "each key visited once");
                let m_keys: BTreeSet<_> = model.keys().cloned().collect();
                let s_keys: BTreeSet<_> = visits.into_keys().collect();
                prop_assert_eq!(s_keys, m_keys);
            }
        }

        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert_eq!(sut.iter().count(), model.len());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn prop_hash_state_machine((pool, ops) in arb_scenario()) {
        run_state_machine(HashSymTable::new(), &pool, ops)?;
    }

    #[test]
    fn prop_list_state_machine((pool, ops) in arb_scenario()) {
        run_state_machine(ListSymTable::new(), &pool, ops)?;
    }

    // Same invariants with growth triggered almost immediately, so bindings
    // are relinked across several tiers mid-sequence.
    #[test]
    fn prop_growing_hash_state_machine((pool, ops) in arb_scenario()) {
        let t = SymTableBuilder::new()
            .with_growth(GrowthPolicy::LoadFactor(0.001))
            .build();
        run_state_machine(t, &pool, ops)?;
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]

    // Property: the hash store enumerates bindings in non-decreasing bucket
    // order, and each binding sits in the bucket its key hashes to.
    #[test]
    fn prop_hash_enumeration_follows_buckets(keys in proptest::collection::btree_set(".{0,8}", 0..200)) {
        let mut t = HashSymTable::new();
        for k in &keys {
            t.put(k, ()).unwrap();
        }
        let order: Vec<usize> = t.iter().map(|(k, _)| bucket_index(k, t.bucket_count())).collect();
        prop_assert!(order.windows(2).all(|w| w[0] <= w[1]));
        let lens = t.chain_lengths();
        prop_assert_eq!(lens.iter().sum::<usize>(), keys.len());
        for k in &keys {
            prop_assert!(lens[bucket_index(k, t.bucket_count())] > 0);
        }
    }

    // Property: both stores hold the same bindings after the same sequence of
    // puts and removes.
    #[test]
    fn prop_stores_agree(ops in proptest::collection::vec((any::<bool>(), "[a-c]{0,3}", any::<u8>()), 0..100)) {
        let mut h = HashSymTable::new();
        let mut l = ListSymTable::new();
        for (is_put, k, v) in ops {
            if is_put {
                prop_assert_eq!(h.put(&k, v).is_ok(), l.put(&k, v).is_ok());
            } else {
                prop_assert_eq!(h.remove(&k), l.remove(&k));
            }
        }
        let hs: BTreeMap<&str, u8> = h.iter().map(|(k, v)| (k, *v)).collect();
        let ls: BTreeMap<&str, u8> = l.iter().map(|(k, v)| (k, *v)).collect();
        prop_assert_eq!(hs, ls);
    }
}
