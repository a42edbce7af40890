// Symbol table property tests (public API only).
//
// Property 1: uniqueness. After a successful put(k, v1), put(k, v2) fails and
//  get(k) still yields v1.
// Property 2: length consistency. len() == successful puts - successful
//  removes, and replace() never changes it.
// Property 3: enumeration completeness. iter() and for_each() visit each live
//  key exactly once.
use proptest::prelude::*;
use std::collections::BTreeSet;
use symtable::{HashSymTable, InsertError, ListSymTable, SymbolTable};

fn check_uniqueness<T: SymbolTable<u32>>(mut t: T, key: &str, v1: u32, v2: u32) -> Result<(), TestCaseError> {
    prop_assert_eq!(t.put(key, v1), Ok(()));
    prop_assert_eq!(t.put(key, v2), Err(InsertError::DuplicateKey));
    prop_assert_eq!(t.get(key), Some(&v1));
    prop_assert_eq!(t.len(), 1);
    Ok(())
}

fn check_length<T: SymbolTable<u32>>(mut t: T, ops: &[(u8, u8)]) -> Result<(), TestCaseError> {
    let (mut puts, mut removes) = (0usize, 0usize);
    for &(op, k) in ops {
        let key = format!("k{}", k % 16);
        match op % 3 {
            0 => puts += usize::from(t.put(&key, u32::from(k)).is_ok()),
            1 => removes += usize::from(t.remove(&key).is_some()),
            _ => {
                let before = t.len();
                let _ = t.replace(&key, 0);
                prop_assert_eq!(t.len(), before);
            }
        }
        prop_assert_eq!(t.len(), puts - removes);
    }
    Ok(())
}

fn check_enumeration<T: SymbolTable<u32>>(mut t: T, keys: &BTreeSet<String>) -> Result<(), TestCaseError> {
    for (i, k) in keys.iter().enumerate() {
        t.put(k, i as u32).unwrap();
    }
    let iterated: Vec<&str> = t.iter().map(|(k, _)| k).collect();
    prop_assert_eq!(iterated.len(), keys.len());
    let as_set: BTreeSet<String> = iterated.iter().map(|k| k.to_string()).collect();
    prop_assert_eq!(&as_set, keys);

    let mut visited = Vec::new();
    t.for_each(|k, _| visited.push(k.to_string()));
    prop_assert_eq!(visited.len(), keys.len());
    prop_assert_eq!(visited.into_iter().collect::<BTreeSet<_>>(), as_set);
    Ok(())
}

proptest! {
    #[test]
    fn prop_uniqueness(key in ".{0,12}", v1 in any::<u32>(), v2 in any::<u32>()) {
        check_uniqueness(HashSymTable::new(), &key, v1, v2)?;
        check_uniqueness(ListSymTable::new(), &key, v1, v2)?;
    }

    #[test]
    fn prop_length_consistency(ops in proptest::collection::vec((any::<u8>(), any::<u8>()), 0..200)) {
        check_length(HashSymTable::new(), &ops)?;
        check_length(ListSymTable::new(), &ops)?;
    }

    #[test]
    fn prop_enumeration_completeness(keys in proptest::collection::btree_set("[a-z]{0,6}", 0..64)) {
        check_enumeration(HashSymTable::new(), &keys)?;
        check_enumeration(ListSymTable::new(), &keys)?;
    }
}
