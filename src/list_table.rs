//! ListSymTable: a single unordered chain.
//!
//! Every operation walks the chain, so all of them are O(n). New bindings
//! are prepended; enumeration is most-recently-inserted first.

use crate::chain::{copy_key, ChainArena, Iter, Link};
use crate::error::{AllocError, InsertError};
use crate::SymbolTable;
use log::{trace, warn};
use std::fmt;

pub struct ListSymTable<V> {
    head: Link,
    bindings: ChainArena<V>,
}

impl<V> ListSymTable<V> {
    pub fn new() -> Self {
        Self {
            head: None,
            bindings: ChainArena::new(),
        }
    }

    fn lookup(&self, key: &str) -> Link {
        self.bindings.find(self.head, |b| b.key == key)
    }
}

impl<V> SymbolTable<V> for ListSymTable<V> {
    /// Never fails: an empty list allocates nothing.
    fn try_new() -> Result<Self, AllocError> {
        Ok(Self::new())
    }

    fn len(&self) -> usize {
        self.bindings.len()
    }

    fn put(&mut self, key: &str, value: V) -> Result<(), InsertError> {
        if self.lookup(key).is_some() {
            trace!("put {:?}: already bound", key);
            return Err(InsertError::DuplicateKey);
        }
        let owned = copy_key(key).map_err(|e| {
            warn!("put {:?}: cannot copy key: {}", key, e);
            InsertError::from(e)
        })?;
        self.bindings.push_front(&mut self.head, owned, 0, value);
        trace!("put {:?}", key);
        Ok(())
    }

    fn replace(&mut self, key: &str, value: V) -> Option<V> {
        let k = self.lookup(key)?;
        Some(std::mem::replace(&mut self.bindings.get_mut(k).value, value))
    }

    fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    fn get(&self, key: &str) -> Option<&V> {
        self.lookup(key).map(|k| &self.bindings.get(k).value)
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let k = self.lookup(key)?;
        Some(&mut self.bindings.get_mut(k).value)
    }

    fn remove(&mut self, key: &str) -> Option<V> {
        let removed = self.bindings.unlink(&mut self.head, |b| b.key == key)?;
        trace!("removed {:?}", key);
        Some(removed.value)
    }

    fn map<C, F>(&mut self, mut apply: F, extra: &mut C)
    where
        C: ?Sized,
        F: FnMut(&str, &mut V, &mut C),
    {
        self.bindings
            .visit_mut(self.head, |k, v| apply(k, v, extra));
    }

    fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.bindings, std::slice::from_ref(&self.head))
    }
}

impl<V> Default for ListSymTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for ListSymTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
