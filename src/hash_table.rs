//! HashSymTable: bucketed store with separate chaining.
//!
//! Each bucket holds the head of a chain in the shared binding arena. A key
//! lives in bucket `hash_key(key) % bucket_count`; new bindings become the
//! head of their chain, so within a bucket enumeration is
//! most-recently-inserted first. Every binding caches its full hash, which
//! makes chain scans reject mismatches without a string compare and lets
//! growth relink bindings without rehashing their keys.

use crate::chain::{copy_key, Binding, ChainArena, Iter, Link};
use crate::config::{GrowthPolicy, TableConfig};
use crate::error::{AllocError, InsertError};
use crate::hash::{hash_key, reduce, BUCKET_COUNTS};
use crate::SymbolTable;
use log::{debug, trace, warn};
use std::collections::TryReserveError;
use std::fmt;

pub struct HashSymTable<V> {
    buckets: Vec<Link>,
    bindings: ChainArena<V>,
    tier: usize,
    growth: GrowthPolicy,
}

fn alloc_buckets(n: usize) -> Result<Vec<Link>, TryReserveError> {
    let mut buckets = Vec::new();
    buckets.try_reserve_exact(n)?;
    buckets.resize(n, None);
    Ok(buckets)
}

fn matches<V>(hash: u64, key: &str) -> impl Fn(&Binding<V>) -> bool + '_ {
    move |b| b.hash == hash && b.key == key
}

impl<V> HashSymTable<V> {
    /// Empty table with the smallest bucket count and no growth.
    pub fn new() -> Self {
        Self::with_config(TableConfig::default())
    }

    pub fn with_config(config: TableConfig) -> Self {
        let tier = config.initial_tier.min(BUCKET_COUNTS.len() - 1);
        debug!("creating symbol table with {} buckets", BUCKET_COUNTS[tier]);
        Self {
            buckets: vec![None; BUCKET_COUNTS[tier]],
            bindings: ChainArena::new(),
            tier,
            growth: config.growth,
        }
    }

    /// Like [`with_config`](Self::with_config) but reports failure to
    /// allocate the bucket array instead of aborting.
    pub fn try_with_config(config: TableConfig) -> Result<Self, AllocError> {
        let tier = config.initial_tier.min(BUCKET_COUNTS.len() - 1);
        let buckets = alloc_buckets(BUCKET_COUNTS[tier]).map_err(|e| {
            warn!("cannot allocate {} buckets: {}", BUCKET_COUNTS[tier], e);
            AllocError::from(e)
        })?;
        debug!("creating symbol table with {} buckets", buckets.len());
        Ok(Self {
            buckets,
            bindings: ChainArena::new(),
            tier,
            growth: config.growth,
        })
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Ratio of stored bindings to buckets.
    pub fn load_factor(&self) -> f64 {
        self.bindings.len() as f64 / self.buckets.len() as f64
    }

    /// Number of bindings in each bucket, in bucket order.
    pub fn chain_lengths(&self) -> Vec<usize> {
        self.buckets
            .iter()
            .map(|&head| self.bindings.chain_len(head))
            .collect()
    }

    pub fn longest_chain(&self) -> usize {
        self.chain_lengths().into_iter().max().unwrap_or(0)
    }

    #[inline]
    fn slot(&self, hash: u64) -> usize {
        reduce(hash, self.buckets.len())
    }

    fn lookup(&self, key: &str) -> Link {
        let hash = hash_key(key);
        self.bindings
            .find(self.buckets[self.slot(hash)], matches(hash, key))
    }

    fn maybe_grow(&mut self) {
        let GrowthPolicy::LoadFactor(max) = self.growth else {
            return;
        };
        if self.load_factor() <= max {
            return;
        }
        let Some(&next) = BUCKET_COUNTS.get(self.tier + 1) else {
            return;
        };
        let mut buckets = match alloc_buckets(next) {
            Ok(b) => b,
            Err(e) => {
                warn!("keeping {} buckets, cannot grow to {}: {}", self.buckets.len(), next, e);
                return;
            }
        };
        debug!(
            "growing symbol table from {} to {} buckets ({} bindings)",
            self.buckets.len(),
            next,
            self.bindings.len()
        );
        for head in std::mem::take(&mut self.buckets) {
            // Reverse so each old chain keeps its relative order.
            for k in self.bindings.chain_keys(head).into_iter().rev() {
                let idx = reduce(self.bindings.get(k).hash, next);
                self.bindings.relink_front(&mut buckets[idx], k);
            }
        }
        self.buckets = buckets;
        self.tier += 1;
    }
}

impl<V> SymbolTable<V> for HashSymTable<V> {
    fn try_new() -> Result<Self, AllocError> {
        Self::try_with_config(TableConfig::default())
    }

    fn len(&self) -> usize {
        self.bindings.len()
    }

    fn put(&mut self, key: &str, value: V) -> Result<(), InsertError> {
        let hash = hash_key(key);
        let idx = self.slot(hash);
        if self
            .bindings
            .find(self.buckets[idx], matches(hash, key))
            .is_some()
        {
            trace!("put {:?}: already bound", key);
            return Err(InsertError::DuplicateKey);
        }
        let owned = copy_key(key).map_err(|e| {
            warn!("put {:?}: cannot copy key: {}", key, e);
            InsertError::from(e)
        })?;
        self.bindings
            .push_front(&mut self.buckets[idx], owned, hash, value);
        trace!("put {:?} into bucket {}", key, idx);
        self.maybe_grow();
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
        let k = self.lookup(key)?;
        Some(&self.bindings.get(k).value)
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let k = self.lookup(key)?;
        Some(&mut self.bindings.get_mut(k).value)
    }

    fn remove(&mut self, key: &str) -> Option<V> {
        let hash = hash_key(key);
        let idx = self.slot(hash);
        let removed = self
            .bindings
            .unlink(&mut self.buckets[idx], matches(hash, key))?;
        trace!("removed {:?} from bucket {}", key, idx);
        Some(removed.value)
    }

    fn map<C, F>(&mut self, mut apply: F, extra: &mut C)
    where
        C: ?Sized,
        F: FnMut(&str, &mut V, &mut C),
    {
        for &head in &self.buckets {
            self.bindings.visit_mut(head, |k, v| apply(k, v, extra));
        }
    }

    fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.bindings, &self.buckets)
    }
}

impl<V> Default for HashSymTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for HashSymTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
