//! Binding arena shared by both stores.
//!
//! Bindings live in a generational `SlotMap` and are threaded into
//! singly-linked chains through their `next` keys. A chain is identified by
//! its head `Link`, which the owning store keeps (one per bucket for the hash
//! store, exactly one for the list store). The arena owns every key copy; a
//! binding is reachable from exactly one chain.

use slotmap::{DefaultKey, SlotMap};
use std::collections::TryReserveError;

/// Head of a chain or link to the next binding.
pub(crate) type Link = Option<DefaultKey>;

#[derive(Debug)]
pub(crate) struct Binding<V> {
    pub(crate) key: String,
    pub(crate) value: V,
    /// Full hash of `key`; zero in stores that do not hash.
    pub(crate) hash: u64,
    pub(crate) next: Link,
}

#[derive(Debug)]
pub(crate) struct ChainArena<V> {
    slots: SlotMap<DefaultKey, Binding<V>>,
}

/// Copy `key` into storage owned by the table, reporting allocation failure
/// instead of aborting.
pub(crate) fn copy_key(key: &str) -> Result<String, TryReserveError> {
    let mut owned = String::new();
    owned.try_reserve_exact(key.len())?;
    owned.push_str(key);
    Ok(owned)
}

impl<V> ChainArena<V> {
    pub(crate) fn new() -> Self {
        Self {
            slots: SlotMap::with_key(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// First binding on the chain starting at `head` that satisfies `eq`.
    pub(crate) fn find<F>(&self, head: Link, eq: F) -> Link
    where
        F: Fn(&Binding<V>) -> bool,
    {
        let mut cur = head;
        while let Some(k) = cur {
            let b = &self.slots[k];
            if eq(b) {
                return Some(k);
            }
            cur = b.next;
        }
        None
    }

    pub(crate) fn get(&self, k: DefaultKey) -> &Binding<V> {
        &self.slots[k]
    }

    pub(crate) fn get_mut(&mut self, k: DefaultKey) -> &mut Binding<V> {
        &mut self.slots[k]
    }

    /// Create a binding and make it the new head of the chain.
    pub(crate) fn push_front(&mut self, head: &mut Link, key: String, hash: u64, value: V) {
        let k = self.slots.insert(Binding {
            key,
            value,
            hash,
            next: *head,
        });
        *head = Some(k);
    }

    /// Move an existing binding to the front of another chain. The caller
    /// must already have detached it from its previous chain.
    pub(crate) fn relink_front(&mut self, head: &mut Link, k: DefaultKey) {
        self.slots[k].next = *head;
        *head = Some(k);
    }

    /// Unlink and drop the first binding satisfying `eq`, returning it.
    pub(crate) fn unlink<F>(&mut self, head: &mut Link, eq: F) -> Option<Binding<V>>
    where
        F: Fn(&Binding<V>) -> bool,
    {
        let mut prev: Link = None;
        let mut cur = *head;
        while let Some(k) = cur {
            let b = &self.slots[k];
            let next = b.next;
            if eq(b) {
                match prev {
                    None => *head = next,
                    Some(p) => self.slots[p].next = next,
                }
                return self.slots.remove(k);
            }
            prev = cur;
            cur = next;
        }
        None
    }

    /// Keys of the chain in order, head first.
    pub(crate) fn chain_keys(&self, head: Link) -> Vec<DefaultKey> {
        let mut out = Vec::new();
        let mut cur = head;
        while let Some(k) = cur {
            out.push(k);
            cur = self.slots[k].next;
        }
        out
    }

    pub(crate) fn chain_len(&self, head: Link) -> usize {
        let mut n = 0;
        let mut cur = head;
        while let Some(k) = cur {
            n += 1;
            cur = self.slots[k].next;
        }
        n
    }

    /// Visit every binding of the chain, head first, with mutable access to
    /// the value.
    pub(crate) fn visit_mut<F>(&mut self, head: Link, mut f: F)
    where
        F: FnMut(&str, &mut V),
    {
        let mut cur = head;
        while let Some(k) = cur {
            let b = &mut self.slots[k];
            f(&b.key, &mut b.value);
            cur = b.next;
        }
    }
}

/// Iterator over `(key, value)` pairs of one or more chains, visiting the
/// chains in the order of the supplied heads and each chain head first.
pub struct Iter<'a, V> {
    arena: &'a ChainArena<V>,
    heads: std::slice::Iter<'a, Link>,
    cur: Link,
    remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(arena: &'a ChainArena<V>, heads: &'a [Link]) -> Self {
        Self {
            arena,
            heads: heads.iter(),
            cur: None,
            remaining: arena.len(),
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(k) = self.cur {
                let b = self.arena.get(k);
                self.cur = b.next;
                self.remaining -= 1;
                return Some((b.key.as_str(), &b.value));
            }
            self.cur = *self.heads.next()?;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}
