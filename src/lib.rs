//! symtable: a single-threaded symbol table mapping string keys to values,
//! with a bucketed hash store and a linked-list store behind one interface.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: one observable contract ([`SymbolTable`]) with two backings that
//!   can be swapped at build time without callers noticing.
//! - Layers:
//!   - `chain`: a generational arena (`slotmap`) of bindings threaded into
//!     singly-linked chains by arena key. Owns every key copy.
//!   - [`HashSymTable`]: a bucket array of chain heads; bucket count drawn
//!     from a fixed sequence of primes ([`hash::BUCKET_COUNTS`]).
//!   - [`ListSymTable`]: one chain head.
//!
//! Constraints
//! - Single-threaded: no internal locking. Callers sharing a table must
//!   serialize access themselves.
//! - Keys are unique by content; `put` never overwrites, `replace` never
//!   inserts.
//! - Mutations are atomic: a failed `put` leaves the table untouched.
//! - New bindings are prepended to their chain, so enumeration within a chain
//!   is most-recently-inserted first. The hash store enumerates buckets in
//!   index order.
//!
//! Hashing and growth
//! - `h = h * 65599 + byte` over `u64`, wrapping; bucket is `h % buckets`.
//! - Each binding stores its full hash, so chain scans compare hashes before
//!   keys and growth never rehashes a key.
//! - By default the bucket count is fixed at creation
//!   ([`GrowthPolicy::Fixed`]). [`GrowthPolicy::LoadFactor`] opts into
//!   moving to the next prime once the load factor is exceeded.
//!
//! Notes and non-goals
//! - Values are opaque: the table never inspects them. To leave ownership
//!   with the caller, store `&T` or `Rc<T>`.
//! - The visitor passed to `map`/`for_each` holds the table exclusively, so
//!   it cannot insert or remove during traversal.
//! - No persistence, no iteration order guarantees across growth.

mod chain;
pub mod config;
pub mod error;
pub mod hash;
mod hash_table;
mod list_table;
mod table_proptest;

// Public surface
pub use chain::Iter;
pub use config::{GrowthPolicy, SymTableBuilder, TableConfig};
pub use error::{AllocError, InsertError};
pub use hash_table::HashSymTable;
pub use list_table::ListSymTable;

/// The store selected at build time: the hash store unless the `list`
/// feature is enabled.
#[cfg(not(feature = "list"))]
pub type DefaultSymTable<V> = HashSymTable<V>;
#[cfg(feature = "list")]
pub type DefaultSymTable<V> = ListSymTable<V>;

/// Operations shared by every symbol table store.
///
/// Dropping a table releases every binding and key copy it owns; values are
/// dropped as ordinary Rust values.
pub trait SymbolTable<V>: Sized {
    /// Create an empty table, reporting failure to allocate its storage.
    fn try_new() -> Result<Self, AllocError>;

    /// Number of bindings.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bind `key` to `value` if `key` is not already bound. On any error
    /// the table is unchanged.
    fn put(&mut self, key: &str, value: V) -> Result<(), InsertError>;

    /// Swap the value bound to `key`, returning the previous one. Absent
    /// keys leave the table unchanged and yield `None`.
    fn replace(&mut self, key: &str, value: V) -> Option<V>;

    fn contains(&self, key: &str) -> bool;

    fn get(&self, key: &str) -> Option<&V>;

    fn get_mut(&mut self, key: &str) -> Option<&mut V>;

    /// Unbind `key`, returning its value.
    fn remove(&mut self, key: &str) -> Option<V>;

    /// Call `apply(key, value, extra)` once per binding in enumeration
    /// order.
    fn map<C, F>(&mut self, apply: F, extra: &mut C)
    where
        C: ?Sized,
        F: FnMut(&str, &mut V, &mut C);

    /// [`map`](Self::map) without an extra argument.
    fn for_each<F>(&mut self, mut f: F)
    where
        F: FnMut(&str, &mut V),
    {
        self.map(|k, v, _: &mut ()| f(k, v), &mut ());
    }

    /// Bindings in enumeration order.
    fn iter(&self) -> Iter<'_, V>;

    /// `put` each pair in order, skipping keys that are already bound.
    /// Returns how many bindings were added.
    fn put_all<'k, I>(&mut self, pairs: I) -> Result<usize, InsertError>
    where
        I: IntoIterator<Item = (&'k str, V)>,
    {
        let mut added = 0;
        for (key, value) in pairs {
            match self.put(key, value) {
                Ok(()) => added += 1,
                Err(InsertError::DuplicateKey) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(added)
    }

    /// Tear the table down.
    fn destroy(self) {
        drop(self);
    }
}
