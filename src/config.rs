//! Construction-time configuration for the hash store.

use crate::hash::{tier_for_capacity, BUCKET_COUNTS};

/// Whether the hash store may move to a larger bucket count.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GrowthPolicy {
    /// Bucket count is fixed for the life of the table.
    #[default]
    Fixed,
    /// After a successful insert leaves `len / bucket_count` above the given
    /// ratio, move to the next tier of [`BUCKET_COUNTS`] (if any).
    LoadFactor(f64),
}

/// Resolved configuration for a [`HashSymTable`](crate::HashSymTable).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TableConfig {
    /// Index into [`BUCKET_COUNTS`] of the initial bucket count.
    pub initial_tier: usize,
    pub growth: GrowthPolicy,
}

impl TableConfig {
    pub fn bucket_count(&self) -> usize {
        BUCKET_COUNTS[self.initial_tier.min(BUCKET_COUNTS.len() - 1)]
    }
}

/// Builder for [`HashSymTable`](crate::HashSymTable).
///
/// ```
/// use symtable::{GrowthPolicy, SymTableBuilder, SymbolTable};
///
/// let mut t = SymTableBuilder::new()
///     .with_capacity(1000)
///     .with_growth(GrowthPolicy::LoadFactor(0.75))
///     .build::<u32>();
/// assert_eq!(t.bucket_count(), 1021);
/// t.put("x", 1).unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct SymTableBuilder {
    config: TableConfig,
}

impl SymTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at the given tier of [`BUCKET_COUNTS`]. Out-of-range tiers
    /// saturate to the largest.
    pub fn with_initial_tier(mut self, tier: usize) -> Self {
        self.config.initial_tier = tier.min(BUCKET_COUNTS.len() - 1);
        self
    }

    /// Start at the smallest tier with at least `buckets` buckets.
    pub fn with_capacity(mut self, buckets: usize) -> Self {
        self.config.initial_tier = tier_for_capacity(buckets);
        self
    }

    /// # Panics
    ///
    /// Panics if a `LoadFactor` ratio is not a positive finite number.
    pub fn with_growth(mut self, growth: GrowthPolicy) -> Self {
        if let GrowthPolicy::LoadFactor(lf) = growth {
            assert!(lf.is_finite() && lf > 0.0, "load factor must be > 0");
        }
        self.config.growth = growth;
        self
    }

    pub fn config(&self) -> TableConfig {
        self.config
    }

    pub fn build<V>(self) -> crate::HashSymTable<V> {
        crate::HashSymTable::with_config(self.config)
    }

    pub fn try_build<V>(self) -> Result<crate::HashSymTable<V>, crate::AllocError> {
        crate::HashSymTable::try_with_config(self.config)
    }
}
