//! Error types returned by the symbol tables.

use std::collections::TryReserveError;
use thiserror::Error;

/// Why a `put` left the table unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsertError {
    /// A binding with an equal key already exists. `put` never overwrites;
    /// use `replace` for that.
    #[error("key is already bound")]
    DuplicateKey,
    /// The private copy of the key could not be allocated.
    #[error("out of memory while copying key")]
    OutOfMemory(#[from] TryReserveError),
}

/// A table could not be created because its storage could not be allocated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to allocate symbol table storage")]
pub struct AllocError(#[from] TryReserveError);
