// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Runtime error type returned by every generated store method.

use thiserror::Error;

/// Failure raised while a generated store talks to its connection.
///
/// Driver adapters wrap their own errors with [`Error::driver`]; the other
/// variants are produced by generated code or by [`Row`](crate::Row)
/// scanning.
#[derive(Debug, Error)]
pub enum Error {
    /// A delete was attempted with no blueprint, or with a blueprint that
    /// produces no predicate. Unconditional mass deletion is refused.
    #[error("invalid deletion blueprint: a delete requires at least one predicate")]
    InvalidDeletionBlueprint,

    /// A statement expected to yield exactly one row yielded none.
    #[error("invalid scan: the statement returned no rows")]
    InvalidScan,

    /// A column value could not be converted into the requested type.
    #[error("type mismatch: cannot read {found} as {expected}")]
    TypeMismatch {
        /// Rust type the caller asked for.
        expected: &'static str,
        /// Kind of the stored value.
        found:    &'static str
    },

    /// A row was indexed past its last column.
    #[error("column {index} out of range for a row of {len} columns")]
    ColumnOutOfRange {
        /// Requested column index.
        index: usize,
        /// Number of columns in the row.
        len:   usize
    },

    /// Error reported by the underlying database driver.
    #[error("driver error: {0}")]
    Driver(#[source] Box<dyn std::error::Error + Send + Sync>)
}

impl Error {
    /// Wrap a driver-specific error.
    pub fn driver(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Driver(err.into())
    }
}
