// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Driver-facing traits.
//!
//! Generated stores follow one shape for every statement:
//!
//! ```text
//! prepare ──► execute(params) ──► ExecOutcome        (INSERT / UPDATE / DELETE)
//!         └─► query(params)   ──► Rows ──► Row ...   (SELECT, INSERT … RETURNING)
//! ```
//!
//! Prepared statements and row cursors are released by `Drop`, so every exit
//! path of a generated method (including `?`) gives them back.

use crate::{Error, FromValue, Value};

/// Database handle held by a generated store.
pub trait Connection {
    /// Prepare `query` for execution.
    fn prepare(&self, query: &str) -> Result<Box<dyn Statement + '_>, Error>;
}

impl<C: Connection + ?Sized> Connection for &C {
    fn prepare(&self, query: &str) -> Result<Box<dyn Statement + '_>, Error> {
        (**self).prepare(query)
    }
}

impl<C: Connection + ?Sized> Connection for Box<C> {
    fn prepare(&self, query: &str) -> Result<Box<dyn Statement + '_>, Error> {
        (**self).prepare(query)
    }
}

impl<C: Connection + ?Sized> Connection for std::sync::Arc<C> {
    fn prepare(&self, query: &str) -> Result<Box<dyn Statement + '_>, Error> {
        (**self).prepare(query)
    }
}

/// A prepared statement.
pub trait Statement {
    /// Run the statement for its side effects.
    fn execute(&mut self, params: &[Value]) -> Result<ExecOutcome, Error>;

    /// Run the statement and open a cursor over its result rows.
    fn query(&mut self, params: &[Value]) -> Result<Box<dyn Rows + '_>, Error>;
}

/// Cursor over result rows.
pub trait Rows {
    /// Advance to the next row, or `None` once the cursor is exhausted.
    fn next_row(&mut self) -> Result<Option<Row>, Error>;
}

/// Result of [`Statement::execute`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecOutcome {
    /// Number of rows changed by the statement.
    pub rows_affected:  i64,
    /// Last auto-generated key reported by the driver, or `0`.
    pub last_insert_id: i64
}

/// One result row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<Value>
}

impl Row {
    /// Build a row from its column values.
    pub fn new(columns: Vec<Value>) -> Self {
        Self {
            columns
        }
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Read column `index` as `T`.
    ///
    /// # Errors
    ///
    /// [`Error::ColumnOutOfRange`] past the last column,
    /// [`Error::TypeMismatch`] when the value does not convert.
    pub fn get<T: FromValue>(&self, index: usize) -> Result<T, Error> {
        let value = self.columns.get(index).ok_or(Error::ColumnOutOfRange {
            index,
            len: self.columns.len()
        })?;
        T::from_value(value.clone())
    }
}

impl From<Vec<Value>> for Row {
    fn from(columns: Vec<Value>) -> Self {
        Self::new(columns)
    }
}
