// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! In-memory connection and the records shared by the store tests.

#![allow(dead_code)]

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    io,
    sync::{Arc, Mutex}
};

use chrono::NaiveDateTime;
use marlow_core::{Connection, Error, ExecOutcome, Row, Rows, Statement, Value};
use marlow_derive::Marlow;

#[derive(Debug, Clone, Default, PartialEq, Marlow)]
pub struct Author {
    #[marlow = "tableName=authors"]
    pub table:         (),
    #[marlow = "column=system_id&autoIncrement=true"]
    pub id:            i64,
    #[marlow = "column=name"]
    pub name:          String,
    #[marlow = "column=university_id"]
    pub university_id: Option<i64>,
    #[marlow = "column=flags&bitmask=true"]
    pub flags:         u8
}

#[derive(Debug, Clone, Default, PartialEq, Marlow)]
#[marlow = "tableName=multi_auto&dialect=postgres&primaryKey=id&softDelete=deleted_at"]
pub struct MultiAuto {
    #[marlow = "column=id&autoIncrement=true"]
    pub id:         i64,
    #[marlow = "column=name"]
    pub name:       String,
    #[marlow = "column=status"]
    pub status:     i32,
    #[marlow = "column=created_at"]
    pub created_at: Option<NaiveDateTime>,
    #[marlow = "column=deleted_at"]
    pub deleted_at: Option<NaiveDateTime>
}

/// One statement the fake saw.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub query:  String,
    pub params: Vec<Value>
}

/// Connection recording every statement.
///
/// Queries answer with the next queued result set, cut down to the
/// statement's `LIMIT` when it has one. Queued rows stand for what is left
/// after the offset.
#[derive(Default)]
pub struct FakeDb {
    pub calls:    RefCell<Vec<Call>>,
    pub results:  RefCell<VecDeque<Vec<Row>>>,
    pub outcome:  Cell<ExecOutcome>,
    pub prepared: Cell<usize>,
    pub released: Cell<usize>
}

impl FakeDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the rows answering the next query.
    pub fn answer(&self, rows: Vec<Vec<Value>>) -> &Self {
        self.results
            .borrow_mut()
            .push_back(rows.into_iter().map(Row::new).collect());
        self
    }

    /// Outcome returned by every execute.
    pub fn outcome(&self, rows_affected: i64, last_insert_id: i64) -> &Self {
        self.outcome.set(ExecOutcome {
            rows_affected,
            last_insert_id
        });
        self
    }

    pub fn last(&self) -> Call {
        self.calls.borrow().last().cloned().expect("no statement ran")
    }

    fn record(&self, query: &str, params: &[Value]) {
        self.calls.borrow_mut().push(Call {
            query:  query.to_owned(),
            params: params.to_vec()
        });
    }
}

impl Connection for FakeDb {
    fn prepare(&self, query: &str) -> Result<Box<dyn Statement + '_>, Error> {
        self.prepared.set(self.prepared.get() + 1);
        Ok(Box::new(FakeStatement {
            db:    self,
            query: query.to_owned()
        }))
    }
}

struct FakeStatement<'a> {
    db:    &'a FakeDb,
    query: String
}

impl Statement for FakeStatement<'_> {
    fn execute(&mut self, params: &[Value]) -> Result<ExecOutcome, Error> {
        self.db.record(&self.query, params);
        Ok(self.db.outcome.get())
    }

    fn query(&mut self, params: &[Value]) -> Result<Box<dyn Rows + '_>, Error> {
        self.db.record(&self.query, params);
        let mut rows: Vec<Row> = self.db.results.borrow_mut().pop_front().unwrap_or_default();
        if let Some(limit) = limit(&self.query) {
            rows.truncate(limit);
        }
        Ok(Box::new(FakeRows {
            rows: rows.into()
        }))
    }
}

impl Drop for FakeStatement<'_> {
    fn drop(&mut self) {
        self.db.released.set(self.db.released.get() + 1);
    }
}

struct FakeRows {
    rows: VecDeque<Row>
}

impl Rows for FakeRows {
    fn next_row(&mut self) -> Result<Option<Row>, Error> {
        Ok(self.rows.pop_front())
    }
}

/// `n` of a statement ending in `LIMIT n OFFSET m`.
fn limit(query: &str) -> Option<usize> {
    let (_, tail) = query.rsplit_once(" LIMIT ")?;
    let (limit, _) = tail.split_once(" OFFSET ")?;
    limit.parse().ok()
}

/// Log sink the tests can read back.
#[derive(Clone, Default)]
pub struct SharedLog(Arc<Mutex<Vec<u8>>>);

impl SharedLog {
    pub fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().expect("log poisoned").clone();
        String::from_utf8(bytes)
            .expect("log is utf-8")
            .lines()
            .map(str::to_owned)
            .collect()
    }
}

impl io::Write for SharedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log poisoned").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// `count` author rows in column order `flags, name, system_id, university_id`.
pub fn author_rows(count: i64) -> Vec<Vec<Value>> {
    (1..=count)
        .map(|id| {
            vec![
                Value::UInt(0),
                Value::Text(format!("author {id}")),
                Value::Int(id),
                Value::Null,
            ]
        })
        .collect()
}
