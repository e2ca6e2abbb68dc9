// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! # marlow
//!
//! Generates typed SQL data-access code from tagged Rust structs.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! // author.rs
//! pub struct Author {
//!     #[marlow = "tableName=authors"]
//!     table: (),
//!
//!     #[marlow = "column=system_id&autoIncrement=true"]
//!     pub id: i64,
//!
//!     #[marlow = "column=name"]
//!     pub name: String,
//!
//!     #[marlow = "column=university_id"]
//!     pub university_id: Option<i64>,
//! }
//! ```
//!
//! ```rust,ignore
//! let source = std::fs::read_to_string("src/author.rs")?;
//! let module = marlow::generate("author.rs", &source, &marlow::Config::default())?;
//! std::fs::write("src/author/marlow.rs", module)?;
//! ```
//!
//! Generates `AuthorStore`, `AuthorBlueprint`, `AuthorRepository` and the
//! store methods `find_authors`, `count_authors`, `create_authors`,
//! `delete_authors`, `update_author_<field>` and `select_<fields>`.
//! `#[derive(Marlow)]` from `marlow-derive` runs the same pipeline inline.
//!
//! ## Pipeline
//!
//! ```text
//! source ─► scan ─► model ─► coordinator ─┬─ createable ─┐
//!                                         ├─ updateable ─┤
//!                                         ├─ deleteable ─┼─► store ─► unit
//!                                         ├─ queryable  ─┤
//!                                         └─ blueprint  ─┘
//! ```
//!
//! ## Tag options
//!
//! | key | scope | effect |
//! |-----|-------|--------|
//! | `tableName` | record | table name, default lowercased plural |
//! | `dialect` | record | `postgres` for `$N` placeholders and `RETURNING` |
//! | `primaryKey` | record | key column returned by postgres inserts |
//! | `softDelete` | record | nullable timestamp field scoping every read |
//! | `defaultLimit` | record | finder and selector limit, default 100 |
//! | `createable` ... `queryable` | record | `false` disables the feature |
//! | `column` | field | column name; `-` drops the field |
//! | `autoIncrement` | field | left out of inserts and updates |
//! | `bitmask` | field | unsigned only; adds `add_*`/`drop_*` |
//!
//! A comment containing `marlow:ignore` skips the whole unit.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod codegen;
mod config;
mod coordinator;
pub mod derive;
mod dialect;
mod error;
mod model;
mod scan;
mod store;
mod unit;

use std::io::Write;

use tracing::info;

pub use crate::{
    codegen::Feature,
    config::{Config, Schedule, Visibility},
    coordinator::{RecordBody, RecordOutput, generate_record},
    dialect::Dialect,
    error::{ConfigIssue, Error, Result, Site, TypeIssue},
    model::{Features, RecordModel},
    scan::{ImportTable, RecordDecl, SourceUnit, scan}
};

/// Generate the companion module for one source unit.
///
/// Returns an empty string for units carrying the ignore directive.
///
/// # Errors
///
/// The first error of any record; see [`Error`].
pub fn generate(unit_name: &str, source: &str, config: &Config) -> Result<String> {
    let unit = scan(unit_name, source)?;
    if unit.ignored {
        info!(target: "marlow.unit", unit = unit_name, "unit ignored");
        return Ok(String::new());
    }

    let mut records = Vec::with_capacity(unit.records.len());
    for decl in &unit.records {
        let model = RecordModel::build(decl, &unit.imports, config)?;
        records.push(generate_record(&model, config)?);
    }
    let output = unit::assemble(&unit.name, &unit.imports, &records)?;

    info!(
        target: "marlow.unit",
        unit = unit_name,
        records = records.len(),
        bytes = output.len(),
        "unit generated"
    );
    Ok(output)
}

/// [`generate`] into `writer`.
///
/// # Errors
///
/// Generator errors, and [`Error::Emit`] when the writer fails.
pub fn generate_to<W: Write>(
    writer: &mut W,
    unit_name: &str,
    source: &str,
    config: &Config
) -> Result<()> {
    let output = generate(unit_name, source, config)?;
    writer.write_all(output.as_bytes())?;
    writer.flush()?;
    Ok(())
}
