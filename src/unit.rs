// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Unit assembler.
//!
//! Joins the outputs of every record of a source unit into one companion
//! module:
//!
//! ```text
//! // Code generated by marlow from author.rs. DO NOT EDIT.
//!
//! use super::Author;
//! use chrono::NaiveDateTime;
//!
//! pub struct AuthorStore<D> { ... }
//! ...
//! ```
//!
//! Import hints are resolved against the unit's own import table; hints it
//! cannot resolve (primitives, prelude types) are dropped. Each record is
//! formatted on its own, then the whole unit is parsed once more so a bad
//! header or import line is caught too.

use std::collections::BTreeSet;

use tracing::debug;

use crate::{
    coordinator::{RecordBody, RecordOutput},
    error::{Error, Result},
    scan::ImportTable
};

/// Assemble the companion module text.
///
/// # Errors
///
/// [`Error::Format`] when a record or the assembled unit does not parse.
pub fn assemble(unit_name: &str, imports: &ImportTable, records: &[RecordOutput]) -> Result<String> {
    let mut output = header(unit_name);

    let uses = resolve_imports(imports, records);
    if !uses.is_empty() {
        output.push('\n');
        for path in &uses {
            output.push_str(&format!("use {path};\n"));
        }
    }

    for record in records {
        output.push('\n');
        match &record.body {
            RecordBody::Disabled => {
                output.push_str(&format!("// {}: all features disabled\n", record.name));
            }
            RecordBody::Emitted(text) => output.push_str(&format_record(text)?)
        }
    }

    syn::parse_file(&output).map_err(|err| Error::format(err, output.clone()))?;
    Ok(output)
}

/// First line of every generated unit.
pub fn header(unit_name: &str) -> String {
    format!("// Code generated by marlow from {unit_name}. DO NOT EDIT.\n")
}

fn resolve_imports(imports: &ImportTable, records: &[RecordOutput]) -> BTreeSet<String> {
    let mut uses = BTreeSet::new();
    for hint in records.iter().flat_map(|record| &record.imports) {
        match imports.resolve(hint) {
            Some(path) => {
                uses.insert(path.to_owned());
            }
            None => debug!(target: "marlow.unit", hint = %hint, "import hint not resolved")
        }
    }
    uses
}

fn format_record(text: &str) -> Result<String> {
    let file = syn::parse_file(text).map_err(|err| Error::format(err, text))?;
    Ok(prettyplease::unparse(&file))
}
