// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Single-record pipeline behind `#[derive(Marlow)]`.
//!
//! Runs the same model builder and producers as [`generate`](crate::generate)
//! on one struct. The emitted items sit next to the struct, so no import
//! lines are needed and none are produced.

use proc_macro2::TokenStream;
use syn::DeriveInput;
use tracing::debug;

use crate::{
    config::Config,
    coordinator::{RecordBody, generate_record},
    error::{Error, Result},
    model::RecordModel,
    scan::{ImportTable, RecordDecl}
};

/// Expand a derive input into the record's store, blueprint and methods.
///
/// # Errors
///
/// Any generator error for the record.
pub fn expand(input: &DeriveInput, config: &Config) -> Result<TokenStream> {
    let decl = RecordDecl::from_derive_input(input)?;
    let model = RecordModel::build(&decl, &ImportTable::default(), config)?;
    let output = generate_record(&model, config)?;
    match output.body {
        RecordBody::Disabled => {
            debug!(target: "marlow.derive", record = %output.name, "nothing to expand");
            Ok(TokenStream::new())
        }
        RecordBody::Emitted(text) => text
            .parse::<TokenStream>()
            .map_err(|err| Error::format(err, text.clone()))
    }
}
