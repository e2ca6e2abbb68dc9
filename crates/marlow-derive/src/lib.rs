// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

//! # marlow-derive
//!
//! `#[derive(Marlow)]` runs the marlow generator on a single struct and
//! emits its store, blueprint and repository next to it.
//!
//! ```rust,ignore
//! use marlow_derive::Marlow;
//!
//! #[derive(Marlow)]
//! #[marlow = "tableName=authors"]
//! pub struct Author {
//!     #[marlow = "column=system_id&autoIncrement=true"]
//!     pub id: i64,
//!
//!     #[marlow = "column=name"]
//!     pub name: String,
//! }
//!
//! let store = AuthorStore::new(connection, None);
//! let authors = store.find_authors(Some(&AuthorBlueprint {
//!     name_like: vec!["%rodger%".into()],
//!     ..Default::default()
//! }))?;
//! ```
//!
//! Emitted items keep the struct's visibility and refer to the runtime as
//! `::marlow_core`, which must be a dependency of the calling crate.
//!
//! Record options go in a struct-level `#[marlow = "..."]` attribute or on
//! a field named `table`; both use the same URL-query keys as the file
//! generator.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derive a marlow store for a struct with named fields.
///
/// Errors are reported at the struct name.
#[proc_macro_derive(Marlow, attributes(marlow))]
pub fn derive_marlow(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match marlow::derive::expand(&input, &marlow::Config::for_derive()) {
        Ok(tokens) => tokens.into(),
        Err(err) => syn::Error::new_spanned(&input.ident, err)
            .to_compile_error()
            .into()
    }
}
