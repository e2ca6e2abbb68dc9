// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Declaration scanner.
//!
//! Turns a parsed source unit into [`RecordDecl`]s plus the unit's
//! [`ImportTable`]. The scanner also owns the ignore directive: an ignored
//! unit is reported as such and never reaches the model builder.
//!
//! # Architecture
//!
//! ```text
//! scan.rs (coordinator)
//! ├── directive.rs - `marlow:ignore` detection in raw text
//! └── imports.rs   - `use` flattening and local declarations
//! ```
//!
//! # Tags
//!
//! A tag is a `#[marlow = "..."]` attribute. Struct-level tags carry record
//! options; field-level tags carry column options. Fields without a tag are
//! kept in the declaration (the finder still has to construct them) but do
//! not become columns.

mod directive;
mod imports;

pub use directive::has_ignore_directive;
pub use imports::ImportTable;
use syn::{Attribute, DeriveInput, Expr, ExprLit, Fields, Item, ItemStruct, Lit, Meta, Type};
use tracing::debug;

use crate::error::{ConfigIssue, Error, Result};

/// Attribute name carrying tags.
pub const TAG_ATTRIBUTE: &str = "marlow";

/// A scanned source unit.
#[derive(Debug)]
pub struct SourceUnit {
    /// Unit name used in diagnostics and the generated header.
    pub name:    String,
    /// Whether the unit carries the ignore directive.
    pub ignored: bool,
    /// Record declarations in source order.
    pub records: Vec<RecordDecl>,
    /// Import table of the unit.
    pub imports: ImportTable
}

/// One struct declaration with its tags.
#[derive(Debug, Clone)]
pub struct RecordDecl {
    /// Struct identifier.
    pub name:   String,
    /// Declared visibility.
    pub vis:    syn::Visibility,
    /// Struct-level tag strings.
    pub tags:   Vec<String>,
    /// Named fields in declaration order.
    pub fields: Vec<FieldDecl>
}

/// One named field.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    /// Field identifier.
    pub name: String,
    /// Field type as written.
    pub ty:   Type,
    /// Field-level tag strings; empty when untagged.
    pub tags: Vec<String>
}

impl FieldDecl {
    /// Whether the field carries at least one tag.
    pub fn is_tagged(&self) -> bool {
        !self.tags.is_empty()
    }
}

/// Parse and scan a source unit.
///
/// # Errors
///
/// [`Error::Parse`] when the source is not valid Rust,
/// [`Error::Config`] for malformed tags or duplicate records.
pub fn scan(unit_name: &str, source: &str) -> Result<SourceUnit> {
    if has_ignore_directive(source) {
        debug!(target: "marlow.scan", unit = unit_name, "ignore directive found");
        return Ok(SourceUnit {
            name:    unit_name.to_owned(),
            ignored: true,
            records: Vec::new(),
            imports: ImportTable::default()
        });
    }

    let file = syn::parse_file(source).map_err(|err| Error::Parse {
        unit:    unit_name.to_owned(),
        message: err.to_string()
    })?;
    let imports = ImportTable::from_file(&file);

    let mut records: Vec<RecordDecl> = Vec::new();
    for item in &file.items {
        let Item::Struct(item) = item else { continue };
        let Some(record) = RecordDecl::from_item_struct(item)? else {
            debug!(
                target: "marlow.scan",
                record = %item.ident,
                "skipping generic or unnamed struct"
            );
            continue;
        };
        if records.iter().any(|seen| seen.name == record.name) {
            return Err(Error::config(record.name, ConfigIssue::DuplicateRecord));
        }
        records.push(record);
    }

    debug!(
        target: "marlow.scan",
        unit = unit_name,
        records = records.len(),
        imports = imports.len(),
        "unit scanned"
    );

    Ok(SourceUnit {
        name: unit_name.to_owned(),
        ignored: false,
        records,
        imports
    })
}

impl RecordDecl {
    /// Scan a struct item of a source unit.
    ///
    /// Returns `Ok(None)` for generic structs and structs without named
    /// fields; those are not records.
    ///
    /// # Errors
    ///
    /// [`ConfigIssue::MalformedTag`] when a `marlow` attribute is not a
    /// string name-value pair.
    pub fn from_item_struct(item: &ItemStruct) -> Result<Option<Self>> {
        if !item.generics.params.is_empty() {
            return Ok(None);
        }
        let Fields::Named(_) = &item.fields else {
            return Ok(None);
        };
        Self::build(&item.ident, &item.vis, &item.attrs, &item.fields).map(Some)
    }

    /// Scan the input of `#[derive(Marlow)]`.
    ///
    /// # Errors
    ///
    /// [`ConfigIssue::GenericRecord`] for generic structs,
    /// [`ConfigIssue::UnnamedFields`] for enums, unions and tuple structs,
    /// [`ConfigIssue::MalformedTag`] for bad attributes.
    pub fn from_derive_input(input: &DeriveInput) -> Result<Self> {
        let name = input.ident.to_string();
        if !input.generics.params.is_empty() {
            return Err(Error::config(name, ConfigIssue::GenericRecord));
        }
        let syn::Data::Struct(data) = &input.data else {
            return Err(Error::config(name, ConfigIssue::UnnamedFields));
        };
        if !matches!(data.fields, Fields::Named(_)) {
            return Err(Error::config(name, ConfigIssue::UnnamedFields));
        }
        Self::build(&input.ident, &input.vis, &input.attrs, &data.fields)
    }

    fn build(
        ident: &syn::Ident,
        vis: &syn::Visibility,
        attrs: &[Attribute],
        fields: &Fields
    ) -> Result<Self> {
        let name = ident.to_string();
        let tags = collect_tags(attrs).map_err(|issue| Error::config(&name, issue))?;

        let mut decls = Vec::with_capacity(fields.len());
        for field in fields {
            let Some(field_ident) = &field.ident else {
                return Err(Error::config(name, ConfigIssue::UnnamedFields));
            };
            let field_name = field_ident.to_string();
            let field_tags = collect_tags(&field.attrs)
                .map_err(|issue| Error::field_config(&name, &field_name, issue))?;
            decls.push(FieldDecl {
                name: field_name,
                ty:   field.ty.clone(),
                tags: field_tags
            });
        }

        Ok(Self {
            name,
            vis: vis.clone(),
            tags,
            fields: decls
        })
    }
}

/// Extract tag strings from `#[marlow = "..."]` attributes.
fn collect_tags(attrs: &[Attribute]) -> std::result::Result<Vec<String>, ConfigIssue> {
    let mut tags = Vec::new();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident(TAG_ATTRIBUTE)) {
        let Meta::NameValue(meta) = &attr.meta else {
            return Err(ConfigIssue::MalformedTag(String::from(
                "expected #[marlow = \"...\"]"
            )));
        };
        match &meta.value {
            Expr::Lit(ExprLit {
                lit: Lit::Str(value),
                ..
            }) => tags.push(value.value()),
            _ => {
                return Err(ConfigIssue::MalformedTag(String::from(
                    "tag value must be a string literal"
                )));
            }
        }
    }
    Ok(tags)
}
