// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Column model of one record field.

use quote::ToTokens;

use super::{
    naming::{is_sql_name, slot_name},
    options::FieldOptions,
    tag,
    types::{Classifier, TypeCategory, display_type, import_hints}
};
use crate::{
    error::{ConfigIssue, Error, Result, Site},
    scan::FieldDecl
};

/// A field that maps to a column.
///
/// The type is kept as text: models are shared with producer threads and
/// `syn` types are not `Send`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldModel {
    /// Source field identifier.
    pub name:           String,
    /// SQL column.
    pub column:         String,
    /// Field type as written.
    pub type_expr:      String,
    /// Category mask.
    pub category:       TypeCategory,
    /// Omitted from inserts.
    pub auto_increment: bool,
    /// Gets add/drop update methods.
    pub bitmask:        bool,
    /// Foreign record hint; recorded only.
    pub references:     Option<String>,
    /// Short names the type needs in scope.
    pub import_hints:   Vec<String>,
    /// Blueprint range slot name, for numeric and time fields.
    pub range_slot:     Option<String>,
    /// Blueprint like slot name, for string fields.
    pub like_slot:      Option<String>
}

impl FieldModel {
    /// Build a field model from a tagged field.
    ///
    /// Returns `Ok(None)` when the field is dropped with `column=-`.
    pub(crate) fn build(
        record: &str,
        decl: &FieldDecl,
        classifier: &Classifier<'_>,
        range_suffix: &str,
        like_suffix: &str
    ) -> Result<Option<Self>> {
        let fail = |issue| Error::field_config(record, &decl.name, issue);

        let mut options = FieldOptions::default();
        for raw in &decl.tags {
            for (key, value) in tag::parse(raw).map_err(fail)? {
                options.apply(&key, &value).map_err(fail)?;
            }
        }
        if options.is_skipped() {
            return Ok(None);
        }

        let column = options
            .column
            .clone()
            .unwrap_or_else(|| decl.name.to_lowercase());
        if !is_sql_name(&column) {
            return Err(fail(ConfigIssue::InvalidName(column)));
        }

        let type_expr = decl.ty.to_token_stream().to_string();
        let category = classifier
            .classify(&decl.ty)
            .map_err(|issue| Error::UnsupportedType {
                site: Site::field(record, &decl.name),
                ty: display_type(&decl.ty),
                issue
            })?;
        if options.bitmask && !category.contains(TypeCategory::UNSIGNED) {
            return Err(fail(ConfigIssue::BitmaskNotUnsigned));
        }

        Ok(Some(Self {
            name: decl.name.clone(),
            column,
            import_hints: import_hints(&decl.ty),
            range_slot: category
                .has_range()
                .then(|| slot_name(&decl.name, range_suffix)),
            like_slot: category
                .has_like()
                .then(|| slot_name(&decl.name, like_suffix)),
            type_expr,
            category,
            auto_increment: options.auto_increment,
            bitmask: options.bitmask,
            references: options.references
        }))
    }

    /// Whether update methods are generated for this field.
    pub fn is_writable(&self) -> bool {
        !self.auto_increment
    }

    /// Blueprint slot names of this field, exact slot first.
    pub fn slots(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str())
            .chain(self.range_slot.as_deref())
            .chain(self.like_slot.as_deref())
    }
}
