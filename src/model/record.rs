// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Record model and its builder.
//!
//! The builder merges record options (struct-level tags first, then the
//! `table` field), builds a [`FieldModel`] per tagged field and checks the
//! record invariants:
//!
//! - column names are unique
//! - table and column names are letters and underscores only
//! - the soft-delete field is a nullable timestamp column
//! - postgres creation has a primary key
//! - blueprint slots do not collide
//! - generated names are identifiers and store methods are unique
//!
//! A model is read-only once built; producer threads share it by reference.

use std::collections::BTreeSet;

use bitflags::bitflags;
use indexmap::IndexMap;
use quote::ToTokens;
use tracing::debug;

use super::{
    field::FieldModel,
    naming::{COMMON_SLOTS, default_table, is_rust_ident, is_sql_name, method_name, pluralize},
    options::RecordOptions,
    tag,
    types::{Classifier, TypeCategory}
};
use crate::{
    config::Config,
    dialect::Dialect,
    error::{ConfigIssue, Error, Result},
    scan::{ImportTable, RecordDecl}
};

/// Name of the field carrying record-level options.
pub const TABLE_FIELD: &str = "table";

/// Store constructor; no generated method may take its name.
const STORE_CONSTRUCTOR: &str = "new";

bitflags! {
    /// Enabled store features.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Features: u8 {
        /// Finder, counter and selectors.
        const QUERYABLE = 1;
        /// Batch insert.
        const CREATEABLE = 1 << 1;
        /// Per-field updates.
        const UPDATEABLE = 1 << 2;
        /// Blueprint-guarded delete.
        const DELETEABLE = 1 << 3;
    }
}

/// Normalized model of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordModel {
    /// Source struct identifier.
    pub name:               String,
    /// Name used inside generated method names.
    pub record_name:        String,
    /// SQL table.
    pub table:              String,
    /// Generated store type.
    pub store_name:         String,
    /// Generated blueprint type.
    pub blueprint_name:     String,
    /// Generated repository trait.
    pub repository_name:    String,
    /// Finder and selector limit when the caller sets none.
    pub default_limit:      i64,
    /// SQL dialect.
    pub dialect:            Dialect,
    /// Column returned by postgres inserts.
    pub primary_key_column: Option<String>,
    /// Field whose `IS NULL` scopes every read.
    pub soft_delete_field:  Option<String>,
    /// `storeFindMethodPrefix`.
    pub find_prefix:        String,
    /// `storeCountMethodPrefix`.
    pub count_prefix:       String,
    /// `storeSelectMethodPrefix`.
    pub select_prefix:      String,
    /// `updateFieldMethodPrefix`.
    pub update_prefix:      String,
    /// Enabled features.
    pub features:           Features,
    /// Column fields in declaration order.
    pub fields:             IndexMap<String, FieldModel>,
    /// Every field of the struct in declaration order.
    pub all_fields:         Vec<String>,
    /// Record visibility as written.
    pub vis:                String
}

impl RecordModel {
    /// Build and validate a record model.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] for option and invariant violations,
    /// [`Error::UnsupportedType`] for field types without a category.
    pub fn build(decl: &RecordDecl, imports: &ImportTable, config: &Config) -> Result<Self> {
        let name = decl.name.as_str();
        let mut options = RecordOptions::default();

        for raw in &decl.tags {
            apply_record_tag(&mut options, raw)
                .map_err(|issue| Error::config(name, issue))?;
        }
        for field in decl.fields.iter().filter(|f| f.name == TABLE_FIELD) {
            for raw in &field.tags {
                apply_record_tag(&mut options, raw)
                    .map_err(|issue| Error::field_config(name, TABLE_FIELD, issue))?;
            }
        }

        let classifier = Classifier::new(config, imports);
        let mut fields: IndexMap<String, FieldModel> = IndexMap::new();
        let mut columns = BTreeSet::new();
        for decl_field in &decl.fields {
            if decl_field.name == TABLE_FIELD || !decl_field.is_tagged() {
                continue;
            }
            let Some(field) = FieldModel::build(
                name,
                decl_field,
                &classifier,
                &options.range_suffix,
                &options.like_suffix
            )?
            else {
                continue;
            };
            if !columns.insert(field.column.clone()) {
                return Err(Error::field_config(
                    name,
                    &field.name,
                    ConfigIssue::DuplicateColumn(field.column)
                ));
            }
            fields.insert(field.name.clone(), field);
        }

        let table = options
            .table_name
            .clone()
            .unwrap_or_else(|| default_table(name));
        if !is_sql_name(&table) {
            return Err(Error::config(name, ConfigIssue::InvalidName(table)));
        }

        if let Some(soft) = &options.soft_delete {
            let valid = fields
                .get(soft)
                .is_some_and(|field| field.category.contains(TypeCategory::NULLABLE_TIME));
            if !valid {
                return Err(Error::config(
                    name,
                    ConfigIssue::UnknownSoftDeleteField(soft.clone())
                ));
            }
        }

        if let Some(pk) = &options.primary_key
            && !is_sql_name(pk)
        {
            return Err(Error::config(name, ConfigIssue::InvalidName(pk.clone())));
        }
        if options.dialect == Dialect::Postgres
            && options.features.contains(Features::CREATEABLE)
            && options.primary_key.is_none()
        {
            return Err(Error::config(name, ConfigIssue::MissingPrimaryKey));
        }

        let model = Self {
            name: name.to_owned(),
            record_name: options.record_name.clone().unwrap_or_else(|| name.to_owned()),
            store_name: options
                .store_name
                .clone()
                .unwrap_or_else(|| format!("{name}Store")),
            blueprint_name: options
                .blueprint_name
                .clone()
                .unwrap_or_else(|| format!("{name}Blueprint")),
            repository_name: format!("{name}Repository"),
            table,
            default_limit: options.default_limit,
            dialect: options.dialect,
            primary_key_column: options.primary_key,
            soft_delete_field: options.soft_delete,
            find_prefix: options.find_prefix,
            count_prefix: options.count_prefix,
            select_prefix: options.select_prefix,
            update_prefix: options.update_prefix,
            features: options.features,
            fields,
            all_fields: decl.fields.iter().map(|f| f.name.clone()).collect(),
            vis: decl.vis.to_token_stream().to_string()
        };
        model.check_slots()?;
        model.check_identifiers()?;
        model.check_methods()?;

        debug!(
            target: "marlow.model",
            record = %model.name,
            table = %model.table,
            columns = model.fields.len(),
            dialect = ?model.dialect,
            "record model built"
        );
        Ok(model)
    }

    /// Whether a feature is enabled.
    pub fn has(&self, feature: Features) -> bool {
        self.features.contains(feature)
    }

    /// Soft-delete column, when the record has one.
    pub fn soft_delete_column(&self) -> Option<&str> {
        self.soft_delete_field
            .as_ref()
            .and_then(|field| self.fields.get(field))
            .map(|field| field.column.as_str())
    }

    /// Fields ordered by column name; the order of every column list.
    pub fn sorted_fields(&self) -> Vec<&FieldModel> {
        let mut sorted: Vec<&FieldModel> = self.fields.values().collect();
        sorted.sort_by(|a, b| a.column.cmp(&b.column));
        sorted
    }

    /// Insert columns: sorted, without auto-increment fields.
    pub fn insert_fields(&self) -> Vec<&FieldModel> {
        self.sorted_fields()
            .into_iter()
            .filter(|field| !field.auto_increment)
            .collect()
    }

    /// `<table>.<column>`.
    pub fn qualified(&self, column: &str) -> String {
        format!("{}.{column}", self.table)
    }

    /// Finder method name.
    pub fn find_method(&self) -> String {
        method_name(&self.find_prefix, &pluralize(&self.name))
    }

    /// Counter method name.
    pub fn count_method(&self) -> String {
        method_name(&self.count_prefix, &pluralize(&self.name))
    }

    /// Create method name.
    pub fn create_method(&self) -> String {
        method_name("Create", &pluralize(&self.name))
    }

    /// Delete method name.
    pub fn delete_method(&self) -> String {
        method_name("Delete", &pluralize(&self.name))
    }

    /// Selector method name for a field.
    pub fn select_method(&self, field: &FieldModel) -> String {
        method_name(&self.select_prefix, &pluralize(&field.name))
    }

    /// Update method name for a field.
    pub fn update_method(&self, field: &FieldModel) -> String {
        self.field_method(&self.update_prefix, field)
    }

    /// Bitmask set method name for a field.
    pub fn add_method(&self, field: &FieldModel) -> String {
        self.field_method("Add", field)
    }

    /// Bitmask clear method name for a field.
    pub fn drop_method(&self, field: &FieldModel) -> String {
        self.field_method("Drop", field)
    }

    fn field_method(&self, prefix: &str, field: &FieldModel) -> String {
        method_name(prefix, &format!("{}_{}", self.record_name, field.name))
    }

    fn check_slots(&self) -> Result<()> {
        let mut seen: BTreeSet<&str> = COMMON_SLOTS.iter().copied().collect();
        for field in self.fields.values() {
            for slot in field.slots() {
                if !seen.insert(slot) {
                    return Err(Error::field_config(
                        &self.name,
                        &field.name,
                        ConfigIssue::BlueprintFieldCollision(slot.to_owned())
                    ));
                }
            }
        }
        Ok(())
    }

    /// Store methods the enabled features emit, in emission order.
    pub fn store_methods(&self) -> Vec<String> {
        let mut names = Vec::new();
        if self.fields.is_empty() {
            return names;
        }
        if self.has(Features::CREATEABLE) {
            names.push(self.create_method());
        }
        if self.has(Features::UPDATEABLE) {
            for field in self.fields.values().filter(|field| field.is_writable()) {
                names.push(self.update_method(field));
                if field.bitmask {
                    names.push(self.add_method(field));
                    names.push(self.drop_method(field));
                }
            }
        }
        if self.has(Features::DELETEABLE) {
            names.push(self.delete_method());
        }
        if self.has(Features::QUERYABLE) {
            names.push(self.find_method());
            names.push(self.count_method());
            names.extend(self.fields.values().map(|field| self.select_method(field)));
        }
        names
    }

    fn check_identifiers(&self) -> Result<()> {
        let mut names = vec![
            self.store_name.clone(),
            self.blueprint_name.clone(),
            self.repository_name.clone(),
            self.find_method(),
            self.count_method(),
            self.create_method(),
            self.delete_method()
        ];
        for field in self.fields.values() {
            names.extend(field.slots().map(str::to_owned));
            names.push(self.select_method(field));
            names.push(self.update_method(field));
            if field.bitmask {
                names.push(self.add_method(field));
                names.push(self.drop_method(field));
            }
        }
        match names.into_iter().find(|name| !is_rust_ident(name)) {
            Some(bad) => Err(Error::config(&self.name, ConfigIssue::InvalidName(bad))),
            None => Ok(())
        }
    }

    /// Every emitted store method, `new` included, has a unique name.
    fn check_methods(&self) -> Result<()> {
        let mut seen: BTreeSet<String> = BTreeSet::from([STORE_CONSTRUCTOR.to_owned()]);
        for name in self.store_methods() {
            if seen.contains(&name) {
                return Err(Error::config(&self.name, ConfigIssue::DuplicateMethod(name)));
            }
            seen.insert(name);
        }
        Ok(())
    }
}

fn apply_record_tag(options: &mut RecordOptions, raw: &str) -> std::result::Result<(), ConfigIssue> {
    for (key, value) in tag::parse(raw)? {
        options.apply(&key, &value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests;
