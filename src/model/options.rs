// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Record and field option sets.
//!
//! Both are closed structs: every recognized key has a field and anything
//! else is rejected with `unknown-option`. Repeated keys are applied in
//! order, so the last value of a scalar option wins.
//!
//! # Record options
//!
//! | Key | Default |
//! |-----|---------|
//! | `tableName` | lowercased plural of the record name |
//! | `dialect` | `default` |
//! | `primaryKey` | none |
//! | `softDelete` | none |
//! | `defaultLimit` | `100` |
//! | `storeName` | `<Name>Store` |
//! | `recordName` | `<Name>` |
//! | `blueprintName` | `<Name>Blueprint` |
//! | `storeFindMethodPrefix` | `Find` |
//! | `storeCountMethodPrefix` | `Count` |
//! | `storeSelectMethodPrefix` | `Select` |
//! | `updateFieldMethodPrefix` | `Update` |
//! | `blueprintRangeFieldSuffix` | `Range` |
//! | `blueprintLikeFieldSuffix` | `Like` |
//! | `createable` `updateable` `deleteable` `queryable` | `true` |
//!
//! # Field options
//!
//! `column`, `autoIncrement`, `bitmask`, `references`.

use super::{
    record::Features,
    tag::{flag, invalid}
};
use crate::{dialect::Dialect, error::ConfigIssue};

/// Default finder and selector limit.
pub const DEFAULT_LIMIT: i64 = 100;

/// Record-level options with defaults applied lazily by the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOptions {
    /// `tableName`.
    pub table_name:     Option<String>,
    /// `dialect`.
    pub dialect:        Dialect,
    /// `primaryKey`.
    pub primary_key:    Option<String>,
    /// `softDelete`.
    pub soft_delete:    Option<String>,
    /// `defaultLimit`.
    pub default_limit:  i64,
    /// `storeName`.
    pub store_name:     Option<String>,
    /// `recordName`.
    pub record_name:    Option<String>,
    /// `blueprintName`.
    pub blueprint_name: Option<String>,
    /// `storeFindMethodPrefix`.
    pub find_prefix:    String,
    /// `storeCountMethodPrefix`.
    pub count_prefix:   String,
    /// `storeSelectMethodPrefix`.
    pub select_prefix:  String,
    /// `updateFieldMethodPrefix`.
    pub update_prefix:  String,
    /// `blueprintRangeFieldSuffix`.
    pub range_suffix:   String,
    /// `blueprintLikeFieldSuffix`.
    pub like_suffix:    String,
    /// Feature toggles.
    pub features:       Features
}

impl Default for RecordOptions {
    fn default() -> Self {
        Self {
            table_name:     None,
            dialect:        Dialect::Default,
            primary_key:    None,
            soft_delete:    None,
            default_limit:  DEFAULT_LIMIT,
            store_name:     None,
            record_name:    None,
            blueprint_name: None,
            find_prefix:    String::from("Find"),
            count_prefix:   String::from("Count"),
            select_prefix:  String::from("Select"),
            update_prefix:  String::from("Update"),
            range_suffix:   String::from("Range"),
            like_suffix:    String::from("Like"),
            features:       Features::all()
        }
    }
}

impl RecordOptions {
    /// Apply one key/value pair.
    ///
    /// # Errors
    ///
    /// `unknown-option` for unrecognized keys, `invalid-option-value` for
    /// values that do not parse.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigIssue> {
        match key {
            "tableName" => self.table_name = Some(value.to_owned()),
            "dialect" => {
                self.dialect = Dialect::parse(value).ok_or_else(|| invalid(key, value))?;
            }
            "primaryKey" => self.primary_key = Some(value.to_owned()),
            "softDelete" => self.soft_delete = Some(value.to_owned()),
            "defaultLimit" => {
                self.default_limit = value
                    .parse::<i64>()
                    .ok()
                    .filter(|limit| *limit >= 0)
                    .ok_or_else(|| invalid(key, value))?;
            }
            "storeName" => self.store_name = Some(value.to_owned()),
            "recordName" => self.record_name = Some(value.to_owned()),
            "blueprintName" => self.blueprint_name = Some(value.to_owned()),
            "storeFindMethodPrefix" => self.find_prefix = value.to_owned(),
            "storeCountMethodPrefix" => self.count_prefix = value.to_owned(),
            "storeSelectMethodPrefix" => self.select_prefix = value.to_owned(),
            "updateFieldMethodPrefix" => self.update_prefix = value.to_owned(),
            "blueprintRangeFieldSuffix" => self.range_suffix = value.to_owned(),
            "blueprintLikeFieldSuffix" => self.like_suffix = value.to_owned(),
            "createable" => self.toggle(Features::CREATEABLE, key, value)?,
            "updateable" => self.toggle(Features::UPDATEABLE, key, value)?,
            "deleteable" => self.toggle(Features::DELETEABLE, key, value)?,
            "queryable" => self.toggle(Features::QUERYABLE, key, value)?,
            _ => return Err(ConfigIssue::UnknownOption(key.to_owned()))
        }
        Ok(())
    }

    fn toggle(&mut self, feature: Features, key: &str, value: &str) -> Result<(), ConfigIssue> {
        self.features.set(feature, flag(key, value)?);
        Ok(())
    }
}

/// Field-level options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldOptions {
    /// `column`; empty or missing means the lowercased field name.
    pub column:         Option<String>,
    /// `autoIncrement`.
    pub auto_increment: bool,
    /// `bitmask`.
    pub bitmask:        bool,
    /// `references`.
    pub references:     Option<String>
}

impl FieldOptions {
    /// Apply one key/value pair.
    ///
    /// # Errors
    ///
    /// `unknown-option` for unrecognized keys, `invalid-option-value` for
    /// bad flag values.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigIssue> {
        match key {
            "column" => {
                self.column = (!value.is_empty()).then(|| value.to_owned());
            }
            "autoIncrement" => self.auto_increment = flag(key, value)?,
            "bitmask" => self.bitmask = flag(key, value)?,
            "references" => self.references = Some(value.to_owned()),
            _ => return Err(ConfigIssue::UnknownOption(key.to_owned()))
        }
        Ok(())
    }

    /// Whether the field is dropped with `column=-`.
    pub fn is_skipped(&self) -> bool {
        self.column.as_deref() == Some("-")
    }
}
