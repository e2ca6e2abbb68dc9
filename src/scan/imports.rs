// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Import table of a source unit.
//!
//! Generated code lives in a child module of the source unit, so every path
//! is rewritten to be valid one level down:
//!
//! | in the source unit      | in the generated module        |
//! |-------------------------|--------------------------------|
//! | `use chrono::NaiveDate` | `use chrono::NaiveDate`        |
//! | `use self::ids::Id`     | `use super::ids::Id`           |
//! | `use super::Money`      | `use super::super::Money`      |
//! | `use crate::a::B as C`  | `use crate::a::B as C`         |
//! | `struct Author`         | `use super::Author`            |
//! | `mod ids; use ids::Id`  | `use super::ids::Id`           |
//!
//! Glob imports are skipped: they have no short name to resolve.

use std::collections::{BTreeMap, BTreeSet};

use syn::{File, Item, UseTree};

const NUMERIC_PRIMITIVES: &[&str] = &[
    "i8", "i16", "i32", "i64", "isize", "u8", "u16", "u32", "u64", "usize", "f32", "f64"
];

/// Short name to child-module path mapping, plus unit-local numeric aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportTable {
    entries:         BTreeMap<String, String>,
    numeric_aliases: BTreeMap<String, String>
}

impl ImportTable {
    /// Build the table from a parsed file.
    pub fn from_file(file: &File) -> Self {
        let local_modules: BTreeSet<String> = file
            .items
            .iter()
            .filter_map(|item| match item {
                Item::Mod(module) => Some(module.ident.to_string()),
                _ => None
            })
            .collect();

        let mut table = Self::default();
        for item in &file.items {
            match item {
                Item::Use(item) => {
                    let prefix = if item.leading_colon.is_some() {
                        vec![String::new()]
                    } else {
                        Vec::new()
                    };
                    table.flatten(&item.tree, prefix, &local_modules);
                }
                Item::Struct(item) => table.declare_local(&item.ident),
                Item::Enum(item) => table.declare_local(&item.ident),
                Item::Type(item) => {
                    table.declare_local(&item.ident);
                    if let Some(target) = numeric_target(&item.ty) {
                        table
                            .numeric_aliases
                            .insert(item.ident.to_string(), target);
                    }
                }
                _ => {}
            }
        }
        table
    }

    /// Child-module path for a short name.
    pub fn resolve(&self, short: &str) -> Option<&str> {
        self.entries.get(short).map(String::as_str)
    }

    /// Primitive target of a unit-local `type X = <numeric>;` alias.
    pub fn numeric_alias(&self, name: &str) -> Option<&str> {
        self.numeric_aliases.get(name).map(String::as_str)
    }

    /// Number of resolvable short names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn declare_local(&mut self, ident: &syn::Ident) {
        let name = ident.to_string();
        self.entries.insert(name.clone(), format!("super::{name}"));
    }

    fn flatten(&mut self, tree: &UseTree, prefix: Vec<String>, local_modules: &BTreeSet<String>) {
        match tree {
            UseTree::Path(path) => {
                let mut next = prefix;
                next.push(path.ident.to_string());
                self.flatten(&path.tree, next, local_modules);
            }
            UseTree::Name(name) => {
                let ident = name.ident.to_string();
                if ident == "self" {
                    if let Some(last) = prefix.last().cloned() {
                        let path = child_path(&prefix, local_modules);
                        self.entries.insert(last, path);
                    }
                    return;
                }
                let mut full = prefix;
                full.push(ident.clone());
                self.entries.insert(ident, child_path(&full, local_modules));
            }
            UseTree::Rename(rename) => {
                let mut full = prefix;
                full.push(rename.ident.to_string());
                let alias = rename.rename.to_string();
                let path = format!("{} as {alias}", child_path(&full, local_modules));
                self.entries.insert(alias, path);
            }
            UseTree::Group(group) => {
                for item in &group.items {
                    self.flatten(item, prefix.clone(), local_modules);
                }
            }
            UseTree::Glob(_) => {}
        }
    }
}

/// Rewrite a source-unit path for use one module level down.
fn child_path(segments: &[String], local_modules: &BTreeSet<String>) -> String {
    let joined = segments.join("::");
    match segments.first().map(String::as_str) {
        Some("self") => format!("super{}", &joined["self".len()..]),
        Some("super") => format!("super::{joined}"),
        Some(first) if local_modules.contains(first) => format!("super::{joined}"),
        _ => joined
    }
}

fn numeric_target(ty: &syn::Type) -> Option<String> {
    let syn::Type::Path(path) = ty else {
        return None;
    };
    let ident = path.path.get_ident()?.to_string();
    NUMERIC_PRIMITIVES.contains(&ident.as_str()).then_some(ident)
}
