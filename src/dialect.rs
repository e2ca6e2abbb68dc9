// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! SQL dialect capabilities.
//!
//! Feature generators never branch on a dialect name. They ask the
//! [`Dialect`] for the pieces that differ:
//!
//! | capability | `Default` | `Postgres` |
//! |------------|-----------|------------|
//! | placeholder | `?` | `$N` |
//! | null-present predicate | `c NOT NULL` | `c IS NOT NULL` |
//! | insert suffix | none | `RETURNING pk` |
//! | update target binding | first | last |

use proc_macro2::TokenStream;
use quote::quote;

/// SQL dialect of a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Dialect {
    /// Positional `?` placeholders (MySQL, SQLite).
    #[default]
    Default,

    /// Numbered `$N` placeholders and `INSERT ... RETURNING`.
    Postgres
}

impl Dialect {
    /// Parse a `dialect` option value.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "" | "default" | "mysql" | "sqlite" => Some(Self::Default),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None
        }
    }

    /// Expression of type `String` rendering the placeholder at `index`.
    ///
    /// `index` is a `usize` expression in the emitted code; the default
    /// dialect ignores it.
    pub fn placeholder(self, index: &TokenStream) -> TokenStream {
        match self {
            Self::Default => quote! { ::std::string::String::from("?") },
            Self::Postgres => quote! { ::std::format!("${}", #index) }
        }
    }

    /// Predicate matching rows where `column` is not null.
    pub fn null_present_predicate(self, column: &str) -> String {
        match self {
            Self::Default => format!("{column} NOT NULL"),
            Self::Postgres => format!("{column} IS NOT NULL")
        }
    }

    /// Text appended after the `VALUES` groups of an insert.
    pub fn insert_suffix(self, primary_key: Option<&str>) -> String {
        match (self, primary_key) {
            (Self::Postgres, Some(pk)) => format!(" RETURNING {pk}"),
            _ => String::new()
        }
    }

    /// Whether inserts report keys through returned rows.
    pub fn returns_inserted_keys(self) -> bool {
        matches!(self, Self::Postgres)
    }

    /// Whether the update target value is bound after the blueprint values.
    pub fn binds_target_last(self) -> bool {
        matches!(self, Self::Postgres)
    }
}
