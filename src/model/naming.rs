// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Naming rules for tables, methods and blueprint slots.

use convert_case::{Case, Casing};

/// Blueprint fields every blueprint carries.
pub const COMMON_SLOTS: &[&str] = &[
    "inclusive",
    "limit",
    "offset",
    "order_by",
    "order_direction",
    "unscoped"
];

/// Simple English pluralization.
///
/// - `s`, `sh`, `ch`, `x` endings take `es`
/// - consonant + `y` becomes `ies`
/// - everything else takes `s`
pub fn pluralize(s: &str) -> String {
    if s.ends_with('s') || s.ends_with("sh") || s.ends_with("ch") || s.ends_with('x') {
        format!("{s}es")
    } else if s.ends_with('y') && !s.ends_with("ay") && !s.ends_with("ey") && !s.ends_with("oy") {
        format!("{}ies", &s[..s.len() - 1])
    } else {
        format!("{s}s")
    }
}

/// Default table name: lowercased plural of the record name.
pub fn default_table(record: &str) -> String {
    pluralize(record).to_lowercase()
}

/// Join a method prefix and a noun into a snake_case method name.
///
/// `("Find", "Authors")` becomes `find_authors`.
pub fn method_name(prefix: &str, noun: &str) -> String {
    let prefix = prefix.to_case(Case::Snake);
    let noun = noun.to_case(Case::Snake);
    if prefix.is_empty() {
        noun
    } else {
        format!("{prefix}_{noun}")
    }
}

/// Name of a suffixed blueprint slot: `("name", "Like")` becomes `name_like`.
pub fn slot_name(field: &str, suffix: &str) -> String {
    format!("{field}_{}", suffix.to_case(Case::Snake))
}

/// SQL table and column names: ASCII letters and underscores only.
pub fn is_sql_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphabetic() || b == b'_')
}

/// Whether `name` is usable as a Rust identifier.
pub fn is_rust_ident(name: &str) -> bool {
    syn::parse_str::<syn::Ident>(name).is_ok()
}
