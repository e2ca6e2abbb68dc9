// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field type classification.
//!
//! Maps a field type to the [`TypeCategory`] mask that decides which
//! blueprint slots and predicates a field gets.
//!
//! | Rust type | Category |
//! |-----------|----------|
//! | `i8`..`i64`, `isize`, `f32`, `f64` | `NUMERIC` |
//! | `u8`..`u64`, `usize` | `NUMERIC \| UNSIGNED` |
//! | registered custom type | `NUMERIC` |
//! | `type X = u32;` in the unit | `NUMERIC \| USER_NUMERIC \| UNSIGNED` |
//! | `String` | `STRING` |
//! | `bool` | `BOOLEAN` |
//! | `NaiveDateTime`, `NaiveDate`, `NaiveTime`, `DateTime<Utc \| FixedOffset \| Local>` | `TIME` |
//! | `Option<numeric>` | `NULLABLE_INT` |
//! | `Option<time>` | `NULLABLE_TIME` |
//! | `Option<String>` | `NULLABLE_STRING` |
//! | `Option<bool>` | `NULLABLE_BOOL` |
//!
//! `&T` and `Box<T>` classify as `T`. `Vec<T>`, arrays and slices are
//! rejected.

use bitflags::bitflags;
use quote::ToTokens;
use syn::{GenericArgument, PathArguments, Type, TypePath};

use crate::{config::Config, error::TypeIssue, scan::ImportTable};

bitflags! {
    /// Category mask of a field type.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TypeCategory: u16 {
        /// Integers, floats and registered numeric types.
        const NUMERIC = 1;
        /// `String`.
        const STRING = 1 << 1;
        /// `bool`.
        const BOOLEAN = 1 << 2;
        /// Dates, times and timestamps.
        const TIME = 1 << 3;
        /// `Option` of a numeric type.
        const NULLABLE_INT = 1 << 4;
        /// `Option` of a time type.
        const NULLABLE_TIME = 1 << 5;
        /// A numeric alias declared in the source unit.
        const USER_NUMERIC = 1 << 6;
        /// `Option<String>`.
        const NULLABLE_STRING = 1 << 7;
        /// `Option<bool>`.
        const NULLABLE_BOOL = 1 << 8;
        /// Unsigned integer; required for bitmask fields.
        const UNSIGNED = 1 << 9;

        /// Every nullable category.
        const NULLABLE = Self::NULLABLE_INT.bits()
            | Self::NULLABLE_TIME.bits()
            | Self::NULLABLE_STRING.bits()
            | Self::NULLABLE_BOOL.bits();
    }
}

impl TypeCategory {
    /// Whether the blueprint gets a range slot.
    pub fn has_range(self) -> bool {
        self.intersects(Self::NUMERIC | Self::TIME)
    }

    /// Whether the blueprint gets a like slot.
    pub fn has_like(self) -> bool {
        self.contains(Self::STRING)
    }

    /// Whether the exact slot is a nullable IN clause.
    pub fn is_nullable(self) -> bool {
        self.intersects(Self::NULLABLE)
    }
}

const SIGNED: &[&str] = &["i8", "i16", "i32", "i64", "isize", "f32", "f64"];
const UNSIGNED: &[&str] = &["u8", "u16", "u32", "u64", "usize"];
const TIME: &[&str] = &["NaiveDateTime", "NaiveDate", "NaiveTime"];
/// Time zones the runtime converts `DateTime<_>` for.
const ZONES: &[&str] = &["Utc", "FixedOffset", "Local"];
const PRELUDE: &[&str] = &[
    "Option", "String", "Vec", "Box", "bool", "char", "str", "i8", "i16", "i32", "i64", "i128",
    "isize", "u8", "u16", "u32", "u64", "u128", "usize", "f32", "f64", "Self"
];

/// Inputs used to classify a type.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    config:  &'a Config,
    imports: &'a ImportTable
}

impl<'a> Classifier<'a> {
    /// Create a classifier for one source unit.
    pub fn new(config: &'a Config, imports: &'a ImportTable) -> Self {
        Self {
            config,
            imports
        }
    }

    /// Classify a field type.
    ///
    /// # Errors
    ///
    /// [`TypeIssue::Slice`] for sequences, [`TypeIssue::Unrecognized`] for
    /// everything outside the table above.
    pub fn classify(&self, ty: &Type) -> Result<TypeCategory, TypeIssue> {
        match ty {
            Type::Slice(_) | Type::Array(_) => Err(TypeIssue::Slice),
            Type::Reference(reference) => self.classify(&reference.elem),
            Type::Paren(inner) => self.classify(&inner.elem),
            Type::Group(inner) => self.classify(&inner.elem),
            Type::Path(path) => self.classify_path(path),
            _ => Err(TypeIssue::Unrecognized)
        }
    }

    fn classify_path(&self, path: &TypePath) -> Result<TypeCategory, TypeIssue> {
        let Some(last) = path.path.segments.last() else {
            return Err(TypeIssue::Unrecognized);
        };
        let ident = last.ident.to_string();

        match ident.as_str() {
            "Vec" | "VecDeque" => return Err(TypeIssue::Slice),
            "Box" => {
                let inner = single_argument(last).ok_or(TypeIssue::Unrecognized)?;
                return self.classify(inner);
            }
            "Option" => {
                let inner = single_argument(last).ok_or(TypeIssue::Unrecognized)?;
                return self.classify_nullable(inner);
            }
            _ => {}
        }

        if path.qself.is_none() && path.path.segments.len() == 1 {
            if SIGNED.contains(&ident.as_str()) {
                return Ok(TypeCategory::NUMERIC);
            }
            if UNSIGNED.contains(&ident.as_str()) {
                return Ok(TypeCategory::NUMERIC | TypeCategory::UNSIGNED);
            }
            match ident.as_str() {
                "String" => return Ok(TypeCategory::STRING),
                "bool" => return Ok(TypeCategory::BOOLEAN),
                _ => {}
            }
            if let Some(target) = self.imports.numeric_alias(&ident) {
                let mut category = TypeCategory::NUMERIC | TypeCategory::USER_NUMERIC;
                if UNSIGNED.contains(&target) {
                    category |= TypeCategory::UNSIGNED;
                }
                return Ok(category);
            }
        }

        if ident == "DateTime" {
            return match single_argument(last).and_then(last_ident) {
                Some(zone) if ZONES.contains(&zone.as_str()) => Ok(TypeCategory::TIME),
                _ => Err(TypeIssue::Unrecognized)
            };
        }
        if TIME.contains(&ident.as_str()) {
            return Ok(TypeCategory::TIME);
        }
        if self.config.is_numeric(&ident) || self.config.is_numeric(&path_text(path)) {
            return Ok(TypeCategory::NUMERIC);
        }
        Err(TypeIssue::Unrecognized)
    }

    fn classify_nullable(&self, inner: &Type) -> Result<TypeCategory, TypeIssue> {
        let category = self.classify(inner)?;
        if category.is_nullable() {
            return Err(TypeIssue::Unrecognized);
        }
        if category.contains(TypeCategory::TIME) {
            Ok(TypeCategory::NULLABLE_TIME)
        } else if category.contains(TypeCategory::NUMERIC) {
            Ok(TypeCategory::NULLABLE_INT)
        } else if category.contains(TypeCategory::STRING) {
            Ok(TypeCategory::NULLABLE_STRING)
        } else if category.contains(TypeCategory::BOOLEAN) {
            Ok(TypeCategory::NULLABLE_BOOL)
        } else {
            Err(TypeIssue::Unrecognized)
        }
    }
}

fn single_argument(segment: &syn::PathSegment) -> Option<&Type> {
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None
    })
}

fn last_ident(ty: &Type) -> Option<String> {
    let Type::Path(path) = ty else {
        return None;
    };
    path.path.segments.last().map(|segment| segment.ident.to_string())
}

fn path_text(path: &TypePath) -> String {
    path.path
        .segments
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect::<Vec<_>>()
        .join("::")
}

/// Short names a type needs in scope.
///
/// For a qualified path the hint is its first segment (`chrono` for
/// `chrono::NaiveDate`); for a bare name it is the name itself unless it is
/// in the prelude. Generic arguments are walked too.
pub fn import_hints(ty: &Type) -> Vec<String> {
    let mut hints = Vec::new();
    collect_hints(ty, &mut hints);
    hints.sort();
    hints.dedup();
    hints
}

fn collect_hints(ty: &Type, hints: &mut Vec<String>) {
    match ty {
        Type::Reference(reference) => collect_hints(&reference.elem, hints),
        Type::Paren(inner) => collect_hints(&inner.elem, hints),
        Type::Group(inner) => collect_hints(&inner.elem, hints),
        Type::Path(path) => {
            let segments = &path.path.segments;
            if let Some(first) = segments.first()
                && path.path.leading_colon.is_none()
            {
                let name = first.ident.to_string();
                let qualified = segments.len() > 1;
                if qualified && !matches!(name.as_str(), "crate" | "self" | "super") {
                    hints.push(name);
                } else if !qualified && !PRELUDE.contains(&name.as_str()) {
                    hints.push(name);
                }
            }
            for segment in segments {
                if let PathArguments::AngleBracketed(args) = &segment.arguments {
                    for arg in &args.args {
                        if let GenericArgument::Type(inner) = arg {
                            collect_hints(inner, hints);
                        }
                    }
                }
            }
        }
        _ => {}
    }
}

/// A type as written, without the token spacing: `Vec<String>`, `&'a str`.
pub fn display_type(ty: &Type) -> String {
    let text = ty.to_token_stream().to_string();
    let word = |c: char| c.is_alphanumeric() || c == '_';
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    for (i, &c) in chars.iter().enumerate() {
        if c == ' ' {
            let before = out.chars().last().is_some_and(word);
            let after = chars.get(i + 1).copied().is_some_and(word);
            if !(before && after) {
                continue;
            }
        }
        out.push(c);
    }
    out
}

/// Parse a type kept as text on a [`FieldModel`](super::FieldModel).
pub fn parse_type(text: &str) -> syn::Result<Type> {
    syn::parse_str::<Type>(text)
}
