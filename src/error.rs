// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generator error types.
//!
//! Every failure renders as a single diagnostic line naming the record (and
//! field, when there is one) and the error kind:
//!
//! ```text
//! config error at record `Author` field `name`: duplicate-column `name`
//! unsupported type at record `Author` field `tags`: `Vec<String>` (unsupported-slice-type)
//! ```
//!
//! [`Error::Format`] is the exception: it also carries the unformatted output,
//! because a format failure means the generator itself emitted bad code.
//!
//! Errors cross producer threads, so they hold owned strings rather than
//! `syn::Error` (whose spans are not `Send`).

use std::{fmt, io};

use thiserror::Error;

/// Result alias used throughout the generator.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Generator failure.
#[derive(Debug, Error)]
pub enum Error {
    /// The source unit could not be parsed.
    #[error("parse error in `{unit}`: {message}")]
    Parse {
        /// Name of the source unit.
        unit:    String,
        /// Parser message.
        message: String
    },

    /// A tag option is malformed, missing, or violates a model invariant.
    #[error("config error at {site}: {issue}")]
    Config {
        /// Offending record and field.
        site:  Site,
        /// What went wrong.
        issue: ConfigIssue
    },

    /// A field type has no supported category.
    #[error("unsupported type at {site}: `{ty}` ({issue})")]
    UnsupportedType {
        /// Offending record and field.
        site:  Site,
        /// The field type as written.
        ty:    String,
        /// Why it was rejected.
        issue: TypeIssue
    },

    /// The downstream writer failed, or a producer's output was closed.
    #[error("emit error: {0}")]
    Emit(#[from] io::Error),

    /// Assembled output does not parse. This is a generator bug.
    #[error("format error: {reason}\n--- unformatted output ---\n{output}")]
    Format {
        /// Parser message.
        reason: String,
        /// The text that failed to parse.
        output: String
    }
}

impl Error {
    /// Build a [`Error::Config`] for a record-level problem.
    pub fn config(record: impl Into<String>, issue: ConfigIssue) -> Self {
        Self::Config {
            site: Site::record(record),
            issue
        }
    }

    /// Build a [`Error::Config`] for a field-level problem.
    pub fn field_config(
        record: impl Into<String>,
        field: impl Into<String>,
        issue: ConfigIssue
    ) -> Self {
        Self::Config {
            site: Site::field(record, field),
            issue
        }
    }

    pub(crate) fn format(reason: impl fmt::Display, output: impl Into<String>) -> Self {
        Self::Format {
            reason: reason.to_string(),
            output: output.into()
        }
    }

    pub(crate) fn closed() -> Self {
        Self::Emit(io::Error::new(
            io::ErrorKind::BrokenPipe,
            "record output was closed"
        ))
    }
}

/// Location of a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    /// Record (struct) name.
    pub record: String,
    /// Field name, for field-level problems.
    pub field:  Option<String>
}

impl Site {
    /// A record-level site.
    pub fn record(record: impl Into<String>) -> Self {
        Self {
            record: record.into(),
            field:  None
        }
    }

    /// A field-level site.
    pub fn field(record: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            record: record.into(),
            field:  Some(field.into())
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record `{}`", self.record)?;
        if let Some(field) = &self.field {
            write!(f, " field `{field}`")?;
        }
        Ok(())
    }
}

/// Configuration violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigIssue {
    /// The tag is not a URL-query string, or the attribute is not `#[marlow = "..."]`.
    #[error("malformed-tag: {0}")]
    MalformedTag(String),

    /// A tag key is not recognized at this scope.
    #[error("unknown-option `{0}`")]
    UnknownOption(String),

    /// A tag value cannot be interpreted.
    #[error("invalid-option-value `{key}={value}`")]
    InvalidOptionValue {
        /// Option key.
        key:   String,
        /// Rejected value.
        value: String
    },

    /// Two fields map to the same column.
    #[error("duplicate-column `{0}`")]
    DuplicateColumn(String),

    /// A table, column, or generated identifier has illegal characters.
    #[error("invalid-name `{0}`")]
    InvalidName(String),

    /// `bitmask` was set on a field that is not an unsigned integer.
    #[error("bitmask-not-unsigned")]
    BitmaskNotUnsigned,

    /// Postgres creation needs `primaryKey`.
    #[error("missing-primary-key: postgres creation requires `primaryKey`")]
    MissingPrimaryKey,

    /// `softDelete` names no nullable timestamp column of the record.
    #[error("unknown-soft-delete-field `{0}`")]
    UnknownSoftDeleteField(String),

    /// Two blueprint slots would share a name.
    #[error("blueprint-field-collision `{0}`")]
    BlueprintFieldCollision(String),

    /// Two generated store methods share a name.
    #[error("duplicate-method `{0}`")]
    DuplicateMethod(String),

    /// The same record is declared twice in one unit.
    #[error("duplicate-record")]
    DuplicateRecord,

    /// Records must not be generic.
    #[error("generic-record: records cannot have generic parameters")]
    GenericRecord,

    /// Records must be structs with named fields.
    #[error("unnamed-fields: records need named fields")]
    UnnamedFields
}

/// Reasons a field type is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TypeIssue {
    /// `Vec<T>`, `[T; N]` and `&[T]` are not columns.
    #[error("unsupported-slice-type")]
    Slice,

    /// The type maps to no known category.
    #[error("no recognized type category")]
    Unrecognized
}
