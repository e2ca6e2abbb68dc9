// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Tag string parsing.
//!
//! A tag is a URL-query string: `column=system_id&autoIncrement=true`.
//! Keys may repeat and order is preserved. A key without `=` has an empty
//! value, which flags read as `true`.

use crate::error::ConfigIssue;

/// Parse a tag string into ordered key/value pairs.
pub fn parse(raw: &str) -> Result<Vec<(String, String)>, ConfigIssue> {
    serde_urlencoded::from_str::<Vec<(String, String)>>(raw)
        .map_err(|err| ConfigIssue::MalformedTag(err.to_string()))
}

/// Interpret a flag value.
pub fn flag(key: &str, value: &str) -> Result<bool, ConfigIssue> {
    match value {
        "" | "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(invalid(key, value))
    }
}

pub(crate) fn invalid(key: &str, value: &str) -> ConfigIssue {
    ConfigIssue::InvalidOptionValue {
        key:   key.to_owned(),
        value: value.to_owned()
    }
}
