// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust,ignore
//! use marlow_core::prelude::*;
//! ```

pub use crate::{Connection, Error, ExecOutcome, FromValue, Logger, Row, Rows, Statement, Value};
