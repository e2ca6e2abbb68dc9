// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Runtime support for marlow-generated stores.
//!
//! Code emitted by the `marlow` generator never talks to a database driver
//! directly. It speaks to the small set of traits defined here, which a
//! driver adapter (or a test fake) implements.
//!
//! # Overview
//!
//! - [`Connection`] - prepares statements
//! - [`Statement`] - executes or queries a prepared statement
//! - [`Rows`] / [`Row`] - cursor over result rows
//! - [`Value`] / [`FromValue`] - bound parameters and scanned columns
//! - [`Logger`] - statement sink every generated store writes to
//! - [`Error`] - runtime failures, including [`Error::InvalidDeletionBlueprint`]
//!
//! # Usage
//!
//! ```rust,ignore
//! use marlow_core::prelude::*;
//!
//! let store = AuthorStore::new(connection, Some(Logger::new(std::io::stderr())));
//! let authors = store.find_authors(None)?;
//! ```
//!
//! Generated code always refers to this crate by absolute path
//! (`::marlow_core::Value`), so it has to be a direct dependency of the crate
//! that mounts the generated module.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod driver;
mod error;
mod logger;
pub mod prelude;
mod value;

pub use driver::{Connection, ExecOutcome, Row, Rows, Statement};
pub use error::Error;
pub use logger::Logger;
pub use value::{FromValue, Value};
