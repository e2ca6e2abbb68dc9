// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generator-wide configuration.
//!
//! Per-record options live in tags on the source structs. This type only
//! carries settings that apply to a whole run.

use std::collections::BTreeSet;

/// How feature producers are scheduled for one record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Schedule {
    /// One scoped thread per feature producer, joined by the coordinator.
    #[default]
    Threaded,

    /// Producers run one after another on the calling thread.
    Sequential
}

/// Visibility given to emitted items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    /// Every emitted type and method is `pub`.
    #[default]
    Public,

    /// Emitted items reuse the record's own visibility.
    Inherit
}

/// Generator configuration.
///
/// # Example
///
/// ```rust
/// use marlow::{Config, Schedule};
///
/// let config = Config::default()
///     .with_numeric_type("Timestamp")
///     .with_schedule(Schedule::Sequential);
/// assert!(config.is_numeric("Timestamp"));
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Extra type names treated as numeric (range and IN predicates).
    pub numeric_types: BTreeSet<String>,

    /// Producer scheduling.
    pub schedule: Schedule,

    /// Path of the runtime crate referenced by emitted code.
    pub runtime_crate: String,

    /// Visibility of emitted items.
    pub visibility: Visibility
}

impl Default for Config {
    fn default() -> Self {
        Self {
            numeric_types: BTreeSet::new(),
            schedule:      Schedule::default(),
            runtime_crate: String::from("::marlow_core"),
            visibility:    Visibility::default()
        }
    }
}

impl Config {
    /// Configuration used by `#[derive(Marlow)]`.
    ///
    /// Runs sequentially inside the compiler and keeps the struct's
    /// visibility.
    pub fn for_derive() -> Self {
        Self {
            schedule: Schedule::Sequential,
            visibility: Visibility::Inherit,
            ..Self::default()
        }
    }

    /// Register a custom numeric type name.
    #[must_use]
    pub fn with_numeric_type(mut self, name: impl Into<String>) -> Self {
        self.numeric_types.insert(name.into());
        self
    }

    /// Set producer scheduling.
    #[must_use]
    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Set the runtime crate path.
    #[must_use]
    pub fn with_runtime_crate(mut self, path: impl Into<String>) -> Self {
        self.runtime_crate = path.into();
        self
    }

    /// Set emitted item visibility.
    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Whether `name` was registered as a custom numeric type.
    pub fn is_numeric(&self, name: &str) -> bool {
        self.numeric_types.contains(name)
    }
}
