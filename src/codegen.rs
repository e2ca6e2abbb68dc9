// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Feature generators.
//!
//! Each feature is an independent producer: it reads the shared record
//! model, renders its fragment and reports import hints and store methods
//! through its [`Emitter`].
//!
//! # Architecture
//!
//! ```text
//! codegen.rs (feature dispatch)
//! ├── context.rs    - identifiers and shared token snippets
//! ├── emit.rs       - producer messages and the emitter
//! ├── blueprint.rs  - query blueprint type, clauses, predicate
//! ├── createable.rs - batch INSERT
//! ├── updateable.rs - per-field UPDATE, bitmask add/drop
//! ├── deleteable.rs - guarded DELETE
//! └── queryable.rs  - finder, counter, selectors
//! ```

mod blueprint;
mod context;
mod createable;
mod deleteable;
mod emit;
mod queryable;
mod updateable;

pub use context::{Context, ident};
pub use emit::{Emitter, Message, Outbox};

use crate::{
    error::Result,
    model::{Features, RecordModel}
};

/// A feature producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Batch insert.
    Createable,
    /// Per-field updates.
    Updateable,
    /// Guarded delete.
    Deleteable,
    /// Finder, counter, selectors.
    Queryable,
    /// Query blueprint.
    Blueprint
}

impl Feature {
    /// Fragment order in the emitted record.
    pub const ORDER: [Self; 5] = [
        Self::Createable,
        Self::Updateable,
        Self::Deleteable,
        Self::Queryable,
        Self::Blueprint
    ];

    /// Position in [`Feature::ORDER`].
    pub fn index(self) -> usize {
        match self {
            Self::Createable => 0,
            Self::Updateable => 1,
            Self::Deleteable => 2,
            Self::Queryable => 3,
            Self::Blueprint => 4
        }
    }

    /// Name used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Createable => "createable",
            Self::Updateable => "updateable",
            Self::Deleteable => "deleteable",
            Self::Queryable => "queryable",
            Self::Blueprint => "blueprint"
        }
    }

    /// Whether this producer runs for `model`.
    ///
    /// Records without columns only get a store. The blueprint is shared by
    /// every other feature and runs whenever one of them does.
    pub fn is_enabled(self, model: &RecordModel) -> bool {
        if model.fields.is_empty() {
            return false;
        }
        match self {
            Self::Createable => model.has(Features::CREATEABLE),
            Self::Updateable => model.has(Features::UPDATEABLE),
            Self::Deleteable => model.has(Features::DELETEABLE),
            Self::Queryable => model.has(Features::QUERYABLE),
            Self::Blueprint => !model.features.is_empty()
        }
    }

    /// Render this feature for `ctx`.
    ///
    /// # Errors
    ///
    /// Emit errors when cancelled, format errors for unparsable names.
    pub fn produce(self, ctx: &Context<'_>, out: &Emitter<'_>) -> Result<()> {
        match self {
            Self::Createable => createable::produce(ctx, out),
            Self::Updateable => updateable::produce(ctx, out),
            Self::Deleteable => deleteable::produce(ctx, out),
            Self::Queryable => queryable::produce(ctx, out),
            Self::Blueprint => blueprint::produce(ctx, out)
        }
    }
}
