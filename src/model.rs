// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Record model builder.
//!
//! # Architecture
//!
//! ```text
//! model.rs (coordinator)
//! ├── tag.rs     - URL-query tag strings
//! ├── options.rs - closed record and field option sets
//! ├── types.rs   - type categories and import hints
//! ├── naming.rs  - tables, methods, blueprint slots
//! ├── field.rs   - FieldModel
//! └── record.rs  - RecordModel and invariants
//! ```

mod field;
mod naming;
mod options;
mod record;
mod tag;
mod types;

pub use field::FieldModel;
pub use record::{Features, RecordModel};
pub use types::parse_type;
