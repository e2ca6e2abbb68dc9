// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use marlow_core::prelude::*;
use marlow_derive::Marlow;

#[derive(Debug, Clone, Default, Marlow)]
#[marlow = "tableName=audit_log&updateable=false&deleteable=false"]
pub struct AuditEntry {
    #[marlow = "column=id&autoIncrement=true"]
    pub id: i64,

    #[marlow = "column=message"]
    pub message: String,
}

#[derive(Debug, Clone, Default, Marlow)]
#[marlow = "queryable=false&createable=false&updateable=false&deleteable=false"]
pub struct Disabled {
    #[marlow = "column=id"]
    pub id: i64,
}

#[derive(Debug, Clone, Default, Marlow)]
pub struct Untagged {
    pub note: String,
}

fn main() {
    let _ = AuditEntryStore::<Box<dyn Connection>>::create_audit_entries;
    let _ = AuditEntryStore::<Box<dyn Connection>>::find_audit_entries;
    let _ = UntaggedStore::new((), Some(Logger::discard()));
    let _ = Disabled::default();
}
