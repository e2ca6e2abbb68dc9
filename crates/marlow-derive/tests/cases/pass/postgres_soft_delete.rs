// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use chrono::NaiveDateTime;
use marlow_derive::Marlow;

#[derive(Debug, Clone, Default, Marlow)]
#[marlow = "tableName=sessions&dialect=postgres&primaryKey=id&softDelete=revoked_at"]
pub struct Session {
    #[marlow = "column=id&autoIncrement=true"]
    pub id: i64,

    #[marlow = "column=token"]
    pub token: String,

    #[marlow = "column=scopes&bitmask=true"]
    pub scopes: u32,

    #[marlow = "column=revoked_at"]
    pub revoked_at: Option<NaiveDateTime>,
}

fn main() {
    let blueprint = SessionBlueprint {
        token: vec!["abc".into()],
        ..Default::default()
    };
    assert_eq!(
        blueprint.to_string(),
        "WHERE sessions.token IN ($1) AND sessions.revoked_at IS NULL"
    );

    let unscoped = SessionBlueprint {
        unscoped: true,
        ..Default::default()
    };
    assert_eq!(unscoped.to_string(), "");

    let _ = SessionStore::<Box<dyn marlow_core::Connection>>::add_session_scopes;
    let _ = SessionStore::<Box<dyn marlow_core::Connection>>::drop_session_scopes;
}
