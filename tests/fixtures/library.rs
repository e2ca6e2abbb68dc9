// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use chrono::{NaiveDate, NaiveDateTime};

pub type Cents = i64;

pub struct Author {
    #[marlow = "tableName=authors"]
    table: (),

    #[marlow = "column=system_id&autoIncrement=true"]
    pub id: i64,

    #[marlow = "column=name"]
    pub name: String,

    #[marlow = "column=birthday"]
    pub birthday: Option<NaiveDate>,
}

#[marlow = "dialect=postgres&primaryKey=id&softDelete=removed_at&defaultLimit=20"]
pub struct Loan {
    #[marlow = "column=id&autoIncrement=true"]
    pub id: i64,

    #[marlow = "column=fee"]
    pub fee: Cents,

    #[marlow = "column=author_id&references=Author"]
    pub author_id: i64,

    #[marlow = "column=removed_at"]
    pub removed_at: Option<NaiveDateTime>,
}

pub struct Shelf {
    pub label: String,
}
