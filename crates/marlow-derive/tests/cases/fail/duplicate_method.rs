// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use marlow_derive::Marlow;

#[derive(Marlow)]
#[marlow = "tableName=authors&storeSelectMethodPrefix=Find"]
pub struct Author {
    #[marlow = "column=author"]
    pub author: String,
}

fn main() {}
