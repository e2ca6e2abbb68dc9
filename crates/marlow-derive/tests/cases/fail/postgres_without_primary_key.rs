// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use marlow_derive::Marlow;

#[derive(Marlow)]
#[marlow = "dialect=postgres"]
pub struct Account {
    #[marlow = "column=name"]
    pub name: String,
}

fn main() {}
