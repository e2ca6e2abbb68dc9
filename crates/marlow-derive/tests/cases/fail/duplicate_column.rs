// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use marlow_derive::Marlow;

#[derive(Marlow)]
pub struct Pair {
    #[marlow = "column=v"]
    pub a: i64,

    #[marlow = "column=v"]
    pub b: i64,
}

fn main() {}
