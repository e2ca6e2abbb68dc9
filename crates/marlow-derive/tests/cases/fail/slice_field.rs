// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use marlow_derive::Marlow;

#[derive(Marlow)]
pub struct Post {
    #[marlow = "column=tags"]
    pub tags: Vec<String>,
}

fn main() {}
