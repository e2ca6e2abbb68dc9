// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use marlow_derive::Marlow;

#[derive(Debug, Clone, Default, Marlow)]
#[marlow = "tableName=people&storeName=Directory&blueprintName=PersonFilter&recordName=Person"]
#[marlow = "storeFindMethodPrefix=Lookup&storeCountMethodPrefix=Tally&storeSelectMethodPrefix=Pluck"]
#[marlow = "updateFieldMethodPrefix=Set&blueprintLikeFieldSuffix=Matches&defaultLimit=25"]
pub struct Person {
    #[marlow = "column=full_name"]
    pub name: String,

    #[marlow = "column=-"]
    pub cache: String,
}

fn main() {
    let filter = PersonFilter {
        name_matches: vec!["a%".into()],
        ..Default::default()
    };
    assert_eq!(filter.to_string(), "WHERE people.full_name LIKE ?");

    let _ = Directory::<Box<dyn marlow_core::Connection>>::lookup_persons;
    let _ = Directory::<Box<dyn marlow_core::Connection>>::tally_persons;
    let _ = Directory::<Box<dyn marlow_core::Connection>>::pluck_names;
    let _ = Directory::<Box<dyn marlow_core::Connection>>::set_person_name;
}
