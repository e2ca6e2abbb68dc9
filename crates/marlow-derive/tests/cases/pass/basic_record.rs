// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use marlow_derive::Marlow;

#[derive(Debug, Clone, Default, Marlow)]
pub struct Book {
    #[marlow = "tableName=books"]
    table: (),

    #[marlow = "column=id&autoIncrement=true"]
    pub id: i64,

    #[marlow = "column=title"]
    pub title: String,

    #[marlow = "column=published"]
    pub published: bool,

    #[marlow = "column=rating"]
    pub rating: Option<f64>,
}

fn main() {
    let blueprint = BookBlueprint {
        id_range: vec![1, 10],
        title_like: vec!["%rust%".to_string()],
        published: vec![true],
        rating: Some(vec![Some(4.5)]),
        ..Default::default()
    };
    assert_eq!(blueprint.values().len(), 5);
    assert!(blueprint.has_conditions());

    fn assert_repository<R: BookRepository>() {}
    assert_repository::<BookStore<Box<dyn marlow_core::Connection>>>();
}
