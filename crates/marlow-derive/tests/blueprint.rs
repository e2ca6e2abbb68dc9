// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

mod common;

use common::{AuthorBlueprint, MultiAutoBlueprint};
use marlow_core::Value;
use pretty_assertions::assert_eq;

#[test]
fn exact_match_lists_one_placeholder_per_value() {
    let blueprint = AuthorBlueprint {
        id: vec![1, 2, 3],
        ..Default::default()
    };
    assert_eq!(blueprint.to_string(), "WHERE authors.system_id IN (?,?,?)");
    assert_eq!(blueprint.values(), vec![
        Value::Int(1),
        Value::Int(2),
        Value::Int(3)
    ]);
}

#[test]
fn inclusive_range_and_like() {
    let blueprint = AuthorBlueprint {
        id_range: vec![1, 4],
        name_like: vec!["%rodger%".into()],
        inclusive: true,
        ..Default::default()
    };
    assert_eq!(
        blueprint.to_string(),
        "WHERE (authors.system_id > ? AND authors.system_id < ?) OR authors.name LIKE ?"
    );
    assert_eq!(blueprint.values(), vec![
        Value::Int(1),
        Value::Int(4),
        Value::Text("%rodger%".into())
    ]);
}

#[test]
fn invalid_nullable_value_means_is_null() {
    let blueprint = AuthorBlueprint {
        university_id: Some(vec![None]),
        ..Default::default()
    };
    assert_eq!(blueprint.to_string(), "WHERE authors.university_id IS NULL");
    assert!(blueprint.values().is_empty());
}

#[test]
fn present_but_empty_nullable_means_not_null() {
    let blueprint = AuthorBlueprint {
        university_id: Some(vec![]),
        ..Default::default()
    };
    assert_eq!(blueprint.to_string(), "WHERE authors.university_id NOT NULL");
}

#[test]
fn nullable_values_bind_like_exact_matches() {
    let blueprint = AuthorBlueprint {
        university_id: Some(vec![Some(7), Some(9)]),
        ..Default::default()
    };
    assert_eq!(blueprint.to_string(), "WHERE authors.university_id IN (?,?)");
    assert_eq!(blueprint.values(), vec![Value::Int(7), Value::Int(9)]);
}

#[test]
fn range_needs_exactly_two_values() {
    let blueprint = AuthorBlueprint {
        id_range: vec![1, 2, 3],
        ..Default::default()
    };
    assert_eq!(blueprint.to_string(), "");
    assert!(!blueprint.has_conditions());
}

#[test]
fn clauses_are_joined_with_and_by_default() {
    let blueprint = AuthorBlueprint {
        name: vec!["ann".into()],
        flags: vec![1],
        ..Default::default()
    };
    assert_eq!(
        blueprint.to_string(),
        "WHERE authors.name IN (?) AND authors.flags IN (?)"
    );
}

#[test]
fn empty_blueprint_has_no_predicate() {
    let blueprint = AuthorBlueprint::default();
    assert_eq!(blueprint.to_string(), "");
    assert!(blueprint.values().is_empty());
    assert!(!blueprint.has_conditions());
}

#[test]
fn postgres_numbers_placeholders_from_base() {
    let blueprint = MultiAutoBlueprint {
        id: vec![5, 6],
        name_like: vec!["a%".into()],
        status_range: vec![0, 9],
        ..Default::default()
    };
    assert_eq!(
        blueprint.predicate(2),
        "WHERE multi_auto.id IN ($2,$3) AND multi_auto.name LIKE $4 AND (multi_auto.status > $5 \
         AND multi_auto.status < $6) AND multi_auto.deleted_at IS NULL"
    );
    assert_eq!(blueprint.values().len(), 5);
}

#[test]
fn soft_delete_scope_alone() {
    let blueprint = MultiAutoBlueprint::default();
    assert_eq!(blueprint.to_string(), "WHERE multi_auto.deleted_at IS NULL");
    assert!(!blueprint.has_conditions());
}

#[test]
fn unscoped_blueprint_drops_the_scope() {
    let blueprint = MultiAutoBlueprint {
        unscoped: true,
        ..Default::default()
    };
    assert_eq!(blueprint.to_string(), "");
}

#[test]
fn inclusive_clauses_are_grouped_before_the_scope() {
    let blueprint = MultiAutoBlueprint {
        id: vec![1],
        name: vec!["x".into()],
        inclusive: true,
        ..Default::default()
    };
    assert_eq!(
        blueprint.to_string(),
        "WHERE (multi_auto.id IN ($1) OR multi_auto.name IN ($2)) AND multi_auto.deleted_at IS NULL"
    );
}

#[test]
fn postgres_present_but_empty_nullable_is_not_null() {
    let blueprint = MultiAutoBlueprint {
        created_at: Some(vec![]),
        unscoped: true,
        ..Default::default()
    };
    assert_eq!(blueprint.to_string(), "WHERE multi_auto.created_at IS NOT NULL");
}

#[test]
fn order_clause_accepts_known_columns_only() {
    let mut blueprint = AuthorBlueprint {
        order_by: "system_id".into(),
        order_direction: "DESC".into(),
        ..Default::default()
    };
    assert_eq!(blueprint.order_clause(), "ORDER BY authors.system_id DESC");

    blueprint.order_direction = "sideways".into();
    assert_eq!(blueprint.order_clause(), "ORDER BY authors.system_id ASC");

    blueprint.order_by = "id; DROP TABLE authors".into();
    assert_eq!(blueprint.order_clause(), "");
}
