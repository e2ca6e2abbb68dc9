// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use super::*;
use crate::{error::TypeIssue, scan};

fn build(source: &str) -> Result<RecordModel> {
    build_with(source, &Config::default())
}

fn build_with(source: &str, config: &Config) -> Result<RecordModel> {
    let unit = scan::scan("test.rs", source)?;
    RecordModel::build(&unit.records[0], &unit.imports, config)
}

fn config_issue(result: Result<RecordModel>) -> ConfigIssue {
    match result {
        Err(Error::Config {
            issue, ..
        }) => issue,
        other => panic!("expected config error, got {other:?}")
    }
}

const AUTHOR: &str = r#"
pub struct Author {
    #[marlow = "tableName=authors"]
    table: (),
    #[marlow = "column=system_id&autoIncrement=true"]
    pub id: i64,
    #[marlow = "column=name"]
    pub name: String,
    #[marlow = "column=university_id"]
    pub university_id: Option<i64>,
    #[marlow = "column=flags&bitmask=true"]
    pub flags: u8,
    pub cache: String,
}
"#;

#[test]
fn author_model() {
    let model = build(AUTHOR).unwrap();
    assert_eq!(model.table, "authors");
    assert_eq!(model.store_name, "AuthorStore");
    assert_eq!(model.blueprint_name, "AuthorBlueprint");
    assert_eq!(model.default_limit, 100);
    assert_eq!(model.dialect, Dialect::Default);
    assert!(model.features.is_all());
    assert_eq!(
        model.fields.keys().collect::<Vec<_>>(),
        vec!["id", "name", "university_id", "flags"]
    );
    assert_eq!(model.all_fields, vec![
        "table",
        "id",
        "name",
        "university_id",
        "flags",
        "cache"
    ]);
    assert_eq!(model.vis, "pub");
}

#[test]
fn field_details() {
    let model = build(AUTHOR).unwrap();
    let id = &model.fields["id"];
    assert_eq!(id.column, "system_id");
    assert!(id.auto_increment);
    assert_eq!(id.range_slot.as_deref(), Some("id_range"));
    assert_eq!(id.like_slot, None);

    let name = &model.fields["name"];
    assert_eq!(name.like_slot.as_deref(), Some("name_like"));
    assert_eq!(name.range_slot, None);

    let university = &model.fields["university_id"];
    assert_eq!(university.category, TypeCategory::NULLABLE_INT);
    assert!(model.fields["flags"].bitmask);
}

#[test]
fn column_orders() {
    let model = build(AUTHOR).unwrap();
    let sorted: Vec<_> = model.sorted_fields().iter().map(|f| f.column.as_str()).collect();
    assert_eq!(sorted, vec!["flags", "name", "system_id", "university_id"]);
    let insert: Vec<_> = model.insert_fields().iter().map(|f| f.column.as_str()).collect();
    assert_eq!(insert, vec!["flags", "name", "university_id"]);
}

#[test]
fn method_names() {
    let model = build(AUTHOR).unwrap();
    let name = &model.fields["name"];
    let flags = &model.fields["flags"];
    assert_eq!(model.find_method(), "find_authors");
    assert_eq!(model.count_method(), "count_authors");
    assert_eq!(model.create_method(), "create_authors");
    assert_eq!(model.delete_method(), "delete_authors");
    assert_eq!(model.update_method(name), "update_author_name");
    assert_eq!(model.add_method(flags), "add_author_flags");
    assert_eq!(model.drop_method(flags), "drop_author_flags");
    assert_eq!(model.select_method(name), "select_names");
}

#[test]
fn struct_level_and_table_field_options_merge() {
    let model = build(
        r#"
        #[marlow = "tableName=first&defaultLimit=5"]
        struct Post {
            #[marlow = "tableName=second&storeFindMethodPrefix=Fetch"]
            table: (),
            #[marlow = ""]
            title: String,
        }
        "#
    )
    .unwrap();
    assert_eq!(model.table, "second");
    assert_eq!(model.default_limit, 5);
    assert_eq!(model.find_method(), "fetch_posts");
    assert_eq!(model.fields["title"].column, "title");
}

#[test]
fn default_table_is_plural_lowercase() {
    let model = build("struct Category { #[marlow = \"\"] name: String }").unwrap();
    assert_eq!(model.table, "categories");
}

#[test]
fn untagged_and_skipped_fields_are_not_columns() {
    let model = build(
        r#"
        struct Post {
            #[marlow = "column=-"]
            body: String,
            draft: bool,
            #[marlow = "column=title"]
            title: String,
        }
        "#
    )
    .unwrap();
    assert_eq!(model.fields.keys().collect::<Vec<_>>(), vec!["title"]);
    assert_eq!(model.all_fields.len(), 3);
}

#[test]
fn skipped_fields_are_not_classified() {
    let model = build(
        r#"
        struct Post {
            #[marlow = "column=-"]
            tags: Vec<String>,
        }
        "#
    )
    .unwrap();
    assert!(model.fields.is_empty());
}

#[test]
fn duplicate_columns() {
    let issue = config_issue(build(
        r#"
        struct Post {
            #[marlow = "column=title"]
            title: String,
            #[marlow = "column=title"]
            heading: String,
        }
        "#
    ));
    assert_eq!(issue, ConfigIssue::DuplicateColumn("title".into()));
}

#[test]
fn invalid_names() {
    let issue = config_issue(build(
        "struct Post { #[marlow = \"column=title2\"] title: String }"
    ));
    assert_eq!(issue, ConfigIssue::InvalidName("title2".into()));

    let issue = config_issue(build(
        "#[marlow = \"tableName=post-s\"] struct Post { #[marlow = \"\"] title: String }"
    ));
    assert_eq!(issue, ConfigIssue::InvalidName("post-s".into()));
}

#[test]
fn invalid_generated_identifier() {
    let issue = config_issue(build(
        "#[marlow = \"storeName=Post-Store\"] struct Post { #[marlow = \"\"] title: String }"
    ));
    assert_eq!(issue, ConfigIssue::InvalidName("Post-Store".into()));
}

#[test]
fn unknown_options() {
    let issue = config_issue(build(
        "struct Post { #[marlow = \"colum=title\"] title: String }"
    ));
    assert_eq!(issue, ConfigIssue::UnknownOption("colum".into()));
}

#[test]
fn bitmask_requires_unsigned() {
    let issue = config_issue(build(
        "struct Post { #[marlow = \"bitmask=true\"] flags: i32 }"
    ));
    assert_eq!(issue, ConfigIssue::BitmaskNotUnsigned);

    let model = build("type Bits = u16; struct Post { #[marlow = \"bitmask\"] flags: Bits }");
    assert!(model.unwrap().fields["flags"].bitmask);
}

#[test]
fn postgres_creation_needs_primary_key() {
    let issue = config_issue(build(
        "#[marlow = \"dialect=postgres\"] struct Post { #[marlow = \"\"] title: String }"
    ));
    assert_eq!(issue, ConfigIssue::MissingPrimaryKey);

    let model = build(
        "#[marlow = \"dialect=postgres&createable=false\"] struct Post { #[marlow = \"\"] title: String }"
    );
    assert!(model.is_ok());
}

#[test]
fn soft_delete_must_be_nullable_time() {
    let issue = config_issue(build(
        "#[marlow = \"softDelete=deleted\"] struct Post { #[marlow = \"\"] title: String }"
    ));
    assert_eq!(issue, ConfigIssue::UnknownSoftDeleteField("deleted".into()));

    let issue = config_issue(build(
        "#[marlow = \"softDelete=title\"] struct Post { #[marlow = \"\"] title: String }"
    ));
    assert_eq!(issue, ConfigIssue::UnknownSoftDeleteField("title".into()));

    let model = build(
        r#"
        #[marlow = "softDelete=deleted_at"]
        struct Post {
            #[marlow = "column=deleted_at"]
            deleted_at: Option<NaiveDateTime>,
        }
        "#
    )
    .unwrap();
    assert_eq!(model.soft_delete_column(), Some("deleted_at"));
}

#[test]
fn blueprint_slot_collisions() {
    let issue = config_issue(build(
        r#"
        struct Post {
            #[marlow = "column=name"]
            name: String,
            #[marlow = "column=name_like"]
            name_like: String,
        }
        "#
    ));
    assert_eq!(issue, ConfigIssue::BlueprintFieldCollision("name_like".into()));

    let issue = config_issue(build("struct Post { #[marlow = \"\"] limit: i64 }"));
    assert_eq!(issue, ConfigIssue::BlueprintFieldCollision("limit".into()));
}

#[test]
fn unsupported_types() {
    let err = build("struct Post { #[marlow = \"\"] tags: Vec<String> }").unwrap_err();
    assert!(matches!(
        err,
        Error::UnsupportedType {
            issue: TypeIssue::Slice,
            ..
        }
    ));

    let err = build("struct Post { #[marlow = \"\"] id: Uuid }").unwrap_err();
    assert!(matches!(
        err,
        Error::UnsupportedType {
            issue: TypeIssue::Unrecognized,
            ..
        }
    ));
}

#[test]
fn registered_numeric_types() {
    let config = Config::default().with_numeric_type("Money");
    let model = build_with("struct Post { #[marlow = \"\"] price: Money }", &config).unwrap();
    assert_eq!(model.fields["price"].range_slot.as_deref(), Some("price_range"));
    assert_eq!(model.fields["price"].import_hints, vec!["Money"]);
}

#[test]
fn record_name_override_changes_field_methods() {
    let model = build(
        "#[marlow = \"recordName=Writer\"] struct Author { #[marlow = \"\"] name: String }"
    )
    .unwrap();
    assert_eq!(model.update_method(&model.fields["name"]), "update_writer_name");
    assert_eq!(model.find_method(), "find_authors");
}

#[test]
fn store_methods_follow_feature_order() {
    let model = build(AUTHOR).unwrap();
    assert_eq!(model.store_methods(), vec![
        "create_authors",
        "update_author_name",
        "update_author_university_id",
        "update_author_flags",
        "add_author_flags",
        "drop_author_flags",
        "delete_authors",
        "find_authors",
        "count_authors",
        "select_ids",
        "select_names",
        "select_university_ids",
        "select_flagses"
    ]);

    let model = build(
        "#[marlow = \"updateable=false&queryable=false\"] struct Tag { #[marlow = \"\"] label: String }"
    )
    .unwrap();
    assert_eq!(model.store_methods(), vec!["create_tags", "delete_tags"]);
}

#[test]
fn selector_prefix_colliding_with_the_finder() {
    let issue = config_issue(build(
        r#"
        struct Author {
            #[marlow = "tableName=authors&storeSelectMethodPrefix=Find"]
            table: (),
            #[marlow = "column=author"]
            author: String,
        }
        "#
    ));
    assert_eq!(issue, ConfigIssue::DuplicateMethod("find_authors".into()));
}

#[test]
fn update_prefix_colliding_with_bitmask_methods() {
    let issue = config_issue(build(
        r#"
        struct Author {
            #[marlow = "tableName=authors&updateFieldMethodPrefix=Add"]
            table: (),
            #[marlow = "column=flags&bitmask=true"]
            flags: u8,
        }
        "#
    ));
    assert_eq!(issue, ConfigIssue::DuplicateMethod("add_author_flags".into()));
}

#[test]
fn collisions_in_disabled_features_are_ignored() {
    let model = build(
        r#"
        struct Author {
            #[marlow = "tableName=authors&updateFieldMethodPrefix=Add&updateable=false"]
            table: (),
            #[marlow = "column=flags&bitmask=true"]
            flags: u8,
        }
        "#
    )
    .unwrap();
    assert!(!model.store_methods().contains(&"add_author_flags".to_owned()));
}

