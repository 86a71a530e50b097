//! End-to-end compile scenarios through the public API.

use api_builder_sdk::{
    build_contract, extract_join_info_from_sql, generate_sql, load_api_config_from_str, validate_config, ApiConfigBuilder,
    ApiKind, CompileOptions, FieldRef, FilterCondition, JoinCondition, JoinGraph, JoinKind,
};
use serde_json::{json, Value};

fn users() -> ApiConfigBuilder {
    ApiConfigBuilder::new("list_users", ApiKind::Query, "List users", "users")
        .add_fields([FieldRef::new("id"), FieldRef::new("name")])
}

#[test]
fn select_without_joins() {
    assert_eq!(generate_sql(&users().build()).unwrap(), "SELECT users.id, users.name FROM users");
}

#[test]
fn left_join_orders() {
    let cfg = users()
        .add_join("orders", JoinKind::Left, [JoinCondition::new("users", "id", "orders", "user_id")])
        .build();
    assert!(generate_sql(&cfg)
        .unwrap()
        .contains("LEFT JOIN orders ON users.id = orders.user_id"));
}

#[test]
fn null_condition_is_null() {
    let cfg = users()
        .add_conditions([FilterCondition::literal("status", "=", Value::Null)])
        .build();
    assert!(generate_sql(&cfg).unwrap().ends_with("WHERE users.status IS NULL"));
}

#[test]
fn insert_email_and_name() {
    let cfg = ApiConfigBuilder::new("create_user", ApiKind::Insert, "", "users")
        .add_fields([FieldRef::new("email"), FieldRef::new("name")])
        .build();
    assert_eq!(
        generate_sql(&cfg).unwrap(),
        "INSERT INTO users (email, name) VALUES (:email, :name)"
    );
}

#[test]
fn pagination_placeholders_and_limit_param() {
    let cfg = users().enable_pagination(20).unwrap().build();
    assert!(generate_sql(&cfg).unwrap().ends_with("LIMIT :limit OFFSET :offset"));
    let contract = build_contract(&cfg, &CompileOptions::default()).unwrap();
    let limit = contract.parameters.iter().find(|p| p.name == "limit").unwrap();
    assert_eq!(limit.default_value, json!(20));
}

#[test]
fn generated_sql_round_trips_through_extraction() {
    let cfg = users()
        .add_join("orders", JoinKind::Left, [JoinCondition::new("users", "id", "orders", "user_id")])
        .add_join("items", JoinKind::Inner, [JoinCondition::new("orders", "id", "items", "order_id")])
        .add_conditions([FilterCondition::param("status", "=", "status")])
        .build();
    let info = extract_join_info_from_sql(&generate_sql(&cfg).unwrap()).unwrap();
    assert_eq!(info.main_table, "users");
    let joins: Vec<_> = info.joins.iter().map(|j| (j.join_kind, j.target_table.as_str())).collect();
    assert_eq!(joins, vec![(JoinKind::Left, "orders"), (JoinKind::Inner, "items")]);
    assert_eq!(info.joins[1].conditions, vec![JoinCondition::new("orders", "id", "items", "order_id")]);
}

#[test]
fn dashboard_graph_drawn_backwards_compiles_to_right_join() {
    let graph: JoinGraph = serde_json::from_value(json!({
        "tables": [{ "id": "n1", "name": "users" }, { "id": "n2", "name": "orders" }],
        "edges": [{
            "mainTableId": "n2",
            "joinTableId": "n1",
            "joinType": "left",
            "conditions": [{ "mainField": "user_id", "joinField": "id" }]
        }]
    }))
    .unwrap();
    let cfg = users().add_graph(&graph).build();
    assert_eq!(
        generate_sql(&cfg).unwrap(),
        "SELECT users.id, users.name FROM users RIGHT JOIN orders ON users.id = orders.user_id"
    );
}

#[test]
fn insert_loaded_from_json_with_pagination_fails_validation() {
    let cfg = load_api_config_from_str(
        r#"{
            "name": "create_user",
            "kind": "insert",
            "mainTable": "users",
            "fields": [{ "name": "email" }],
            "pagination": { "enabled": true, "pageSize": 10 }
        }"#,
    )
    .unwrap();
    let report = validate_config(&cfg);
    assert!(!report.is_valid);
    assert_eq!(report.errors, vec!["Pagination is not supported for insert APIs"]);
}
