#![allow(non_snake_case)]

use super::*;
use crate::model::{EnumDef, Field, TIMESTAMP_TYPE};

fn field(name: &str, type_name: &str, order: u32, is_repeated: bool) -> Field {
    Field {
        name: name.to_string(),
        type_name: type_name.to_string(),
        order,
        is_repeated,
        enum_values: None,
    }
}

fn order_model() -> SchemaModel {
    SchemaModel::new(
        vec![Message {
            name: "Order".to_string(),
            fields: vec![
                field("id", "string", 1, false),
                field("items", "string", 2, true),
                field("total", "double", 3, false),
            ],
        }],
        vec![],
    )
}

#[test]
fn render_proto___renders_header_package_and_messages() {
    let proto = render_proto(&order_model(), "shop");

    assert_eq!(
        proto,
        "// Code generated by rs2proto. DO NOT EDIT.\n\
         syntax = \"proto3\";\n\
         \n\
         package shop;\n\
         \n\
         message Order {\n\
         \x20 string id = 1;\n\
         \x20 repeated string items = 2;\n\
         \x20 double total = 3;\n\
         }\n"
    );
}

#[test]
fn render_proto___timestamp_field___adds_import() {
    let model = SchemaModel::new(
        vec![Message {
            name: "Event".to_string(),
            fields: vec![field("at", TIMESTAMP_TYPE, 1, false)],
        }],
        vec![],
    );

    let proto = render_proto(&model, "proto");

    assert!(proto.contains("package proto;\n\nimport \"google/protobuf/timestamp.proto\";\n\nmessage Event {"));
    assert!(proto.contains("  google.protobuf.Timestamp at = 1;\n"));
}

#[test]
fn render_proto___no_timestamp___omits_import() {
    let proto = render_proto(&order_model(), "proto");

    assert!(!proto.contains("import"));
}

#[test]
fn render_proto___enum_field___preceded_by_values_comment() {
    let mut status = field("status", "string", 1, false);
    status.enum_values = Some(vec!["active".to_string(), "inactive".to_string()]);
    let model = SchemaModel::new(
        vec![Message {
            name: "Account".to_string(),
            fields: vec![status],
        }],
        vec![EnumDef {
            name: "Status".to_string(),
            values: vec!["active".to_string(), "inactive".to_string()],
        }],
    );

    let proto = render_proto(&model, "proto");

    assert!(proto.contains("message Account {\n  // Values: active, inactive\n  string status = 1;\n}\n"));
    assert!(!proto.contains("enum "));
}

#[test]
fn render_proto___fields_rendered_by_ascending_order() {
    let model = SchemaModel::new(
        vec![Message {
            name: "Shuffled".to_string(),
            fields: vec![field("b", "int32", 2, false), field("a", "int32", 1, false)],
        }],
        vec![],
    );

    let proto = render_proto(&model, "proto");

    let a = proto.find("int32 a = 1;").unwrap();
    let b = proto.find("int32 b = 2;").unwrap();
    assert!(a < b);
}

#[test]
fn render_proto___empty_message_and_separation() {
    let model = SchemaModel::new(
        vec![
            Message {
                name: "B".to_string(),
                fields: vec![],
            },
            Message {
                name: "A".to_string(),
                fields: vec![],
            },
        ],
        vec![],
    );

    let proto = render_proto(&model, "proto");

    assert!(proto.ends_with("package proto;\n\nmessage A {\n}\n\nmessage B {\n}\n"));
}

#[test]
fn render_json___includes_enums_and_skips_absent_values() {
    let mut status = field("status", "string", 1, false);
    status.enum_values = Some(vec!["on".to_string()]);
    let model = SchemaModel::new(
        vec![Message {
            name: "Switch".to_string(),
            fields: vec![status, field("label", "string", 2, false)],
        }],
        vec![EnumDef {
            name: "State".to_string(),
            values: vec!["on".to_string()],
        }],
    );

    let json = render_json(&model).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["enums"][0]["name"], "State");
    assert_eq!(value["messages"][0]["fields"][0]["enum_values"][0], "on");
    assert_eq!(value["messages"][0]["fields"][0]["is_repeated"], false);
    assert!(value["messages"][0]["fields"][1].get("enum_values").is_none());
    assert!(json.ends_with('\n'));
}
