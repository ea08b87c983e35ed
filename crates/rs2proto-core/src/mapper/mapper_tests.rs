#![allow(non_snake_case)]

use super::*;
use crate::loader::{LoadedPackages, Package};
use crate::model::EnumDef;
use test_case::test_case;

fn ty(source: &str) -> Type {
    syn::parse_str(source).unwrap()
}

fn status_registry() -> EnumRegistry {
    let mut registry = EnumRegistry::new();
    registry.register(EnumDef {
        name: "Status".to_string(),
        values: vec!["active".to_string(), "inactive".to_string()],
    });
    registry
}

fn map(source: &str) -> MappedType {
    let registry = EnumRegistry::new();
    let types = TypeIndex::default();
    FieldTypeMapper::new(&registry, &types).map_type(&ty(source))
}

fn fields_of(source: &str) -> Vec<syn::Field> {
    let item: syn::ItemStruct = syn::parse_str(source).unwrap();
    item.fields.into_iter().collect()
}

// Scalar normalization

#[test_case("isize", "int64" ; "generic signed becomes int64")]
#[test_case("usize", "uint32" ; "generic unsigned becomes uint32")]
#[test_case("f32", "float" ; "single precision becomes float")]
#[test_case("f64", "double" ; "double precision becomes double")]
#[test_case("String", "string" ; "owned text")]
#[test_case("&'static str", "string" ; "borrowed text")]
#[test_case("i32", "int32" ; "sized signed passes through")]
#[test_case("u64", "uint64" ; "sized unsigned passes through")]
#[test_case("bool", "bool" ; "boolean passes through")]
fn map_type___scalar___normalizes(source: &str, expected: &str) {
    let mapped = map(source);

    assert_eq!(mapped.type_name, expected);
    assert!(!mapped.is_repeated);
    assert_eq!(mapped.enum_values, None);
}

// Sequences

#[test_case("Vec<String>", "string")]
#[test_case("Vec<isize>", "int64")]
#[test_case("[f32; 3]", "float")]
#[test_case("&'static [f64]", "double")]
#[test_case("Vec<Box<Item>>", "Item")]
#[test_case("Vec<Option<i32>>", "int32")]
#[test_case("Vec<std::time::SystemTime>", "google.protobuf.Timestamp")]
fn map_type___sequence___repeated_element_type(source: &str, expected: &str) {
    let mapped = map(source);

    assert!(mapped.is_repeated);
    assert_eq!(mapped.type_name, expected);
}

#[test]
fn map_type___alias_of_sequence___repeated_with_element_type() {
    let pkg = Package::from_source("./model", "model.rs", "pub type Tags = Vec<String>;").unwrap();
    let loaded = LoadedPackages::from_packages(vec![pkg]);
    let registry = EnumRegistry::new();
    let mapper = FieldTypeMapper::new(&registry, &loaded.types);

    let mapped = mapper.map_type(&ty("Tags"));

    assert!(mapped.is_repeated);
    assert_eq!(mapped.type_name, "string");
}

fn map_with(source: &str, field_type: &str) -> MappedType {
    let pkg = Package::from_source("./model", "model.rs", source).unwrap();
    let loaded = LoadedPackages::from_packages(vec![pkg]);
    let registry = EnumRegistry::new();
    FieldTypeMapper::new(&registry, &loaded.types).map_type(&ty(field_type))
}

#[test]
fn map_type___recursive_sequence_newtype___terminates() {
    let mapped = map_with("pub struct Tree(pub Vec<Tree>);", "Tree");

    assert!(mapped.is_repeated);
    assert_eq!(mapped.type_name, "Tree");
}

#[test]
fn map_type___mutual_recursion_through_sequence___terminates() {
    let mapped = map_with(
        "pub type Branches = Vec<Node>;\npub struct Node(Branches);",
        "Branches",
    );

    assert!(mapped.is_repeated);
    assert_eq!(mapped.type_name, "Node");
}

#[test]
fn map_type___nested_sequence___flattens_to_innermost_element() {
    let mapped = map("Vec<Vec<i32>>");

    assert!(mapped.is_repeated);
    assert_eq!(mapped.type_name, "int32");
}

// References and records

#[test_case("Address", "Address")]
#[test_case("crate::billing::Invoice", "Invoice")]
#[test_case("Option<Box<Address>>", "Address")]
#[test_case("Option<isize>", "int64")]
#[test_case("Box<str>", "string")]
#[test_case("Option<Vec<String>>", "string")]
fn map_type___reference_or_record___uses_bare_name(source: &str, expected: &str) {
    let mapped = map(source);

    assert_eq!(mapped.type_name, expected);
    assert!(!mapped.is_repeated);
}

#[test_case("std::time::SystemTime")]
#[test_case("SystemTime")]
#[test_case("chrono::DateTime<chrono::Utc>")]
#[test_case("Option<DateTime<Utc>>")]
fn map_type___timestamp___maps_to_well_known_type(source: &str) {
    assert_eq!(map(source).type_name, TIMESTAMP_TYPE);
}

// Fallback

#[test_case("HashMap<String, i32>", "HashMap<String,i32>")]
#[test_case("(i32, String)", "(i32,String)")]
#[test_case("fn(u8) -> bool", "fn(u8)->bool")]
fn map_type___unclassifiable___uses_textual_form(source: &str, expected: &str) {
    let mapped = map(source);

    assert_eq!(mapped.type_name, expected);
    assert!(!mapped.is_repeated);
}

// Enum substitution

#[test]
fn map_type___registered_enum___string_with_values() {
    let registry = status_registry();
    let types = TypeIndex::default();
    let mapper = FieldTypeMapper::new(&registry, &types);

    let mapped = mapper.map_type(&ty("Status"));

    assert_eq!(mapped.type_name, "string");
    assert_eq!(
        mapped.enum_values,
        Some(vec!["active".to_string(), "inactive".to_string()])
    );
    assert!(!mapped.is_repeated);
}

#[test]
fn map_type___enum_matched_by_bare_name_through_wrappers() {
    let registry = status_registry();
    let types = TypeIndex::default();
    let mapper = FieldTypeMapper::new(&registry, &types);

    let qualified = mapper.map_type(&ty("crate::other::Status"));
    let repeated = mapper.map_type(&ty("Vec<Status>"));

    assert_eq!(qualified.type_name, "string");
    assert!(qualified.enum_values.is_some());
    assert_eq!(repeated.type_name, "string");
    assert!(repeated.is_repeated);
    assert!(repeated.enum_values.is_some());
}

#[test]
fn map_type___enum_takes_priority_over_scalar_alias() {
    let pkg = Package::from_source("./model", "model.rs", "pub type Status = &'static str;").unwrap();
    let loaded = LoadedPackages::from_packages(vec![pkg]);
    let registry = status_registry();
    let plain = EnumRegistry::new();

    let with_enum = FieldTypeMapper::new(&registry, &loaded.types).map_type(&ty("Status"));
    let without_enum = FieldTypeMapper::new(&plain, &loaded.types).map_type(&ty("Status"));

    assert!(with_enum.enum_values.is_some());
    assert_eq!(without_enum.type_name, "string");
    assert_eq!(without_enum.enum_values, None);
}

// map_field

#[test]
fn map_field___normalizes_name_and_keeps_order() {
    let registry = EnumRegistry::new();
    let types = TypeIndex::default();
    let mapper = FieldTypeMapper::new(&registry, &types);
    let fields = fields_of("pub struct S { pub ID: String, pub CreatedAt: SystemTime, pub r#type: u8 }");

    let mapped: Vec<Field> = fields
        .iter()
        .zip(1..)
        .filter_map(|(f, order)| mapper.map_field(f, order))
        .collect();

    assert_eq!(mapped[0].name, "id");
    assert_eq!(mapped[0].order, 1);
    assert_eq!(mapped[1].name, "createdAt");
    assert_eq!(mapped[1].type_name, TIMESTAMP_TYPE);
    assert_eq!(mapped[2].name, "type");
    assert_eq!(mapped[2].type_name, "uint8");
    assert_eq!(mapped[2].order, 3);
}

#[test]
fn map_field___tuple_field___returns_none() {
    let registry = EnumRegistry::new();
    let types = TypeIndex::default();
    let mapper = FieldTypeMapper::new(&registry, &types);
    let fields = fields_of("pub struct Wrapper(pub String);");

    assert!(mapper.map_field(&fields[0], 1).is_none());
}
