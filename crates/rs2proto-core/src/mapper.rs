//! Field type mapping
//!
//! Turns one exported struct field into a schema [`Field`]. The type name is
//! resolved in this order, first match wins:
//!
//! 1. the bare name is a registered enum → `string`, with the enum's values
//! 2. scalar → normalized scalar name (`isize` → `int64`, `f64` → `double`, ...)
//! 3. sequence → the mapped element type
//! 4. reference or record → bare name, or `google.protobuf.Timestamp` for
//!    `SystemTime` / `DateTime`
//! 5. anything else → the type's full textual form

use crate::loader::TypeIndex;
use crate::model::{EnumRegistry, Field, TIMESTAMP_TYPE};
use crate::naming::{normalize_scalar, to_field_name};
use crate::shape::{TypeShape, bare_name, classify, peel_wrappers, scalar_kind, type_text};
use std::collections::HashSet;
use syn::Type;

/// Bare names of wall-clock timestamp types.
const TIMESTAMP_NAMES: &[&str] = &["SystemTime", "DateTime"];

/// Schema type of a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedType {
    pub type_name: String,
    pub is_repeated: bool,
    pub enum_values: Option<Vec<String>>,
}

/// Maps fields against a fully populated enum registry.
pub struct FieldTypeMapper<'a> {
    enums: &'a EnumRegistry,
    types: &'a TypeIndex,
}

impl<'a> FieldTypeMapper<'a> {
    pub fn new(enums: &'a EnumRegistry, types: &'a TypeIndex) -> Self {
        Self { enums, types }
    }

    /// Map a named field at the given 1-based order. Returns `None` for
    /// unnamed (tuple) fields.
    pub fn map_field(&self, field: &syn::Field, order: u32) -> Option<Field> {
        let ident = field.ident.as_ref()?;
        let mapped = self.map_type(&field.ty);

        Some(Field {
            name: to_field_name(&ident.to_string()),
            type_name: mapped.type_name,
            order,
            is_repeated: mapped.is_repeated,
            enum_values: mapped.enum_values,
        })
    }

    /// Resolve the schema type of a declared Rust type.
    pub fn map_type(&self, ty: &Type) -> MappedType {
        let shape = classify(ty, self.types);
        let is_repeated = matches!(shape, TypeShape::Sequence(_));

        if let Some(def) = self.enums.get(&bare_name(ty)) {
            return MappedType {
                type_name: "string".to_string(),
                is_repeated,
                enum_values: Some(def.values.clone()),
            };
        }

        MappedType {
            type_name: self.type_name(ty, &shape),
            is_repeated,
            enum_values: None,
        }
    }

    fn type_name(&self, ty: &Type, shape: &TypeShape) -> String {
        match shape {
            TypeShape::Scalar(kind) => normalize_scalar(kind.name()).to_string(),
            TypeShape::Sequence(element) => self.element_name(element),
            TypeShape::Reference | TypeShape::Record => named_type(ty),
            TypeShape::Other => type_text(ty),
        }
    }

    /// Schema type of a sequence element. Nested sequences flatten to their
    /// innermost element; a sequence that contains itself stops at the
    /// element's bare name.
    fn element_name(&self, element: &Type) -> String {
        let mut current = element.clone();
        let mut visited = HashSet::new();

        loop {
            match classify(&current, self.types) {
                TypeShape::Sequence(inner) if visited.insert(type_text(&current)) => {
                    current = inner;
                }
                TypeShape::Sequence(_) => return named_type(&current),
                shape => return self.type_name(&current, &shape),
            }
        }
    }
}

fn named_type(ty: &Type) -> String {
    if let Some(kind) = scalar_kind(peel_wrappers(ty)) {
        return normalize_scalar(kind.name()).to_string();
    }

    let name = bare_name(ty);
    if TIMESTAMP_NAMES.contains(&name.as_str()) {
        return TIMESTAMP_TYPE.to_string();
    }
    name
}

#[cfg(test)]
#[path = "mapper/mapper_tests.rs"]
mod mapper_tests;
