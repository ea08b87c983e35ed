//! In-memory schema model
//!
//! The model is what the builder produces and the emitters consume:
//! - [`Message`]: one per annotated record struct
//! - [`Field`]: an exported struct field with its resolved schema type
//! - [`EnumDef`]: a scalar type synthesized from its correlated constants
//! - [`EnumRegistry`]: run-scoped lookup of enums by bare type name

use serde::Serialize;
use std::collections::HashMap;

/// Schema type used for fields mapped through the timestamp rule.
pub const TIMESTAMP_TYPE: &str = "google.protobuf.Timestamp";

/// A message derived from a record struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    /// Bare struct name, unique within one model.
    pub name: String,

    /// Exported fields in declaration order.
    pub fields: Vec<Field>,
}

/// A field in a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Normalized field name.
    pub name: String,

    /// Normalized schema type name.
    pub type_name: String,

    /// 1-based position among the exported fields of the struct.
    pub order: u32,

    /// Whether the declared type is an ordered sequence.
    pub is_repeated: bool,

    /// Values of the enum this field refers to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
}

/// An enum synthesized from a scalar type and its constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumDef {
    /// Bare type name.
    pub name: String,

    /// Constant values in source order.
    pub values: Vec<String>,
}

/// Enums discovered during a single run, keyed by bare type name.
#[derive(Debug, Default)]
pub struct EnumRegistry {
    entries: HashMap<String, EnumDef>,
}

impl EnumRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an enum. The first registration of a name wins; returns
    /// `false` if the name was already present.
    pub fn register(&mut self, def: EnumDef) -> bool {
        if self.entries.contains_key(&def.name) {
            return false;
        }
        self.entries.insert(def.name.clone(), def);
        true
    }

    pub fn get(&self, name: &str) -> Option<&EnumDef> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the registry, returning its enums sorted by name.
    pub fn into_sorted(self) -> Vec<EnumDef> {
        let mut enums: Vec<EnumDef> = self.entries.into_values().collect();
        enums.sort_by(|a, b| a.name.cmp(&b.name));
        enums
    }
}

/// Messages and enums produced by one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaModel {
    pub messages: Vec<Message>,
    pub enums: Vec<EnumDef>,
}

impl SchemaModel {
    /// Create a model, sorting messages and enums by name.
    pub fn new(mut messages: Vec<Message>, mut enums: Vec<EnumDef>) -> Self {
        messages.sort_by(|a, b| a.name.cmp(&b.name));
        enums.sort_by(|a, b| a.name.cmp(&b.name));
        Self { messages, enums }
    }

    /// Find a message by name.
    pub fn message(&self, name: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.name == name)
    }

    /// Find an enum by name.
    pub fn enum_def(&self, name: &str) -> Option<&EnumDef> {
        self.enums.iter().find(|e| e.name == name)
    }

    /// Whether any field was mapped to the timestamp type.
    pub fn uses_timestamp(&self) -> bool {
        self.messages
            .iter()
            .flat_map(|m| &m.fields)
            .any(|f| f.type_name == TIMESTAMP_TYPE)
    }
}
