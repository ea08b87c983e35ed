//! Type model builder
//!
//! Builds the [`SchemaModel`] from loaded packages in two phases:
//!
//! 1. **Enum discovery**: every selected declaration whose underlying type is
//!    a scalar and that has at least one correlated constant in its package
//!    becomes an [`EnumDef`] in the [`EnumRegistry`].
//! 2. **Message discovery**: every selected record struct, or alias of one,
//!    becomes a [`Message`]. Fields are mapped against the registry finished
//!    in phase 1.
//!
//! A declaration is selected when it carries the annotation marker and, if a
//! filter is set, its name contains the filter (case-insensitive). Nothing in
//! here fails: declarations that fit neither phase are left out.

use crate::annotation::{AnnotationScanner, DEFAULT_MARKER};
use crate::correlate::correlate_constants;
use crate::loader::{Declaration, LoadedPackages};
use crate::mapper::FieldTypeMapper;
use crate::model::{EnumDef, EnumRegistry, Message, SchemaModel};
use crate::shape::{TypeShape, record_fields, underlying};
use std::collections::HashSet;
use syn::Visibility;

/// Declaration selection options.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Case-insensitive name substring; empty selects everything.
    pub filter: String,

    /// Doc marker that selects a declaration.
    pub marker: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            filter: String::new(),
            marker: DEFAULT_MARKER.to_string(),
        }
    }
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }
}

/// Decides which declarations take part in either phase.
struct Selection<'a> {
    scanner: AnnotationScanner<'a>,
    filter: String,
}

impl<'a> Selection<'a> {
    fn new(loaded: &'a LoadedPackages, options: &'a BuildOptions) -> Self {
        Self {
            scanner: AnnotationScanner::new(&loaded.docs, &options.marker),
            filter: options.filter.to_lowercase(),
        }
    }

    fn admits(&self, decl: &Declaration) -> bool {
        if !self.scanner.is_annotated(&decl.id) {
            return false;
        }
        self.filter.is_empty() || decl.name().to_lowercase().contains(&self.filter)
    }
}

/// Build the schema model for all loaded packages.
pub fn build_schema(loaded: &LoadedPackages, options: &BuildOptions) -> SchemaModel {
    let selection = Selection::new(loaded, options);

    let registry = discover_enums(loaded, &selection);
    let messages = discover_messages(loaded, &registry, &selection);
    let enums = registry.into_sorted();

    tracing::info!(
        messages = messages.len(),
        enums = enums.len(),
        "built schema model"
    );

    SchemaModel::new(messages, enums)
}

/// Phase 1: scalar declarations with correlated constants.
fn discover_enums(loaded: &LoadedPackages, selection: &Selection<'_>) -> EnumRegistry {
    let mut registry = EnumRegistry::new();

    for package in &loaded.packages {
        let constants = correlate_constants(package);

        for decl in package.declarations.iter().filter(|d| selection.admits(d)) {
            if !matches!(underlying(decl, &loaded.types), TypeShape::Scalar(_)) {
                continue;
            }

            let values = constants.get(decl.name());
            if values.is_empty() {
                tracing::debug!(name = decl.name(), "scalar type has no constants, not an enum");
                continue;
            }

            let def = EnumDef {
                name: decl.name().to_string(),
                values: values.to_vec(),
            };
            if !registry.register(def) {
                tracing::debug!(name = decl.name(), "enum already registered, skipping");
            }
        }
    }

    registry
}

/// Phase 2: record structs, deduplicated by name.
fn discover_messages(
    loaded: &LoadedPackages,
    registry: &EnumRegistry,
    selection: &Selection<'_>,
) -> Vec<Message> {
    let mapper = FieldTypeMapper::new(registry, &loaded.types);
    let mut seen = HashSet::new();
    let mut messages = Vec::new();

    for decl in loaded.declarations().filter(|d| selection.admits(d)) {
        let Some(fields) = record_fields(decl, &loaded.types) else {
            tracing::debug!(name = decl.name(), "not a record struct, skipping");
            continue;
        };

        if !seen.insert(decl.name()) {
            tracing::debug!(name = decl.name(), "message already generated, skipping");
            continue;
        }

        messages.push(build_message(decl.name(), fields, &mapper));
    }

    messages
}

fn build_message(name: &str, fields: &[syn::Field], mapper: &FieldTypeMapper<'_>) -> Message {
    let mut order = 0;
    let fields = fields
        .iter()
        .filter(|f| is_exported(f))
        .filter_map(|f| {
            order += 1;
            mapper.map_field(f, order)
        })
        .collect();

    Message {
        name: name.to_string(),
        fields,
    }
}

fn is_exported(field: &syn::Field) -> bool {
    matches!(field.vis, Visibility::Public(_))
}
