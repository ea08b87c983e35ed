//! Schema emitters
//!
//! - [`render_proto`]: proto3 text, one `message` block per message
//! - [`render_json`]: the whole model as pretty-printed JSON
//!
//! Enums are not rendered as proto `enum` blocks. A field that refers to an
//! enum is emitted as `string` with a comment listing the enum's values.

use crate::error::Rs2ProtoResult;
use crate::model::{Message, SchemaModel};

/// First line of every generated proto file.
pub const GENERATED_HEADER: &str = "// Code generated by rs2proto. DO NOT EDIT.";

const TIMESTAMP_IMPORT: &str = "google/protobuf/timestamp.proto";

/// Render the model as a proto3 file in the given package namespace.
pub fn render_proto(model: &SchemaModel, namespace: &str) -> String {
    let mut out = String::new();

    out.push_str(GENERATED_HEADER);
    out.push('\n');
    out.push_str("syntax = \"proto3\";\n\n");
    out.push_str(&format!("package {namespace};\n"));

    if model.uses_timestamp() {
        out.push_str(&format!("\nimport \"{TIMESTAMP_IMPORT}\";\n"));
    }

    for message in &model.messages {
        out.push('\n');
        render_message(&mut out, message);
    }

    out
}

fn render_message(out: &mut String, message: &Message) {
    out.push_str(&format!("message {} {{\n", message.name));

    let mut fields: Vec<_> = message.fields.iter().collect();
    fields.sort_by_key(|f| f.order);

    for field in fields {
        if let Some(values) = &field.enum_values {
            out.push_str(&format!("  // Values: {}\n", values.join(", ")));
        }
        let label = if field.is_repeated { "repeated " } else { "" };
        out.push_str(&format!(
            "  {label}{} {} = {};\n",
            field.type_name, field.name, field.order
        ));
    }

    out.push_str("}\n");
}

/// Render the model, enums included, as JSON.
pub fn render_json(model: &SchemaModel) -> Rs2ProtoResult<String> {
    let mut json = serde_json::to_string_pretty(model)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
#[path = "emit/emit_tests.rs"]
mod emit_tests;
