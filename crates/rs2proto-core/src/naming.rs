//! Naming and normalization utilities.
//!
//! # Conversions
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `Total` | [`to_field_name`] | `total` |
//! | `ID` | [`to_field_name`] | `id` |
//! | `int` | [`normalize_scalar`] | `int64` |
//! | `HashMap < String , i32 >` | [`compact_tokens`] | `HashMap<String,i32>` |

/// Normalize a struct field name for the schema.
///
/// A raw identifier prefix is dropped, two-character names are lower-cased
/// entirely (`ID` → `id`) and otherwise only the first character is lower-cased.
///
/// # Examples
///
/// ```
/// use rs2proto_core::naming::to_field_name;
///
/// assert_eq!(to_field_name("ID"), "id");
/// assert_eq!(to_field_name("CreatedAt"), "createdAt");
/// assert_eq!(to_field_name("r#type"), "type");
/// ```
pub fn to_field_name(name: &str) -> String {
    let name = name.strip_prefix("r#").unwrap_or(name);

    if name.chars().count() == 2 {
        return name.to_lowercase();
    }

    let mut chars = name.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Map a scalar kind name to its schema type name.
///
/// # Examples
///
/// ```
/// use rs2proto_core::naming::normalize_scalar;
///
/// assert_eq!(normalize_scalar("int"), "int64");
/// assert_eq!(normalize_scalar("float64"), "double");
/// assert_eq!(normalize_scalar("int32"), "int32");
/// ```
pub fn normalize_scalar(kind: &str) -> &str {
    match kind {
        "int" => "int64",
        "uint" => "uint32",
        "float32" => "float",
        "float64" => "double",
        "string" => "string",
        other => other,
    }
}

/// Collapse token-stream spacing into a compact textual type.
///
/// A space survives only between two word characters (`dyn Trait`, `'a str`).
pub fn compact_tokens(tokens: &str) -> String {
    let chars: Vec<char> = tokens.chars().collect();
    let mut out = String::with_capacity(tokens.len());

    for (i, &c) in chars.iter().enumerate() {
        if c.is_whitespace() {
            let prev = out.chars().last();
            let next = chars.get(i + 1).copied();
            if prev.is_some_and(is_word_char) && next.is_some_and(is_word_char) {
                out.push(' ');
            }
            continue;
        }
        out.push(c);
    }

    out
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
