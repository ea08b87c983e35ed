//! Constant correlation
//!
//! Groups a package's constants by their declared type so that scalar types
//! can be turned into enums:
//!
//! ```rust,ignore
//! pub type Status = &'static str;
//!
//! pub const STATUS_ACTIVE: Status = "active";
//! pub const STATUS_INACTIVE: Status = "inactive";
//! ```
//!
//! yields `Status => ["active", "inactive"]`.
//!
//! Only constants whose type is written as a bare name are captured.
//! Associated constants typed `Self` take their type from the surrounding
//! `impl` block and are not correlated.

use crate::loader::Package;
use std::collections::HashMap;
use syn::ext::IdentExt;
use syn::{Expr, ExprLit, Ident, ImplItem, Item, Lit, Type};

/// Constant values grouped by bare type name, in source order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConstantMap {
    values: HashMap<String, Vec<String>>,
}

impl ConstantMap {
    /// Values recorded for a type, empty if none.
    pub fn get(&self, type_name: &str) -> &[String] {
        self.values.get(type_name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct type names with at least one value.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn push(&mut self, type_name: String, value: String) {
        self.values.entry(type_name).or_default().push(value);
    }
}

/// Build the constant map for one package.
pub fn correlate_constants(package: &Package) -> ConstantMap {
    let mut map = ConstantMap::default();
    for file in &package.files {
        collect_constants(&file.syntax.items, &mut map);
    }
    map
}

fn collect_constants(items: &[Item], map: &mut ConstantMap) {
    for item in items {
        match item {
            Item::Const(c) => record(&c.ty, &c.ident, &c.expr, map),
            Item::Impl(block) if block.trait_.is_none() => {
                for impl_item in &block.items {
                    if let ImplItem::Const(c) = impl_item {
                        record(&c.ty, &c.ident, &c.expr, map);
                    }
                }
            }
            Item::Mod(m) => {
                if let Some((_, nested)) = &m.content {
                    collect_constants(nested, map);
                }
            }
            _ => {}
        }
    }
}

fn record(ty: &Type, ident: &Ident, expr: &Expr, map: &mut ConstantMap) {
    if let Some(type_name) = explicit_type_name(ty) {
        map.push(type_name, value_token(ident, expr));
    }
}

/// The type name of a constant declared with a plain `Name` type.
fn explicit_type_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Group(group) => explicit_type_name(&group.elem),
        Type::Path(type_path) if type_path.qself.is_none() => {
            let path = &type_path.path;
            if path.leading_colon.is_some() || path.segments.len() != 1 {
                return None;
            }
            let segment = path.segments.first()?;
            if !segment.arguments.is_empty() || segment.ident == "Self" {
                return None;
            }
            Some(segment.ident.unraw().to_string())
        }
        _ => None,
    }
}

/// A string literal initializer yields its content, anything else the
/// constant's own name.
fn value_token(ident: &Ident, expr: &Expr) -> String {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => s.value(),
        _ => ident.unraw().to_string(),
    }
}
