//! Type classification
//!
//! Every field type is classified once into a [`TypeShape`] describing its
//! underlying representation. Named types declared in the loaded packages are
//! resolved through the [`TypeIndex`]: aliases and single-field newtypes take
//! the shape of what they wrap.
//!
//! | Rust type | Shape |
//! |-----------|-------|
//! | `String`, `&str`, `i32`, `f64`, `bool`, ... | [`TypeShape::Scalar`] |
//! | `Vec<T>`, `VecDeque<T>`, `[T]`, `[T; N]`, `&[T]` | [`TypeShape::Sequence`] |
//! | `&T`, `*const T`, `Box<T>`, `Rc<T>`, `Arc<T>`, `Option<T>` | [`TypeShape::Reference`] |
//! | other named types | [`TypeShape::Record`] |
//! | maps, sets, tuples, fn pointers, trait objects | [`TypeShape::Other`] |

use crate::loader::{DeclBody, Declaration, TypeIndex};
use crate::naming::compact_tokens;
use quote::ToTokens;
use syn::ext::IdentExt;
use syn::{GenericArgument, Path, PathArguments, PathSegment, Type};

const SEQUENCE_WRAPPERS: &[&str] = &["Vec", "VecDeque"];
const POINTER_WRAPPERS: &[&str] = &["Box", "Rc", "Arc", "Option", "Cow"];
const UNORDERED_CONTAINERS: &[&str] = &["HashMap", "BTreeMap", "HashSet", "BTreeSet"];

/// Scalar kinds, named after their schema kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// `isize`
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Int128,
    /// `usize`
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uint128,
    Float32,
    Float64,
    Bool,
    /// `String` and `str`
    String,
    Char,
}

impl ScalarKind {
    /// Recognize a primitive type identifier.
    pub fn from_ident(ident: &str) -> Option<Self> {
        let kind = match ident {
            "isize" => ScalarKind::Int,
            "i8" => ScalarKind::Int8,
            "i16" => ScalarKind::Int16,
            "i32" => ScalarKind::Int32,
            "i64" => ScalarKind::Int64,
            "i128" => ScalarKind::Int128,
            "usize" => ScalarKind::Uint,
            "u8" => ScalarKind::Uint8,
            "u16" => ScalarKind::Uint16,
            "u32" => ScalarKind::Uint32,
            "u64" => ScalarKind::Uint64,
            "u128" => ScalarKind::Uint128,
            "f32" => ScalarKind::Float32,
            "f64" => ScalarKind::Float64,
            "bool" => ScalarKind::Bool,
            "String" | "str" => ScalarKind::String,
            "char" => ScalarKind::Char,
            _ => return None,
        };
        Some(kind)
    }

    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::Int => "int",
            ScalarKind::Int8 => "int8",
            ScalarKind::Int16 => "int16",
            ScalarKind::Int32 => "int32",
            ScalarKind::Int64 => "int64",
            ScalarKind::Int128 => "int128",
            ScalarKind::Uint => "uint",
            ScalarKind::Uint8 => "uint8",
            ScalarKind::Uint16 => "uint16",
            ScalarKind::Uint32 => "uint32",
            ScalarKind::Uint64 => "uint64",
            ScalarKind::Uint128 => "uint128",
            ScalarKind::Float32 => "float32",
            ScalarKind::Float64 => "float64",
            ScalarKind::Bool => "bool",
            ScalarKind::String => "string",
            ScalarKind::Char => "char",
        }
    }
}

/// Underlying representation of a type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeShape {
    Scalar(ScalarKind),

    /// An ordered sequence of the contained element type.
    Sequence(Type),

    /// A pointer-like wrapper around another type.
    Reference,

    /// A named record, declared or external.
    Record,

    /// Nothing above matched.
    Other,
}

/// Classify a type, resolving declared aliases and newtypes.
pub fn classify(ty: &Type, types: &TypeIndex) -> TypeShape {
    classify_inner(ty, types, &mut Vec::new())
}

/// Underlying representation of a declaration itself.
pub fn underlying(decl: &Declaration, types: &TypeIndex) -> TypeShape {
    let mut seen = vec![decl.name().to_string()];
    match &decl.body {
        DeclBody::Struct(_) | DeclBody::Unit => TypeShape::Record,
        DeclBody::Alias(target) => classify_inner(target, types, &mut seen),
        DeclBody::Tuple(items) if items.len() == 1 => classify_inner(&items[0], types, &mut seen),
        _ => TypeShape::Other,
    }
}

/// Named fields of a record declaration. An alias resolves through the type
/// index to the struct it names; anything else that is not record-shaped
/// yields `None`.
pub fn record_fields<'a>(
    decl: &'a Declaration,
    types: &'a TypeIndex,
) -> Option<&'a [syn::Field]> {
    let mut seen = vec![decl.name().to_string()];
    let mut body = &decl.body;

    loop {
        let target = match body {
            DeclBody::Struct(fields) => return Some(fields.as_slice()),
            DeclBody::Unit => return Some(&[][..]),
            DeclBody::Alias(target) => target,
            _ => return None,
        };

        let Type::Path(type_path) = target else {
            return None;
        };
        if type_path.qself.is_some() {
            return None;
        }
        let segment = type_path.path.segments.last()?;
        if !segment.arguments.is_empty() {
            return None;
        }

        let name = segment.ident.unraw().to_string();
        if seen.contains(&name) {
            return None;
        }
        body = types.get(&name)?;
        seen.push(name);
    }
}

fn classify_inner(ty: &Type, types: &TypeIndex, seen: &mut Vec<String>) -> TypeShape {
    match ty {
        Type::Paren(paren) => classify_inner(&paren.elem, types, seen),
        Type::Group(group) => classify_inner(&group.elem, types, seen),
        Type::Slice(slice) => TypeShape::Sequence((*slice.elem).clone()),
        Type::Array(array) => TypeShape::Sequence((*array.elem).clone()),
        Type::Reference(reference) => match &*reference.elem {
            Type::Path(p) if p.qself.is_none() && p.path.is_ident("str") => {
                TypeShape::Scalar(ScalarKind::String)
            }
            Type::Slice(slice) => TypeShape::Sequence((*slice.elem).clone()),
            _ => TypeShape::Reference,
        },
        Type::Ptr(_) => TypeShape::Reference,
        Type::Path(type_path) if type_path.qself.is_none() => {
            classify_path(&type_path.path, types, seen)
        }
        _ => TypeShape::Other,
    }
}

fn classify_path(path: &Path, types: &TypeIndex, seen: &mut Vec<String>) -> TypeShape {
    let Some(segment) = path.segments.last() else {
        return TypeShape::Other;
    };
    let ident = segment.ident.unraw().to_string();

    if SEQUENCE_WRAPPERS.contains(&ident.as_str()) {
        return match first_type_arg(segment) {
            Some(element) => TypeShape::Sequence(element.clone()),
            None => TypeShape::Other,
        };
    }
    if POINTER_WRAPPERS.contains(&ident.as_str()) {
        return match first_type_arg(segment) {
            Some(_) => TypeShape::Reference,
            None => TypeShape::Other,
        };
    }
    if UNORDERED_CONTAINERS.contains(&ident.as_str()) {
        return TypeShape::Other;
    }

    if !segment.arguments.is_empty() {
        return TypeShape::Record;
    }
    if let Some(kind) = ScalarKind::from_ident(&ident) {
        return TypeShape::Scalar(kind);
    }

    let target = match types.get(&ident) {
        Some(DeclBody::Alias(target)) => target,
        Some(DeclBody::Tuple(items)) if items.len() == 1 => &items[0],
        _ => return TypeShape::Record,
    };
    if seen.contains(&ident) {
        return TypeShape::Other;
    }
    seen.push(ident);
    classify_inner(target, types, seen)
}

fn first_type_arg(segment: &PathSegment) -> Option<&Type> {
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}

/// Strip every pointer and sequence wrapper from a type.
pub fn peel_wrappers(ty: &Type) -> &Type {
    let mut current = ty;
    loop {
        current = match current {
            Type::Paren(paren) => &*paren.elem,
            Type::Group(group) => &*group.elem,
            Type::Reference(reference) => &*reference.elem,
            Type::Ptr(ptr) => &*ptr.elem,
            Type::Slice(slice) => &*slice.elem,
            Type::Array(array) => &*array.elem,
            Type::Path(type_path) if type_path.qself.is_none() => {
                let wrapped = type_path.path.segments.last().and_then(|segment| {
                    let ident = segment.ident.to_string();
                    let is_wrapper = SEQUENCE_WRAPPERS.contains(&ident.as_str())
                        || POINTER_WRAPPERS.contains(&ident.as_str());
                    if is_wrapper {
                        first_type_arg(segment)
                    } else {
                        None
                    }
                });
                match wrapped {
                    Some(inner) => inner,
                    None => return current,
                }
            }
            _ => return current,
        };
    }
}

/// Scalar kind of a bare primitive type, if it is one.
pub fn scalar_kind(ty: &Type) -> Option<ScalarKind> {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => {
            let segment = type_path.path.segments.last()?;
            if !segment.arguments.is_empty() {
                return None;
            }
            ScalarKind::from_ident(&segment.ident.unraw().to_string())
        }
        _ => None,
    }
}

/// Final path component of a type with its wrappers stripped.
///
/// `Option<Box<crate::billing::Invoice>>` → `Invoice`. A type that does not
/// end in a path falls back to its textual form.
pub fn bare_name(ty: &Type) -> String {
    let inner = peel_wrappers(ty);
    if let Type::Path(type_path) = inner {
        if let Some(segment) = type_path.path.segments.last() {
            return segment.ident.unraw().to_string();
        }
    }
    type_text(inner)
}

/// Compact textual form of a type, e.g. `HashMap<String,i32>`.
pub fn type_text(ty: &Type) -> String {
    compact_tokens(&ty.to_token_stream().to_string())
}
