//! Source loading
//!
//! Resolves package specifiers to Rust source files, parses each file with
//! [`syn`] and extracts the type declarations found in it. A package is a
//! directory of `.rs` files (walked recursively) or a single `.rs` file.
//!
//! Loading builds two indices in a single pass over the declarations:
//! - [`DocIndex`]: declaration identity → its own doc lines
//! - [`TypeIndex`]: bare type name → declaration body, for resolving the
//!   underlying representation of named types
//!
//! Any failure in any package fails the whole load with one aggregated
//! [`Rs2ProtoError::LoadFailure`]; a partial load is never returned.

use crate::error::{Rs2ProtoError, Rs2ProtoResult};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use syn::{AttrStyle, Attribute, Fields, Generics, Item, Meta, Type};
use walkdir::{DirEntry, WalkDir};

/// Identity of a type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeclId {
    /// Source file the declaration lives in.
    pub file: PathBuf,

    /// Inline module path within the file (empty at file level).
    pub module_path: Vec<String>,

    /// Declared type name.
    pub name: String,
}

/// The shape of a type declaration as written.
#[derive(Debug, Clone)]
pub enum DeclBody {
    /// `struct X { .. }`
    Struct(Vec<syn::Field>),

    /// `struct X;`
    Unit,

    /// `struct X(A, B);`
    Tuple(Vec<Type>),

    /// `type X = T;`
    Alias(Type),

    /// `enum X { .. }`
    Enum,

    /// `union X { .. }`
    Union,

    /// Any declaration with type or const parameters.
    Generic,
}

/// A type declaration found in a package.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub id: DeclId,
    pub body: DeclBody,
}

impl Declaration {
    /// Bare name of the declared type.
    pub fn name(&self) -> &str {
        &self.id.name
    }
}

/// A parsed source file.
#[derive(Debug)]
pub struct SourceFile {
    pub path: PathBuf,
    pub syntax: syn::File,
}

/// A loaded package: its files and the declarations extracted from them.
#[derive(Debug)]
pub struct Package {
    /// Specifier the package was loaded from.
    pub spec: String,

    pub files: Vec<SourceFile>,

    /// Declarations in file order, then source order.
    pub declarations: Vec<Declaration>,

    doc_blocks: Vec<(DeclId, Vec<String>)>,
}

impl Package {
    /// Build a package from already parsed files.
    pub fn new(spec: impl Into<String>, files: Vec<SourceFile>) -> Self {
        let mut declarations = Vec::new();
        let mut doc_blocks = Vec::new();

        for file in &files {
            let mut module_path = Vec::new();
            collect_declarations(
                &file.syntax.items,
                &file.path,
                &mut module_path,
                &mut declarations,
                &mut doc_blocks,
            );
        }

        Self {
            spec: spec.into(),
            files,
            declarations,
            doc_blocks,
        }
    }

    /// Parse a single in-memory source as a package.
    pub fn from_source(
        spec: impl Into<String>,
        path: impl Into<PathBuf>,
        source: &str,
    ) -> Rs2ProtoResult<Self> {
        let spec = spec.into();
        let syntax = syn::parse_file(source)
            .map_err(|e| {
                let message = package_error(&spec, &[e.to_string()]);
                Rs2ProtoError::LoadFailure(message.trim_end().to_string())
            })?;
        let file = SourceFile {
            path: path.into(),
            syntax,
        };
        Ok(Self::new(spec, vec![file]))
    }
}

/// Doc lines of every declaration, keyed by identity.
#[derive(Debug, Default)]
pub struct DocIndex {
    docs: HashMap<DeclId, Vec<String>>,
}

impl DocIndex {
    pub fn insert(&mut self, id: DeclId, docs: Vec<String>) {
        self.docs.insert(id, docs);
    }

    pub fn get(&self, id: &DeclId) -> Option<&[String]> {
        self.docs.get(id).map(Vec::as_slice)
    }
}

/// Declaration bodies keyed by bare name. The first declaration of a name wins.
#[derive(Debug, Default)]
pub struct TypeIndex {
    bodies: HashMap<String, DeclBody>,
}

impl TypeIndex {
    pub fn insert(&mut self, name: impl Into<String>, body: DeclBody) {
        self.bodies.entry(name.into()).or_insert(body);
    }

    pub fn get(&self, name: &str) -> Option<&DeclBody> {
        self.bodies.get(name)
    }
}

/// All packages of one run plus the indices built over them.
#[derive(Debug, Default)]
pub struct LoadedPackages {
    pub packages: Vec<Package>,
    pub docs: DocIndex,
    pub types: TypeIndex,
}

impl LoadedPackages {
    /// Index a set of packages.
    pub fn from_packages(mut packages: Vec<Package>) -> Self {
        let mut docs = DocIndex::default();
        let mut types = TypeIndex::default();

        for package in &mut packages {
            for (id, block) in package.doc_blocks.drain(..) {
                docs.insert(id, block);
            }
            for decl in &package.declarations {
                types.insert(decl.name(), decl.body.clone());
            }
        }

        Self {
            packages,
            docs,
            types,
        }
    }

    /// Every declaration across all packages, in load order.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.packages.iter().flat_map(|p| p.declarations.iter())
    }
}

/// Load and parse every package named by `specs`.
///
/// Relative specifiers are resolved against `base_dir`. Duplicate specifiers
/// are loaded once, and a file reached through more than one specifier
/// belongs to the first package that reached it.
pub fn load_packages(base_dir: &Path, specs: &[String]) -> Rs2ProtoResult<LoadedPackages> {
    let mut packages = Vec::new();
    let mut failures = Vec::new();
    let mut seen_specs = HashSet::new();
    let mut seen_files = HashSet::new();

    for spec in specs {
        if !seen_specs.insert(spec.as_str()) {
            continue;
        }

        let paths = match package_files(base_dir, spec) {
            Ok(paths) => paths,
            Err(err) => {
                failures.push(package_error(spec, &[err]));
                continue;
            }
        };

        let mut files = Vec::new();
        let mut errors = Vec::new();
        for path in paths {
            if !seen_files.insert(path.clone()) {
                continue;
            }
            match parse_source_file(&path) {
                Ok(file) => files.push(file),
                Err(err) => errors.push(err),
            }
        }

        if !errors.is_empty() {
            failures.push(package_error(spec, &errors));
            continue;
        }

        tracing::debug!(package = %spec, files = files.len(), "loaded package");
        packages.push(Package::new(spec.clone(), files));
    }

    if !failures.is_empty() {
        return Err(Rs2ProtoError::LoadFailure(
            failures.concat().trim_end().to_string(),
        ));
    }

    Ok(LoadedPackages::from_packages(packages))
}

fn package_error(spec: &str, errors: &[String]) -> String {
    format!("error loading package {spec}: {}; ", errors.join(", "))
}

/// Resolve a specifier to the `.rs` files it covers, sorted by path.
fn package_files(base_dir: &Path, spec: &str) -> Result<Vec<PathBuf>, String> {
    let path = Path::new(spec);
    let root = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    };

    if root.is_file() {
        if !is_rust_file(&root) {
            return Err(format!("{} is not a Rust source file", root.display()));
        }
        return Ok(vec![root]);
    }

    if !root.is_dir() {
        return Err(format!("no such file or directory: {}", root.display()));
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(&root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e));
    for entry in walker {
        let entry = entry.map_err(|e| e.to_string())?;
        if entry.file_type().is_file() && is_rust_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    if files.is_empty() {
        return Err(format!("no Rust source files in {}", root.display()));
    }

    Ok(files)
}

fn is_rust_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "rs")
}

/// Hidden directories and build output are never part of a package.
fn is_skipped_dir(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || name == "target"
}

fn parse_source_file(path: &Path) -> Result<SourceFile, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let syntax =
        syn::parse_file(&content).map_err(|e| format!("failed to parse {}: {e}", path.display()))?;
    Ok(SourceFile {
        path: path.to_path_buf(),
        syntax,
    })
}

fn collect_declarations(
    items: &[Item],
    file: &Path,
    module_path: &mut Vec<String>,
    declarations: &mut Vec<Declaration>,
    doc_blocks: &mut Vec<(DeclId, Vec<String>)>,
) {
    for item in items {
        let (ident, attrs, body) = match item {
            Item::Struct(s) => {
                let body = if is_generic(&s.generics) {
                    DeclBody::Generic
                } else {
                    match &s.fields {
                        Fields::Named(named) => DeclBody::Struct(named.named.iter().cloned().collect()),
                        Fields::Unnamed(unnamed) => {
                            DeclBody::Tuple(unnamed.unnamed.iter().map(|f| f.ty.clone()).collect())
                        }
                        Fields::Unit => DeclBody::Unit,
                    }
                };
                (&s.ident, &s.attrs, body)
            }
            Item::Enum(e) => {
                let body = if is_generic(&e.generics) {
                    DeclBody::Generic
                } else {
                    DeclBody::Enum
                };
                (&e.ident, &e.attrs, body)
            }
            Item::Union(u) => {
                let body = if is_generic(&u.generics) {
                    DeclBody::Generic
                } else {
                    DeclBody::Union
                };
                (&u.ident, &u.attrs, body)
            }
            Item::Type(t) => {
                let body = if is_generic(&t.generics) {
                    DeclBody::Generic
                } else {
                    DeclBody::Alias((*t.ty).clone())
                };
                (&t.ident, &t.attrs, body)
            }
            Item::Mod(m) => {
                if let Some((_, nested)) = &m.content {
                    module_path.push(m.ident.to_string());
                    collect_declarations(nested, file, module_path, declarations, doc_blocks);
                    module_path.pop();
                }
                continue;
            }
            _ => continue,
        };

        let id = DeclId {
            file: file.to_path_buf(),
            module_path: module_path.clone(),
            name: ident.to_string(),
        };
        doc_blocks.push((id.clone(), extract_docs(attrs)));
        declarations.push(Declaration { id, body });
    }
}

/// Lifetime parameters alone do not make a declaration generic.
fn is_generic(generics: &Generics) -> bool {
    generics.type_params().next().is_some() || generics.const_params().next().is_some()
}

/// Extract outer documentation lines from attributes.
fn extract_docs(attrs: &[Attribute]) -> Vec<String> {
    let mut docs = Vec::new();

    for attr in attrs {
        if !matches!(attr.style, AttrStyle::Outer) || !attr.path().is_ident("doc") {
            continue;
        }
        if let Meta::NameValue(meta) = &attr.meta {
            if let syn::Expr::Lit(expr_lit) = &meta.value {
                if let syn::Lit::Str(lit_str) = &expr_lit.lit {
                    for line in lit_str.value().lines() {
                        let line = line.trim();
                        if !line.is_empty() {
                            docs.push(line.to_string());
                        }
                    }
                }
            }
        }
    }

    docs
}
