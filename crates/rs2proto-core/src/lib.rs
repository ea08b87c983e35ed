//! rs2proto-core - Schema extraction from annotated Rust types
//!
//! This crate turns Rust type declarations into a language-neutral schema
//! model and renders it as proto3:
//! - [`load_packages`] parses the source packages with `syn`
//! - [`build_schema`] selects annotated declarations and builds the
//!   [`SchemaModel`] (enums first, then messages)
//! - [`render_proto`] / [`render_json`] emit the model
//! - [`ProjectConfig`] reads `rs2proto.toml`
//!
//! ```rust,no_run
//! use rs2proto_core::{BuildOptions, generate, render_proto};
//! use std::path::Path;
//!
//! # fn main() -> rs2proto_core::Rs2ProtoResult<()> {
//! let model = generate(Path::new("."), &["./src/model".to_string()], &BuildOptions::default())?;
//! println!("{}", render_proto(&model, "shop.v1"));
//! # Ok(())
//! # }
//! ```

pub mod annotation;
pub mod builder;
pub mod config;
pub mod correlate;
pub mod emit;
pub mod error;
pub mod loader;
pub mod mapper;
pub mod model;
pub mod naming;
pub mod shape;

use std::path::Path;

pub use annotation::{AnnotationScanner, DEFAULT_MARKER};
pub use builder::{BuildOptions, build_schema};
pub use config::{CONFIG_FILE_NAME, GenerateConfig, OutputFormat, ProjectConfig};
pub use emit::{GENERATED_HEADER, render_json, render_proto};
pub use error::{Rs2ProtoError, Rs2ProtoResult};
pub use loader::{LoadedPackages, load_packages};
pub use model::{EnumDef, Field, Message, SchemaModel};

/// Load the given packages and build their schema model.
pub fn generate(
    base_dir: &Path,
    specs: &[String],
    options: &BuildOptions,
) -> Rs2ProtoResult<SchemaModel> {
    let loaded = load_packages(base_dir, specs)?;
    Ok(build_schema(&loaded, options))
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BuildOptions, GenerateConfig, OutputFormat, ProjectConfig, Rs2ProtoError, Rs2ProtoResult,
        SchemaModel, build_schema, generate, load_packages, render_json, render_proto,
    };
}
