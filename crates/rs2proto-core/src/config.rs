//! Project configuration
//!
//! Generation settings can be kept in an `rs2proto.toml` file next to the
//! sources instead of being repeated on the command line:
//!
//! ```toml
//! [generate]
//! packages = ["./src/model"]
//! output = "proto/schema.proto"
//! namespace = "shop.v1"
//! filter = ""
//! marker = "@rs2proto"
//! format = "proto"
//! ```
//!
//! Every key is optional.

use crate::annotation::DEFAULT_MARKER;
use crate::builder::BuildOptions;
use crate::error::{Rs2ProtoError, Rs2ProtoResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "rs2proto.toml";

/// Top-level configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub generate: GenerateConfig,
}

/// Output artifact format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// proto3 text
    #[default]
    Proto,

    /// The schema model as JSON
    Json,
}

/// Settings of one generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Package specifiers (directories or single `.rs` files)
    #[serde(default)]
    pub packages: Vec<String>,

    /// Output file path
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// proto `package` namespace
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Case-insensitive type name filter
    #[serde(default)]
    pub filter: String,

    /// Doc marker that selects a declaration
    #[serde(default = "default_marker")]
    pub marker: String,

    #[serde(default)]
    pub format: OutputFormat,
}

fn default_output() -> PathBuf {
    PathBuf::from("schema.proto")
}

fn default_namespace() -> String {
    "proto".to_string()
}

fn default_marker() -> String {
    DEFAULT_MARKER.to_string()
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            packages: Vec::new(),
            output: default_output(),
            namespace: default_namespace(),
            filter: String::new(),
            marker: default_marker(),
            format: OutputFormat::default(),
        }
    }
}

impl ProjectConfig {
    /// Load configuration from a file
    pub fn from_file(path: impl AsRef<Path>) -> Rs2ProtoResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Rs2ProtoError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Rs2ProtoResult<Self> {
        Ok(toml::from_str(content)?)
    }
}

impl GenerateConfig {
    /// Validate the settings
    pub fn validate(&self) -> Rs2ProtoResult<()> {
        if self.namespace.is_empty() {
            return Err(Rs2ProtoError::Config("namespace cannot be empty".to_string()));
        }

        let valid_namespace = self
            .namespace
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
        if !valid_namespace || self.namespace.starts_with('.') || self.namespace.ends_with('.') {
            return Err(Rs2ProtoError::Config(format!(
                "invalid namespace '{}': use letters, digits, '_' and '.'",
                self.namespace
            )));
        }

        if self.marker.trim().is_empty() {
            return Err(Rs2ProtoError::Config("marker cannot be empty".to_string()));
        }

        Ok(())
    }

    /// Declaration selection options for the builder
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions::new()
            .with_filter(self.filter.clone())
            .with_marker(self.marker.clone())
    }
}
