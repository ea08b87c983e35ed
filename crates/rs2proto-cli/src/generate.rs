//! Schema generation command
//!
//! Merges `rs2proto.toml` with command-line overrides, runs the core
//! pipeline and writes the rendered schema.

use anyhow::{Context, Result};
use rs2proto_core::{
    CONFIG_FILE_NAME, GenerateConfig, OutputFormat, ProjectConfig, Rs2ProtoError, generate,
    render_json, render_proto,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings given on the command line. `None` keeps the configured value.
#[derive(Debug, Default)]
pub struct Overrides {
    pub packages: Vec<String>,
    pub output: Option<PathBuf>,
    pub namespace: Option<String>,
    pub filter: Option<String>,
    pub marker: Option<String>,
    pub format: Option<OutputFormat>,
}

/// Load the configuration file, if any, and apply the overrides.
///
/// An explicit `config_path` must exist; the default `rs2proto.toml` is only
/// read when present in the working directory.
pub fn resolve_config(config_path: Option<&Path>, overrides: Overrides) -> Result<GenerateConfig> {
    let base = match config_path {
        Some(path) => ProjectConfig::from_file(path)?.generate,
        None if Path::new(CONFIG_FILE_NAME).is_file() => {
            tracing::debug!(path = CONFIG_FILE_NAME, "using default configuration file");
            ProjectConfig::from_file(CONFIG_FILE_NAME)?.generate
        }
        None => GenerateConfig::default(),
    };

    let config = apply_overrides(base, overrides);
    config.validate()?;
    Ok(config)
}

fn apply_overrides(mut config: GenerateConfig, overrides: Overrides) -> GenerateConfig {
    if !overrides.packages.is_empty() {
        config.packages = overrides.packages;
    }
    if let Some(output) = overrides.output {
        config.output = output;
    }
    if let Some(namespace) = overrides.namespace {
        config.namespace = namespace;
    }
    if let Some(filter) = overrides.filter {
        config.filter = filter;
    }
    if let Some(marker) = overrides.marker {
        config.marker = marker;
    }
    if let Some(format) = overrides.format {
        config.format = format;
    }
    config
}

/// Generate relative to the working directory.
pub fn run(config: &GenerateConfig) -> Result<PathBuf> {
    run_in(Path::new("."), config)
}

/// Generate the schema for `config`, resolving relative paths against
/// `base_dir`. Returns the path written.
pub fn run_in(base_dir: &Path, config: &GenerateConfig) -> Result<PathBuf> {
    if config.packages.is_empty() {
        return Err(Rs2ProtoError::Usage("no packages to scan".to_string()).into());
    }

    let model = generate(base_dir, &config.packages, &config.build_options())?;
    tracing::info!(
        packages = config.packages.len(),
        messages = model.messages.len(),
        "generated schema model"
    );

    let content = match config.format {
        OutputFormat::Proto => render_proto(&model, &config.namespace),
        OutputFormat::Json => render_json(&model)?,
    };

    let output = if config.output.is_absolute() {
        config.output.clone()
    } else {
        base_dir.join(&config.output)
    };
    write_output(&output, &content)
        .with_context(|| format!("Failed to generate schema for {}", config.packages.join(", ")))?;

    Ok(output)
}

fn write_output(path: &Path, content: &str) -> Result<(), Rs2ProtoError> {
    let to_output_error = |source| Rs2ProtoError::Output {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_output_error)?;
    }
    fs::write(path, content).map_err(to_output_error)
}
