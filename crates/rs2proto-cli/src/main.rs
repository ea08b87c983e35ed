//! rs2proto CLI - proto3 schema generator
//!
//! Reads Rust packages, selects the types annotated with `@rs2proto` and
//! writes a proto3 (or JSON) schema for them.
//!
//! ```text
//! rs2proto -p ./src/model -f proto/schema.proto -n shop.v1
//! ```

use clap::{ArgAction, CommandFactory, Parser, ValueEnum};
use rs2proto_core::OutputFormat;
use std::path::PathBuf;

mod generate;
mod logging;

#[derive(Parser, Debug)]
#[command(name = "rs2proto")]
#[command(author, version, about = "Generate proto3 schemas from annotated Rust types", long_about = None)]
struct Cli {
    /// Package to scan: a directory or a single .rs file (repeatable)
    #[arg(short, long = "package", value_name = "PACKAGE")]
    packages: Vec<String>,

    /// Output file (default: schema.proto)
    #[arg(short = 'f', long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// proto package namespace (default: proto)
    #[arg(short, long, value_name = "NAME")]
    namespace: Option<String>,

    /// Only generate types whose name contains this text (case-insensitive)
    #[arg(long, value_name = "TEXT")]
    filter: Option<String>,

    /// Doc marker that selects a type (default: @rs2proto)
    #[arg(long, value_name = "TOKEN")]
    marker: Option<String>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Path to rs2proto.toml (default: ./rs2proto.toml if present)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Proto,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Proto => OutputFormat::Proto,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let overrides = generate::Overrides {
        packages: cli.packages,
        output: cli.output,
        namespace: cli.namespace,
        filter: cli.filter,
        marker: cli.marker,
        format: cli.format.map(OutputFormat::from),
    };

    let config = generate::resolve_config(cli.config.as_deref(), overrides)?;
    if config.packages.is_empty() {
        Cli::command().print_help()?;
        println!();
        return Err(rs2proto_core::Rs2ProtoError::Usage(
            "at least one package is required (-p/--package or [generate].packages)".to_string(),
        )
        .into());
    }

    let written = generate::run(&config)?;
    println!("✓ Schema written to {}", written.display());

    Ok(())
}
