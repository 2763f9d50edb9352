//! genny: generate concrete Go code from a template.
//!
//! # Usage
//!
//! ```bash
//! genny --in=queue.go --out=gen-queue.go gen "Something=string,int"
//! cat queue.go | genny gen "KeyType=BUILTINS ValueType=NUMBERS" > gen.go
//! ```
//!
//! Typically invoked from a `//go:generate genny ...` directive in the
//! template itself; such lines are removed from the generated output.

use std::fs::{self, File};
use std::io::{self, BufWriter, Cursor, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use genny::{GoImports, ImportNormalizer, Options, Passthrough, generics, parse_type_sets};

/// Filename reported for a template read from standard input.
const STDIN_FILENAME: &str = "stdin";

/// Generate concrete Go code from a template using generic.Type placeholders.
#[derive(Parser, Debug)]
#[command(name = "genny", version)]
#[command(about = "Generate concrete Go code from generic.Type templates")]
struct Cli {
    /// Template file (default: standard input).
    #[arg(long = "in", value_name = "FILE", env = "GENNY_IN")]
    input: Option<PathBuf>,

    /// Output file (default: standard output).
    #[arg(long, value_name = "FILE", env = "GENNY_OUT")]
    out: Option<PathBuf>,

    /// Rename the generated package.
    #[arg(long, value_name = "NAME", env = "GENNY_PKG")]
    pkg: Option<String>,

    /// Write a `// +build <TAG>` constraint at the top of the output.
    #[arg(long, env = "GENNY_TAG")]
    tag: Option<String>,

    /// goimports-compatible executable used to fix imports and format.
    #[arg(
        long,
        value_name = "PATH",
        env = "GENNY_IMPORTS_TOOL",
        default_value = GoImports::DEFAULT_TOOL
    )]
    imports_tool: PathBuf,

    /// Skip import normalization and emit the merged text as is.
    #[arg(long)]
    raw: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one instantiation per combination of specific types.
    Gen {
        /// Space separated `Generic=Specific1,Specific2` pairs. `BUILTINS`
        /// and `NUMBERS` expand to the Go builtin and numeric types.
        type_args: String,
    },
}

fn main() -> ExitCode {
    // Logs go to stderr; stdout may carry the generated code.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "genny=warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("genny: {:#}", error);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let Command::Gen { type_args } = &cli.command;
    let type_sets = parse_type_sets(type_args)?;

    let (filename, source) = match &cli.input {
        Some(path) => {
            let source =
                fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
            (path.display().to_string(), source)
        }
        None => {
            let mut source = Vec::new();
            io::stdin()
                .read_to_end(&mut source)
                .context("failed to read standard input")?;
            (STDIN_FILENAME.to_string(), source)
        }
    };
    debug!(%filename, sets = type_sets.len(), "read template");

    let options = Options {
        filename,
        output_filename: cli.out.clone(),
        package_name: cli.pkg.clone(),
    };

    let normalizer: Box<dyn ImportNormalizer> = if cli.raw {
        Box::new(Passthrough)
    } else {
        Box::new(GoImports::new(&cli.imports_tool))
    };

    let output = generics(&options, &mut Cursor::new(source), &type_sets, normalizer.as_ref())?;

    // Nothing is written until generation has fully succeeded.
    match &cli.out {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_output(BufWriter::new(file), cli.tag.as_deref(), &output)
                .with_context(|| format!("failed to write {}", path.display()))
        }
        None => write_output(io::stdout().lock(), cli.tag.as_deref(), &output)
            .context("failed to write standard output"),
    }
}

fn write_output(mut writer: impl Write, tag: Option<&str>, output: &[u8]) -> io::Result<()> {
    if let Some(tag) = tag {
        write!(writer, "// +build {}\n\n", tag)?;
    }
    writer.write_all(output)?;
    writer.flush()
}
