//! tsd - Tree Schema CLI tool
//!
//! Validates, edits, diffs and merges YAML/JSON documents against a
//! path-pattern definition.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::Level;

use tree_schema::value::{self, Value};
use tree_schema::{get_changes, Changes, DiffOptions, TreeSchema};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Debug, Parser)]
#[command(name = "tsd", version, about = "Tree Schema CLI tool")]
struct Cli {
    /// Output format for documents written to the output.
    #[arg(short, long, value_enum, default_value_t = Format::Json, global = true)]
    format: Format,

    /// Output location. Use '-' for stdout.
    #[arg(short, long, default_value = "-", global = true)]
    output: String,

    /// Log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate a document against the schema.
    Validate {
        #[arg(short, long)]
        schema: PathBuf,
        file: PathBuf,
    },
    /// Write a value at a path. A value of `null` deletes.
    Set {
        #[arg(short, long)]
        schema: PathBuf,
        file: PathBuf,
        path: String,
        /// The new value, parsed as YAML (`5`, `true`, `{a: 1}`, `null`).
        value: String,
        #[arg(long)]
        no_validate: bool,
    },
    /// Print the changes that turn BEFORE into AFTER.
    Diff {
        before: PathBuf,
        after: PathBuf,
        /// Omit keys removed in AFTER.
        #[arg(long)]
        no_deletions: bool,
        /// Skip a top-level key. May be repeated.
        #[arg(long = "ignore")]
        ignored: Vec<String>,
    },
    /// Apply a file of changes to a document.
    Apply {
        #[arg(short, long)]
        schema: PathBuf,
        file: PathBuf,
        changes: PathBuf,
        #[arg(long)]
        no_validate: bool,
    },
    /// Merge two diverged documents.
    Merge {
        #[arg(short, long)]
        schema: PathBuf,
        left: PathBuf,
        right: PathBuf,
        #[arg(long)]
        no_validate: bool,
    },
    /// List the patterns of a schema and any that shadow each other.
    Patterns {
        #[arg(short, long)]
        schema: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let mut output: Box<dyn Write> = if cli.output == "-" {
        Box::new(io::stdout())
    } else {
        Box::new(
            fs::File::create(&cli.output)
                .map_err(|e| format!("Failed to create output file {:?}: {}", cli.output, e))?,
        )
    };
    let format = cli.format;

    match cli.command {
        Command::Validate { schema, file } => {
            let schema = load_schema(&schema)?;
            schema.validate(&load_document(&file)?)?;
            writeln!(output, "Validation successful")?;
        }
        Command::Set {
            schema,
            file,
            path,
            value,
            no_validate,
        } => {
            let schema = load_schema(&schema)?;
            let new_value = value::from_yaml(&value)
                .map_err(|e| format!("Failed to parse value {:?}: {}", value, e))?;
            let updated = schema.set_value(&load_document(&file)?, &path, &new_value, !no_validate)?;
            write_document(&mut output, format, &updated)?;
        }
        Command::Diff {
            before,
            after,
            no_deletions,
            ignored,
        } => {
            let options = DiffOptions::new()
                .include_deletions(!no_deletions)
                .ignore_keys(ignored);
            let changes = get_changes(&load_document(&before)?, &load_document(&after)?, &options);
            write_document(&mut output, format, &changes)?;
        }
        Command::Apply {
            schema,
            file,
            changes,
            no_validate,
        } => {
            let schema = load_schema(&schema)?;
            let changes = load_changes(&changes)?;
            let updated = schema.update(&load_document(&file)?, &changes, !no_validate)?;
            write_document(&mut output, format, &updated)?;
        }
        Command::Merge {
            schema,
            left,
            right,
            no_validate,
        } => {
            let schema = load_schema(&schema)?;
            let result = schema.merge(&load_document(&left)?, &load_document(&right)?, !no_validate)?;
            write_document(&mut output, format, &result)?;
        }
        Command::Patterns { schema } => {
            let schema = load_schema(&schema)?;
            writeln!(output, "Patterns in schema:")?;
            let definition = schema.matcher().definition();
            for pattern in schema.matcher().patterns() {
                if let Some(decl) = definition.get(pattern) {
                    writeln!(output, "  - {}: {}", pattern, decl)?;
                }
            }
            let ambiguities = schema.matcher().ambiguities();
            if !ambiguities.is_empty() {
                writeln!(output, "Shadowed patterns:")?;
                for ambiguity in ambiguities {
                    writeln!(output, "  - {}", ambiguity)?;
                }
            }
        }
    }
    Ok(())
}

fn load_schema(path: &Path) -> CliResult<TreeSchema> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read schema file {:?}: {}", path, e))?;
    let schema = TreeSchema::from_yaml(&content)
        .map_err(|e| format!("Failed to parse schema {:?}: {}", path, e))?;
    Ok(schema)
}

// YAML is a superset of JSON, so both formats go through the YAML parser.
fn load_document(path: &Path) -> CliResult<Value> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read file {:?}: {}", path, e))?;
    let document =
        value::from_yaml(&content).map_err(|e| format!("Failed to parse file {:?}: {}", path, e))?;
    Ok(document)
}

fn load_changes(path: &Path) -> CliResult<Changes> {
    match load_document(path)? {
        Value::Map(m) => Ok(m.fields.into_iter().collect()),
        Value::Null => Ok(Changes::new()),
        other => Err(format!("Changes file {:?} must hold a mapping, found {}", path, other.kind_name()).into()),
    }
}

fn write_document<T: Serialize>(output: &mut dyn Write, format: Format, document: &T) -> CliResult<()> {
    match format {
        Format::Json => writeln!(output, "{}", serde_json::to_string_pretty(document)?)?,
        Format::Yaml => write!(output, "{}", serde_yaml::to_string(document)?)?,
    }
    Ok(())
}
