//! Model Transform CLI
//!
//! Command-line interface for generating CRUD schemas from `@model` types.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use model_transform::{
    default_field_name, load_document, plan_for_object, transform, write_output, OperationPlan,
    TransformError, TransformOptions, DEFAULT_ARTIFACT_KEY, DEFAULT_DATA_SOURCE,
};
use serde::Serialize;

/// Log level options
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    /// Only errors
    Error,
    /// Warnings and errors
    Warn,
    /// Info, warnings, and errors
    Info,
    /// Debug messages and above (verbose)
    Debug,
    /// All messages including trace (very verbose)
    Trace,
    /// Disable all logging
    Off,
}

impl LogLevel {
    fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Off => log::LevelFilter::Off,
        }
    }
}

#[derive(Parser)]
#[command(name = "model-transform")]
#[command(about = "Generate CRUD operations from @model annotated GraphQL schemas")]
#[command(version)]
struct Cli {
    /// Set log level (error, warn, info, debug, trace, off)
    #[arg(short = 'l', long = "log-level", global = true, value_enum)]
    log_level: Option<LogLevel>,

    /// Verbose mode (equivalent to --log-level debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform a schema and print the resulting schema text
    Transform {
        /// Schema file (GraphQL SDL)
        schema: PathBuf,

        /// Output file for the schema (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Write the generated resources as JSON to this file
        #[arg(long)]
        resources: Option<PathBuf>,

        /// Pretty-print the resources JSON
        #[arg(long)]
        pretty: bool,

        /// Data source every generated resolver binds to
        #[arg(long, default_value = DEFAULT_DATA_SOURCE)]
        data_source: String,

        /// Resource key of the final schema artifact
        #[arg(long, default_value = DEFAULT_ARTIFACT_KEY)]
        artifact_key: String,
    },

    /// Show which operations each @model type would get, as JSON
    Plan {
        /// Schema file (GraphQL SDL)
        schema: PathBuf,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level, cli.verbose);

    let result = match cli.command {
        Commands::Transform {
            schema,
            output,
            resources,
            pretty,
            data_source,
            artifact_key,
        } => {
            let options = TransformOptions::new()
                .data_source(data_source)
                .artifact_key(artifact_key);
            run_transform(&schema, output.as_deref(), resources.as_deref(), pretty, &options)
        }
        Commands::Plan { schema, pretty } => run_plan(&schema, pretty),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn init_logging(level: Option<LogLevel>, verbose: bool) {
    let filter = match level {
        Some(level) => level.to_level_filter(),
        None if verbose => log::LevelFilter::Debug,
        None => log::LevelFilter::Warn,
    };
    env_logger::Builder::new()
        .filter_level(filter)
        .format_timestamp(None)
        .init();
}

/// Print the error and turn it into an exit code.
fn fail(e: TransformError) -> u8 {
    eprintln!("Error: {}", e);
    e.exit_code() as u8
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, u8> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|source| fail(TransformError::Serialize { source }))
}

fn run_transform(
    schema_path: &Path,
    output: Option<&Path>,
    resources: Option<&Path>,
    pretty: bool,
    options: &TransformOptions,
) -> Result<(), u8> {
    let document = load_document(schema_path).map_err(fail)?;
    let result = transform(&document, options).map_err(fail)?;

    match output {
        Some(path) => write_output(path, &result.schema).map_err(fail)?,
        None => print!("{}", result.schema),
    }

    if let Some(path) = resources {
        let json = to_json(&result.resources, pretty)?;
        write_output(path, &json).map_err(fail)?;
    }

    Ok(())
}

#[derive(Serialize)]
struct TypePlan<'a> {
    #[serde(rename = "type")]
    type_name: &'a str,
    operations: Vec<PlannedField>,
}

#[derive(Serialize)]
struct PlannedField {
    field: String,
    #[serde(flatten)]
    plan: OperationPlan,
}

fn run_plan(schema_path: &Path, pretty: bool) -> Result<(), u8> {
    let document = load_document(schema_path).map_err(fail)?;

    let plans: Vec<TypePlan> = document
        .objects()
        .filter_map(|object| {
            let operations = plan_for_object(object)?
                .into_iter()
                .map(|plan| PlannedField {
                    field: plan
                        .name_override
                        .clone()
                        .unwrap_or_else(|| default_field_name(&object.name, plan.kind)),
                    plan,
                })
                .collect();
            Some(TypePlan {
                type_name: &object.name,
                operations,
            })
        })
        .collect();

    println!("{}", to_json(&plans, pretty)?);
    Ok(())
}
