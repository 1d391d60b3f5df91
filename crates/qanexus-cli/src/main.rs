mod settings;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use qanexus_assert::{AssertionFailure, assert_date_format, set_decoration};
use qanexus_core::{SupportedDateFormat, country_codes, phone_pattern};
use qanexus_generate::{ConfigurationError, DataGenerator, GeneratorRegistry};
use rand::{CryptoRng, RngCore};
use serde_json::Value;
use settings::{Settings, SettingsError, init_logging, load_settings};
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("invalid params json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Assertion(#[from] AssertionFailure),
}

#[derive(Parser, Debug)]
#[command(name = "qanexus", version, about = "QA Nexus test-data generator and checks")]
struct Cli {
    /// Settings file (defaults to ./qanexus.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Emit logs as JSON.
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,
    /// Disable ANSI colouring of assertion failures.
    #[arg(long, global = true, default_value_t = false)]
    no_color: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a registered generator.
    Generate(GenerateArgs),
    /// List registered generators.
    List,
    /// List country codes with a phone pattern.
    Countries,
    /// List supported date formats.
    Formats,
    /// Check that a date string matches a format.
    CheckDate(CheckDateArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Generator id, e.g. `primitive.int`.
    id: String,
    /// Params as a JSON object.
    #[arg(long, value_name = "JSON")]
    params: Option<String>,
    /// Number of values to produce.
    #[arg(long)]
    count: Option<usize>,
    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
    /// Print a JSON array instead of one value per line.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args, Debug)]
struct CheckDateArgs {
    value: String,
    format: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    init_logging(cli.log_json)?;
    let settings = load_settings(cli.config.as_deref())?;
    if cli.no_color || settings.color == Some(false) {
        set_decoration(false);
    }

    match cli.command {
        Command::Generate(args) => run_generate(args, &settings),
        Command::List => {
            for generator in GeneratorRegistry::new().iter() {
                println!("{:<32} {}", generator.id(), generator.description());
            }
            Ok(())
        }
        Command::Countries => {
            for code in country_codes() {
                println!("{code}  {}", phone_pattern(code).unwrap_or_default());
            }
            Ok(())
        }
        Command::Formats => {
            for format in SupportedDateFormat::ALL {
                println!("{format}");
            }
            Ok(())
        }
        Command::CheckDate(args) => {
            assert_date_format(&args.value, &args.format, None)?;
            println!("ok");
            Ok(())
        }
    }
}

fn run_generate(args: GenerateArgs, settings: &Settings) -> Result<(), CliError> {
    let params: Option<Value> = args
        .params
        .as_deref()
        .map(serde_json::from_str::<Value>)
        .transpose()?;
    let count = args.count.or(settings.count).unwrap_or(1);
    let json = args.json || settings.json;
    let defaults = settings.generator_defaults();

    tracing::info!(event = "generate_started", generator = %args.id, count);

    match args.seed.or(settings.seed) {
        Some(seed) => {
            let mut generator = DataGenerator::seeded(seed).with_defaults(defaults);
            emit(&mut generator, &args.id, params.as_ref(), count, json)
        }
        None => {
            let mut generator = DataGenerator::new().with_defaults(defaults);
            emit(&mut generator, &args.id, params.as_ref(), count, json)
        }
    }
}

fn emit<S: CryptoRng, R: RngCore>(
    generator: &mut DataGenerator<S, R>,
    id: &str,
    params: Option<&Value>,
    count: usize,
    json: bool,
) -> Result<(), CliError> {
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        values.push(generator.generate(id, params)?);
    }

    if json {
        let array = Value::Array(values.iter().map(|value| value.to_json()).collect());
        println!("{}", serde_json::to_string_pretty(&array)?);
    } else {
        for value in &values {
            println!("{value}");
        }
    }

    tracing::info!(event = "generate_finished", generator = %id, count = values.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_generate_with_global_flags() {
        let cli = Cli::try_parse_from([
            "qanexus",
            "generate",
            "primitive.int",
            "--params",
            r#"{"min": 1, "max": 6}"#,
            "--count",
            "3",
            "--seed",
            "9",
            "--no-color",
        ])
        .expect("valid arguments");

        assert!(cli.no_color);
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.id, "primitive.int");
        assert_eq!(args.count, Some(3));
        assert_eq!(args.seed, Some(9));
        assert!(!args.json);
    }

    #[test]
    fn seeded_emit_is_reproducible() {
        let params = serde_json::json!({"min": 1, "max": 6});
        let run = |seed| -> Vec<Value> {
            let mut generator = DataGenerator::seeded(seed);
            (0..5)
                .filter_map(|_| generator.generate("primitive.int", Some(&params)).ok())
                .map(|value| value.to_json())
                .collect()
        };
        assert_eq!(run(5), run(5));
        assert_eq!(run(5).len(), 5);
    }
}
