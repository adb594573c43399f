//! Roman Numeral Command Line Interface
//!
//! # Usage
//!
//! ```bash
//! # Convert arguments
//! roman_cli convert MCMXCIV XLII
//!
//! # Convert stdin, one numeral per line
//! printf 'IV\nIX\n' | roman_cli convert --mode concurrent
//!
//! # Show how a numeral is tokenized
//! roman_cli tokenize MCMXCIV
//!
//! # Print the symbol table as JSON
//! roman_cli -o json table
//! ```
//!
//! Defaults for `--mode`, `--strict` and `--channel-capacity` come from the
//! `ROMAN_*` environment variables (a `.env` file is loaded if present).

use std::io::{self, BufRead};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use roman_pipeline::numeral::table;
use roman_pipeline::numeral::valuator::lookup;
use roman_pipeline::{Converter, ConverterConfig, PipelineMode, Tokenizer, UnknownSymbolPolicy};

#[derive(Parser)]
#[command(name = "roman_cli")]
#[command(version)]
#[command(about = "Convert Roman numerals with a tokenize -> valuate -> reduce pipeline")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format: json, text, or pretty (default)
    #[arg(long, short = 'o', global = true, default_value = "pretty", value_enum)]
    format: OutputFormat,

    /// Pipeline mode: sequential or concurrent
    #[arg(long, global = true)]
    mode: Option<PipelineMode>,

    /// Reject characters outside the symbol table instead of counting them as 0
    #[arg(long, global = true)]
    strict: bool,

    /// Capacity of each inter-stage channel in concurrent mode
    #[arg(long, global = true)]
    channel_capacity: Option<usize>,

    /// Tracing filter directives
    #[arg(long, global = true, env = "RUST_LOG", default_value = "warn")]
    log: String,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
    Pretty,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert numerals (reads stdin lines if none are given)
    Convert {
        numerals: Vec<String>,
    },

    /// Show the symbols a numeral is split into
    Tokenize {
        numeral: String,
    },

    /// Print the symbol table
    Table,
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&cli.log))
        .with_writer(io::stderr)
        .init();

    let result = build_converter(&cli).and_then(|converter| match &cli.command {
        Commands::Convert { numerals } => cmd_convert(&converter, numerals, cli.format),
        Commands::Tokenize { numeral } => cmd_tokenize(numeral, cli.format),
        Commands::Table => cmd_table(cli.format),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::json!({ "error": format!("{:#}", e) }));
            } else {
                eprintln!("{}: {:#}", "error".red().bold(), e);
            }
            ExitCode::FAILURE
        }
    }
}

fn build_converter(cli: &Cli) -> Result<Converter> {
    let mut config = ConverterConfig::from_env().context("Invalid ROMAN_* environment")?;
    if let Some(mode) = cli.mode {
        config = config.with_mode(mode);
    }
    if cli.strict {
        config = config.with_unknown_symbols(UnknownSymbolPolicy::Reject);
    }
    if let Some(capacity) = cli.channel_capacity {
        config = config.with_channel_capacity(capacity);
    }
    Ok(Converter::new(config))
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

fn cmd_convert(converter: &Converter, numerals: &[String], format: OutputFormat) -> Result<()> {
    let inputs = if numerals.is_empty() {
        read_stdin_lines()?
    } else {
        numerals.to_vec()
    };

    let mut results = Vec::with_capacity(inputs.len());
    for input in &inputs {
        let conversion = converter
            .convert_with_report(input)
            .with_context(|| format!("Failed to convert '{}'", input))?;
        results.push((input, conversion));
    }

    match format {
        OutputFormat::Json => {
            let output: Vec<_> = results
                .iter()
                .map(|(input, conversion)| {
                    serde_json::json!({
                        "input": input,
                        "value": conversion.value,
                        "symbols": conversion.symbols,
                        "unrecognized": conversion.unrecognized,
                    })
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&output).context("JSON serialization failed")?
            );
        }
        OutputFormat::Text => {
            for (_, conversion) in &results {
                println!("{}", conversion.value);
            }
        }
        OutputFormat::Pretty => {
            for (input, conversion) in &results {
                let line = format!("{} = {}", input, conversion.value.to_string().bold());
                if conversion.unrecognized > 0 {
                    println!(
                        "{} {}",
                        line,
                        format!("({} unrecognized)", conversion.unrecognized).yellow()
                    );
                } else {
                    println!("{}", line);
                }
            }
        }
    }

    Ok(())
}

fn cmd_tokenize(numeral: &str, format: OutputFormat) -> Result<()> {
    let symbols: Vec<_> = Tokenizer::new(numeral)
        .map(|symbol| (symbol.text().to_string(), symbol.offset(), table::value_of(symbol.text())))
        .collect();

    match format {
        OutputFormat::Json => {
            let output: Vec<_> = symbols
                .iter()
                .map(|(text, offset, value)| {
                    serde_json::json!({ "symbol": text, "offset": offset, "value": value })
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&output).context("JSON serialization failed")?
            );
        }
        OutputFormat::Text => {
            for (text, _, _) in &symbols {
                println!("{}", text);
            }
        }
        OutputFormat::Pretty => {
            for (text, offset, value) in &symbols {
                match value {
                    Some(value) => println!("  [{}] {:<2} {}", offset, text, value),
                    None => println!("  [{}] {:<2} {}", offset, text, "unknown (0)".yellow()),
                }
            }
            let total: u64 = symbols.iter().map(|(text, _, _)| lookup(text)).sum();
            println!("{} {}", "total".green(), total);
        }
    }

    Ok(())
}

fn cmd_table(format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let output: serde_json::Map<_, _> = table::entries()
                .map(|(symbol, value)| (symbol.to_string(), serde_json::Value::from(value)))
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&output).context("JSON serialization failed")?
            );
        }
        OutputFormat::Text | OutputFormat::Pretty => {
            for (symbol, value) in table::entries() {
                println!("{:<2} {}", symbol, value);
            }
        }
    }
    Ok(())
}

fn read_stdin_lines() -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read stdin")?;
        let line = line.trim();
        if !line.is_empty() {
            lines.push(line.to_string());
        }
    }
    Ok(lines)
}
