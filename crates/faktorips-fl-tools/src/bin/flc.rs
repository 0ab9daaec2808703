//! Formula compiler
//!
//! Compiles or evaluates a single formula and lists the built-in functions
//! and operations.
//!
//! Usage:
//! - `flc compile <formula> [--expected TYPE] [--json]`
//! - `flc eval <formula> [--set name=value]...`
//! - `flc functions`
//! - `flc operations`

use clap::{Parser, Subcommand};
use faktorips_fl::compiler::{BinaryOperation, UnaryOperation};
use faktorips_fl::{
    Bindings, CompilationResult, CompilerConfig, Conversion, DiagnosticFormatter, ExprCompiler,
    FlFunction, FormulaEvaluator, Locale,
};
use faktorips_fl_tools::{CompileReport, parse_binding};
use std::path::PathBuf;
use std::process;
use tracing::{debug, error, info};

#[derive(Parser, Debug)]
#[command(name = "flc")]
#[command(about = "Compile and evaluate Faktor-IPS formulas")]
struct Args {
    /// YAML file declaring parameters and datatypes
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Message and function name language (en, de)
    #[arg(long, global = true, value_parser = parse_locale)]
    locale: Option<Locale>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a formula to Java and report messages
    Compile {
        formula: String,

        /// Datatype the formula must return
        #[arg(long, default_value = "void")]
        expected: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compile and evaluate a formula
    Eval {
        formula: String,

        /// Datatype the formula must return
        #[arg(long, default_value = "void")]
        expected: String,

        /// Parameter value, e.g. `--set premium=10.50EUR`
        #[arg(long = "set", value_name = "NAME=VALUE")]
        bindings: Vec<String>,
    },
    /// List the available functions
    Functions,
    /// List the available operations and conversions
    Operations,
}

fn parse_locale(tag: &str) -> Result<Locale, String> {
    Locale::from_tag(tag).ok_or_else(|| format!("unsupported locale '{tag}'"))
}

fn main() {
    faktorips_fl_tools::init_logging();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match CompilerConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load {}: {}", path.display(), e);
                process::exit(1);
            }
        },
        None => CompilerConfig::default(),
    };
    if let Some(locale) = args.locale {
        config.locale = locale;
    }

    let compiler = match config.build_compiler() {
        Ok(compiler) => compiler,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            process::exit(1);
        }
    };

    match args.command {
        Command::Compile {
            formula,
            expected,
            json,
        } => {
            let result = compile(&compiler, &formula, &expected);
            if json {
                match serde_json::to_string_pretty(&CompileReport::new(&result)) {
                    Ok(text) => println!("{text}"),
                    Err(e) => {
                        error!("Failed to encode report: {}", e);
                        process::exit(1);
                    }
                }
            } else {
                report(&formula, &result);
                if let (Some(code), Some(datatype)) = (result.code(), result.datatype()) {
                    for import in code.imports() {
                        println!("import {import};");
                    }
                    info!("Formula returns {}", datatype);
                    println!("{code}");
                }
            }
            if !result.is_successful() {
                process::exit(1);
            }
        }
        Command::Eval {
            formula,
            expected,
            bindings,
        } => {
            let mut values = Bindings::new();
            for assignment in &bindings {
                match parse_binding(&compiler, assignment) {
                    Ok((name, value)) => {
                        values.insert(name, value);
                    }
                    Err(e) => {
                        error!("{}", e);
                        process::exit(1);
                    }
                }
            }

            let result = compile(&compiler, &formula, &expected);
            report(&formula, &result);
            let Some(typed) = result.typed_expr() else {
                process::exit(1);
            };
            match FormulaEvaluator::evaluate(typed, &values) {
                Ok(value) => println!("{value}"),
                Err(e) => {
                    error!("Evaluation failed: {}", e);
                    process::exit(1);
                }
            }
        }
        Command::Functions => {
            for function in compiler.functions().iter() {
                let description = function.description();
                if description.is_empty() {
                    println!("{}", function.signature());
                } else {
                    println!("{:<40} {}", function.signature().to_string(), description);
                }
            }
        }
        Command::Operations => {
            for operation in compiler.operations().binary_operations() {
                println!("{}", operation.signature());
            }
            for operation in compiler.operations().unary_operations() {
                println!("{}", operation.signature());
            }
            for conversion in compiler.conversions().iter() {
                println!("{} -> {} (conversion)", conversion.source(), conversion.target());
            }
        }
    }
}

fn compile(compiler: &ExprCompiler, formula: &str, expected: &str) -> CompilationResult {
    let Some(expected) = compiler.datatype(expected) else {
        error!("Unknown datatype '{}'", expected);
        process::exit(1);
    };
    debug!(formula, expected = %expected, "compiling");
    compiler.compile(formula, &expected)
}

/// Print messages with the formula and a caret under the offending part.
fn report(formula: &str, result: &CompilationResult) {
    if result.messages().is_empty() {
        return;
    }
    let formatter = DiagnosticFormatter::new(formula, "formula");
    let rendered = formatter.format_all(result.messages());
    if result.is_successful() {
        info!("\n{}", rendered.trim_end());
    } else {
        error!("\n{}", rendered.trim_end());
    }
}
