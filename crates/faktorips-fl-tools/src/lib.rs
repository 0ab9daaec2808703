// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Faktor-IPS formula tools
//!
//! Support code for the `flc` command-line compiler: logging setup,
//! parameter bindings from `name=value` arguments and the JSON report.

use faktorips_fl::{CompilationResult, ExprCompiler, MessageList, Value};
use serde::Serialize;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize logging with a default filter.
///
/// Use `RUST_LOG` environment variable to override the default filter.
/// Default is `info` for the tools and `warn` for the library crates.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("warn,faktorips_fl_tools=info,flc=info")
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// A `name=value` argument that cannot be bound.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("expected name=value, got '{0}'")]
    Malformed(String),

    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    #[error("'{text}' is not a valid {datatype}")]
    InvalidValue { text: String, datatype: String },
}

/// Parse `name=value` into a binding for one of the compiler's parameters.
///
/// The value is parsed with the parameter's datatype; `null` binds the null
/// value.
pub fn parse_binding(
    compiler: &ExprCompiler,
    assignment: &str,
) -> Result<(String, Value), BindingError> {
    let Some((name, text)) = assignment.split_once('=') else {
        return Err(BindingError::Malformed(assignment.to_string()));
    };
    let (name, text) = (name.trim(), text.trim());
    let Some((_, datatype)) = compiler.parameters().iter().find(|(n, _)| *n == name) else {
        return Err(BindingError::UnknownParameter(name.to_string()));
    };
    if text == "null" {
        return Ok((name.to_string(), Value::Null));
    }
    let value = datatype
        .value_of(text)
        .ok_or_else(|| BindingError::InvalidValue {
            text: text.to_string(),
            datatype: datatype.to_string(),
        })?;
    Ok((name.to_string(), value))
}

/// Machine-readable outcome of `flc compile --json`.
#[derive(Debug, Serialize)]
pub struct CompileReport<'a> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'a str>,
    pub imports: Vec<&'a str>,
    pub identifiers_used: &'a [String],
    pub messages: &'a MessageList,
}

impl<'a> CompileReport<'a> {
    pub fn new(result: &'a CompilationResult) -> Self {
        Self {
            success: result.is_successful(),
            datatype: result.datatype().map(|d| d.to_string()),
            code: result.code().map(|c| c.source()),
            imports: result
                .code()
                .map(|c| c.imports().iter().map(String::as_str).collect())
                .unwrap_or_default(),
            identifiers_used: result.identifiers_used(),
            messages: result.messages(),
        }
    }
}
