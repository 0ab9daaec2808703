// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! # Faktor-IPS Formula Language
//!
//! Compiler pipeline for formulas such as `IF(age >= 18; 1.5; 1) * premium`.
//!
//! This crate is a facade that re-exports functionality from:
//! - `faktorips-fl-ast` - AST, datatypes and values
//! - `faktorips-fl-lexer` - Tokenization
//! - `faktorips-fl-parser` - Parsing to AST
//! - `faktorips-fl-compiler` - Resolution, Java emission, evaluation
//!
//! and adds [`config`], which sets up a compiler from a YAML file.
//!
//! ## Architecture
//!
//! ```text
//! faktorips-fl-lexer     - logos tokens
//!     ↓
//! faktorips-fl-parser    - recursive descent + precedence climbing
//!     ↓
//! faktorips-fl-compiler  - typed resolution, CodeFragment emission
//!     ↓
//! faktorips-fl (facade)  - re-exports + configuration
//! ```
//!
//! ## Usage
//!
//! ```
//! use faktorips_fl::{CompilerConfig, Datatype};
//!
//! let config: CompilerConfig = serde_yaml::from_str(
//!     "parameters:\n  - name: premium\n    datatype: Money\n",
//! ).unwrap();
//! let compiler = config.build_compiler().unwrap();
//! let result = compiler.compile("premium * 2", &Datatype::money());
//! assert_eq!(result.code().unwrap().source(), "premium.multiply(2)");
//! ```

pub mod config;

// Re-export AST and foundation types
pub use faktorips_fl_ast::{self as ast, *};

// Re-export lexer
pub use faktorips_fl_lexer as lexer;
pub use faktorips_fl_lexer::Token;

// Re-export parser
pub use faktorips_fl_parser as parser;
pub use faktorips_fl_parser::{ParseError, ParseErrorKind, parse_formula};

// Re-export compiler
pub use faktorips_fl_compiler as compiler;
pub use faktorips_fl_compiler::{
    ArgValues, Bindings, CodeFragment, CompilationResult, Conversion, DiagnosticFormatter,
    EvalError, ExprCompiler, FlFunction, FormulaEvaluator, FunctionResolver, FunctionSignature,
    IdentifierResolver, Locale, Message, MessageCode, MessageList, RegistrationError, Severity,
    TypedExpr,
};

pub use config::{CompilerConfig, ConfigError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
