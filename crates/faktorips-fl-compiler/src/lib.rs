// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Formula compiler: resolution, Java emission and evaluation
//!
//! This crate resolves parsed formulas against registered operations,
//! conversions, functions and identifiers, emits Java source fragments, and
//! reports problems as a [`MessageList`].
//!
//! # Examples
//!
//! ```
//! # use faktorips_fl_compiler::*;
//! # use faktorips_fl_ast::Datatype;
//! let compiler = ExprCompiler::new(Locale::En);
//! let result = compiler.compile("3.5 + 7.45", &Datatype::decimal());
//! assert!(result.is_successful());
//! assert_eq!(
//!     result.code().unwrap().source(),
//!     r#"Decimal.valueOf("3.5").add(Decimal.valueOf("7.45"))"#
//! );
//! ```

pub mod catalog;
pub mod code;
pub mod compiler;
pub mod conversion;
pub mod diagnostic;
pub mod error;
pub mod evaluate;
pub mod function;
pub mod helper;
pub mod identifier;
pub mod message;
pub mod operand;
pub mod operation;
pub mod overload;
pub mod result;
pub mod typed;

pub use catalog::Locale;
pub use code::CodeFragment;
pub use compiler::ExprCompiler;
pub use conversion::{Conversion, ConversionTable};
pub use diagnostic::DiagnosticFormatter;
pub use error::{EvalError, RegistrationError};
pub use evaluate::{Bindings, FormulaEvaluator};
pub use function::{ArgValues, FlFunction, FunctionResolver, FunctionSignature, FunctionTable};
pub use identifier::{IdentifierBinding, IdentifierResolver, ParameterResolver, ResolvedIdentifier};
pub use message::{Message, MessageCode, MessageList, Severity};
pub use operation::{
    BinaryOperation, BinarySignature, OperationTable, UnaryOperation, UnarySignature,
};
pub use result::CompilationResult;
pub use typed::{TypedExpr, TypedKind};
