//! Function calls: built-in functions, overloads, localized names and
//! function libraries.

use faktorips_fl_ast::{Datatype, Span, Value};
use faktorips_fl_compiler::{
    ArgValues, CodeFragment, CompilationResult, EvalError, ExprCompiler, FlFunction,
    FunctionResolver, FunctionSignature, Locale, MessageCode, RegistrationError,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn compile(formula: &str) -> CompilationResult {
    ExprCompiler::new(Locale::En).compile_expression(formula)
}

fn assert_code(formula: &str, datatype: Datatype, code: &str) {
    let result = compile(formula);
    assert!(result.is_successful(), "{formula}: {}", result.messages());
    assert_eq!(result.datatype(), Some(&datatype), "{formula}");
    assert_eq!(result.code().map(|c| c.source()), Some(code), "{formula}");
}

fn codes(result: &CompilationResult) -> Vec<MessageCode> {
    result.messages().iter().map(|m| m.code).collect()
}

// =============================================================================
// Numeric functions
// =============================================================================

#[test]
fn test_abs() {
    assert_code(
        "ABS(-1.5)",
        Datatype::decimal(),
        r#"Decimal.valueOf("1.5").multiply(-1).abs()"#,
    );
    assert_code("ABS(1)", Datatype::decimal(), "Decimal.valueOf(1).abs()");
}

#[test]
fn test_function_names_ignore_case() {
    assert_code("abs(2.5)", Datatype::decimal(), r#"Decimal.valueOf("2.5").abs()"#);
}

#[test]
fn test_max_min_overloads() {
    assert_code("MAX(1; 2)", Datatype::primitive_int(), "Math.max(1, 2)");
    assert_code(
        "MAX(1; 2.5)",
        Datatype::decimal(),
        r#"Decimal.valueOf(1).max(Decimal.valueOf("2.5"))"#,
    );
    assert_code(
        "MIN(1EUR; 2EUR)",
        Datatype::money(),
        r#"Money.valueOf("1EUR").min(Money.valueOf("2EUR"))"#,
    );
}

#[test]
fn test_rounding() {
    assert_code(
        "ROUND(2.345; 2)",
        Datatype::decimal(),
        r#"Decimal.valueOf("2.345").setScale(2, RoundingMode.HALF_UP)"#,
    );
    assert_code(
        "ROUNDDOWN(2.345; 1)",
        Datatype::decimal(),
        r#"Decimal.valueOf("2.345").setScale(1, RoundingMode.DOWN)"#,
    );
    assert_code(
        "WHOLENUMBER(7.9)",
        Datatype::primitive_int(),
        r#"Decimal.valueOf("7.9").setScale(0, RoundingMode.DOWN).intValue()"#,
    );
}

// =============================================================================
// Logical functions
// =============================================================================

#[test]
fn test_if() {
    assert_code(r#"IF(1 < 2; "a"; "b")"#, Datatype::string(), r#"(1 < 2 ? "a" : "b")"#);
    assert_code(
        "IF(true; 1; 2.5)",
        Datatype::decimal(),
        r#"(true ? Decimal.valueOf(1) : Decimal.valueOf("2.5"))"#,
    );
}

#[test]
fn test_and_or_not() {
    assert_code(
        "AND(true; false; true)",
        Datatype::primitive_boolean(),
        "(true && false && true)",
    );
    assert_code(
        "OR(1 < 2; false)",
        Datatype::primitive_boolean(),
        "((1 < 2) || false)",
    );
    assert_code("AND(true)", Datatype::primitive_boolean(), "true");
    assert_code("NOT(true)", Datatype::primitive_boolean(), "!true");
}

#[test]
fn test_isempty_uses_null_object_check() {
    let mut compiler = ExprCompiler::new(Locale::En);
    compiler
        .add_parameter("x", Datatype::decimal(), None)
        .unwrap();
    let result = compiler.compile_expression("ISEMPTY(x)");
    assert_eq!(result.datatype(), Some(&Datatype::primitive_boolean()));
    assert_eq!(result.code().unwrap().source(), "(x == null || x.isNull())");
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_undefined_function() {
    let result = compile("FOO(1)");
    assert_eq!(codes(&result), vec![MessageCode::UndefinedFunction]);
    let message = &result.messages().messages()[0];
    assert_eq!(message.text, "The function FOO is undefined.");
    assert_eq!(message.span, Some(Span::new(0, 3)));
}

#[test]
fn test_undefined_function_still_checks_arguments() {
    let result = compile("FOO(a)");
    assert_eq!(
        codes(&result),
        vec![MessageCode::UndefinedFunction, MessageCode::UndefinedIdentifier]
    );
}

#[test]
fn test_wrong_argument_types() {
    let result = compile(r#"ABS("x")"#);
    assert_eq!(codes(&result), vec![MessageCode::WrongArgumentTypes]);
    assert_eq!(
        result.messages().messages()[0].text,
        "The function ABS cannot be applied to arguments of type (String)."
    );

    assert_eq!(codes(&compile("AND()")), vec![MessageCode::WrongArgumentTypes]);
    assert_eq!(codes(&compile("ABS(1; 2)")), vec![MessageCode::WrongArgumentTypes]);
}

#[test]
fn test_ambiguous_call() {
    let result = compile("ISEMPTY(null)");
    assert_eq!(codes(&result), vec![MessageCode::AmbiguousFunctionCall]);
    let text = &result.messages().messages()[0].text;
    assert!(text.contains("ISEMPTY(Decimal) -> boolean"), "{text}");
    assert!(text.contains("ISEMPTY(String) -> boolean"), "{text}");
}

// =============================================================================
// Locale
// =============================================================================

#[test]
fn test_german_function_names() {
    let compiler = ExprCompiler::new(Locale::De);
    let result = compiler.compile_expression(r#"WENN(1 < 2; "ja"; "nein")"#);
    assert!(result.is_successful(), "{}", result.messages());
    assert_eq!(result.code().unwrap().source(), r#"(1 < 2 ? "ja" : "nein")"#);

    let result = compiler.compile_expression(r#"IF(1 < 2; "a"; "b")"#);
    assert_eq!(codes(&result), vec![MessageCode::UndefinedFunction]);
    assert_eq!(
        result.messages().messages()[0].text,
        "Die Funktion IF ist nicht definiert."
    );
}

// =============================================================================
// Function libraries
// =============================================================================

/// `PERCENT(Decimal) -> Decimal`
#[derive(Debug)]
struct Percent {
    signature: FunctionSignature,
}

impl Percent {
    fn new() -> Self {
        Self {
            signature: FunctionSignature::new(
                "PERCENT",
                vec![Datatype::decimal()],
                Datatype::decimal(),
            ),
        }
    }
}

impl FlFunction for Percent {
    fn signature(&self) -> &FunctionSignature {
        &self.signature
    }

    fn generate(&self, args: Vec<CodeFragment>) -> CodeFragment {
        let mut code = CodeFragment::from_source("Percent.of(");
        for arg in &args {
            code.append_fragment(arg);
        }
        code.append(")");
        code
    }

    fn evaluate(&self, args: &mut ArgValues<'_>) -> Result<Value, EvalError> {
        match args.get(0)? {
            Value::Decimal(d) => Ok(Value::Decimal(d / rust_decimal::Decimal::ONE_HUNDRED)),
            _ => Ok(Value::Null),
        }
    }
}

struct Library;

impl FunctionResolver for Library {
    fn functions(&self) -> Vec<Arc<dyn FlFunction>> {
        vec![Arc::new(Percent::new())]
    }
}

#[test]
fn test_function_resolver() {
    let mut compiler = ExprCompiler::new(Locale::En);
    compiler.add_function_resolver(&Library).unwrap();
    let result = compiler.compile_expression("PERCENT(50)");
    assert!(result.is_successful(), "{}", result.messages());
    assert_eq!(result.code().unwrap().source(), "Percent.of(Decimal.valueOf(50))");

    assert!(matches!(
        compiler.add_function_resolver(&Library),
        Err(RegistrationError::DuplicateFunction { .. })
    ));
}
