//! Operator resolution and Java emission.
//!
//! Each case compiles a formula and checks the chosen result datatype and
//! the generated code, covering every built-in operation family, implicit
//! conversions and operator errors.

use faktorips_fl_ast::Datatype;
use faktorips_fl_compiler::{CompilationResult, ExprCompiler, Locale, MessageCode};
use pretty_assertions::assert_eq;

fn compile(formula: &str) -> CompilationResult {
    ExprCompiler::new(Locale::En).compile_expression(formula)
}

/// Compile and assert success, the result datatype and the code.
fn assert_code(formula: &str, datatype: Datatype, code: &str) {
    let result = compile(formula);
    assert!(result.is_successful(), "{formula}: {}", result.messages());
    assert_eq!(result.datatype(), Some(&datatype), "{formula}");
    assert_eq!(result.code().map(|c| c.source()), Some(code), "{formula}");
}

fn assert_error(formula: &str, code: MessageCode) -> CompilationResult {
    let result = compile(formula);
    assert!(!result.is_successful(), "{formula} should fail");
    assert!(result.code().is_none());
    assert_eq!(result.messages().len(), 1, "{}", result.messages());
    assert_eq!(result.messages().messages()[0].code, code);
    result
}

// =============================================================================
// Arithmetic
// =============================================================================

#[test]
fn test_decimal_addition() {
    assert_code(
        "3.5 + 7.45",
        Datatype::decimal(),
        r#"Decimal.valueOf("3.5").add(Decimal.valueOf("7.45"))"#,
    );
}

#[test]
fn test_addition_families() {
    assert_code("1 + 2", Datatype::primitive_int(), "1 + 2");
    assert_code(
        "10.50EUR + 2.25EUR",
        Datatype::money(),
        r#"Money.valueOf("10.50EUR").add(Money.valueOf("2.25EUR"))"#,
    );
    assert_code(r#""a" + "b""#, Datatype::string(), r#""a" + "b""#);
}

#[test]
fn test_int_widens_to_decimal() {
    assert_code(
        "1 + 2.5",
        Datatype::decimal(),
        r#"Decimal.valueOf(1).add(Decimal.valueOf("2.5"))"#,
    );
    assert_code(
        "2.5 - 1",
        Datatype::decimal(),
        r#"Decimal.valueOf("2.5").subtract(Decimal.valueOf(1))"#,
    );
}

#[test]
fn test_money_multiplication() {
    assert_code(
        "10EUR * 1.5",
        Datatype::money(),
        r#"Money.valueOf("10EUR").multiply(Decimal.valueOf("1.5"), RoundingMode.HALF_UP)"#,
    );
    assert_code(
        "3 * 10EUR",
        Datatype::money(),
        r#"Money.valueOf("10EUR").multiply(3)"#,
    );
}

#[test]
fn test_int_division_is_decimal() {
    assert_code(
        "7 / 2",
        Datatype::decimal(),
        "Decimal.valueOf(7).divide(Decimal.valueOf(2), 10, RoundingMode.HALF_UP)",
    );
}

#[test]
fn test_imports_are_collected() {
    let result = compile("10EUR * 1.5");
    let imports: Vec<&str> = result
        .code()
        .unwrap()
        .imports()
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(
        imports,
        vec![
            "java.math.RoundingMode",
            "org.faktorips.values.Decimal",
            "org.faktorips.values.Money",
        ]
    );
}

// =============================================================================
// Comparison and equality
// =============================================================================

#[test]
fn test_comparisons() {
    assert_code("1 < 2", Datatype::primitive_boolean(), "1 < 2");
    assert_code(
        "1.5 >= 1",
        Datatype::primitive_boolean(),
        r#"Decimal.valueOf("1.5").greaterThanOrEqual(Decimal.valueOf(1))"#,
    );
    assert_code(
        "1EUR > 2EUR",
        Datatype::primitive_boolean(),
        r#"Money.valueOf("1EUR").greaterThan(Money.valueOf("2EUR"))"#,
    );
}

#[test]
fn test_equality() {
    assert_code(r#""a" = "b""#, Datatype::primitive_boolean(), r#""a".equals("b")"#);
    assert_code("1 != 2", Datatype::primitive_boolean(), "1 != 2");
    assert_code("true = false", Datatype::primitive_boolean(), "true == false");
    assert_code(
        "1.5 != 2.5",
        Datatype::primitive_boolean(),
        r#"!Decimal.valueOf("1.5").equals(Decimal.valueOf("2.5"))"#,
    );
}

// =============================================================================
// Unary operators and parentheses
// =============================================================================

#[test]
fn test_unary() {
    assert_code("-3", Datatype::primitive_int(), "-3");
    assert_code("+3", Datatype::primitive_int(), "3");
    assert_code(
        "-2.5",
        Datatype::decimal(),
        r#"Decimal.valueOf("2.5").multiply(-1)"#,
    );
    assert_code("!true", Datatype::primitive_boolean(), "!true");
    assert_code("!(1 < 2)", Datatype::primitive_boolean(), "!(1 < 2)");
}

#[test]
fn test_parentheses_follow_source_and_precedence() {
    assert_code("(1 + 2) * 3", Datatype::primitive_int(), "(1 + 2) * 3");
    assert_code("1 + 2 * 3", Datatype::primitive_int(), "1 + (2 * 3)");
    assert_code("1 - (2 - 3)", Datatype::primitive_int(), "1 - (2 - 3)");
    assert_code(
        "(1.5 + 2) * 2",
        Datatype::decimal(),
        r#"(Decimal.valueOf("1.5").add(Decimal.valueOf(2))).multiply(Decimal.valueOf(2))"#,
    );
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_undefined_operator() {
    let result = assert_error(r#""a" * 2"#, MessageCode::UndefinedOperator);
    let message = &result.messages().messages()[0];
    assert_eq!(
        message.text,
        "The operator * is undefined for the type(s) String, int."
    );
    assert_eq!(message.span.map(|s| s.range()), Some(0..7));

    assert_error("1 + 1EUR", MessageCode::UndefinedOperator);
    assert_error("!1", MessageCode::UndefinedOperator);
    assert_error("1EUR / 2EUR", MessageCode::UndefinedOperator);
}

#[test]
fn test_ambiguous_operation() {
    let result = assert_error("null + null", MessageCode::AmbiguousOperation);
    let text = &result.messages().messages()[0].text;
    assert!(text.contains("Decimal + Decimal -> Decimal"), "{text}");
    assert!(text.contains("Money + Money -> Money"), "{text}");
}

#[test]
fn test_null_takes_the_other_operand_type() {
    assert_code(
        "1.5 + null",
        Datatype::decimal(),
        r#"Decimal.valueOf("1.5").add(Decimal.NULL)"#,
    );
    assert_code(r#""a" = null"#, Datatype::primitive_boolean(), r#""a".equals(null)"#);
}
