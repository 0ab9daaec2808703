//! Identifier resolution, result conversion, error recovery and
//! registration.

use faktorips_fl_ast::{BinaryOp, Datatype, Span, Value};
use faktorips_fl_compiler::{
    BinaryOperation, BinarySignature, CodeFragment, Conversion, EvalError, ExprCompiler,
    IdentifierBinding, IdentifierResolver, Locale, MessageCode, RegistrationError,
    ResolvedIdentifier,
};
use std::sync::Arc;

fn gender() -> Datatype {
    Datatype::enumeration(
        "Gender",
        "org.example.Gender",
        vec!["MALE".into(), "FEMALE".into()],
        "getGender",
    )
}

fn compiler() -> ExprCompiler {
    let mut compiler = ExprCompiler::new(Locale::En);
    compiler
        .add_parameter(
            "policy.premium",
            Datatype::money(),
            Some(CodeFragment::from_source("policy.getPremium()")),
        )
        .unwrap();
    compiler
        .add_parameter("count", Datatype::integer(), None)
        .unwrap();
    compiler.register_datatype(gender()).unwrap();
    compiler
}

fn codes(formula: &str, compiler: &ExprCompiler) -> Vec<MessageCode> {
    compiler
        .compile_expression(formula)
        .messages()
        .iter()
        .map(|m| m.code)
        .collect()
}

// =============================================================================
// Identifiers
// =============================================================================

#[test]
fn test_parameter_code_is_used() {
    let result = compiler().compile_expression("policy.premium * 2");
    assert_eq!(
        result.code().unwrap().source(),
        "policy.getPremium().multiply(2)"
    );
    assert_eq!(result.datatype(), Some(&Datatype::money()));
}

#[test]
fn test_wrapper_parameter_unwraps_for_int_arithmetic() {
    let result = compiler().compile_expression("count + 1");
    assert_eq!(result.datatype(), Some(&Datatype::primitive_int()));
    assert_eq!(result.code().unwrap().source(), "count.intValue() + 1");
}

#[test]
fn test_enum_value() {
    let result = compiler().compile_expression("Gender.FEMALE");
    assert_eq!(result.datatype(), Some(&gender()));
    assert_eq!(
        result.code().unwrap().source(),
        r#"Gender.getGender("FEMALE")"#
    );
    assert!(result.code().unwrap().imports().contains("org.example.Gender"));
}

#[test]
fn test_undefined_identifier() {
    let result = compiler().compile_expression("a + 1");
    let messages = result.messages();
    assert_eq!(messages.len(), 1);
    let message = &messages.messages()[0];
    assert_eq!(message.code, MessageCode::UndefinedIdentifier);
    assert_eq!(message.text, "The identifier a is undefined.");
    assert_eq!(message.span, Some(Span::new(0, 1)));

    assert_eq!(
        codes("Gender.OTHER", &compiler()),
        vec![MessageCode::UndefinedIdentifier]
    );
}

#[derive(Debug)]
struct Constants;

impl IdentifierResolver for Constants {
    fn resolve(&self, name: &str) -> Option<ResolvedIdentifier> {
        (name == "MAX_AGE").then(|| ResolvedIdentifier {
            datatype: Datatype::primitive_int(),
            code: CodeFragment::from_source("Limits.MAX_AGE"),
            binding: IdentifierBinding::Constant(Value::Integer(99)),
        })
    }
}

#[test]
fn test_custom_identifier_resolver() {
    let mut compiler = compiler();
    compiler.add_identifier_resolver(Arc::new(Constants));
    let result = compiler.compile_expression("MAX_AGE - 1");
    assert_eq!(result.code().unwrap().source(), "Limits.MAX_AGE - 1");
}

#[test]
fn test_identifiers_used_includes_unresolved() {
    let result = compiler().compile_expression("policy.premium * x + policy.premium");
    assert_eq!(result.identifiers_used(), ["policy.premium", "x"]);
}

// =============================================================================
// Result datatype
// =============================================================================

#[test]
fn test_result_converted_to_expected() {
    let compiler = compiler();
    let result = compiler.compile("1 + 2", &Datatype::decimal());
    assert_eq!(result.datatype(), Some(&Datatype::decimal()));
    assert_eq!(result.code().unwrap().source(), "Decimal.valueOf(1 + 2)");

    let result = compiler.compile("1", &Datatype::integer());
    assert_eq!(result.code().unwrap().source(), "Integer.valueOf(1)");

    let result = compiler.compile("null", &Datatype::money());
    assert_eq!(result.code().unwrap().source(), "Money.NULL");
}

#[test]
fn test_void_accepts_anything() {
    let result = compiler().compile("1.5", &Datatype::void());
    assert!(result.is_successful());
    assert_eq!(result.datatype(), Some(&Datatype::decimal()));
}

#[test]
fn test_wrong_result_type() {
    let result = compiler().compile("1 + 2", &Datatype::string());
    let message = &result.messages().messages()[0];
    assert_eq!(message.code, MessageCode::WrongResultType);
    assert_eq!(message.text, "The formula returns int but String is expected.");
    assert!(result.code().is_none());
}

// =============================================================================
// Error recovery
// =============================================================================

#[test]
fn test_independent_errors_are_all_reported() {
    assert_eq!(
        codes("a + b", &compiler()),
        vec![
            MessageCode::UndefinedIdentifier,
            MessageCode::UndefinedIdentifier
        ]
    );
}

#[test]
fn test_parent_of_failed_node_stays_silent() {
    assert_eq!(
        codes(r#"a + "s" * 2"#, &compiler()),
        vec![
            MessageCode::UndefinedIdentifier,
            MessageCode::UndefinedOperator
        ]
    );
    assert_eq!(codes("-(a)", &compiler()), vec![MessageCode::UndefinedIdentifier]);
}

#[test]
fn test_german_messages() {
    let compiler = ExprCompiler::new(Locale::De);
    let result = compiler.compile_expression("x");
    assert_eq!(
        result.messages().messages()[0].text,
        "Der Bezeichner x ist nicht definiert."
    );
}

// =============================================================================
// Registration
// =============================================================================

/// `String - String`: remove all occurrences of the right operand
#[derive(Debug)]
struct RemoveString;

impl BinaryOperation for RemoveString {
    fn signature(&self) -> BinarySignature {
        BinarySignature {
            operator: BinaryOp::Sub,
            lhs: Datatype::string(),
            rhs: Datatype::string(),
            result: Datatype::string(),
        }
    }

    fn generate(&self, lhs: CodeFragment, rhs: CodeFragment) -> CodeFragment {
        let mut code = lhs.as_operand();
        code.append(".replace(").append_fragment(&rhs).append(", \"\")");
        code
    }

    fn evaluate(&self, lhs: &Value, rhs: &Value) -> Result<Value, EvalError> {
        match (lhs, rhs) {
            (Value::String(a), Value::String(b)) => Ok(Value::String(a.replace(b.as_str(), ""))),
            _ => Ok(Value::Null),
        }
    }
}

#[test]
fn test_custom_operation() {
    let mut compiler = compiler();
    compiler
        .register_binary_operation(Arc::new(RemoveString))
        .unwrap();
    let result = compiler.compile_expression(r#""abc" - "b""#);
    assert_eq!(result.code().unwrap().source(), r#""abc".replace("b", "")"#);

    assert_eq!(
        compiler.register_binary_operation(Arc::new(RemoveString)),
        Err(RegistrationError::DuplicateBinaryOperation {
            operator: BinaryOp::Sub,
            lhs: "String".into(),
            rhs: "String".into(),
        })
    );
}

/// `String` → `Decimal` by parsing
#[derive(Debug)]
struct ParseDecimal;

impl Conversion for ParseDecimal {
    fn source(&self) -> Datatype {
        Datatype::string()
    }

    fn target(&self) -> Datatype {
        Datatype::decimal()
    }

    fn generate(&self, from: CodeFragment) -> CodeFragment {
        let mut code = CodeFragment::new();
        code.append_class_name("org.faktorips.values.Decimal")
            .append(".valueOf(")
            .append_fragment(&from)
            .append(")");
        code
    }

    fn evaluate(&self, value: Value) -> Result<Value, EvalError> {
        match value {
            Value::String(text) => Datatype::decimal()
                .value_of(&text)
                .ok_or(EvalError::InvalidLiteral(text)),
            other => Ok(other),
        }
    }
}

#[test]
fn test_custom_conversion() {
    let mut compiler = compiler();
    compiler.register_conversion(Arc::new(ParseDecimal)).unwrap();
    let result = compiler.compile_expression(r#"ABS("1.5")"#);
    assert!(result.is_successful(), "{}", result.messages());
    assert_eq!(
        result.code().unwrap().source(),
        r#"Decimal.valueOf("1.5").abs()"#
    );
    assert!(matches!(
        compiler.register_conversion(Arc::new(ParseDecimal)),
        Err(RegistrationError::DuplicateConversion { .. })
    ));
}

#[test]
fn test_duplicate_parameter() {
    let mut compiler = compiler();
    assert_eq!(
        compiler.add_parameter("count", Datatype::decimal(), None),
        Err(RegistrationError::DuplicateParameter("count".into()))
    );
}
