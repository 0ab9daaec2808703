//! Java code for datatype-specific constructs.
//!
//! Literal construction and null representation depend on the datatype:
//! `Decimal` literals become `Decimal.valueOf("…")`, a missing `Money` is
//! `Money.NULL`, an enum value is looked up through its class.

use crate::code::CodeFragment;
use faktorips_fl_ast::{BuiltinValue, Datatype, DatatypeKind};

/// Java class of the rounding modes used by decimal and money operations.
pub const ROUNDING_MODE: &str = "java.math.RoundingMode";

/// Code creating a value of `datatype` from its literal text.
///
/// `text` must be parsable by the datatype; strings are quoted and escaped
/// here.
pub fn new_instance(datatype: &Datatype, text: &str) -> CodeFragment {
    let mut code = CodeFragment::new();
    match datatype.kind() {
        DatatypeKind::Primitive { .. } => {
            code.append(text);
        }
        DatatypeKind::Value(BuiltinValue::String) => {
            code.append(&java_string_literal(text));
        }
        DatatypeKind::Value(BuiltinValue::Boolean) => {
            code.append_class_name(datatype.java_class())
                .append(if text == "true" { ".TRUE" } else { ".FALSE" });
        }
        DatatypeKind::Value(BuiltinValue::Integer) => {
            code.append_class_name(datatype.java_class())
                .append(".valueOf(")
                .append(text)
                .append(")");
        }
        DatatypeKind::Value(BuiltinValue::Decimal | BuiltinValue::Money) => {
            code.append_class_name(datatype.java_class())
                .append(".valueOf(")
                .append(&java_string_literal(text))
                .append(")");
        }
        DatatypeKind::Enum(spec) => {
            code.append_class_name(datatype.java_class())
                .append(".")
                .append(&spec.value_of_method)
                .append("(")
                .append(&java_string_literal(text))
                .append(")");
        }
        DatatypeKind::Generic(spec) => {
            code.append_class_name(datatype.java_class())
                .append(".")
                .append(&spec.value_of_method)
                .append("(")
                .append(&java_string_literal(text))
                .append(")");
        }
        DatatypeKind::Void | DatatypeKind::Null => {
            code.append("null");
        }
    }
    code
}

/// Code for a missing value of `datatype`: the null object where the
/// datatype has one, `null` otherwise.
pub fn null_expression(datatype: &Datatype) -> CodeFragment {
    let mut code = CodeFragment::new();
    if datatype.supports_null_object() {
        code.append_class_name(datatype.java_class()).append(".NULL");
    } else {
        code.append("null");
    }
    code
}

/// Quote and escape text as a Java string literal.
pub fn java_string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
