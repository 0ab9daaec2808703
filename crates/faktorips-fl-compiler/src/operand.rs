//! Typed access to evaluation operands.
//!
//! Operations and functions receive [`Value`]s whose variant is fixed by the
//! datatypes they were resolved for. These helpers unwrap them and turn the
//! impossible cases into [`EvalError::TypeMismatch`] instead of panicking.
//! Nullable datatypes yield `Option`; primitives reject null.

use crate::error::EvalError;
use faktorips_fl_ast::{Money, Value};
use rust_decimal::Decimal;

fn mismatch(operation: &str, expected: &'static str, found: &Value) -> EvalError {
    EvalError::TypeMismatch {
        operation: operation.to_string(),
        expected,
        found: found.type_name(),
    }
}

/// Primitive `int` operand.
pub fn int(operation: &str, value: &Value) -> Result<i32, EvalError> {
    match value {
        Value::Integer(n) => Ok(*n),
        Value::Null => Err(EvalError::NullValue(format!("operand of {operation}"))),
        other => Err(mismatch(operation, "int", other)),
    }
}

/// Primitive `boolean` operand.
pub fn boolean(operation: &str, value: &Value) -> Result<bool, EvalError> {
    match value {
        Value::Boolean(b) => Ok(*b),
        Value::Null => Err(EvalError::NullValue(format!("operand of {operation}"))),
        other => Err(mismatch(operation, "boolean", other)),
    }
}

/// `Decimal` operand, `None` for the null object.
pub fn decimal(operation: &str, value: &Value) -> Result<Option<Decimal>, EvalError> {
    match value {
        Value::Decimal(d) => Ok(Some(*d)),
        Value::Null => Ok(None),
        other => Err(mismatch(operation, "Decimal", other)),
    }
}

/// `Money` operand, `None` for the null object.
pub fn money<'v>(operation: &str, value: &'v Value) -> Result<Option<&'v Money>, EvalError> {
    match value {
        Value::Money(m) => Ok(Some(m)),
        Value::Null => Ok(None),
        other => Err(mismatch(operation, "Money", other)),
    }
}

/// `String` operand, `None` for null.
pub fn string<'v>(operation: &str, value: &'v Value) -> Result<Option<&'v str>, EvalError> {
    match value {
        Value::String(s) => Ok(Some(s)),
        Value::Null => Ok(None),
        other => Err(mismatch(operation, "String", other)),
    }
}

/// Wrap an optional decimal result, mapping `None` to the null value.
pub fn decimal_value(value: Option<Decimal>) -> Value {
    value.map(Value::Decimal).unwrap_or(Value::Null)
}

/// Wrap an optional money result, mapping `None` to the null value.
pub fn money_value(value: Option<Money>) -> Value {
    value.map(Value::Money).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_rejects_null() {
        assert!(matches!(int("+", &Value::Null), Err(EvalError::NullValue(_))));
        assert_eq!(int("+", &Value::Integer(3)).unwrap(), 3);
    }

    #[test]
    fn test_nullable_accepts_null() {
        assert_eq!(decimal("+", &Value::Null).unwrap(), None);
        assert!(matches!(
            money("+", &Value::Integer(1)),
            Err(EvalError::TypeMismatch { expected: "Money", found: "int", .. })
        ));
    }
}
