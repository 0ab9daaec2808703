//! Prefix operators `+`, `-` and `!`.

use super::{UnaryOperation, UnarySignature, method_call};
use crate::code::CodeFragment;
use crate::error::EvalError;
use crate::operand;
use faktorips_fl_ast::{Datatype, UnaryOp, Value};

fn signature(operator: UnaryOp, datatype: Datatype) -> UnarySignature {
    UnarySignature {
        operator,
        operand: datatype.clone(),
        result: datatype,
    }
}

/// `prefix` followed by the operand, parenthesized unless plainly simple.
fn prefixed(prefix: &str, operand: &CodeFragment) -> CodeFragment {
    let mut code = CodeFragment::from_source(prefix);
    code.append_fragment(&operand.as_operand());
    code
}

fn negate_method(operand: CodeFragment) -> CodeFragment {
    method_call(&operand, "multiply", &[&CodeFragment::from_source("-1")])
}

macro_rules! identity_plus {
    ($name:ident, $label:literal, $datatype:expr, $check:path) => {
        #[doc = concat!("`+", $label, "`, the identity")]
        #[derive(Debug)]
        pub struct $name;

        impl UnaryOperation for $name {
            fn signature(&self) -> UnarySignature {
                signature(UnaryOp::Plus, $datatype)
            }

            fn generate(&self, operand: CodeFragment) -> CodeFragment {
                operand
            }

            fn evaluate(&self, operand: &Value) -> Result<Value, EvalError> {
                $check("+", operand)?;
                Ok(operand.clone())
            }
        }
    };
}

identity_plus!(PlusInt, "int", Datatype::primitive_int(), operand::int);
identity_plus!(PlusDecimal, "Decimal", Datatype::decimal(), operand::decimal);
identity_plus!(PlusMoney, "Money", Datatype::money(), operand::money);

/// `-int`, wrapping on `i32::MIN`
#[derive(Debug)]
pub struct MinusInt;

impl UnaryOperation for MinusInt {
    fn signature(&self) -> UnarySignature {
        signature(UnaryOp::Minus, Datatype::primitive_int())
    }

    fn generate(&self, operand: CodeFragment) -> CodeFragment {
        prefixed("-", &operand)
    }

    fn evaluate(&self, operand: &Value) -> Result<Value, EvalError> {
        Ok(Value::Integer(operand::int("-", operand)?.wrapping_neg()))
    }
}

/// `-Decimal` via `multiply(-1)`
#[derive(Debug)]
pub struct MinusDecimal;

impl UnaryOperation for MinusDecimal {
    fn signature(&self) -> UnarySignature {
        signature(UnaryOp::Minus, Datatype::decimal())
    }

    fn generate(&self, operand: CodeFragment) -> CodeFragment {
        negate_method(operand)
    }

    fn evaluate(&self, operand: &Value) -> Result<Value, EvalError> {
        Ok(operand::decimal_value(operand::decimal("-", operand)?.map(|d| -d)))
    }
}

/// `-Money` via `multiply(-1)`
#[derive(Debug)]
pub struct MinusMoney;

impl UnaryOperation for MinusMoney {
    fn signature(&self) -> UnarySignature {
        signature(UnaryOp::Minus, Datatype::money())
    }

    fn generate(&self, operand: CodeFragment) -> CodeFragment {
        negate_method(operand)
    }

    fn evaluate(&self, operand: &Value) -> Result<Value, EvalError> {
        Ok(operand::money_value(
            operand::money("-", operand)?.map(|m| m.negate()),
        ))
    }
}

/// `!boolean`
#[derive(Debug)]
pub struct NotBoolean;

impl UnaryOperation for NotBoolean {
    fn signature(&self) -> UnarySignature {
        signature(UnaryOp::Not, Datatype::primitive_boolean())
    }

    fn generate(&self, operand: CodeFragment) -> CodeFragment {
        prefixed("!", &operand)
    }

    fn evaluate(&self, operand: &Value) -> Result<Value, EvalError> {
        Ok(Value::Boolean(!operand::boolean("!", operand)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faktorips_fl_ast::Money;
    use rust_decimal::Decimal;

    #[test]
    fn test_minus_int_parenthesizes_nested_minus() {
        assert_eq!(MinusInt.generate(CodeFragment::from_source("3")).source(), "-3");
        assert_eq!(MinusInt.generate(CodeFragment::from_source("-3")).source(), "-(-3)");
        assert_eq!(
            MinusInt.generate(CodeFragment::from_source("a + b")).source(),
            "-(a + b)"
        );
    }

    #[test]
    fn test_minus_int_wraps() {
        assert_eq!(
            MinusInt.evaluate(&Value::Integer(i32::MIN)).unwrap(),
            Value::Integer(i32::MIN)
        );
    }

    #[test]
    fn test_minus_decimal_and_money() {
        assert_eq!(
            MinusDecimal.generate(CodeFragment::from_source("x")).source(),
            "x.multiply(-1)"
        );
        assert_eq!(
            MinusDecimal.evaluate(&Value::Decimal(Decimal::ONE)).unwrap(),
            Value::Decimal(-Decimal::ONE)
        );
        assert_eq!(MinusMoney.evaluate(&Value::Null).unwrap(), Value::Null);
        let money = Value::Money(Money::parse("2.50EUR").unwrap());
        assert_eq!(MinusMoney.evaluate(&money).unwrap().to_string(), "-2.50 EUR");
    }

    #[test]
    fn test_not() {
        assert_eq!(NotBoolean.generate(CodeFragment::from_source("true")).source(), "!true");
        assert_eq!(
            NotBoolean.evaluate(&Value::Boolean(true)).unwrap(),
            Value::Boolean(false)
        );
        assert!(NotBoolean.evaluate(&Value::Null).is_err());
    }

    #[test]
    fn test_plus_is_identity() {
        let code = CodeFragment::from_source("x.add(y)");
        assert_eq!(PlusDecimal.generate(code.clone()), code);
        assert_eq!(PlusInt.evaluate(&Value::Integer(4)).unwrap(), Value::Integer(4));
    }
}
