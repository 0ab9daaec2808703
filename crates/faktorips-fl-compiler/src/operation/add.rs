//! Addition `+`.

use super::{BinaryOperation, BinarySignature, infix, method_call};
use crate::code::CodeFragment;
use crate::error::EvalError;
use crate::operand;
use faktorips_fl_ast::{BinaryOp, Datatype, Value};

/// `int + int` (Java infix, wrapping)
#[derive(Debug)]
pub struct AddIntInt;

impl BinaryOperation for AddIntInt {
    fn signature(&self) -> BinarySignature {
        BinarySignature {
            operator: BinaryOp::Add,
            lhs: Datatype::primitive_int(),
            rhs: Datatype::primitive_int(),
            result: Datatype::primitive_int(),
        }
    }

    fn generate(&self, lhs: CodeFragment, rhs: CodeFragment) -> CodeFragment {
        infix(&lhs, "+", &rhs)
    }

    fn evaluate(&self, lhs: &Value, rhs: &Value) -> Result<Value, EvalError> {
        let a = operand::int("+", lhs)?;
        let b = operand::int("+", rhs)?;
        Ok(Value::Integer(a.wrapping_add(b)))
    }
}

/// `Decimal + Decimal` via `Decimal.add`
#[derive(Debug)]
pub struct AddDecimalDecimal;

impl BinaryOperation for AddDecimalDecimal {
    fn signature(&self) -> BinarySignature {
        BinarySignature {
            operator: BinaryOp::Add,
            lhs: Datatype::decimal(),
            rhs: Datatype::decimal(),
            result: Datatype::decimal(),
        }
    }

    fn generate(&self, lhs: CodeFragment, rhs: CodeFragment) -> CodeFragment {
        method_call(&lhs, "add", &[&rhs])
    }

    fn evaluate(&self, lhs: &Value, rhs: &Value) -> Result<Value, EvalError> {
        let (Some(a), Some(b)) = (operand::decimal("+", lhs)?, operand::decimal("+", rhs)?) else {
            return Ok(Value::Null);
        };
        a.checked_add(b)
            .map(Value::Decimal)
            .ok_or_else(|| EvalError::Overflow("Decimal +".into()))
    }
}

/// `Money + Money` via `Money.add`; currencies must match
#[derive(Debug)]
pub struct AddMoneyMoney;

impl BinaryOperation for AddMoneyMoney {
    fn signature(&self) -> BinarySignature {
        BinarySignature {
            operator: BinaryOp::Add,
            lhs: Datatype::money(),
            rhs: Datatype::money(),
            result: Datatype::money(),
        }
    }

    fn generate(&self, lhs: CodeFragment, rhs: CodeFragment) -> CodeFragment {
        method_call(&lhs, "add", &[&rhs])
    }

    fn evaluate(&self, lhs: &Value, rhs: &Value) -> Result<Value, EvalError> {
        let (Some(a), Some(b)) = (operand::money("+", lhs)?, operand::money("+", rhs)?) else {
            return Ok(Value::Null);
        };
        Ok(Value::Money(a.add(b)?))
    }
}

/// `String + String` (Java concatenation; `null` prints as "null")
#[derive(Debug)]
pub struct AddStringString;

impl BinaryOperation for AddStringString {
    fn signature(&self) -> BinarySignature {
        BinarySignature {
            operator: BinaryOp::Add,
            lhs: Datatype::string(),
            rhs: Datatype::string(),
            result: Datatype::string(),
        }
    }

    fn generate(&self, lhs: CodeFragment, rhs: CodeFragment) -> CodeFragment {
        infix(&lhs, "+", &rhs)
    }

    fn evaluate(&self, lhs: &Value, rhs: &Value) -> Result<Value, EvalError> {
        let a = operand::string("+", lhs)?.unwrap_or("null");
        let b = operand::string("+", rhs)?.unwrap_or("null");
        Ok(Value::String(format!("{a}{b}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faktorips_fl_ast::Money;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Value {
        Value::Decimal(Decimal::from_str(s).unwrap())
    }

    #[test]
    fn test_int_add_wraps() {
        let result = AddIntInt
            .evaluate(&Value::Integer(i32::MAX), &Value::Integer(1))
            .unwrap();
        assert_eq!(result, Value::Integer(i32::MIN));
    }

    #[test]
    fn test_decimal_add_propagates_null() {
        assert_eq!(AddDecimalDecimal.evaluate(&dec("3.5"), &dec("7.45")).unwrap(), dec("10.95"));
        assert_eq!(AddDecimalDecimal.evaluate(&Value::Null, &dec("1")).unwrap(), Value::Null);
    }

    #[test]
    fn test_money_add_rejects_currency_mismatch() {
        let eur = Value::Money(Money::parse("1EUR").unwrap());
        let usd = Value::Money(Money::parse("1USD").unwrap());
        assert!(matches!(
            AddMoneyMoney.evaluate(&eur, &usd),
            Err(EvalError::Money(_))
        ));
    }

    #[test]
    fn test_generate() {
        let code = AddDecimalDecimal.generate(
            CodeFragment::from_source("a.add(b)"),
            CodeFragment::from_source("c"),
        );
        assert_eq!(code.source(), "a.add(b).add(c)");

        let code = AddIntInt.generate(
            CodeFragment::from_source("1 + 2"),
            CodeFragment::from_source("3"),
        );
        assert_eq!(code.source(), "(1 + 2) + 3");
    }

    #[test]
    fn test_string_concat_with_null() {
        let result = AddStringString
            .evaluate(&Value::String("a".into()), &Value::Null)
            .unwrap();
        assert_eq!(result, Value::String("anull".into()));
    }
}
