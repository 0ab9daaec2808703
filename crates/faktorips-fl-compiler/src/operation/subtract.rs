//! Subtraction `-`.

use super::{BinaryOperation, BinarySignature, infix, method_call};
use crate::code::CodeFragment;
use crate::error::EvalError;
use crate::operand;
use faktorips_fl_ast::{BinaryOp, Datatype, Value};

/// `int - int` (Java infix, wrapping)
#[derive(Debug)]
pub struct SubtractIntInt;

impl BinaryOperation for SubtractIntInt {
    fn signature(&self) -> BinarySignature {
        BinarySignature {
            operator: BinaryOp::Sub,
            lhs: Datatype::primitive_int(),
            rhs: Datatype::primitive_int(),
            result: Datatype::primitive_int(),
        }
    }

    fn generate(&self, lhs: CodeFragment, rhs: CodeFragment) -> CodeFragment {
        infix(&lhs, "-", &rhs)
    }

    fn evaluate(&self, lhs: &Value, rhs: &Value) -> Result<Value, EvalError> {
        let a = operand::int("-", lhs)?;
        let b = operand::int("-", rhs)?;
        Ok(Value::Integer(a.wrapping_sub(b)))
    }
}

/// `Decimal - Decimal` via `Decimal.subtract`
#[derive(Debug)]
pub struct SubtractDecimalDecimal;

impl BinaryOperation for SubtractDecimalDecimal {
    fn signature(&self) -> BinarySignature {
        BinarySignature {
            operator: BinaryOp::Sub,
            lhs: Datatype::decimal(),
            rhs: Datatype::decimal(),
            result: Datatype::decimal(),
        }
    }

    fn generate(&self, lhs: CodeFragment, rhs: CodeFragment) -> CodeFragment {
        method_call(&lhs, "subtract", &[&rhs])
    }

    fn evaluate(&self, lhs: &Value, rhs: &Value) -> Result<Value, EvalError> {
        let (Some(a), Some(b)) = (operand::decimal("-", lhs)?, operand::decimal("-", rhs)?) else {
            return Ok(Value::Null);
        };
        a.checked_sub(b)
            .map(Value::Decimal)
            .ok_or_else(|| EvalError::Overflow("Decimal -".into()))
    }
}

/// `Money - Money` via `Money.subtract`
#[derive(Debug)]
pub struct SubtractMoneyMoney;

impl BinaryOperation for SubtractMoneyMoney {
    fn signature(&self) -> BinarySignature {
        BinarySignature {
            operator: BinaryOp::Sub,
            lhs: Datatype::money(),
            rhs: Datatype::money(),
            result: Datatype::money(),
        }
    }

    fn generate(&self, lhs: CodeFragment, rhs: CodeFragment) -> CodeFragment {
        method_call(&lhs, "subtract", &[&rhs])
    }

    fn evaluate(&self, lhs: &Value, rhs: &Value) -> Result<Value, EvalError> {
        let (Some(a), Some(b)) = (operand::money("-", lhs)?, operand::money("-", rhs)?) else {
            return Ok(Value::Null);
        };
        Ok(Value::Money(a.subtract(b)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faktorips_fl_ast::Money;

    #[test]
    fn test_money_subtract() {
        let a = Value::Money(Money::parse("10.50EUR").unwrap());
        let b = Value::Money(Money::parse("0.75EUR").unwrap());
        let result = SubtractMoneyMoney.evaluate(&a, &b).unwrap();
        assert_eq!(result.to_string(), "9.75 EUR");
    }

    #[test]
    fn test_int_subtract_negative_rhs_is_parenthesized() {
        let code = SubtractIntInt.generate(
            CodeFragment::from_source("1"),
            CodeFragment::from_source("-2"),
        );
        assert_eq!(code.source(), "1 - (-2)");
    }
}
