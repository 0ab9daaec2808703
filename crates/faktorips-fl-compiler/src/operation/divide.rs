//! Division `/`.
//!
//! There is no integer division; `int / int` resolves to the decimal
//! operation through conversions.

use super::{BinaryOperation, BinarySignature, method_call, rounding_mode};
use crate::code::CodeFragment;
use crate::error::EvalError;
use crate::operand;
use faktorips_fl_ast::{BinaryOp, Datatype, MoneyError, Value};
use rust_decimal::RoundingStrategy;

/// Scale of decimal quotients.
pub const DECIMAL_DIVISION_SCALE: u32 = 10;

/// `Decimal / Decimal` via `divide(rhs, 10, RoundingMode.HALF_UP)`
#[derive(Debug)]
pub struct DivideDecimalDecimal;

impl BinaryOperation for DivideDecimalDecimal {
    fn signature(&self) -> BinarySignature {
        BinarySignature {
            operator: BinaryOp::Div,
            lhs: Datatype::decimal(),
            rhs: Datatype::decimal(),
            result: Datatype::decimal(),
        }
    }

    fn generate(&self, lhs: CodeFragment, rhs: CodeFragment) -> CodeFragment {
        let scale = CodeFragment::from_source(DECIMAL_DIVISION_SCALE.to_string());
        method_call(&lhs, "divide", &[&rhs, &scale, &rounding_mode("HALF_UP")])
    }

    fn evaluate(&self, lhs: &Value, rhs: &Value) -> Result<Value, EvalError> {
        let (Some(a), Some(b)) = (operand::decimal("/", lhs)?, operand::decimal("/", rhs)?) else {
            return Ok(Value::Null);
        };
        if b.is_zero() {
            return Err(EvalError::DivisionByZero);
        }
        let quotient = a
            .checked_div(b)
            .ok_or_else(|| EvalError::Overflow("Decimal /".into()))?;
        let mut quotient = quotient.round_dp_with_strategy(
            DECIMAL_DIVISION_SCALE,
            RoundingStrategy::MidpointAwayFromZero,
        );
        quotient.rescale(DECIMAL_DIVISION_SCALE);
        Ok(Value::Decimal(quotient))
    }
}

/// `Money / Decimal` via `divide(rhs, RoundingMode.HALF_UP)`
#[derive(Debug)]
pub struct DivideMoneyDecimal;

impl BinaryOperation for DivideMoneyDecimal {
    fn signature(&self) -> BinarySignature {
        BinarySignature {
            operator: BinaryOp::Div,
            lhs: Datatype::money(),
            rhs: Datatype::decimal(),
            result: Datatype::money(),
        }
    }

    fn generate(&self, lhs: CodeFragment, rhs: CodeFragment) -> CodeFragment {
        method_call(&lhs, "divide", &[&rhs, &rounding_mode("HALF_UP")])
    }

    fn evaluate(&self, lhs: &Value, rhs: &Value) -> Result<Value, EvalError> {
        let (Some(m), Some(d)) = (operand::money("/", lhs)?, operand::decimal("/", rhs)?) else {
            return Ok(Value::Null);
        };
        match m.divide(d) {
            Ok(result) => Ok(Value::Money(result)),
            Err(MoneyError::DivisionByZero) => Err(EvalError::DivisionByZero),
            Err(other) => Err(other.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faktorips_fl_ast::Money;
    use rust_decimal::Decimal;

    #[test]
    fn test_decimal_quotient_has_scale_ten() {
        let result = DivideDecimalDecimal
            .evaluate(&Value::Decimal(Decimal::from(1)), &Value::Decimal(Decimal::from(3)))
            .unwrap();
        assert_eq!(result.to_string(), "0.3333333333");
        let result = DivideDecimalDecimal
            .evaluate(&Value::Decimal(Decimal::from(2)), &Value::Decimal(Decimal::from(3)))
            .unwrap();
        assert_eq!(result.to_string(), "0.6666666667");
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            DivideDecimalDecimal.evaluate(&Value::Decimal(Decimal::ONE), &Value::Decimal(Decimal::ZERO)),
            Err(EvalError::DivisionByZero)
        );
        let money = Value::Money(Money::parse("1EUR").unwrap());
        assert_eq!(
            DivideMoneyDecimal.evaluate(&money, &Value::Decimal(Decimal::ZERO)),
            Err(EvalError::DivisionByZero)
        );
    }

    #[test]
    fn test_generate() {
        let code = DivideDecimalDecimal.generate(
            CodeFragment::from_source("a"),
            CodeFragment::from_source("b"),
        );
        assert_eq!(code.source(), "a.divide(b, 10, RoundingMode.HALF_UP)");
    }
}
