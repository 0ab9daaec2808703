//! Multiplication `*`.
//!
//! Money can be scaled by a decimal (rounded half-up to the currency scale)
//! or an int (exact), with the money operand on either side. Java always
//! calls `multiply` on the money object.

use super::{BinaryOperation, BinarySignature, infix, method_call, rounding_mode};
use crate::code::CodeFragment;
use crate::error::EvalError;
use crate::operand;
use faktorips_fl_ast::{BinaryOp, Datatype, Value};

/// `int * int` (Java infix, wrapping)
#[derive(Debug)]
pub struct MultiplyIntInt;

impl BinaryOperation for MultiplyIntInt {
    fn signature(&self) -> BinarySignature {
        BinarySignature {
            operator: BinaryOp::Mul,
            lhs: Datatype::primitive_int(),
            rhs: Datatype::primitive_int(),
            result: Datatype::primitive_int(),
        }
    }

    fn generate(&self, lhs: CodeFragment, rhs: CodeFragment) -> CodeFragment {
        infix(&lhs, "*", &rhs)
    }

    fn evaluate(&self, lhs: &Value, rhs: &Value) -> Result<Value, EvalError> {
        let a = operand::int("*", lhs)?;
        let b = operand::int("*", rhs)?;
        Ok(Value::Integer(a.wrapping_mul(b)))
    }
}

/// `Decimal * Decimal` via `Decimal.multiply`
#[derive(Debug)]
pub struct MultiplyDecimalDecimal;

impl BinaryOperation for MultiplyDecimalDecimal {
    fn signature(&self) -> BinarySignature {
        BinarySignature {
            operator: BinaryOp::Mul,
            lhs: Datatype::decimal(),
            rhs: Datatype::decimal(),
            result: Datatype::decimal(),
        }
    }

    fn generate(&self, lhs: CodeFragment, rhs: CodeFragment) -> CodeFragment {
        method_call(&lhs, "multiply", &[&rhs])
    }

    fn evaluate(&self, lhs: &Value, rhs: &Value) -> Result<Value, EvalError> {
        let (Some(a), Some(b)) = (operand::decimal("*", lhs)?, operand::decimal("*", rhs)?) else {
            return Ok(Value::Null);
        };
        a.checked_mul(b)
            .map(Value::Decimal)
            .ok_or_else(|| EvalError::Overflow("Decimal *".into()))
    }
}

fn money_times_decimal(money: &Value, factor: &Value) -> Result<Value, EvalError> {
    let (Some(m), Some(d)) = (operand::money("*", money)?, operand::decimal("*", factor)?) else {
        return Ok(Value::Null);
    };
    Ok(Value::Money(m.multiply(d)?))
}

fn money_times_int(money: &Value, factor: &Value) -> Result<Value, EvalError> {
    let n = operand::int("*", factor)?;
    let Some(m) = operand::money("*", money)? else {
        return Ok(Value::Null);
    };
    Ok(Value::Money(m.multiply_int(n)?))
}

fn half_up_multiply(money: &CodeFragment, factor: &CodeFragment) -> CodeFragment {
    method_call(money, "multiply", &[factor, &rounding_mode("HALF_UP")])
}

/// `Money * Decimal` via `Money.multiply(Decimal, RoundingMode.HALF_UP)`
#[derive(Debug)]
pub struct MultiplyMoneyDecimal;

impl BinaryOperation for MultiplyMoneyDecimal {
    fn signature(&self) -> BinarySignature {
        BinarySignature {
            operator: BinaryOp::Mul,
            lhs: Datatype::money(),
            rhs: Datatype::decimal(),
            result: Datatype::money(),
        }
    }

    fn generate(&self, lhs: CodeFragment, rhs: CodeFragment) -> CodeFragment {
        half_up_multiply(&lhs, &rhs)
    }

    fn evaluate(&self, lhs: &Value, rhs: &Value) -> Result<Value, EvalError> {
        money_times_decimal(lhs, rhs)
    }
}

/// `Decimal * Money`, emitted with the money as receiver
#[derive(Debug)]
pub struct MultiplyDecimalMoney;

impl BinaryOperation for MultiplyDecimalMoney {
    fn signature(&self) -> BinarySignature {
        BinarySignature {
            operator: BinaryOp::Mul,
            lhs: Datatype::decimal(),
            rhs: Datatype::money(),
            result: Datatype::money(),
        }
    }

    fn generate(&self, lhs: CodeFragment, rhs: CodeFragment) -> CodeFragment {
        half_up_multiply(&rhs, &lhs)
    }

    fn evaluate(&self, lhs: &Value, rhs: &Value) -> Result<Value, EvalError> {
        money_times_decimal(rhs, lhs)
    }
}

/// `Money * int` via `Money.multiply(int)`
#[derive(Debug)]
pub struct MultiplyMoneyInt;

impl BinaryOperation for MultiplyMoneyInt {
    fn signature(&self) -> BinarySignature {
        BinarySignature {
            operator: BinaryOp::Mul,
            lhs: Datatype::money(),
            rhs: Datatype::primitive_int(),
            result: Datatype::money(),
        }
    }

    fn generate(&self, lhs: CodeFragment, rhs: CodeFragment) -> CodeFragment {
        method_call(&lhs, "multiply", &[&rhs])
    }

    fn evaluate(&self, lhs: &Value, rhs: &Value) -> Result<Value, EvalError> {
        money_times_int(lhs, rhs)
    }
}

/// `int * Money`, emitted with the money as receiver
#[derive(Debug)]
pub struct MultiplyIntMoney;

impl BinaryOperation for MultiplyIntMoney {
    fn signature(&self) -> BinarySignature {
        BinarySignature {
            operator: BinaryOp::Mul,
            lhs: Datatype::primitive_int(),
            rhs: Datatype::money(),
            result: Datatype::money(),
        }
    }

    fn generate(&self, lhs: CodeFragment, rhs: CodeFragment) -> CodeFragment {
        method_call(&rhs, "multiply", &[&lhs])
    }

    fn evaluate(&self, lhs: &Value, rhs: &Value) -> Result<Value, EvalError> {
        money_times_int(rhs, lhs)
    }
}
