//! Ordering comparisons `< <= > >=`.
//!
//! `int` compares with Java infix operators; `Decimal` and `Money` call
//! `lessThan`, `lessThanOrEqual`, `greaterThan` or `greaterThanOrEqual`.
//! Comparing against a null value yields `false`.

use super::{BinaryOperation, BinarySignature, infix, method_call};
use crate::code::CodeFragment;
use crate::error::EvalError;
use crate::operand;
use faktorips_fl_ast::{BinaryOp, Datatype, Value};
use std::cmp::Ordering;

fn java_method(operator: BinaryOp) -> &'static str {
    match operator {
        BinaryOp::Lt => "lessThan",
        BinaryOp::Le => "lessThanOrEqual",
        BinaryOp::Gt => "greaterThan",
        _ => "greaterThanOrEqual",
    }
}

fn holds(operator: BinaryOp, ordering: Ordering) -> bool {
    match operator {
        BinaryOp::Lt => ordering == Ordering::Less,
        BinaryOp::Le => ordering != Ordering::Greater,
        BinaryOp::Gt => ordering == Ordering::Greater,
        _ => ordering != Ordering::Less,
    }
}

fn signature(operator: BinaryOp, operand: Datatype) -> BinarySignature {
    BinarySignature {
        operator,
        lhs: operand.clone(),
        rhs: operand,
        result: Datatype::primitive_boolean(),
    }
}

/// `int <op> int`
#[derive(Debug)]
pub struct CompareIntInt {
    operator: BinaryOp,
}

impl CompareIntInt {
    /// Comparison for one of `< <= > >=`.
    pub fn new(operator: BinaryOp) -> Self {
        debug_assert!(operator.is_comparison());
        Self { operator }
    }
}

impl BinaryOperation for CompareIntInt {
    fn signature(&self) -> BinarySignature {
        signature(self.operator, Datatype::primitive_int())
    }

    fn generate(&self, lhs: CodeFragment, rhs: CodeFragment) -> CodeFragment {
        infix(&lhs, self.operator.symbol(), &rhs)
    }

    fn evaluate(&self, lhs: &Value, rhs: &Value) -> Result<Value, EvalError> {
        let op = self.operator.symbol();
        let a = operand::int(op, lhs)?;
        let b = operand::int(op, rhs)?;
        Ok(Value::Boolean(holds(self.operator, a.cmp(&b))))
    }
}

/// `Decimal <op> Decimal`
#[derive(Debug)]
pub struct CompareDecimalDecimal {
    operator: BinaryOp,
}

impl CompareDecimalDecimal {
    /// Comparison for one of `< <= > >=`.
    pub fn new(operator: BinaryOp) -> Self {
        debug_assert!(operator.is_comparison());
        Self { operator }
    }
}

impl BinaryOperation for CompareDecimalDecimal {
    fn signature(&self) -> BinarySignature {
        signature(self.operator, Datatype::decimal())
    }

    fn generate(&self, lhs: CodeFragment, rhs: CodeFragment) -> CodeFragment {
        method_call(&lhs, java_method(self.operator), &[&rhs])
    }

    fn evaluate(&self, lhs: &Value, rhs: &Value) -> Result<Value, EvalError> {
        let op = self.operator.symbol();
        let (Some(a), Some(b)) = (operand::decimal(op, lhs)?, operand::decimal(op, rhs)?) else {
            return Ok(Value::Boolean(false));
        };
        Ok(Value::Boolean(holds(self.operator, a.cmp(&b))))
    }
}

/// `Money <op> Money`; currencies must match
#[derive(Debug)]
pub struct CompareMoneyMoney {
    operator: BinaryOp,
}

impl CompareMoneyMoney {
    /// Comparison for one of `< <= > >=`.
    pub fn new(operator: BinaryOp) -> Self {
        debug_assert!(operator.is_comparison());
        Self { operator }
    }
}

impl BinaryOperation for CompareMoneyMoney {
    fn signature(&self) -> BinarySignature {
        signature(self.operator, Datatype::money())
    }

    fn generate(&self, lhs: CodeFragment, rhs: CodeFragment) -> CodeFragment {
        method_call(&lhs, java_method(self.operator), &[&rhs])
    }

    fn evaluate(&self, lhs: &Value, rhs: &Value) -> Result<Value, EvalError> {
        let op = self.operator.symbol();
        let (Some(a), Some(b)) = (operand::money(op, lhs)?, operand::money(op, rhs)?) else {
            return Ok(Value::Boolean(false));
        };
        Ok(Value::Boolean(holds(self.operator, a.compare(b)?)))
    }
}
