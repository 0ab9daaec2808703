//! Numeric functions: ABS, MAX, MIN, ROUND, ROUNDUP, ROUNDDOWN, WHOLENUMBER.

use super::{ArgValues, FlFunction, FunctionSignature, localized};
use crate::catalog::Locale;
use crate::code::CodeFragment;
use crate::error::EvalError;
use crate::operand;
use crate::operation::{method_call, rounding_mode};
use faktorips_fl_ast::{BuiltinValue, Datatype, Value};
use rust_decimal::RoundingStrategy;
use rust_decimal::prelude::ToPrimitive;
use std::cmp::Ordering;
use std::sync::Arc;

pub(super) fn functions(locale: Locale) -> Vec<Arc<dyn FlFunction>> {
    let mut functions: Vec<Arc<dyn FlFunction>> = vec![Arc::new(Abs::new(locale))];
    for extremum in [Extremum::Max, Extremum::Min] {
        for datatype in [Datatype::primitive_int(), Datatype::decimal(), Datatype::money()] {
            functions.push(Arc::new(MaxMin::new(locale, extremum, datatype)));
        }
    }
    for mode in [Rounding::HalfUp, Rounding::Up, Rounding::Down] {
        functions.push(Arc::new(Round::new(locale, mode)));
    }
    functions.push(Arc::new(WholeNumber::new(locale)));
    functions
}

/// `ABS(Decimal)`
#[derive(Debug)]
pub struct Abs {
    signature: FunctionSignature,
}

impl Abs {
    pub fn new(locale: Locale) -> Self {
        Self {
            signature: FunctionSignature::new(
                localized(locale, "ABS", "ABS"),
                vec![Datatype::decimal()],
                Datatype::decimal(),
            ),
        }
    }
}

impl FlFunction for Abs {
    fn signature(&self) -> &FunctionSignature {
        &self.signature
    }

    fn description(&self) -> &str {
        "Absolute value of a decimal"
    }

    fn generate(&self, args: Vec<CodeFragment>) -> CodeFragment {
        match args.first() {
            Some(arg) => method_call(arg, "abs", &[]),
            None => CodeFragment::new(),
        }
    }

    fn evaluate(&self, args: &mut ArgValues<'_>) -> Result<Value, EvalError> {
        let value = args.get(0)?;
        Ok(operand::decimal_value(
            operand::decimal("ABS", &value)?.map(|d| d.abs()),
        ))
    }
}

/// Which end of the range [`MaxMin`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extremum {
    Max,
    Min,
}

impl Extremum {
    fn method(self) -> &'static str {
        match self {
            Extremum::Max => "max",
            Extremum::Min => "min",
        }
    }

    fn picks_rhs(self, ordering: Ordering) -> bool {
        match self {
            Extremum::Max => ordering == Ordering::Less,
            Extremum::Min => ordering == Ordering::Greater,
        }
    }
}

/// `MAX(T; T)` / `MIN(T; T)` for int, Decimal and Money
#[derive(Debug)]
pub struct MaxMin {
    signature: FunctionSignature,
    extremum: Extremum,
}

impl MaxMin {
    pub fn new(locale: Locale, extremum: Extremum, datatype: Datatype) -> Self {
        let name = match extremum {
            Extremum::Max => localized(locale, "MAX", "MAX"),
            Extremum::Min => localized(locale, "MIN", "MIN"),
        };
        Self {
            signature: FunctionSignature::new(
                name,
                vec![datatype.clone(), datatype.clone()],
                datatype,
            ),
            extremum,
        }
    }

    fn datatype(&self) -> &Datatype {
        &self.signature.result
    }
}

impl FlFunction for MaxMin {
    fn signature(&self) -> &FunctionSignature {
        &self.signature
    }

    fn description(&self) -> &str {
        match self.extremum {
            Extremum::Max => "Larger of two values",
            Extremum::Min => "Smaller of two values",
        }
    }

    fn generate(&self, args: Vec<CodeFragment>) -> CodeFragment {
        let [lhs, rhs] = args.as_slice() else {
            return CodeFragment::new();
        };
        if self.datatype().is_primitive() {
            let mut code = CodeFragment::from_source("Math.");
            code.append(self.extremum.method())
                .append("(")
                .append_fragment(lhs)
                .append(", ")
                .append_fragment(rhs)
                .append(")");
            code
        } else {
            method_call(lhs, self.extremum.method(), &[rhs])
        }
    }

    fn evaluate(&self, args: &mut ArgValues<'_>) -> Result<Value, EvalError> {
        let name = self.signature.name.as_str();
        let lhs = args.get(0)?;
        let rhs = args.get(1)?;
        let ordering = match self.datatype().builtin_value() {
            Some(BuiltinValue::Integer) => operand::int(name, &lhs)?.cmp(&operand::int(name, &rhs)?),
            Some(BuiltinValue::Money) => {
                let (Some(a), Some(b)) = (operand::money(name, &lhs)?, operand::money(name, &rhs)?)
                else {
                    return Ok(Value::Null);
                };
                a.compare(b)?
            }
            _ => {
                let (Some(a), Some(b)) =
                    (operand::decimal(name, &lhs)?, operand::decimal(name, &rhs)?)
                else {
                    return Ok(Value::Null);
                };
                a.cmp(&b)
            }
        };
        Ok(if self.extremum.picks_rhs(ordering) { rhs } else { lhs })
    }
}

/// Rounding direction of the ROUND family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    HalfUp,
    Up,
    Down,
}

impl Rounding {
    fn java_mode(self) -> &'static str {
        match self {
            Rounding::HalfUp => "HALF_UP",
            Rounding::Up => "UP",
            Rounding::Down => "DOWN",
        }
    }

    fn strategy(self) -> RoundingStrategy {
        match self {
            Rounding::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            Rounding::Up => RoundingStrategy::AwayFromZero,
            Rounding::Down => RoundingStrategy::ToZero,
        }
    }
}

/// `ROUND(Decimal; int)`, `ROUNDUP(Decimal; int)`, `ROUNDDOWN(Decimal; int)`
///
/// The result has exactly the requested number of fraction digits.
#[derive(Debug)]
pub struct Round {
    signature: FunctionSignature,
    mode: Rounding,
}

impl Round {
    pub fn new(locale: Locale, mode: Rounding) -> Self {
        let name = match mode {
            Rounding::HalfUp => localized(locale, "ROUND", "RUNDEN"),
            Rounding::Up => localized(locale, "ROUNDUP", "AUFRUNDEN"),
            Rounding::Down => localized(locale, "ROUNDDOWN", "ABRUNDEN"),
        };
        Self {
            signature: FunctionSignature::new(
                name,
                vec![Datatype::decimal(), Datatype::primitive_int()],
                Datatype::decimal(),
            ),
            mode,
        }
    }
}

impl FlFunction for Round {
    fn signature(&self) -> &FunctionSignature {
        &self.signature
    }

    fn description(&self) -> &str {
        match self.mode {
            Rounding::HalfUp => "Round half up to the given number of fraction digits",
            Rounding::Up => "Round away from zero to the given number of fraction digits",
            Rounding::Down => "Round toward zero to the given number of fraction digits",
        }
    }

    fn generate(&self, args: Vec<CodeFragment>) -> CodeFragment {
        let [value, scale] = args.as_slice() else {
            return CodeFragment::new();
        };
        method_call(value, "setScale", &[scale, &rounding_mode(self.mode.java_mode())])
    }

    fn evaluate(&self, args: &mut ArgValues<'_>) -> Result<Value, EvalError> {
        let name = self.signature.name.as_str();
        let value = args.get(0)?;
        let scale = operand::int(name, &args.get(1)?)?;
        let Ok(scale) = u32::try_from(scale) else {
            return Err(EvalError::InvalidArgument {
                operation: name.to_string(),
                message: format!("negative scale {scale}"),
            });
        };
        let Some(d) = operand::decimal(name, &value)? else {
            return Ok(Value::Null);
        };
        let mut rounded = d.round_dp_with_strategy(scale, self.mode.strategy());
        rounded.rescale(scale);
        Ok(Value::Decimal(rounded))
    }
}

/// `WHOLENUMBER(Decimal) -> int`, truncating toward zero
#[derive(Debug)]
pub struct WholeNumber {
    signature: FunctionSignature,
}

impl WholeNumber {
    pub fn new(locale: Locale) -> Self {
        Self {
            signature: FunctionSignature::new(
                localized(locale, "WHOLENUMBER", "GANZZAHL"),
                vec![Datatype::decimal()],
                Datatype::primitive_int(),
            ),
        }
    }
}

impl FlFunction for WholeNumber {
    fn signature(&self) -> &FunctionSignature {
        &self.signature
    }

    fn description(&self) -> &str {
        "Integer part of a decimal"
    }

    fn generate(&self, args: Vec<CodeFragment>) -> CodeFragment {
        let Some(value) = args.first() else {
            return CodeFragment::new();
        };
        let scaled = method_call(
            value,
            "setScale",
            &[&CodeFragment::from_source("0"), &rounding_mode("DOWN")],
        );
        method_call(&scaled, "intValue", &[])
    }

    fn evaluate(&self, args: &mut ArgValues<'_>) -> Result<Value, EvalError> {
        let name = self.signature.name.as_str();
        let value = args.get(0)?;
        let Some(d) = operand::decimal(name, &value)? else {
            return Err(EvalError::NullValue(format!("argument of {name}")));
        };
        d.trunc()
            .to_i32()
            .map(Value::Integer)
            .ok_or_else(|| EvalError::Overflow(name.to_string()))
    }
}
