//! Direct evaluation of typed formulas.
//!
//! [`FormulaEvaluator`] interprets a [`TypedExpr`] with the same semantics
//! as the generated Java code: the operations, functions and conversions
//! chosen during resolution evaluate themselves, parameters come from
//! [`Bindings`].
//!
//! # Examples
//!
//! ```
//! # use faktorips_fl_compiler::*;
//! # use faktorips_fl_ast::{Datatype, Value};
//! let mut compiler = ExprCompiler::new(Locale::En);
//! compiler.add_parameter("n", Datatype::primitive_int(), None).unwrap();
//! let result = compiler.compile("n * 2 + 1", &Datatype::primitive_int());
//!
//! let mut bindings = Bindings::new();
//! bindings.insert("n", Value::Integer(20));
//! let value = FormulaEvaluator::evaluate(result.typed_expr().unwrap(), &bindings).unwrap();
//! assert_eq!(value, Value::Integer(41));
//! ```

use crate::error::EvalError;
use crate::function::ArgValues;
use crate::identifier::IdentifierBinding;
use crate::typed::{TypedExpr, TypedKind};
use faktorips_fl_ast::{Literal, Money, Value};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::trace;

/// Parameter values by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    values: IndexMap<String, Value>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`, replacing an earlier value.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<S: Into<String>> FromIterator<(S, Value)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (S, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Interpreter for typed formulas.
pub struct FormulaEvaluator;

impl FormulaEvaluator {
    /// Evaluate `expr` with parameter values from `bindings`.
    ///
    /// # Errors
    ///
    /// Unbound parameters, division by zero, currency mismatches, null
    /// values where a primitive is required, and arithmetic overflow.
    pub fn evaluate(expr: &TypedExpr, bindings: &Bindings) -> Result<Value, EvalError> {
        let value = match &expr.kind {
            TypedKind::Literal(literal) => literal_value(literal)?,
            TypedKind::Identifier { name, binding, .. } => match binding {
                IdentifierBinding::Constant(value) => value.clone(),
                IdentifierBinding::Parameter(key) => bindings
                    .get(key)
                    .cloned()
                    .ok_or_else(|| EvalError::UnboundParameter(name.clone()))?,
            },
            TypedKind::Binary {
                operation,
                left,
                right,
            } => {
                let lhs = Self::evaluate(left, bindings)?;
                let rhs = Self::evaluate(right, bindings)?;
                operation.evaluate(&lhs, &rhs)?
            }
            TypedKind::Unary { operation, operand } => {
                operation.evaluate(&Self::evaluate(operand, bindings)?)?
            }
            TypedKind::Call { function, args } => {
                let mut values =
                    ArgValues::new(args.len(), |i| Self::evaluate(&args[i], bindings));
                function.evaluate(&mut values)?
            }
            TypedKind::Convert {
                conversion,
                operand,
            } => conversion.evaluate(Self::evaluate(operand, bindings)?)?,
            TypedKind::Parenthesized(inner) => Self::evaluate(inner, bindings)?,
        };
        trace!(datatype = %expr.datatype, value = %value, "evaluated");
        Ok(value)
    }
}

fn literal_value(literal: &Literal) -> Result<Value, EvalError> {
    Ok(match literal {
        Literal::Integer(n) => Value::Integer(*n),
        Literal::Decimal(text) => Value::Decimal(
            Decimal::from_str(text).map_err(|_| EvalError::InvalidLiteral(text.clone()))?,
        ),
        Literal::Money(text) => Value::Money(
            Money::parse(text).ok_or_else(|| EvalError::InvalidLiteral(text.clone()))?,
        ),
        Literal::String(text) => Value::String(text.clone()),
        Literal::Boolean(b) => Value::Boolean(*b),
        Literal::Null => Value::Null,
    })
}
