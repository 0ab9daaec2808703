//! Runtime values produced by formula evaluation.

use super::datatype::Datatype;
use super::money::Money;
use rust_decimal::Decimal;
use std::fmt;

/// A formula value.
///
/// `Null` stands for Java `null` as well as the `Decimal.NULL`/`Money.NULL`
/// null objects; the datatype of the surrounding expression tells them apart.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    /// Java `int` / `Integer`, with 32-bit wrapping arithmetic
    Integer(i32),
    Decimal(Decimal),
    Money(Money),
    String(String),
    Enum {
        datatype: Datatype,
        id: String,
    },
    Generic {
        datatype: Datatype,
        text: String,
    },
}

impl Value {
    /// Whether this is the null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Boolean payload, if any.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer payload, if any.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Decimal payload; integers widen losslessly.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Decimal(d) => Some(*d),
            Value::Integer(n) => Some(Decimal::from(*n)),
            _ => None,
        }
    }

    /// Money payload, if any.
    pub fn as_money(&self) -> Option<&Money> {
        match self {
            Value::Money(m) => Some(m),
            _ => None,
        }
    }

    /// Short name of the value's variant, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "int",
            Value::Decimal(_) => "Decimal",
            Value::Money(_) => "Money",
            Value::String(_) => "String",
            Value::Enum { .. } => "enum",
            Value::Generic { .. } => "generic",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Decimal(d) => write!(f, "{}", d),
            Value::Money(m) => write!(f, "{}", m),
            Value::String(s) => f.write_str(s),
            Value::Enum { id, .. } => f.write_str(id),
            Value::Generic { text, .. } => f.write_str(text),
        }
    }
}
