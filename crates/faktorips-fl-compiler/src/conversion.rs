//! Implicit datatype conversions.
//!
//! When no operation or function overload matches the operand datatypes
//! exactly, the compiler considers overloads reachable by converting
//! operands. Each conversion is a single step; conversions never chain.
//!
//! # Design
//!
//! - `Conversion`: one source/target pair with its Java code and runtime mapping
//! - `ConversionTable`: registration-ordered, one conversion per pair
//! - The `null` literal converts to every non-primitive datatype without
//!   registration; its code is the target's null expression

use crate::code::CodeFragment;
use crate::error::{EvalError, RegistrationError};
use crate::helper::null_expression;
use crate::operand;
use faktorips_fl_ast::{Datatype, Value};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use std::fmt;
use std::sync::Arc;

/// Implicit conversion between two datatypes.
pub trait Conversion: Send + Sync + fmt::Debug {
    /// Datatype converted from.
    fn source(&self) -> Datatype;

    /// Datatype converted to.
    fn target(&self) -> Datatype;

    /// Java code converting `from` (code of the source datatype).
    fn generate(&self, from: CodeFragment) -> CodeFragment;

    /// Convert a runtime value.
    fn evaluate(&self, value: Value) -> Result<Value, EvalError>;
}

/// `int` → `Integer`
#[derive(Debug)]
pub struct PrimitiveIntToInteger;

impl Conversion for PrimitiveIntToInteger {
    fn source(&self) -> Datatype {
        Datatype::primitive_int()
    }

    fn target(&self) -> Datatype {
        Datatype::integer()
    }

    fn generate(&self, from: CodeFragment) -> CodeFragment {
        let mut code = CodeFragment::from_source("Integer.valueOf(");
        code.append_fragment(&from).append(")");
        code
    }

    fn evaluate(&self, value: Value) -> Result<Value, EvalError> {
        operand::int("int to Integer", &value).map(Value::Integer)
    }
}

/// `Integer` → `int`
#[derive(Debug)]
pub struct IntegerToPrimitiveInt;

impl Conversion for IntegerToPrimitiveInt {
    fn source(&self) -> Datatype {
        Datatype::integer()
    }

    fn target(&self) -> Datatype {
        Datatype::primitive_int()
    }

    fn generate(&self, from: CodeFragment) -> CodeFragment {
        let mut code = from.as_operand();
        code.append(".intValue()");
        code
    }

    fn evaluate(&self, value: Value) -> Result<Value, EvalError> {
        operand::int("Integer to int", &value).map(Value::Integer)
    }
}

/// `int` → `Decimal`
#[derive(Debug)]
pub struct PrimitiveIntToDecimal;

impl Conversion for PrimitiveIntToDecimal {
    fn source(&self) -> Datatype {
        Datatype::primitive_int()
    }

    fn target(&self) -> Datatype {
        Datatype::decimal()
    }

    fn generate(&self, from: CodeFragment) -> CodeFragment {
        let mut code = CodeFragment::new();
        code.append_class_name(Datatype::decimal().java_class())
            .append(".valueOf(")
            .append_fragment(&from)
            .append(")");
        code
    }

    fn evaluate(&self, value: Value) -> Result<Value, EvalError> {
        let n = operand::int("int to Decimal", &value)?;
        Ok(Value::Decimal(Decimal::from(n)))
    }
}

/// `Integer` → `Decimal`; a null `Integer` becomes `Decimal.NULL`
#[derive(Debug)]
pub struct IntegerToDecimal;

impl Conversion for IntegerToDecimal {
    fn source(&self) -> Datatype {
        Datatype::integer()
    }

    fn target(&self) -> Datatype {
        Datatype::decimal()
    }

    fn generate(&self, from: CodeFragment) -> CodeFragment {
        let mut code = CodeFragment::new();
        code.append_class_name(Datatype::decimal().java_class())
            .append(".valueOf(")
            .append_fragment(&from)
            .append(")");
        code
    }

    fn evaluate(&self, value: Value) -> Result<Value, EvalError> {
        match value {
            Value::Null => Ok(Value::Null),
            other => {
                let n = operand::int("Integer to Decimal", &other)?;
                Ok(Value::Decimal(Decimal::from(n)))
            }
        }
    }
}

/// `boolean` → `Boolean`
#[derive(Debug)]
pub struct PrimitiveBooleanToBoolean;

impl Conversion for PrimitiveBooleanToBoolean {
    fn source(&self) -> Datatype {
        Datatype::primitive_boolean()
    }

    fn target(&self) -> Datatype {
        Datatype::boolean()
    }

    fn generate(&self, from: CodeFragment) -> CodeFragment {
        let mut code = CodeFragment::from_source("Boolean.valueOf(");
        code.append_fragment(&from).append(")");
        code
    }

    fn evaluate(&self, value: Value) -> Result<Value, EvalError> {
        operand::boolean("boolean to Boolean", &value).map(Value::Boolean)
    }
}

/// `Boolean` → `boolean`
#[derive(Debug)]
pub struct BooleanToPrimitiveBoolean;

impl Conversion for BooleanToPrimitiveBoolean {
    fn source(&self) -> Datatype {
        Datatype::boolean()
    }

    fn target(&self) -> Datatype {
        Datatype::primitive_boolean()
    }

    fn generate(&self, from: CodeFragment) -> CodeFragment {
        let mut code = from.as_operand();
        code.append(".booleanValue()");
        code
    }

    fn evaluate(&self, value: Value) -> Result<Value, EvalError> {
        operand::boolean("Boolean to boolean", &value).map(Value::Boolean)
    }
}

/// The `null` literal as a value of `target`.
#[derive(Debug)]
pub struct NullToDatatype {
    target: Datatype,
}

impl NullToDatatype {
    pub fn new(target: Datatype) -> Self {
        Self { target }
    }
}

impl Conversion for NullToDatatype {
    fn source(&self) -> Datatype {
        Datatype::null()
    }

    fn target(&self) -> Datatype {
        self.target.clone()
    }

    fn generate(&self, _from: CodeFragment) -> CodeFragment {
        null_expression(&self.target)
    }

    fn evaluate(&self, _value: Value) -> Result<Value, EvalError> {
        Ok(Value::Null)
    }
}

/// Registered conversions keyed by (source, target).
#[derive(Debug, Default)]
pub struct ConversionTable {
    conversions: IndexMap<(Datatype, Datatype), Arc<dyn Conversion>>,
}

impl ConversionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table holding the built-in conversions.
    pub fn with_builtins() -> Self {
        let mut table = Self::new();
        let builtins: [Arc<dyn Conversion>; 6] = [
            Arc::new(PrimitiveIntToInteger),
            Arc::new(IntegerToPrimitiveInt),
            Arc::new(PrimitiveIntToDecimal),
            Arc::new(IntegerToDecimal),
            Arc::new(PrimitiveBooleanToBoolean),
            Arc::new(BooleanToPrimitiveBoolean),
        ];
        for conversion in builtins {
            table.conversions.insert(
                (conversion.source(), conversion.target()),
                conversion,
            );
        }
        table
    }

    /// Register a conversion.
    ///
    /// # Errors
    ///
    /// [`RegistrationError::DuplicateConversion`] if the pair is taken.
    pub fn register(&mut self, conversion: Arc<dyn Conversion>) -> Result<(), RegistrationError> {
        let key = (conversion.source(), conversion.target());
        if self.conversions.contains_key(&key) {
            return Err(RegistrationError::DuplicateConversion {
                from: key.0.to_string(),
                to: key.1.to_string(),
            });
        }
        self.conversions.insert(key, conversion);
        Ok(())
    }

    /// Conversion from `from` to `to`, if one exists.
    pub fn find(&self, from: &Datatype, to: &Datatype) -> Option<Arc<dyn Conversion>> {
        if let Some(conversion) = self.conversions.get(&(from.clone(), to.clone())) {
            return Some(Arc::clone(conversion));
        }
        let accepts_null = !to.is_primitive() && !to.is_void() && !to.is_null();
        if from.is_null() && accepts_null {
            return Some(Arc::new(NullToDatatype::new(to.clone())));
        }
        None
    }

    /// Whether a value of `from` can be implicitly converted to `to`.
    pub fn can_convert(&self, from: &Datatype, to: &Datatype) -> bool {
        self.find(from, to).is_some()
    }

    /// Registered conversions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Conversion>> {
        self.conversions.values()
    }
}
