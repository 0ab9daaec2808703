//! Equality `=` and inequality `!=`.
//!
//! Primitives compare with `==`/`!=`. Objects call `equals`, so the left
//! operand must not be Java `null`; Decimal and Money use null objects and
//! never are. During evaluation two nulls are equal.

use super::{BinaryOperation, BinarySignature, infix, method_call};
use crate::code::CodeFragment;
use crate::error::EvalError;
use faktorips_fl_ast::{BinaryOp, Datatype, Value};

fn signature(operator: BinaryOp, operand: &Datatype) -> BinarySignature {
    BinarySignature {
        operator,
        lhs: operand.clone(),
        rhs: operand.clone(),
        result: Datatype::primitive_boolean(),
    }
}

fn outcome(operator: BinaryOp, equal: bool) -> Value {
    Value::Boolean(if operator == BinaryOp::Ne { !equal } else { equal })
}

/// `=`/`!=` on a primitive datatype
#[derive(Debug)]
pub struct EqualsPrimitive {
    operator: BinaryOp,
    datatype: Datatype,
}

impl EqualsPrimitive {
    pub fn new(operator: BinaryOp, datatype: Datatype) -> Self {
        debug_assert!(matches!(operator, BinaryOp::Eq | BinaryOp::Ne));
        Self { operator, datatype }
    }
}

impl BinaryOperation for EqualsPrimitive {
    fn signature(&self) -> BinarySignature {
        signature(self.operator, &self.datatype)
    }

    fn generate(&self, lhs: CodeFragment, rhs: CodeFragment) -> CodeFragment {
        let java = if self.operator == BinaryOp::Ne { "!=" } else { "==" };
        infix(&lhs, java, &rhs)
    }

    fn evaluate(&self, lhs: &Value, rhs: &Value) -> Result<Value, EvalError> {
        if lhs.is_null() || rhs.is_null() {
            return Err(EvalError::NullValue(format!(
                "operand of {}",
                self.operator
            )));
        }
        Ok(outcome(self.operator, lhs == rhs))
    }
}

/// `=`/`!=` on an object datatype via `equals`
#[derive(Debug)]
pub struct EqualsObject {
    operator: BinaryOp,
    datatype: Datatype,
}

impl EqualsObject {
    pub fn new(operator: BinaryOp, datatype: Datatype) -> Self {
        debug_assert!(matches!(operator, BinaryOp::Eq | BinaryOp::Ne));
        Self { operator, datatype }
    }
}

impl BinaryOperation for EqualsObject {
    fn signature(&self) -> BinarySignature {
        signature(self.operator, &self.datatype)
    }

    fn generate(&self, lhs: CodeFragment, rhs: CodeFragment) -> CodeFragment {
        let call = method_call(&lhs, "equals", &[&rhs]);
        if self.operator == BinaryOp::Ne {
            let mut code = CodeFragment::from_source("!");
            code.append_fragment(&call);
            code
        } else {
            call
        }
    }

    fn evaluate(&self, lhs: &Value, rhs: &Value) -> Result<Value, EvalError> {
        let equal = match (lhs, rhs) {
            (Value::Null, Value::Null) => true,
            (Value::Null, _) | (_, Value::Null) => false,
            (a, b) => a == b,
        };
        Ok(outcome(self.operator, equal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_object_equality_generates_equals() {
        let eq = EqualsObject::new(BinaryOp::Eq, Datatype::string());
        let ne = EqualsObject::new(BinaryOp::Ne, Datatype::string());
        let a = CodeFragment::from_source("\"a\"");
        let b = CodeFragment::from_source("x");
        assert_eq!(eq.generate(a.clone(), b.clone()).source(), "\"a\".equals(x)");
        assert_eq!(ne.generate(a, b).source(), "!\"a\".equals(x)");
    }

    #[test]
    fn test_object_equality_with_nulls() {
        let eq = EqualsObject::new(BinaryOp::Eq, Datatype::money());
        assert_eq!(eq.evaluate(&Value::Null, &Value::Null).unwrap(), Value::Boolean(true));
        let one = Value::Decimal(Decimal::ONE);
        assert_eq!(eq.evaluate(&Value::Null, &one).unwrap(), Value::Boolean(false));
    }

    #[test]
    fn test_decimal_equality_ignores_scale() {
        let eq = EqualsObject::new(BinaryOp::Eq, Datatype::decimal());
        let a = Value::Decimal(Decimal::from_str("1.0").unwrap());
        let b = Value::Decimal(Decimal::from_str("1.00").unwrap());
        assert_eq!(eq.evaluate(&a, &b).unwrap(), Value::Boolean(true));
    }

    #[test]
    fn test_primitive_equality() {
        let ne = EqualsPrimitive::new(BinaryOp::Ne, Datatype::primitive_int());
        assert_eq!(
            ne.evaluate(&Value::Integer(1), &Value::Integer(2)).unwrap(),
            Value::Boolean(true)
        );
        let code = ne.generate(CodeFragment::from_source("1"), CodeFragment::from_source("2"));
        assert_eq!(code.source(), "1 != 2");
    }
}
