//! Operator implementations and their resolution table.
//!
//! Every operator × operand-datatype combination is its own type
//! implementing [`BinaryOperation`] or [`UnaryOperation`]: it declares its
//! signature, emits Java code from its operands' code, and evaluates values.
//! The [`OperationTable`] maps `(operator, operand datatypes)` to exactly one
//! implementation and resolves mismatched operands through conversions.
//!
//! ## Module Organization
//!
//! - `add`, `subtract`, `multiply`, `divide` - arithmetic
//! - `compare` - ordering comparisons `< <= > >=`
//! - `equals` - equality `= !=`
//! - `unary` - prefix `+ - !`

pub mod add;
pub mod compare;
pub mod divide;
pub mod equals;
pub mod multiply;
pub mod subtract;
pub mod unary;

use crate::code::CodeFragment;
use crate::conversion::ConversionTable;
use crate::error::{EvalError, RegistrationError};
use crate::helper::ROUNDING_MODE;
use crate::overload::{self, Selection};
use faktorips_fl_ast::{BinaryOp, Datatype, UnaryOp, Value};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Operator and datatypes of a binary operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinarySignature {
    pub operator: BinaryOp,
    pub lhs: Datatype,
    pub rhs: Datatype,
    pub result: Datatype,
}

impl fmt::Display for BinarySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} -> {}",
            self.lhs, self.operator, self.rhs, self.result
        )
    }
}

/// Operator and datatypes of a unary operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnarySignature {
    pub operator: UnaryOp,
    pub operand: Datatype,
    pub result: Datatype,
}

impl fmt::Display for UnarySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} -> {}", self.operator, self.operand, self.result)
    }
}

/// Binary operator applied to fixed operand datatypes.
pub trait BinaryOperation: Send + Sync + fmt::Debug {
    /// Operator, operand and result datatypes.
    fn signature(&self) -> BinarySignature;

    /// Java code combining the operands' code.
    fn generate(&self, lhs: CodeFragment, rhs: CodeFragment) -> CodeFragment;

    /// Apply the operation to values of the signature's datatypes.
    fn evaluate(&self, lhs: &Value, rhs: &Value) -> Result<Value, EvalError>;
}

/// Unary operator applied to a fixed operand datatype.
pub trait UnaryOperation: Send + Sync + fmt::Debug {
    /// Operator, operand and result datatypes.
    fn signature(&self) -> UnarySignature;

    /// Java code from the operand's code.
    fn generate(&self, operand: CodeFragment) -> CodeFragment;

    /// Apply the operation to a value of the operand datatype.
    fn evaluate(&self, operand: &Value) -> Result<Value, EvalError>;
}

/// `receiver.method(arg, …)`, parenthesizing a compound receiver.
pub(crate) fn method_call(receiver: &CodeFragment, method: &str, args: &[&CodeFragment]) -> CodeFragment {
    let mut code = receiver.as_operand();
    code.append(".").append(method).append("(");
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            code.append(", ");
        }
        code.append_fragment(arg);
    }
    code.append(")");
    code
}

/// `lhs op rhs`, parenthesizing compound operands.
pub(crate) fn infix(lhs: &CodeFragment, operator: &str, rhs: &CodeFragment) -> CodeFragment {
    let mut code = lhs.as_operand();
    code.append(" ")
        .append(operator)
        .append(" ")
        .append_fragment(&rhs.as_operand());
    code
}

/// `RoundingMode.<mode>` with its import.
pub(crate) fn rounding_mode(mode: &str) -> CodeFragment {
    let mut code = CodeFragment::new();
    code.append_class_name(ROUNDING_MODE).append(".").append(mode);
    code
}

/// The built-in binary operations.
pub fn builtin_binary_operations() -> Vec<Arc<dyn BinaryOperation>> {
    let mut operations: Vec<Arc<dyn BinaryOperation>> = vec![
        Arc::new(add::AddIntInt),
        Arc::new(add::AddDecimalDecimal),
        Arc::new(add::AddMoneyMoney),
        Arc::new(add::AddStringString),
        Arc::new(subtract::SubtractIntInt),
        Arc::new(subtract::SubtractDecimalDecimal),
        Arc::new(subtract::SubtractMoneyMoney),
        Arc::new(multiply::MultiplyIntInt),
        Arc::new(multiply::MultiplyDecimalDecimal),
        Arc::new(multiply::MultiplyMoneyDecimal),
        Arc::new(multiply::MultiplyDecimalMoney),
        Arc::new(multiply::MultiplyMoneyInt),
        Arc::new(multiply::MultiplyIntMoney),
        Arc::new(divide::DivideDecimalDecimal),
        Arc::new(divide::DivideMoneyDecimal),
    ];

    for operator in [BinaryOp::Lt, BinaryOp::Le, BinaryOp::Gt, BinaryOp::Ge] {
        operations.push(Arc::new(compare::CompareIntInt::new(operator)));
        operations.push(Arc::new(compare::CompareDecimalDecimal::new(operator)));
        operations.push(Arc::new(compare::CompareMoneyMoney::new(operator)));
    }

    for operator in [BinaryOp::Eq, BinaryOp::Ne] {
        operations.push(Arc::new(equals::EqualsPrimitive::new(
            operator,
            Datatype::primitive_int(),
        )));
        operations.push(Arc::new(equals::EqualsPrimitive::new(
            operator,
            Datatype::primitive_boolean(),
        )));
        for datatype in [Datatype::decimal(), Datatype::money(), Datatype::string()] {
            operations.push(Arc::new(equals::EqualsObject::new(operator, datatype)));
        }
    }

    operations
}

/// The built-in unary operations.
pub fn builtin_unary_operations() -> Vec<Arc<dyn UnaryOperation>> {
    vec![
        Arc::new(unary::PlusInt),
        Arc::new(unary::PlusDecimal),
        Arc::new(unary::PlusMoney),
        Arc::new(unary::MinusInt),
        Arc::new(unary::MinusDecimal),
        Arc::new(unary::MinusMoney),
        Arc::new(unary::NotBoolean),
    ]
}

type BinaryKey = (BinaryOp, Datatype, Datatype);
type UnaryKey = (UnaryOp, Datatype);

/// Registered operations keyed by operator and operand datatypes.
#[derive(Debug, Default)]
pub struct OperationTable {
    binary: IndexMap<BinaryKey, Arc<dyn BinaryOperation>>,
    unary: IndexMap<UnaryKey, Arc<dyn UnaryOperation>>,
}

impl OperationTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table holding the built-in operations.
    pub fn with_builtins() -> Self {
        let mut table = Self::new();
        for operation in builtin_binary_operations() {
            let signature = operation.signature();
            table
                .binary
                .insert((signature.operator, signature.lhs, signature.rhs), operation);
        }
        for operation in builtin_unary_operations() {
            let signature = operation.signature();
            table
                .unary
                .insert((signature.operator, signature.operand), operation);
        }
        table
    }

    /// Register a binary operation.
    ///
    /// # Errors
    ///
    /// [`RegistrationError::DuplicateBinaryOperation`] if an operation is
    /// already registered for the operator and operand datatypes.
    pub fn register_binary(
        &mut self,
        operation: Arc<dyn BinaryOperation>,
    ) -> Result<(), RegistrationError> {
        self.check_binary(operation.as_ref())?;
        let signature = operation.signature();
        self.binary
            .insert((signature.operator, signature.lhs, signature.rhs), operation);
        Ok(())
    }

    /// Fail like [`register_binary`](Self::register_binary) would, without
    /// registering anything.
    pub fn check_binary(&self, operation: &dyn BinaryOperation) -> Result<(), RegistrationError> {
        let signature = operation.signature();
        let key = (signature.operator, signature.lhs, signature.rhs);
        if self.binary.contains_key(&key) {
            return Err(RegistrationError::DuplicateBinaryOperation {
                operator: key.0,
                lhs: key.1.to_string(),
                rhs: key.2.to_string(),
            });
        }
        Ok(())
    }

    /// Register a unary operation.
    ///
    /// # Errors
    ///
    /// [`RegistrationError::DuplicateUnaryOperation`] if an operation is
    /// already registered for the operator and operand datatype.
    pub fn register_unary(
        &mut self,
        operation: Arc<dyn UnaryOperation>,
    ) -> Result<(), RegistrationError> {
        let signature = operation.signature();
        let key = (signature.operator, signature.operand);
        if self.unary.contains_key(&key) {
            return Err(RegistrationError::DuplicateUnaryOperation {
                operator: key.0,
                operand: key.1.to_string(),
            });
        }
        self.unary.insert(key, operation);
        Ok(())
    }

    /// Resolve a binary operator for the operand datatypes.
    pub fn resolve_binary(
        &self,
        operator: BinaryOp,
        lhs: &Datatype,
        rhs: &Datatype,
        conversions: &ConversionTable,
    ) -> Selection<Arc<dyn BinaryOperation>> {
        if let Some(operation) = self.binary.get(&(operator, lhs.clone(), rhs.clone())) {
            return Selection::Unique {
                item: Arc::clone(operation),
                conversions: vec![None, None],
            };
        }
        let candidates = self
            .binary
            .iter()
            .filter(|((op, _, _), _)| *op == operator)
            .map(|((_, l, r), operation)| (Arc::clone(operation), vec![l.clone(), r.clone()]));
        overload::select(candidates, &[lhs.clone(), rhs.clone()], conversions)
    }

    /// Resolve a unary operator for the operand datatype.
    pub fn resolve_unary(
        &self,
        operator: UnaryOp,
        operand: &Datatype,
        conversions: &ConversionTable,
    ) -> Selection<Arc<dyn UnaryOperation>> {
        if let Some(operation) = self.unary.get(&(operator, operand.clone())) {
            return Selection::Unique {
                item: Arc::clone(operation),
                conversions: vec![None],
            };
        }
        let candidates = self
            .unary
            .iter()
            .filter(|((op, _), _)| *op == operator)
            .map(|((_, d), operation)| (Arc::clone(operation), vec![d.clone()]));
        overload::select(candidates, std::slice::from_ref(operand), conversions)
    }

    /// Registered binary operations in registration order.
    pub fn binary_operations(&self) -> impl Iterator<Item = &Arc<dyn BinaryOperation>> {
        self.binary.values()
    }

    /// Registered unary operations in registration order.
    pub fn unary_operations(&self) -> impl Iterator<Item = &Arc<dyn UnaryOperation>> {
        self.unary.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_have_unique_keys() {
        let table = OperationTable::with_builtins();
        assert_eq!(
            table.binary_operations().count(),
            builtin_binary_operations().len()
        );
        assert_eq!(
            table.unary_operations().count(),
            builtin_unary_operations().len()
        );
    }

    #[test]
    fn test_duplicate_binary_rejected() {
        let mut table = OperationTable::with_builtins();
        let err = table
            .register_binary(Arc::new(add::AddDecimalDecimal))
            .unwrap_err();
        assert_eq!(
            err,
            RegistrationError::DuplicateBinaryOperation {
                operator: BinaryOp::Add,
                lhs: "Decimal".into(),
                rhs: "Decimal".into(),
            }
        );
    }

    #[test]
    fn test_duplicate_unary_rejected() {
        let mut table = OperationTable::with_builtins();
        assert!(matches!(
            table.register_unary(Arc::new(unary::MinusInt)),
            Err(RegistrationError::DuplicateUnaryOperation { .. })
        ));
    }

    #[test]
    fn test_resolve_with_conversion() {
        let table = OperationTable::with_builtins();
        let conversions = ConversionTable::with_builtins();
        let selection = table.resolve_binary(
            BinaryOp::Add,
            &Datatype::primitive_int(),
            &Datatype::decimal(),
            &conversions,
        );
        let Selection::Unique { item, conversions } = selection else {
            panic!("expected unique selection");
        };
        assert_eq!(item.signature().result, Datatype::decimal());
        assert!(conversions[0].is_some());
    }

    #[test]
    fn test_signature_display() {
        let signature = add::AddMoneyMoney.signature();
        assert_eq!(signature.to_string(), "Money + Money -> Money");
        assert_eq!(unary::NotBoolean.signature().to_string(), "!boolean -> boolean");
    }
}
