//! Typed expression tree.
//!
//! The result of resolving an [`Expr`](faktorips_fl_ast::Expr): every node
//! knows its datatype and the operation, function, conversion or identifier
//! binding chosen for it. Code emission and evaluation both walk this tree.

use crate::code::CodeFragment;
use crate::conversion::Conversion;
use crate::function::FlFunction;
use crate::identifier::IdentifierBinding;
use crate::operation::{BinaryOperation, UnaryOperation};
use faktorips_fl_ast::{Datatype, Literal, Span};
use std::sync::Arc;

/// A resolved expression node.
#[derive(Debug, Clone)]
pub struct TypedExpr {
    pub kind: TypedKind,
    pub datatype: Datatype,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum TypedKind {
    Literal(Literal),
    Identifier {
        name: String,
        code: CodeFragment,
        binding: IdentifierBinding,
    },
    Binary {
        operation: Arc<dyn BinaryOperation>,
        left: Box<TypedExpr>,
        right: Box<TypedExpr>,
    },
    Unary {
        operation: Arc<dyn UnaryOperation>,
        operand: Box<TypedExpr>,
    },
    Call {
        function: Arc<dyn FlFunction>,
        args: Vec<TypedExpr>,
    },
    /// Implicit conversion inserted during resolution
    Convert {
        conversion: Arc<dyn Conversion>,
        operand: Box<TypedExpr>,
    },
    Parenthesized(Box<TypedExpr>),
}

impl TypedExpr {
    pub fn new(kind: TypedKind, datatype: Datatype, span: Span) -> Self {
        Self {
            kind,
            datatype,
            span,
        }
    }

    /// Wrap in a conversion to the conversion's target datatype, keeping
    /// the span.
    pub fn converted(self, conversion: Arc<dyn Conversion>) -> Self {
        let datatype = conversion.target();
        let span = self.span;
        Self::new(
            TypedKind::Convert {
                conversion,
                operand: Box::new(self),
            },
            datatype,
            span,
        )
    }
}
