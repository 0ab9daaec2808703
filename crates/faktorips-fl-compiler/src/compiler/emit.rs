//! Java code emission from a typed tree.

use crate::code::CodeFragment;
use crate::helper;
use crate::typed::{TypedExpr, TypedKind};
use faktorips_fl_ast::{Datatype, Literal};

/// Java expression for `expr`.
pub fn emit(expr: &TypedExpr) -> CodeFragment {
    match &expr.kind {
        TypedKind::Literal(literal) => literal_code(literal),
        TypedKind::Identifier { code, .. } => code.clone(),
        TypedKind::Binary {
            operation,
            left,
            right,
        } => operation.generate(emit(left), emit(right)),
        TypedKind::Unary { operation, operand } => operation.generate(emit(operand)),
        TypedKind::Call { function, args } => function.generate(args.iter().map(emit).collect()),
        TypedKind::Convert {
            conversion,
            operand,
        } => conversion.generate(emit(operand)),
        TypedKind::Parenthesized(inner) => emit(inner).parenthesized(),
    }
}

fn literal_code(literal: &Literal) -> CodeFragment {
    match literal {
        Literal::Integer(n) => CodeFragment::from_source(n.to_string()),
        Literal::Decimal(text) => helper::new_instance(&Datatype::decimal(), text),
        Literal::Money(text) => helper::new_instance(&Datatype::money(), text),
        Literal::String(text) => helper::new_instance(&Datatype::string(), text),
        Literal::Boolean(b) => CodeFragment::from_source(b.to_string()),
        Literal::Null => CodeFragment::from_source("null"),
    }
}
