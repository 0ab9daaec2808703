//! Bottom-up resolution of an untyped [`Expr`] into a [`TypedExpr`].
//!
//! Every node resolves all of its children first. A node whose children all
//! resolved picks its operation, function or binding and inserts the
//! conversions the selection requires. A node that cannot be resolved
//! records one error message and yields `None`; its ancestors then yield
//! `None` silently, while its siblings are still checked.

use super::ExprCompiler;
use crate::message::{Message, MessageCode, MessageList};
use crate::overload::{ArgConversions, Selection};
use crate::typed::{TypedExpr, TypedKind};
use faktorips_fl_ast::{BinaryOp, Datatype, Expr, ExprKind, Literal, Span, UnaryOp};
use tracing::trace;

pub(crate) struct Resolver<'c> {
    compiler: &'c ExprCompiler,
    messages: MessageList,
}

impl<'c> Resolver<'c> {
    pub(crate) fn new(compiler: &'c ExprCompiler) -> Self {
        Self {
            compiler,
            messages: MessageList::new(),
        }
    }

    pub(crate) fn into_messages(self) -> MessageList {
        self.messages
    }

    fn error(&mut self, code: MessageCode, args: &[&str], span: Span) {
        let text = self.compiler.message(code, args);
        self.messages.add(Message::error(code, text, Some(span)));
    }

    pub(crate) fn resolve(&mut self, expr: &Expr) -> Option<TypedExpr> {
        match &expr.kind {
            ExprKind::Literal(literal) => Some(TypedExpr::new(
                TypedKind::Literal(literal.clone()),
                literal_datatype(literal),
                expr.span,
            )),
            ExprKind::Identifier(name) => self.resolve_identifier(name, expr.span),
            ExprKind::Binary { op, left, right } => {
                let left = self.resolve(left);
                let right = self.resolve(right);
                self.resolve_binary(*op, left?, right?, expr.span)
            }
            ExprKind::Unary { op, operand } => {
                let operand = self.resolve(operand)?;
                self.resolve_unary(*op, operand, expr.span)
            }
            ExprKind::Call {
                name,
                name_span,
                args,
            } => self.resolve_call(name, *name_span, args, expr.span),
            ExprKind::Parenthesized(inner) => {
                let inner = self.resolve(inner)?;
                let datatype = inner.datatype.clone();
                Some(TypedExpr::new(
                    TypedKind::Parenthesized(Box::new(inner)),
                    datatype,
                    expr.span,
                ))
            }
        }
    }

    fn resolve_identifier(&mut self, name: &str, span: Span) -> Option<TypedExpr> {
        let Some(resolved) = self.compiler.resolve_identifier(name) else {
            self.error(MessageCode::UndefinedIdentifier, &[name], span);
            return None;
        };
        trace!(identifier = %name, datatype = %resolved.datatype, "resolved identifier");
        Some(TypedExpr::new(
            TypedKind::Identifier {
                name: name.to_string(),
                code: resolved.code,
                binding: resolved.binding,
            },
            resolved.datatype,
            span,
        ))
    }

    fn resolve_binary(
        &mut self,
        op: BinaryOp,
        left: TypedExpr,
        right: TypedExpr,
        span: Span,
    ) -> Option<TypedExpr> {
        let selection = self.compiler.operations.resolve_binary(
            op,
            &left.datatype,
            &right.datatype,
            &self.compiler.conversions,
        );
        let types = format!("{}, {}", left.datatype, right.datatype);
        match selection {
            Selection::Unique { item, conversions } => {
                let signature = item.signature();
                trace!(operation = %signature, "resolved binary operation");
                let mut operands = apply_conversions(vec![left, right], conversions).into_iter();
                let (Some(left), Some(right)) = (operands.next(), operands.next()) else {
                    return None;
                };
                Some(TypedExpr::new(
                    TypedKind::Binary {
                        operation: item,
                        left: Box::new(left),
                        right: Box::new(right),
                    },
                    signature.result,
                    span,
                ))
            }
            Selection::Ambiguous(candidates) => {
                let candidates = candidates
                    .iter()
                    .map(|c| c.signature().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                self.error(
                    MessageCode::AmbiguousOperation,
                    &[op.symbol(), &types, &candidates],
                    span,
                );
                None
            }
            Selection::NoMatch => {
                self.error(MessageCode::UndefinedOperator, &[op.symbol(), &types], span);
                None
            }
        }
    }

    fn resolve_unary(&mut self, op: UnaryOp, operand: TypedExpr, span: Span) -> Option<TypedExpr> {
        let selection =
            self.compiler
                .operations
                .resolve_unary(op, &operand.datatype, &self.compiler.conversions);
        match selection {
            Selection::Unique { item, conversions } => {
                let signature = item.signature();
                trace!(operation = %signature, "resolved unary operation");
                let operand = apply_conversions(vec![operand], conversions).pop()?;
                Some(TypedExpr::new(
                    TypedKind::Unary {
                        operation: item,
                        operand: Box::new(operand),
                    },
                    signature.result,
                    span,
                ))
            }
            Selection::Ambiguous(candidates) => {
                let candidates = candidates
                    .iter()
                    .map(|c| c.signature().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                let operand_type = operand.datatype.to_string();
                self.error(
                    MessageCode::AmbiguousOperation,
                    &[op.symbol(), &operand_type, &candidates],
                    span,
                );
                None
            }
            Selection::NoMatch => {
                let operand_type = operand.datatype.to_string();
                self.error(MessageCode::UndefinedOperator, &[op.symbol(), &operand_type], span);
                None
            }
        }
    }

    fn resolve_call(
        &mut self,
        name: &str,
        name_span: Span,
        args: &[Expr],
        span: Span,
    ) -> Option<TypedExpr> {
        let known = self.compiler.functions.contains_name(name);
        if !known {
            self.error(MessageCode::UndefinedFunction, &[name], name_span);
        }

        let resolved: Vec<Option<TypedExpr>> = args.iter().map(|arg| self.resolve(arg)).collect();
        if !known {
            return None;
        }
        let args: Vec<TypedExpr> = resolved.into_iter().collect::<Option<_>>()?;
        let arg_types: Vec<Datatype> = args.iter().map(|a| a.datatype.clone()).collect();
        let types = arg_types
            .iter()
            .map(Datatype::to_string)
            .collect::<Vec<_>>()
            .join("; ");

        let selection =
            self.compiler
                .functions
                .resolve(name, &arg_types, &self.compiler.conversions)?;
        match selection {
            Selection::Unique { item, conversions } => {
                let signature = item.signature();
                trace!(function = %signature, "resolved function call");
                let datatype = signature.result.clone();
                Some(TypedExpr::new(
                    TypedKind::Call {
                        function: item,
                        args: apply_conversions(args, conversions),
                    },
                    datatype,
                    span,
                ))
            }
            Selection::Ambiguous(candidates) => {
                let candidates = candidates
                    .iter()
                    .map(|c| c.signature().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                self.error(
                    MessageCode::AmbiguousFunctionCall,
                    &[name, &types, &candidates],
                    span,
                );
                None
            }
            Selection::NoMatch => {
                self.error(MessageCode::WrongArgumentTypes, &[name, &types], span);
                None
            }
        }
    }

    /// Convert the formula's value to `expected`.
    pub(crate) fn convert_root(&mut self, typed: TypedExpr, expected: &Datatype) -> Option<TypedExpr> {
        if expected.is_void() || typed.datatype == *expected {
            return Some(typed);
        }
        match self.compiler.conversions.find(&typed.datatype, expected) {
            Some(conversion) => Some(typed.converted(conversion)),
            None => {
                let actual = typed.datatype.to_string();
                let expected = expected.to_string();
                self.error(MessageCode::WrongResultType, &[&actual, &expected], typed.span);
                None
            }
        }
    }
}

fn literal_datatype(literal: &Literal) -> Datatype {
    match literal {
        Literal::Integer(_) => Datatype::primitive_int(),
        Literal::Decimal(_) => Datatype::decimal(),
        Literal::Money(_) => Datatype::money(),
        Literal::String(_) => Datatype::string(),
        Literal::Boolean(_) => Datatype::primitive_boolean(),
        Literal::Null => Datatype::null(),
    }
}

fn apply_conversions(operands: Vec<TypedExpr>, conversions: ArgConversions) -> Vec<TypedExpr> {
    operands
        .into_iter()
        .zip(conversions)
        .map(|(operand, conversion)| match conversion {
            Some(conversion) => operand.converted(conversion),
            None => operand,
        })
        .collect()
}
