//! Outcome of compiling one formula.

use crate::code::CodeFragment;
use crate::compiler::emit::emit;
use crate::message::MessageList;
use crate::typed::TypedExpr;
use faktorips_fl_ast::Datatype;

/// Code, datatype and messages of a compiled formula.
///
/// A result is successful when its messages contain no error. Only
/// successful results carry code and a typed tree.
#[derive(Debug, Clone)]
pub struct CompilationResult {
    typed: Option<TypedExpr>,
    code: Option<CodeFragment>,
    messages: MessageList,
    identifiers_used: Vec<String>,
}

impl CompilationResult {
    pub(crate) fn new(
        typed: Option<TypedExpr>,
        messages: MessageList,
        identifiers_used: Vec<String>,
    ) -> Self {
        let typed = typed.filter(|_| !messages.contains_error_msg());
        let code = typed.as_ref().map(emit);
        Self {
            typed,
            code,
            messages,
            identifiers_used,
        }
    }

    pub(crate) fn failed(messages: MessageList) -> Self {
        Self::new(None, messages, Vec::new())
    }

    /// Java code of the formula; `None` on failure.
    pub fn code(&self) -> Option<&CodeFragment> {
        self.code.as_ref()
    }

    /// Datatype of the formula's value; `None` on failure.
    pub fn datatype(&self) -> Option<&Datatype> {
        self.typed.as_ref().map(|t| &t.datatype)
    }

    pub fn messages(&self) -> &MessageList {
        &self.messages
    }

    pub fn typed_expr(&self) -> Option<&TypedExpr> {
        self.typed.as_ref()
    }

    pub fn is_successful(&self) -> bool {
        !self.messages.contains_error_msg()
    }

    /// Identifiers the formula mentions, in source order, whether or not
    /// they resolved.
    pub fn identifiers_used(&self) -> &[String] {
        &self.identifiers_used
    }
}
