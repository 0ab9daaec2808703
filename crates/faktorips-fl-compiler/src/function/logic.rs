//! Logical functions: IF, ISEMPTY, NOT, AND, OR.
//!
//! IF and ISEMPTY exist once per datatype. Registering an enum datatype on
//! the compiler adds its overloads through [`If::new`] and
//! [`IsEmpty::new`].

use super::{ArgValues, FlFunction, FunctionSignature, localized};
use crate::catalog::Locale;
use crate::code::CodeFragment;
use crate::error::EvalError;
use crate::operand;
use faktorips_fl_ast::{Datatype, Value};
use std::sync::Arc;

/// Datatypes IF and ISEMPTY are defined for out of the box.
fn builtin_datatypes() -> impl Iterator<Item = Datatype> {
    Datatype::builtins().into_iter().filter(|d| !d.is_void())
}

pub(super) fn functions(locale: Locale) -> Vec<Arc<dyn FlFunction>> {
    let mut functions: Vec<Arc<dyn FlFunction>> = Vec::new();
    for datatype in builtin_datatypes() {
        functions.push(Arc::new(If::new(locale, datatype.clone())));
        functions.push(Arc::new(IsEmpty::new(locale, datatype)));
    }
    functions.push(Arc::new(Not::new(locale)));
    functions.push(Arc::new(Junction::new(locale, JunctionKind::And)));
    functions.push(Arc::new(Junction::new(locale, JunctionKind::Or)));
    functions
}

/// `IF(boolean; T; T) -> T`
#[derive(Debug)]
pub struct If {
    signature: FunctionSignature,
}

impl If {
    pub fn new(locale: Locale, datatype: Datatype) -> Self {
        Self {
            signature: FunctionSignature::new(
                localized(locale, "IF", "WENN"),
                vec![Datatype::primitive_boolean(), datatype.clone(), datatype.clone()],
                datatype,
            ),
        }
    }
}

impl FlFunction for If {
    fn signature(&self) -> &FunctionSignature {
        &self.signature
    }

    fn description(&self) -> &str {
        "Second argument if the condition holds, third otherwise"
    }

    fn generate(&self, args: Vec<CodeFragment>) -> CodeFragment {
        let [condition, then, otherwise] = args.as_slice() else {
            return CodeFragment::new();
        };
        let mut code = CodeFragment::from_source("(");
        code.append_fragment(condition)
            .append(" ? ")
            .append_fragment(then)
            .append(" : ")
            .append_fragment(otherwise)
            .append(")");
        code
    }

    fn evaluate(&self, args: &mut ArgValues<'_>) -> Result<Value, EvalError> {
        let condition = operand::boolean(&self.signature.name, &args.get(0)?)?;
        args.get(if condition { 1 } else { 2 })
    }
}

/// `ISEMPTY(T) -> boolean`
///
/// Null-object datatypes check for both `null` and the null object;
/// primitives are never empty.
#[derive(Debug)]
pub struct IsEmpty {
    signature: FunctionSignature,
}

impl IsEmpty {
    pub fn new(locale: Locale, datatype: Datatype) -> Self {
        Self {
            signature: FunctionSignature::new(
                localized(locale, "ISEMPTY", "ISTLEER"),
                vec![datatype],
                Datatype::primitive_boolean(),
            ),
        }
    }

    fn datatype(&self) -> &Datatype {
        &self.signature.params[0]
    }
}

impl FlFunction for IsEmpty {
    fn signature(&self) -> &FunctionSignature {
        &self.signature
    }

    fn description(&self) -> &str {
        "Whether the value is missing"
    }

    fn generate(&self, args: Vec<CodeFragment>) -> CodeFragment {
        let Some(value) = args.first() else {
            return CodeFragment::new();
        };
        if self.datatype().is_primitive() {
            return CodeFragment::from_source("false");
        }
        let value = value.as_operand();
        let mut code = CodeFragment::new();
        if self.datatype().supports_null_object() {
            code.append("(")
                .append_fragment(&value)
                .append(" == null || ")
                .append_fragment(&value)
                .append(".isNull())");
        } else {
            code.append("(").append_fragment(&value).append(" == null)");
        }
        code
    }

    fn evaluate(&self, args: &mut ArgValues<'_>) -> Result<Value, EvalError> {
        Ok(Value::Boolean(args.get(0)?.is_null()))
    }
}

/// `NOT(boolean)`
#[derive(Debug)]
pub struct Not {
    signature: FunctionSignature,
}

impl Not {
    pub fn new(locale: Locale) -> Self {
        Self {
            signature: FunctionSignature::new(
                localized(locale, "NOT", "NICHT"),
                vec![Datatype::primitive_boolean()],
                Datatype::primitive_boolean(),
            ),
        }
    }
}

impl FlFunction for Not {
    fn signature(&self) -> &FunctionSignature {
        &self.signature
    }

    fn description(&self) -> &str {
        "Logical negation"
    }

    fn generate(&self, args: Vec<CodeFragment>) -> CodeFragment {
        let Some(value) = args.first() else {
            return CodeFragment::new();
        };
        let mut code = CodeFragment::from_source("!");
        code.append_fragment(&value.as_operand());
        code
    }

    fn evaluate(&self, args: &mut ArgValues<'_>) -> Result<Value, EvalError> {
        let value = operand::boolean(&self.signature.name, &args.get(0)?)?;
        Ok(Value::Boolean(!value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JunctionKind {
    And,
    Or,
}

/// `AND(boolean...)` / `OR(boolean...)`, short-circuiting
#[derive(Debug)]
pub struct Junction {
    signature: FunctionSignature,
    kind: JunctionKind,
}

impl Junction {
    pub fn new(locale: Locale, kind: JunctionKind) -> Self {
        let name = match kind {
            JunctionKind::And => localized(locale, "AND", "UND"),
            JunctionKind::Or => localized(locale, "OR", "ODER"),
        };
        Self {
            signature: FunctionSignature::varargs(
                name,
                vec![Datatype::primitive_boolean()],
                Datatype::primitive_boolean(),
            ),
            kind,
        }
    }

    fn java_operator(&self) -> &'static str {
        match self.kind {
            JunctionKind::And => " && ",
            JunctionKind::Or => " || ",
        }
    }
}

impl FlFunction for Junction {
    fn signature(&self) -> &FunctionSignature {
        &self.signature
    }

    fn description(&self) -> &str {
        match self.kind {
            JunctionKind::And => "True if all arguments are true",
            JunctionKind::Or => "True if any argument is true",
        }
    }

    fn generate(&self, args: Vec<CodeFragment>) -> CodeFragment {
        if let [single] = args.as_slice() {
            return single.clone();
        }
        let mut code = CodeFragment::from_source("(");
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                code.append(self.java_operator());
            }
            code.append_fragment(&arg.as_operand());
        }
        code.append(")");
        code
    }

    fn evaluate(&self, args: &mut ArgValues<'_>) -> Result<Value, EvalError> {
        // AND stops at the first false, OR at the first true
        let decisive = self.kind == JunctionKind::Or;
        for i in 0..args.len() {
            if operand::boolean(&self.signature.name, &args.get(i)?)? == decisive {
                return Ok(Value::Boolean(decisive));
            }
        }
        Ok(Value::Boolean(!decisive))
    }
}
