//! Formula functions.
//!
//! A function is called by name with `;`-separated arguments, e.g.
//! `ROUND(amount; 2)`. Each overload is one [`FlFunction`] with a fixed
//! [`FunctionSignature`]. The [`FunctionTable`] groups overloads by name
//! (case-insensitively) and selects one for the argument datatypes the same
//! way operators are resolved.
//!
//! # Design
//!
//! - Built-in functions carry their localized name (`IF` / `WENN`)
//! - External libraries plug in through [`FunctionResolver`]
//! - Evaluation receives [`ArgValues`], which evaluates arguments on
//!   demand so `IF`, `AND` and `OR` only touch the branches they need
//!
//! ## Module Organization
//!
//! - `builtin` - numeric functions (ABS, MAX, MIN, ROUND*, WHOLENUMBER)
//! - `logic` - IF, ISEMPTY, NOT, AND, OR

pub mod builtin;
pub mod logic;

use crate::catalog::Locale;
use crate::code::CodeFragment;
use crate::conversion::ConversionTable;
use crate::error::{EvalError, RegistrationError};
use crate::overload::{self, Selection};
use faktorips_fl_ast::{Datatype, Value};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Name, parameters and result of one function overload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    pub name: String,
    pub params: Vec<Datatype>,
    pub result: Datatype,
    /// The last parameter repeats one or more times
    pub varargs: bool,
}

impl FunctionSignature {
    pub fn new(name: impl Into<String>, params: Vec<Datatype>, result: Datatype) -> Self {
        Self {
            name: name.into(),
            params,
            result,
            varargs: false,
        }
    }

    /// Signature whose last parameter accepts any number (at least one) of
    /// arguments.
    pub fn varargs(name: impl Into<String>, params: Vec<Datatype>, result: Datatype) -> Self {
        Self {
            varargs: true,
            ..Self::new(name, params, result)
        }
    }

    /// Parameter datatypes for a call with `arg_count` arguments, or `None`
    /// if the arity does not fit.
    pub fn params_for(&self, arg_count: usize) -> Option<Vec<Datatype>> {
        if !self.varargs {
            return (arg_count == self.params.len()).then(|| self.params.clone());
        }
        let (last, fixed) = self.params.split_last()?;
        if arg_count < self.params.len() {
            return None;
        }
        let mut params = fixed.to_vec();
        params.resize(arg_count, last.clone());
        Some(params)
    }

    fn params_text(&self) -> String {
        let mut text = self
            .params
            .iter()
            .map(Datatype::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        if self.varargs {
            text.push_str("...");
        }
        text
    }
}

impl fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}) -> {}", self.name, self.params_text(), self.result)
    }
}

/// Arguments of a function call, evaluated on demand.
pub struct ArgValues<'a> {
    len: usize,
    eval: Box<dyn FnMut(usize) -> Result<Value, EvalError> + 'a>,
}

impl<'a> ArgValues<'a> {
    pub fn new(len: usize, eval: impl FnMut(usize) -> Result<Value, EvalError> + 'a) -> Self {
        Self {
            len,
            eval: Box::new(eval),
        }
    }

    /// Arguments already evaluated.
    pub fn from_values(values: &'a [Value]) -> Self {
        Self::new(values.len(), move |i| Ok(values[i].clone()))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Evaluate argument `index`.
    pub fn get(&mut self, index: usize) -> Result<Value, EvalError> {
        if index >= self.len {
            return Err(EvalError::InvalidArgument {
                operation: "function call".into(),
                message: format!("argument {} of {} requested", index + 1, self.len),
            });
        }
        (self.eval)(index)
    }
}

impl fmt::Debug for ArgValues<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgValues").field("len", &self.len).finish()
    }
}

/// One overload of a formula function.
pub trait FlFunction: Send + Sync + fmt::Debug {
    /// Name, parameters and result datatype.
    fn signature(&self) -> &FunctionSignature;

    /// One-line description for listings.
    fn description(&self) -> &str {
        ""
    }

    /// Java code from the arguments' code, one fragment per argument.
    fn generate(&self, args: Vec<CodeFragment>) -> CodeFragment;

    /// Apply the function.
    fn evaluate(&self, args: &mut ArgValues<'_>) -> Result<Value, EvalError>;
}

/// Source of functions contributed by a library.
pub trait FunctionResolver: Send + Sync {
    fn functions(&self) -> Vec<Arc<dyn FlFunction>>;
}

/// The built-in function library in `locale`.
pub fn builtin_functions(locale: Locale) -> Vec<Arc<dyn FlFunction>> {
    let mut functions = builtin::functions(locale);
    functions.extend(logic::functions(locale));
    functions
}

/// Pick the English or German name of a built-in function.
pub(crate) fn localized(locale: Locale, en: &'static str, de: &'static str) -> &'static str {
    match locale {
        Locale::En => en,
        Locale::De => de,
    }
}

/// Functions grouped by upper-cased name.
#[derive(Debug, Default)]
pub struct FunctionTable {
    functions: IndexMap<String, Vec<Arc<dyn FlFunction>>>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an overload.
    ///
    /// # Errors
    ///
    /// [`RegistrationError::DuplicateFunction`] if an overload with the same
    /// name and parameters exists.
    pub fn register(&mut self, function: Arc<dyn FlFunction>) -> Result<(), RegistrationError> {
        self.check(function.as_ref())?;
        let name = function.signature().name.to_uppercase();
        self.functions.entry(name).or_default().push(function);
        Ok(())
    }

    /// Fail like [`register`](Self::register) would, without registering
    /// anything.
    pub fn check(&self, function: &dyn FlFunction) -> Result<(), RegistrationError> {
        let signature = function.signature();
        let Some(overloads) = self.functions.get(&signature.name.to_uppercase()) else {
            return Ok(());
        };
        let duplicate = overloads.iter().any(|existing| {
            let other = existing.signature();
            other.params == signature.params && other.varargs == signature.varargs
        });
        if duplicate {
            return Err(RegistrationError::DuplicateFunction {
                name: signature.name.clone(),
                params: signature.params_text(),
            });
        }
        Ok(())
    }

    /// Whether any overload has this name.
    pub fn contains_name(&self, name: &str) -> bool {
        self.functions.contains_key(&name.to_uppercase())
    }

    /// Select the overload of `name` for `args`; `None` if the name is
    /// unknown.
    pub fn resolve(
        &self,
        name: &str,
        args: &[Datatype],
        conversions: &ConversionTable,
    ) -> Option<Selection<Arc<dyn FlFunction>>> {
        let overloads = self.functions.get(&name.to_uppercase())?;
        let candidates = overloads.iter().filter_map(|function| {
            let params = function.signature().params_for(args.len())?;
            Some((Arc::clone(function), params))
        });
        Some(overload::select(candidates, args, conversions))
    }

    /// All overloads in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn FlFunction>> {
        self.functions.values().flatten()
    }
}
