//! The expression compiler.
//!
//! [`ExprCompiler`] owns everything a formula may refer to: operations,
//! conversions, functions, parameters, identifier resolvers and registered
//! datatypes. It is configured with `&mut self` and then compiles any
//! number of formulas through `&self`.
//!
//! # Design
//!
//! Compilation runs in three passes:
//!
//! 1. **Parse** - lexer and parser produce an untyped [`Expr`]; a failure
//!    yields exactly one lexical or syntax message
//! 2. **Resolve** - bottom-up typing that picks operations, functions and
//!    conversions ([`resolve`])
//! 3. **Emit** - Java code from the typed tree ([`emit`])
//!
//! Resolution reports every independent problem; a node whose child failed
//! stays silent.
//!
//! # Examples
//!
//! ```
//! # use faktorips_fl_compiler::*;
//! # use faktorips_fl_ast::Datatype;
//! let mut compiler = ExprCompiler::new(Locale::En);
//! compiler.add_parameter("age", Datatype::primitive_int(), None).unwrap();
//! let result = compiler.compile("IF(age >= 18; 1.5; 1)", &Datatype::decimal());
//! assert_eq!(
//!     result.code().unwrap().source(),
//!     r#"(age >= 18 ? Decimal.valueOf("1.5") : Decimal.valueOf(1))"#
//! );
//! ```

pub mod emit;
pub mod resolve;

use crate::catalog::{Locale, format_message};
use crate::code::CodeFragment;
use crate::conversion::{Conversion, ConversionTable};
use crate::error::RegistrationError;
use crate::function::logic::{If, IsEmpty};
use crate::function::{FlFunction, FunctionResolver, FunctionTable, builtin_functions};
use crate::identifier::{EnumValueResolver, IdentifierResolver, ParameterResolver};
use crate::message::{Message, MessageCode, MessageList};
use crate::operation::equals::EqualsObject;
use crate::operation::{BinaryOperation, OperationTable, UnaryOperation};
use crate::result::CompilationResult;
use faktorips_fl_ast::{BinaryOp, Datatype, DatatypeKind, DatatypeSet, Expr, ExprKind, walk_expr};
use faktorips_fl_parser::{ParseError, parse_formula};
use std::sync::Arc;
use tracing::{debug, warn};

/// Compiles formulas to Java code fragments.
#[derive(Debug)]
pub struct ExprCompiler {
    locale: Locale,
    operations: OperationTable,
    conversions: ConversionTable,
    functions: FunctionTable,
    parameters: ParameterResolver,
    resolvers: Vec<Arc<dyn IdentifierResolver>>,
    enums: EnumValueResolver,
    datatypes: DatatypeSet,
}

impl ExprCompiler {
    /// Create a compiler with the built-in operations, conversions and
    /// functions, the latter named in `locale`.
    pub fn new(locale: Locale) -> Self {
        let mut functions = FunctionTable::new();
        for function in builtin_functions(locale) {
            if let Err(e) = functions.register(function) {
                warn!(error = %e, "skipping built-in function");
            }
        }
        Self {
            locale,
            operations: OperationTable::with_builtins(),
            conversions: ConversionTable::with_builtins(),
            functions,
            parameters: ParameterResolver::new(),
            resolvers: Vec::new(),
            enums: EnumValueResolver::new(),
            datatypes: Datatype::builtins().into_iter().collect(),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn operations(&self) -> &OperationTable {
        &self.operations
    }

    pub fn conversions(&self) -> &ConversionTable {
        &self.conversions
    }

    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    pub fn parameters(&self) -> &ParameterResolver {
        &self.parameters
    }

    /// Known datatypes sorted by name.
    pub fn datatypes(&self) -> &DatatypeSet {
        &self.datatypes
    }

    /// Look up a built-in or registered datatype by qualified name.
    pub fn datatype(&self, name: &str) -> Option<Datatype> {
        self.datatypes
            .iter()
            .find(|d| d.qualified_name() == name)
            .cloned()
    }

    pub fn register_binary_operation(
        &mut self,
        operation: Arc<dyn BinaryOperation>,
    ) -> Result<(), RegistrationError> {
        self.operations.register_binary(operation)
    }

    pub fn register_unary_operation(
        &mut self,
        operation: Arc<dyn UnaryOperation>,
    ) -> Result<(), RegistrationError> {
        self.operations.register_unary(operation)
    }

    pub fn register_conversion(
        &mut self,
        conversion: Arc<dyn Conversion>,
    ) -> Result<(), RegistrationError> {
        self.conversions.register(conversion)
    }

    pub fn register_function(&mut self, function: Arc<dyn FlFunction>) -> Result<(), RegistrationError> {
        self.functions.register(function)
    }

    /// Register every function a library provides.
    ///
    /// Stops at the first conflicting signature; functions registered
    /// before it stay registered.
    pub fn add_function_resolver(
        &mut self,
        resolver: &dyn FunctionResolver,
    ) -> Result<(), RegistrationError> {
        for function in resolver.functions() {
            self.functions.register(function)?;
        }
        Ok(())
    }

    /// Make an enum or generic datatype known to formulas.
    ///
    /// Adds `=`/`!=`, `IF` and `ISEMPTY` for the datatype; enum values
    /// become resolvable as `Name.VALUE`.
    ///
    /// # Errors
    ///
    /// [`RegistrationError::DuplicateDatatype`] if a datatype with the same
    /// name is already known, or the duplicate error of a conflicting
    /// operation or function. The compiler is unchanged on error.
    pub fn register_datatype(&mut self, datatype: Datatype) -> Result<(), RegistrationError> {
        if self.datatypes.contains_name(datatype.qualified_name()) {
            return Err(RegistrationError::DuplicateDatatype(
                datatype.qualified_name().to_string(),
            ));
        }
        let equals: [Arc<dyn BinaryOperation>; 2] = [
            Arc::new(EqualsObject::new(BinaryOp::Eq, datatype.clone())),
            Arc::new(EqualsObject::new(BinaryOp::Ne, datatype.clone())),
        ];
        let functions: [Arc<dyn FlFunction>; 2] = [
            Arc::new(If::new(self.locale, datatype.clone())),
            Arc::new(IsEmpty::new(self.locale, datatype.clone())),
        ];
        // Nothing is registered unless everything can be
        for operation in &equals {
            self.operations.check_binary(operation.as_ref())?;
        }
        for function in &functions {
            self.functions.check(function.as_ref())?;
        }
        for operation in equals {
            self.operations.register_binary(operation)?;
        }
        for function in functions {
            self.functions.register(function)?;
        }
        if matches!(datatype.kind(), DatatypeKind::Enum(_)) {
            self.enums.add(datatype.clone());
        }
        debug!(datatype = %datatype, "registered datatype");
        self.datatypes.insert(datatype);
        Ok(())
    }

    /// Add a formula parameter; see [`ParameterResolver::add`].
    pub fn add_parameter(
        &mut self,
        name: &str,
        datatype: Datatype,
        code: Option<CodeFragment>,
    ) -> Result<(), RegistrationError> {
        self.parameters.add(name, datatype, code)
    }

    /// Add a resolver consulted after the parameters and before enum values.
    pub fn add_identifier_resolver(&mut self, resolver: Arc<dyn IdentifierResolver>) {
        self.resolvers.push(resolver);
    }

    /// Compile `formula` to a value of `expected`.
    ///
    /// The result is converted to `expected` if needed; `void` accepts any
    /// result.
    pub fn compile(&self, formula: &str, expected: &Datatype) -> CompilationResult {
        debug!(formula = %formula, expected = %expected, "compiling formula");
        self.compile_impl(formula, Some(expected))
    }

    /// Compile `formula` without an expected result datatype.
    pub fn compile_expression(&self, formula: &str) -> CompilationResult {
        debug!(formula = %formula, "compiling expression");
        self.compile_impl(formula, None)
    }

    fn compile_impl(&self, formula: &str, expected: Option<&Datatype>) -> CompilationResult {
        let expr = match parse_formula(formula) {
            Ok(expr) => expr,
            Err(err) => {
                let mut messages = MessageList::new();
                messages.add(self.parse_message(&err));
                debug!(error = %err, "formula does not parse");
                return CompilationResult::failed(messages);
            }
        };

        let identifiers = identifiers_used(&expr);
        let mut resolver = resolve::Resolver::new(self);
        let typed = resolver
            .resolve(&expr)
            .and_then(|typed| match expected {
                Some(expected) => resolver.convert_root(typed, expected),
                None => Some(typed),
            });
        let messages = resolver.into_messages();

        debug!(
            messages = messages.len(),
            successful = !messages.contains_error_msg(),
            "compiled formula"
        );
        CompilationResult::new(typed, messages, identifiers)
    }

    fn parse_message(&self, err: &ParseError) -> Message {
        let code = if err.is_lexical() {
            MessageCode::LexicalError
        } else {
            MessageCode::SyntaxError
        };
        let text = format_message(self.locale, code, &[&err.message]);
        Message::error(code, text, Some(err.span))
    }

    pub(crate) fn message(&self, code: MessageCode, args: &[&str]) -> String {
        format_message(self.locale, code, args)
    }

    pub(crate) fn resolve_identifier(&self, name: &str) -> Option<crate::identifier::ResolvedIdentifier> {
        self.parameters
            .resolve(name)
            .or_else(|| self.resolvers.iter().find_map(|r| r.resolve(name)))
            .or_else(|| self.enums.resolve(name))
    }
}

/// Identifiers a formula refers to, in source order without duplicates.
pub fn identifiers_used(expr: &Expr) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    walk_expr(expr, &mut |e| {
        if let ExprKind::Identifier(name) = &e.kind
            && !names.contains(name)
        {
            names.push(name.clone());
        }
    });
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gender() -> Datatype {
        Datatype::enumeration(
            "Gender",
            "org.example.Gender",
            vec!["MALE".into(), "FEMALE".into()],
            "valueOf",
        )
    }

    #[test]
    fn test_register_datatype_adds_equality_and_functions() {
        let mut compiler = ExprCompiler::new(Locale::En);
        compiler.register_datatype(gender()).unwrap();
        compiler.add_parameter("g", gender(), None).unwrap();

        let result = compiler.compile("g = Gender.MALE", &Datatype::primitive_boolean());
        assert!(result.is_successful(), "{}", result.messages());
        assert_eq!(
            result.code().unwrap().source(),
            "g.equals(Gender.valueOf(\"MALE\"))"
        );

        let result = compiler.compile("ISEMPTY(g)", &Datatype::primitive_boolean());
        assert_eq!(result.code().unwrap().source(), "(g == null)");
    }

    #[test]
    fn test_duplicate_datatype_rejected() {
        let mut compiler = ExprCompiler::new(Locale::En);
        compiler.register_datatype(gender()).unwrap();
        assert_eq!(
            compiler.register_datatype(gender()),
            Err(RegistrationError::DuplicateDatatype("Gender".into()))
        );
        assert_eq!(
            compiler.register_datatype(Datatype::decimal()),
            Err(RegistrationError::DuplicateDatatype("Decimal".into()))
        );
    }

    #[test]
    fn test_failed_datatype_registration_leaves_compiler_unchanged() {
        let mut compiler = ExprCompiler::new(Locale::En);
        compiler
            .register_binary_operation(Arc::new(EqualsObject::new(BinaryOp::Ne, gender())))
            .unwrap();
        compiler.add_parameter("g", gender(), None).unwrap();
        let operations = compiler.operations().binary_operations().count();
        let functions = compiler.functions().iter().count();

        assert_eq!(
            compiler.register_datatype(gender()),
            Err(RegistrationError::DuplicateBinaryOperation {
                operator: BinaryOp::Ne,
                lhs: "Gender".into(),
                rhs: "Gender".into(),
            })
        );
        assert!(compiler.datatype("Gender").is_none());
        assert_eq!(compiler.operations().binary_operations().count(), operations);
        assert_eq!(compiler.functions().iter().count(), functions);
        assert!(!compiler.compile_expression("g = g").is_successful());
        assert!(!compiler.compile_expression("Gender.MALE").is_successful());
    }

    #[test]
    fn test_all_builtin_functions_registered() {
        for locale in [Locale::En, Locale::De] {
            let compiler = ExprCompiler::new(locale);
            assert_eq!(
                compiler.functions().iter().count(),
                builtin_functions(locale).len()
            );
        }
    }

    #[test]
    fn test_identifiers_used() {
        let expr = faktorips_fl_parser::parse_formula("a + IF(b; a; c.d)").unwrap();
        assert_eq!(identifiers_used(&expr), vec!["a", "b", "c.d"]);
    }

    #[test]
    fn test_datatype_lookup() {
        let mut compiler = ExprCompiler::new(Locale::En);
        compiler.register_datatype(gender()).unwrap();
        assert_eq!(compiler.datatype("Gender"), Some(gender()));
        assert_eq!(compiler.datatype("int"), Some(Datatype::primitive_int()));
        assert!(compiler.datatype("Nope").is_none());
    }
}
