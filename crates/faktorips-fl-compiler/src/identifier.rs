//! Identifier resolution.
//!
//! An identifier in a formula is either a parameter of the formula (a name,
//! possibly dotted like `policy.premium`, mapped to a datatype and the Java
//! code that reads it) or a constant such as the enum value `Gender.MALE`.
//! Resolvers are consulted in order; the first answer wins.

use crate::code::CodeFragment;
use crate::error::RegistrationError;
use crate::helper;
use faktorips_fl_ast::{Datatype, Value};
use indexmap::IndexMap;
use std::fmt;

/// What an identifier stands for at evaluation time.
#[derive(Debug, Clone, PartialEq)]
pub enum IdentifierBinding {
    /// Value supplied by the caller under this name
    Parameter(String),
    /// Value fixed at compile time
    Constant(Value),
}

/// A successfully resolved identifier.
#[derive(Debug, Clone)]
pub struct ResolvedIdentifier {
    pub datatype: Datatype,
    pub code: CodeFragment,
    pub binding: IdentifierBinding,
}

/// Maps identifier names to datatypes and code.
pub trait IdentifierResolver: Send + Sync + fmt::Debug {
    fn resolve(&self, name: &str) -> Option<ResolvedIdentifier>;
}

/// Formula parameters with their datatypes and Java access code.
#[derive(Debug, Default, Clone)]
pub struct ParameterResolver {
    parameters: IndexMap<String, (Datatype, CodeFragment)>,
}

impl ParameterResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter read in Java by `code`; when `code` is `None` the
    /// name itself is used.
    ///
    /// # Errors
    ///
    /// [`RegistrationError::DuplicateParameter`] if the name is taken.
    pub fn add(
        &mut self,
        name: &str,
        datatype: Datatype,
        code: Option<CodeFragment>,
    ) -> Result<(), RegistrationError> {
        if self.parameters.contains_key(name) {
            return Err(RegistrationError::DuplicateParameter(name.to_string()));
        }
        let code = code.unwrap_or_else(|| CodeFragment::from_source(name));
        self.parameters.insert(name.to_string(), (datatype, code));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Parameters in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Datatype)> {
        self.parameters
            .iter()
            .map(|(name, (datatype, _))| (name.as_str(), datatype))
    }
}

impl IdentifierResolver for ParameterResolver {
    fn resolve(&self, name: &str) -> Option<ResolvedIdentifier> {
        let (datatype, code) = self.parameters.get(name)?;
        Some(ResolvedIdentifier {
            datatype: datatype.clone(),
            code: code.clone(),
            binding: IdentifierBinding::Parameter(name.to_string()),
        })
    }
}

/// Resolves `EnumName.VALUE` against registered enum datatypes.
#[derive(Debug, Default, Clone)]
pub struct EnumValueResolver {
    enums: Vec<Datatype>,
}

impl EnumValueResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, datatype: Datatype) {
        self.enums.push(datatype);
    }
}

impl IdentifierResolver for EnumValueResolver {
    fn resolve(&self, name: &str) -> Option<ResolvedIdentifier> {
        let (type_name, id) = name.rsplit_once('.')?;
        let datatype = self
            .enums
            .iter()
            .find(|d| d.qualified_name() == type_name)?;
        let value = datatype.value_of(id)?;
        Some(ResolvedIdentifier {
            datatype: datatype.clone(),
            code: helper::new_instance(datatype, id),
            binding: IdentifierBinding::Constant(value),
        })
    }
}
