//! Compiler setup from YAML.
//!
//! A configuration names the message locale, the enum and generic
//! datatypes formulas may use, and the parameters they can reference:
//!
//! ```yaml
//! locale: de
//! enums:
//!   - name: Gender
//!     java_class: org.example.Gender
//!     values: [MALE, FEMALE]
//!     value_of_method: getGender
//! datatypes:
//!   - name: PostalCode
//!     java_class: org.example.PostalCode
//!     pattern: "[0-9]{5}"
//! parameters:
//!   - name: policy.premium
//!     datatype: Money
//!     code: policy.getPremium()
//!   - name: insured.gender
//!     datatype: Gender
//! ```
//!
//! Datatypes are registered before parameters, so parameters may use them.

use faktorips_fl_ast::Datatype;
use faktorips_fl_compiler::{CodeFragment, ExprCompiler, Locale, RegistrationError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid pattern for datatype '{datatype}': {source}")]
    Pattern {
        datatype: String,
        #[source]
        source: regex::Error,
    },

    #[error("parameter '{parameter}' has unknown datatype '{datatype}'")]
    UnknownDatatype { parameter: String, datatype: String },

    #[error(transparent)]
    Registration(#[from] RegistrationError),
}

/// Enum datatype declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumConfig {
    /// Name used in formulas, e.g. `Gender` in `Gender.MALE`
    pub name: String,
    pub java_class: String,
    /// Value ids in declaration order
    pub values: Vec<String>,
    #[serde(default = "default_value_of_method")]
    pub value_of_method: String,
}

/// Generic value datatype declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatatypeConfig {
    pub name: String,
    pub java_class: String,
    #[serde(default = "default_value_of_method")]
    pub value_of_method: String,
    /// Texts the datatype can parse must match this regex entirely
    #[serde(default = "default_pattern")]
    pub pattern: String,
}

/// Formula parameter declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterConfig {
    pub name: String,
    /// Built-in or configured datatype name
    pub datatype: String,
    /// Java code the parameter compiles to; defaults to its name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Everything needed to build an [`ExprCompiler`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    pub locale: Locale,
    pub enums: Vec<EnumConfig>,
    pub datatypes: Vec<DatatypeConfig>,
    pub parameters: Vec<ParameterConfig>,
}

fn default_value_of_method() -> String {
    "valueOf".to_string()
}

fn default_pattern() -> String {
    ".*".to_string()
}

impl CompilerConfig {
    /// Load a configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        debug!(
            path = %path.display(),
            enums = config.enums.len(),
            datatypes = config.datatypes.len(),
            parameters = config.parameters.len(),
            "loaded compiler config"
        );
        Ok(config)
    }

    /// Create a compiler and register everything this configuration
    /// declares.
    pub fn build_compiler(&self) -> Result<ExprCompiler, ConfigError> {
        let mut compiler = ExprCompiler::new(self.locale);
        self.apply(&mut compiler)?;
        Ok(compiler)
    }

    /// Register this configuration's datatypes and parameters on an
    /// existing compiler. The compiler's locale is left unchanged.
    pub fn apply(&self, compiler: &mut ExprCompiler) -> Result<(), ConfigError> {
        for spec in &self.enums {
            compiler.register_datatype(Datatype::enumeration(
                &spec.name,
                &spec.java_class,
                spec.values.clone(),
                &spec.value_of_method,
            ))?;
        }

        for spec in &self.datatypes {
            let datatype = Datatype::generic(
                &spec.name,
                &spec.java_class,
                &spec.value_of_method,
                &spec.pattern,
            )
            .map_err(|source| ConfigError::Pattern {
                datatype: spec.name.clone(),
                source,
            })?;
            compiler.register_datatype(datatype)?;
        }

        for spec in &self.parameters {
            let datatype =
                compiler
                    .datatype(&spec.datatype)
                    .ok_or_else(|| ConfigError::UnknownDatatype {
                        parameter: spec.name.clone(),
                        datatype: spec.datatype.clone(),
                    })?;
            let code = spec.code.as_deref().map(CodeFragment::from_source);
            compiler.add_parameter(&spec.name, datatype, code)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_deserialize() {
        let yaml = r#"
locale: de
enums:
  - name: Gender
    java_class: org.example.Gender
    values: [MALE, FEMALE]
parameters:
  - name: g
    datatype: Gender
"#;
        let config: CompilerConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.locale, Locale::De);
        assert_eq!(config.enums[0].value_of_method, "valueOf");
        assert_eq!(config.parameters[0].code, None);
        assert!(config.datatypes.is_empty());
    }

    #[test]
    fn test_default_config_builds_plain_compiler() {
        let compiler = CompilerConfig::default().build_compiler().unwrap();
        assert_eq!(compiler.locale(), Locale::En);
        assert!(compiler.parameters().is_empty());
    }

    #[test]
    fn test_invalid_pattern() {
        let config = CompilerConfig {
            datatypes: vec![DatatypeConfig {
                name: "Broken".into(),
                java_class: "org.example.Broken".into(),
                value_of_method: default_value_of_method(),
                pattern: "[0-9".into(),
            }],
            ..Default::default()
        };
        assert!(matches!(
            config.build_compiler(),
            Err(ConfigError::Pattern { datatype, .. }) if datatype == "Broken"
        ));
    }
}
