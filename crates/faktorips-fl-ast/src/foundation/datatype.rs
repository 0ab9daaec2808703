//! Datatype identities.
//!
//! A [`Datatype`] describes the type of a formula value. It is an immutable,
//! cheaply clonable handle; equality, hashing and ordering use the qualified
//! name only, so two separately constructed datatypes with the same name are
//! interchangeable as map keys. [`Datatype::same_instance`] distinguishes
//! them by allocation when identity matters (see
//! [`DatatypeSet`](super::DatatypeSet)).
//!
//! # Design
//!
//! - Built-in value datatypes (Boolean, Decimal, Integer, Money, String)
//!   and the primitives `int`/`boolean` are process-wide singletons
//! - Enum and generic datatypes are created from configuration
//! - Capabilities are expressed by [`DatatypeKind`] rather than a trait
//!   hierarchy; all variants answer the same queries
//!
//! # Examples
//!
//! ```
//! # use faktorips_fl_ast::foundation::datatype::*;
//! let int = Datatype::primitive_int();
//! assert!(int.is_primitive());
//! assert_eq!(int.wrapper(), Some(Datatype::integer()));
//! assert!(Datatype::decimal().is_parsable("3.5"));
//! ```

use super::money::Money;
use super::value::Value;
use regex::Regex;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, LazyLock};

/// Built-in value types with Java counterparts in the runtime library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinValue {
    Boolean,
    Decimal,
    Integer,
    Money,
    String,
}

/// An enumeration datatype: a fixed set of value ids.
#[derive(Debug, Clone)]
pub struct EnumDatatype {
    /// Value ids in declaration order
    pub values: Vec<String>,
    /// Static lookup method on the Java class (e.g., `valueOf`)
    pub value_of_method: String,
}

/// A generic value datatype backed by a Java class with a parse method.
#[derive(Debug, Clone)]
pub struct GenericDatatype {
    /// Static factory method on the Java class (e.g., `valueOf`)
    pub value_of_method: String,
    /// Texts accepted by the factory method, anchored at both ends
    pub pattern: Regex,
}

/// Capability set of a datatype.
#[derive(Debug, Clone)]
pub enum DatatypeKind {
    /// Built-in value datatype
    Value(BuiltinValue),
    /// Java primitive with its wrapper value datatype
    Primitive {
        value: BuiltinValue,
        wrapper: Datatype,
    },
    /// Enumeration datatype
    Enum(EnumDatatype),
    /// Generic value datatype
    Generic(GenericDatatype),
    /// Type of formulas that produce nothing; accepts any result
    Void,
    /// Type of the `null` literal
    Null,
}

#[derive(Debug)]
struct DatatypeDef {
    qualified_name: String,
    java_class: String,
    kind: DatatypeKind,
}

/// Immutable datatype handle.
#[derive(Clone)]
pub struct Datatype(Arc<DatatypeDef>);

static BOOLEAN: LazyLock<Datatype> =
    LazyLock::new(|| Datatype::builtin("Boolean", "java.lang.Boolean", BuiltinValue::Boolean));
static DECIMAL: LazyLock<Datatype> = LazyLock::new(|| {
    Datatype::builtin(
        "Decimal",
        "org.faktorips.values.Decimal",
        BuiltinValue::Decimal,
    )
});
static INTEGER: LazyLock<Datatype> =
    LazyLock::new(|| Datatype::builtin("Integer", "java.lang.Integer", BuiltinValue::Integer));
static MONEY: LazyLock<Datatype> = LazyLock::new(|| {
    Datatype::builtin("Money", "org.faktorips.values.Money", BuiltinValue::Money)
});
static STRING: LazyLock<Datatype> =
    LazyLock::new(|| Datatype::builtin("String", "java.lang.String", BuiltinValue::String));
static PRIMITIVE_INT: LazyLock<Datatype> = LazyLock::new(|| {
    Datatype::from_def("int", "int", DatatypeKind::Primitive {
        value: BuiltinValue::Integer,
        wrapper: INTEGER.clone(),
    })
});
static PRIMITIVE_BOOLEAN: LazyLock<Datatype> = LazyLock::new(|| {
    Datatype::from_def("boolean", "boolean", DatatypeKind::Primitive {
        value: BuiltinValue::Boolean,
        wrapper: BOOLEAN.clone(),
    })
});
static VOID: LazyLock<Datatype> =
    LazyLock::new(|| Datatype::from_def("void", "void", DatatypeKind::Void));
static NULL: LazyLock<Datatype> =
    LazyLock::new(|| Datatype::from_def("null", "java.lang.Object", DatatypeKind::Null));

impl Datatype {
    fn from_def(qualified_name: &str, java_class: &str, kind: DatatypeKind) -> Self {
        Self(Arc::new(DatatypeDef {
            qualified_name: qualified_name.to_string(),
            java_class: java_class.to_string(),
            kind,
        }))
    }

    fn builtin(qualified_name: &str, java_class: &str, value: BuiltinValue) -> Self {
        Self::from_def(qualified_name, java_class, DatatypeKind::Value(value))
    }

    /// `Boolean` wrapper datatype.
    pub fn boolean() -> Self {
        BOOLEAN.clone()
    }

    /// `Decimal` value datatype (`org.faktorips.values.Decimal`).
    pub fn decimal() -> Self {
        DECIMAL.clone()
    }

    /// `Integer` wrapper datatype.
    pub fn integer() -> Self {
        INTEGER.clone()
    }

    /// `Money` value datatype (`org.faktorips.values.Money`).
    pub fn money() -> Self {
        MONEY.clone()
    }

    /// `String` datatype.
    pub fn string() -> Self {
        STRING.clone()
    }

    /// Primitive `int`.
    pub fn primitive_int() -> Self {
        PRIMITIVE_INT.clone()
    }

    /// Primitive `boolean`.
    pub fn primitive_boolean() -> Self {
        PRIMITIVE_BOOLEAN.clone()
    }

    /// `void`: accepts any formula result.
    pub fn void() -> Self {
        VOID.clone()
    }

    /// Type of the `null` literal.
    pub fn null() -> Self {
        NULL.clone()
    }

    /// All built-in datatypes, in a fixed order.
    pub fn builtins() -> Vec<Datatype> {
        vec![
            Self::boolean(),
            Self::decimal(),
            Self::integer(),
            Self::money(),
            Self::string(),
            Self::primitive_int(),
            Self::primitive_boolean(),
            Self::void(),
        ]
    }

    /// Look up a built-in datatype by qualified name.
    pub fn builtin_by_name(name: &str) -> Option<Datatype> {
        Self::builtins()
            .into_iter()
            .find(|datatype| datatype.qualified_name() == name)
    }

    /// Create an enumeration datatype.
    ///
    /// # Parameters
    ///
    /// - `qualified_name`: datatype name used in formulas (e.g., `Gender`)
    /// - `java_class`: fully qualified Java class name
    /// - `values`: value ids in declaration order
    /// - `value_of_method`: static method that maps an id to the Java value
    pub fn enumeration(
        qualified_name: &str,
        java_class: &str,
        values: Vec<String>,
        value_of_method: &str,
    ) -> Self {
        Self::from_def(
            qualified_name,
            java_class,
            DatatypeKind::Enum(EnumDatatype {
                values,
                value_of_method: value_of_method.to_string(),
            }),
        )
    }

    /// Create a generic value datatype whose parsable texts match `pattern`
    /// as a whole.
    ///
    /// # Errors
    ///
    /// The regex error if `pattern` is not a valid regular expression.
    pub fn generic(
        qualified_name: &str,
        java_class: &str,
        value_of_method: &str,
        pattern: &str,
    ) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!("^(?:{pattern})$"))?;
        Ok(Self::from_def(
            qualified_name,
            java_class,
            DatatypeKind::Generic(GenericDatatype {
                value_of_method: value_of_method.to_string(),
                pattern,
            }),
        ))
    }

    /// Qualified name; the sole key of equality and ordering.
    pub fn qualified_name(&self) -> &str {
        &self.0.qualified_name
    }

    /// Fully qualified Java class name (primitive name for primitives).
    pub fn java_class(&self) -> &str {
        &self.0.java_class
    }

    /// Unqualified Java class name.
    pub fn java_simple_name(&self) -> &str {
        let class = self.java_class();
        class.rsplit('.').next().unwrap_or(class)
    }

    /// Capability set.
    pub fn kind(&self) -> &DatatypeKind {
        &self.0.kind
    }

    /// The built-in value this datatype represents, primitive or not.
    pub fn builtin_value(&self) -> Option<BuiltinValue> {
        match self.kind() {
            DatatypeKind::Value(value) | DatatypeKind::Primitive { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// Whether this is a Java primitive.
    pub fn is_primitive(&self) -> bool {
        matches!(self.kind(), DatatypeKind::Primitive { .. })
    }

    /// Wrapper datatype of a primitive.
    pub fn wrapper(&self) -> Option<Datatype> {
        match self.kind() {
            DatatypeKind::Primitive { wrapper, .. } => Some(wrapper.clone()),
            _ => None,
        }
    }

    /// Whether this datatype is an enumeration.
    pub fn is_enum(&self) -> bool {
        matches!(self.kind(), DatatypeKind::Enum(_))
    }

    /// Whether this is `void`.
    pub fn is_void(&self) -> bool {
        matches!(self.kind(), DatatypeKind::Void)
    }

    /// Whether this is the type of the `null` literal.
    pub fn is_null(&self) -> bool {
        matches!(self.kind(), DatatypeKind::Null)
    }

    /// Whether missing values are represented by a null object
    /// (`Decimal.NULL`, `Money.NULL`) instead of Java `null`.
    pub fn supports_null_object(&self) -> bool {
        matches!(
            self.kind(),
            DatatypeKind::Value(BuiltinValue::Decimal | BuiltinValue::Money)
        )
    }

    /// Whether `text` is a valid literal of this datatype.
    pub fn is_parsable(&self, text: &str) -> bool {
        self.value_of(text).is_some()
    }

    /// Parse `text` into a value of this datatype.
    ///
    /// Returns `None` for unparsable text and for `void`/`null`.
    pub fn value_of(&self, text: &str) -> Option<Value> {
        match self.kind() {
            DatatypeKind::Value(value) | DatatypeKind::Primitive { value, .. } => match value {
                BuiltinValue::Boolean => match text {
                    "true" => Some(Value::Boolean(true)),
                    "false" => Some(Value::Boolean(false)),
                    _ => None,
                },
                BuiltinValue::Decimal => text.parse::<Decimal>().ok().map(Value::Decimal),
                BuiltinValue::Integer => text.parse::<i32>().ok().map(Value::Integer),
                BuiltinValue::Money => Money::parse(text).map(Value::Money),
                BuiltinValue::String => Some(Value::String(text.to_string())),
            },
            DatatypeKind::Enum(spec) => spec
                .values
                .iter()
                .any(|id| id == text)
                .then(|| Value::Enum {
                    datatype: self.clone(),
                    id: text.to_string(),
                }),
            DatatypeKind::Generic(spec) => spec.pattern.is_match(text).then(|| Value::Generic {
                datatype: self.clone(),
                text: text.to_string(),
            }),
            DatatypeKind::Void | DatatypeKind::Null => None,
        }
    }

    /// Whether both handles point at the same allocation.
    pub fn same_instance(&self, other: &Datatype) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Datatype {
    fn eq(&self, other: &Self) -> bool {
        self.qualified_name() == other.qualified_name()
    }
}

impl Eq for Datatype {}

impl Hash for Datatype {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.qualified_name().hash(state);
    }
}

impl PartialOrd for Datatype {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Datatype {
    fn cmp(&self, other: &Self) -> Ordering {
        self.qualified_name().cmp(other.qualified_name())
    }
}

impl fmt::Debug for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Datatype({})", self.qualified_name())
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.qualified_name())
    }
}

/// Order optional datatypes by qualified name, `None` first.
///
/// Two datatypes with the same name compare `Equal` even when they are
/// distinct instances.
pub fn compare_datatypes(a: Option<&Datatype>, b: Option<&Datatype>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.cmp(b),
    }
}
