//! Foundation types shared across the compiler pipeline.
//!
//! - [`span`]: byte ranges into the formula text
//! - [`ops`]: operator enums
//! - [`datatype`]: datatype identities and their comparator
//! - [`datatype_set`]: sorted datatype collection keeping distinct instances
//! - [`money`]: currency amounts
//! - [`value`]: runtime values produced by evaluation

pub mod datatype;
pub mod datatype_set;
pub mod money;
pub mod ops;
pub mod span;
pub mod value;

pub use datatype::{
    BuiltinValue, Datatype, DatatypeKind, EnumDatatype, GenericDatatype, compare_datatypes,
};
pub use datatype_set::DatatypeSet;
pub use money::{Currency, Money, MoneyError};
pub use ops::{BinaryOp, UnaryOp};
pub use span::Span;
pub use value::Value;
