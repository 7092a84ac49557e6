use crate::schema::app::FieldTy;

use serde::{Serialize, Serializer};
use std::fmt;

/// Storage types as they appear in generated DDL and procedure signatures.
///
/// The analysis stage has two type systems:
///
/// 1. **[`FieldTy`]**: the semantic types authors declare (`email`, `date`,
///    `ref`, ...).
/// 2. **`db::Type`** (this type): how a SQL database stores those values.
///
/// [`Type::from_app`] maps the first onto the second. Emitters render a
/// `db::Type` through its `Display` implementation:
///
/// ```text
/// FieldTy::Id       →  UUID
/// FieldTy::String   →  TEXT            (VARCHAR(n) with a max length)
/// FieldTy::Number   →  DOUBLE PRECISION
/// FieldTy::Date     →  TIMESTAMPTZ
/// FieldTy::Object   →  JSONB
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// 128-bit universally unique identifier
    Uuid,

    /// Unconstrained text type
    Text,

    /// Text type with an explicit maximum length
    VarChar(u64),

    /// 4-byte signed integer
    Integer,

    /// 8-byte floating point number
    DoublePrecision,

    Boolean,

    /// An instant in time with time zone
    Timestamptz,

    /// Binary JSON document
    Jsonb,

    /// The row type of a table
    Table(String),

    /// A SQL array of the inner type
    Array(Box<Type>),

    /// A set of rows of the inner type, as returned by a procedure
    SetOf(Box<Type>),

    /// No value, as returned by a procedure
    Void,
}

impl Type {
    /// Maps a semantic type to its storage type.
    ///
    /// `max_length` narrows short text to `VARCHAR(n)`.
    pub fn from_app(ty: FieldTy, max_length: Option<u64>) -> Type {
        match ty {
            FieldTy::Id | FieldTy::Reference => Type::Uuid,
            FieldTy::String => match max_length {
                Some(max) => Type::VarChar(max),
                None => Type::Text,
            },
            FieldTy::Text | FieldTy::Email | FieldTy::Url | FieldTy::Enum => Type::Text,
            FieldTy::Integer => Type::Integer,
            FieldTy::Number => Type::DoublePrecision,
            FieldTy::Boolean => Type::Boolean,
            FieldTy::Date => Type::Timestamptz,
            FieldTy::Array | FieldTy::Object => Type::Jsonb,
        }
    }

    pub fn set_of(self) -> Type {
        Type::SetOf(Box::new(self))
    }

    pub fn array_of(self) -> Type {
        Type::Array(Box::new(self))
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Type::SetOf(_))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Uuid => f.write_str("UUID"),
            Type::Text => f.write_str("TEXT"),
            Type::VarChar(max) => write!(f, "VARCHAR({max})"),
            Type::Integer => f.write_str("INTEGER"),
            Type::DoublePrecision => f.write_str("DOUBLE PRECISION"),
            Type::Boolean => f.write_str("BOOLEAN"),
            Type::Timestamptz => f.write_str("TIMESTAMPTZ"),
            Type::Jsonb => f.write_str("JSONB"),
            Type::Table(name) => f.write_str(name),
            Type::Array(inner) => write!(f, "{inner}[]"),
            Type::SetOf(inner) => write!(f, "SETOF {inner}"),
            Type::Void => f.write_str("VOID"),
        }
    }
}

impl Serialize for Type {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
