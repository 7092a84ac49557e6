use crate::schema::{db, def::FieldKind};

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// The field name as declared
    pub name: String,

    /// Identifier-safe rendering of the name
    pub ident: String,

    /// Resolved semantic type
    pub ty: FieldTy,

    /// Client-side type expression (`string`, `Array<number>`, ...)
    pub client_ty: String,

    /// Storage type
    pub storage_ty: db::Type,

    /// Hint for value generators
    pub hint: Option<String>,

    pub nullable: bool,

    pub unique: bool,

    pub read_only: bool,

    /// True if the field identifies records of the entity
    pub primary_key: bool,

    pub default: Option<serde_json::Value>,

    /// Canonical name of the referenced entity
    pub reference: Option<String>,

    /// Allowed values of an enumeration
    pub values: Vec<String>,

    pub is_array: bool,

    pub is_object: bool,

    /// Element descriptor of an array
    pub item: Option<Box<Field>>,

    /// Member descriptors of an object
    pub shape: Vec<Field>,

    pub min: Option<f64>,

    pub max: Option<f64>,

    pub min_length: Option<u64>,

    pub max_length: Option<u64>,

    pub pattern: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldTy {
    Id,
    String,
    Text,
    Email,
    Url,
    Integer,
    Number,
    Boolean,
    Date,
    Enum,
    Reference,
    Array,
    Object,
}

impl Field {
    pub fn is_reference(&self) -> bool {
        self.ty.is_reference()
    }

    /// Returns the field with the given name from an object shape.
    pub fn member(&self, name: &str) -> Option<&Field> {
        self.shape.iter().find(|field| field.name == name)
    }
}

impl FieldTy {
    /// Maps a declared tag to a semantic type. Tags outside the vocabulary
    /// degrade to short text.
    pub fn from_kind(kind: &FieldKind) -> FieldTy {
        match kind {
            FieldKind::Id => FieldTy::Id,
            FieldKind::String | FieldKind::Other(_) => FieldTy::String,
            FieldKind::Text => FieldTy::Text,
            FieldKind::Email => FieldTy::Email,
            FieldKind::Url => FieldTy::Url,
            FieldKind::Int => FieldTy::Integer,
            FieldKind::Number => FieldTy::Number,
            FieldKind::Boolean => FieldTy::Boolean,
            FieldKind::Date => FieldTy::Date,
            FieldKind::Enum => FieldTy::Enum,
            FieldKind::Ref => FieldTy::Reference,
            FieldKind::Array => FieldTy::Array,
            FieldKind::Object => FieldTy::Object,
        }
    }

    pub fn is_reference(self) -> bool {
        matches!(self, Self::Reference)
    }

    pub fn is_id(self) -> bool {
        matches!(self, Self::Id)
    }

    /// Client-side type of a scalar. Composite types are rendered by the
    /// field analyzer from their nested descriptors.
    pub fn scalar_client_ty(self) -> &'static str {
        match self {
            Self::Id | Self::String | Self::Text | Self::Email | Self::Url | Self::Reference => {
                "string"
            }
            Self::Integer | Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "Date",
            Self::Enum => "string",
            Self::Array => "unknown[]",
            Self::Object => "Record<string, unknown>",
        }
    }

    /// Default hint for value generators
    pub fn default_hint(self) -> &'static str {
        match self {
            Self::Id => "uuid",
            Self::String => "word",
            Self::Text => "paragraph",
            Self::Email => "email",
            Self::Url => "url",
            Self::Integer => "integer",
            Self::Number => "float",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Enum => "enum",
            Self::Reference => "reference",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for FieldTy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Id => "id",
            Self::String => "string",
            Self::Text => "text",
            Self::Email => "email",
            Self::Url => "url",
            Self::Integer => "int",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Enum => "enum",
            Self::Reference => "ref",
            Self::Array => "array",
            Self::Object => "object",
        })
    }
}
