use serde::{Deserialize, Serialize};

/// A property derived from other fields rather than stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Computed {
    pub name: String,

    pub ty: ComputedTy,

    /// `true` when the type was guessed from the name
    pub inferred: bool,

    /// Opaque expression text, if the author supplied one
    pub expression: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ComputedTy {
    Number,
    Boolean,
    String,
    Date,
    Array,
    Object,
    Unknown,
}

impl ComputedTy {
    /// The client-side type expression
    pub fn client_ty(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Date => "Date",
            Self::Array => "unknown[]",
            Self::Object => "Record<string, unknown>",
            Self::Unknown => "unknown",
        }
    }

    pub fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }
}
