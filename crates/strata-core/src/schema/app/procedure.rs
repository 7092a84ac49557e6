use super::FieldTy;
use crate::schema::db;

use serde::Serialize;

/// Resolved signature of a stored procedure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Procedure {
    pub name: String,

    pub args: Vec<ProcedureArg>,

    pub returns: Returns,

    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcedureArg {
    pub name: String,

    /// Type name as declared
    pub declared: String,

    pub ty: FieldTy,

    pub client_ty: String,

    pub storage_ty: db::Type,

    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Returns {
    /// Return expression as declared
    pub declared: String,

    pub shape: ReturnShape,

    pub target: ReturnTarget,

    pub client_ty: String,

    pub storage_ty: db::Type,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ReturnShape {
    Void,
    Single,
    Array,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ReturnTarget {
    None,

    /// Rows of an entity
    Entity { name: String, table: String },

    Scalar { ty: FieldTy },
}

impl Returns {
    pub fn is_entity(&self) -> bool {
        matches!(self.target, ReturnTarget::Entity { .. })
    }

    pub fn is_array(&self) -> bool {
        matches!(self.shape, ReturnShape::Array)
    }

    pub fn is_void(&self) -> bool {
        matches!(self.shape, ReturnShape::Void)
    }

    /// Canonical name of the returned entity, if any
    pub fn entity(&self) -> Option<&str> {
        match &self.target {
            ReturnTarget::Entity { name, .. } => Some(name),
            _ => None,
        }
    }
}
