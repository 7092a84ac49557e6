use serde::Serialize;
use std::fmt;

/// Row-level access rules normalized to one shape per operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    /// Column/context pairs every row must match. Apply to all operations.
    pub scopes: Vec<ScopeCondition>,

    /// Context values that skip the scope conditions. Emitters OR them ahead
    /// of the scopes.
    pub bypass: Vec<Bypass>,

    pub read: OperationPolicy,

    pub insert: OperationPolicy,

    pub update: OperationPolicy,

    pub delete: OperationPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeCondition {
    /// Column on the record
    pub column: String,

    /// Key in the request context
    pub context_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bypass {
    pub context_key: String,

    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationPolicy {
    pub enabled: bool,

    /// Predicate text, for template substitution
    pub predicate: Option<String>,

    /// Raw SQL fragment
    pub sql: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    Read,
    Insert,
    Update,
    Delete,
}

impl Policy {
    pub fn operation(&self, op: Operation) -> &OperationPolicy {
        match op {
            Operation::Read => &self.read,
            Operation::Insert => &self.insert,
            Operation::Update => &self.update,
            Operation::Delete => &self.delete,
        }
    }

    pub fn is_enabled(&self, op: Operation) -> bool {
        self.operation(op).enabled
    }

    /// Returns `true` if any operation is guarded.
    pub fn any_enabled(&self) -> bool {
        Operation::ALL.iter().any(|op| self.is_enabled(*op))
    }
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Read,
        Operation::Insert,
        Operation::Update,
        Operation::Delete,
    ];
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Read => "read",
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
        })
    }
}
