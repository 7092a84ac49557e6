use indexmap::IndexMap;
use serde::Deserialize;

/// Row-level access rules as authored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyDef {
    /// Record column → request context key. Applies to every operation.
    #[serde(default)]
    pub scope: IndexMap<String, String>,

    /// Request context key → values that skip the scope checks
    #[serde(default)]
    pub bypass: IndexMap<String, Vec<String>>,

    #[serde(default)]
    pub read: Option<RuleDef>,

    #[serde(default)]
    pub insert: Option<RuleDef>,

    #[serde(default)]
    pub update: Option<RuleDef>,

    #[serde(default)]
    pub delete: Option<RuleDef>,
}

/// Custom rule for a single operation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDef {
    #[serde(default)]
    pub predicate: Option<Predicate>,

    /// Raw SQL fragment
    #[serde(default)]
    pub sql: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Predicate {
    /// A boolean expression, kept verbatim
    Expr(String),

    /// Function source (`(ctx, row) => ...`); only its body is kept
    Function(String),
}

impl PolicyDef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scope(mut self, column: impl Into<String>, context_key: impl Into<String>) -> Self {
        self.scope.insert(column.into(), context_key.into());
        self
    }

    pub fn bypass<I, S>(mut self, context_key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bypass.insert(
            context_key.into(),
            values.into_iter().map(Into::into).collect(),
        );
        self
    }

    pub fn read(mut self, rule: RuleDef) -> Self {
        self.read = Some(rule);
        self
    }

    pub fn insert(mut self, rule: RuleDef) -> Self {
        self.insert = Some(rule);
        self
    }

    pub fn update(mut self, rule: RuleDef) -> Self {
        self.update = Some(rule);
        self
    }

    pub fn delete(mut self, rule: RuleDef) -> Self {
        self.delete = Some(rule);
        self
    }
}

impl RuleDef {
    pub fn expr(expr: impl Into<String>) -> Self {
        Self {
            predicate: Some(Predicate::Expr(expr.into())),
            sql: None,
        }
    }

    pub fn function(source: impl Into<String>) -> Self {
        Self {
            predicate: Some(Predicate::Function(source.into())),
            sql: None,
        }
    }

    pub fn sql(sql: impl Into<String>) -> Self {
        Self {
            predicate: None,
            sql: Some(sql.into()),
        }
    }
}
