use serde::Deserialize;

/// A stored procedure signature exposed as a remote call.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcedureDef {
    #[serde(default)]
    pub args: Vec<ArgDef>,

    /// Return type expression: `T`, `T[]` or `void`. Absent means `void`.
    #[serde(default)]
    pub returns: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgDef {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: String,

    #[serde(default)]
    pub optional: bool,
}

impl ProcedureDef {
    pub fn returning(returns: impl Into<String>) -> Self {
        Self {
            returns: Some(returns.into()),
            ..Self::default()
        }
    }

    pub fn void() -> Self {
        Self::default()
    }

    pub fn arg(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.args.push(ArgDef {
            name: name.into(),
            ty: ty.into(),
            optional: false,
        });
        self
    }

    pub fn optional_arg(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.args.push(ArgDef {
            name: name.into(),
            ty: ty.into(),
            optional: true,
        });
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
