use crate::schema::app::ComputedTy;

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedDef {
    /// Declared type. When absent the type is inferred from the name.
    #[serde(default, rename = "type")]
    pub ty: Option<ComputedTy>,

    /// Opaque expression text, passed through to emitters
    #[serde(default)]
    pub expression: Option<String>,
}

impl ComputedDef {
    pub fn inferred() -> Self {
        Self::default()
    }

    pub fn typed(ty: ComputedTy) -> Self {
        Self {
            ty: Some(ty),
            expression: None,
        }
    }

    pub fn expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = Some(expression.into());
        self
    }
}
