use indexmap::IndexMap;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
    /// Semantic type tag
    #[serde(rename = "type")]
    pub kind: FieldKind,

    #[serde(default)]
    pub nullable: bool,

    #[serde(default)]
    pub unique: bool,

    #[serde(default, alias = "readonly")]
    pub read_only: bool,

    #[serde(default)]
    pub default: Option<serde_json::Value>,

    #[serde(default)]
    pub min: Option<f64>,

    #[serde(default)]
    pub max: Option<f64>,

    #[serde(default)]
    pub min_length: Option<u64>,

    #[serde(default)]
    pub max_length: Option<u64>,

    /// Regular expression the value must match
    #[serde(default)]
    pub pattern: Option<String>,

    /// Allowed values of an enumeration
    #[serde(default)]
    pub values: Vec<String>,

    /// Entity referenced by a `ref` field
    #[serde(default, alias = "references")]
    pub target: Option<String>,

    /// Element declaration of an `array` field
    #[serde(default)]
    pub items: Option<Box<FieldDef>>,

    /// Named members of an `object` field
    #[serde(default)]
    pub shape: IndexMap<String, FieldDef>,

    /// Free-form hint for value generators
    #[serde(default)]
    pub hint: Option<String>,
}

/// The fixed vocabulary of semantic type tags.
///
/// Tags outside the vocabulary are kept verbatim in [`FieldKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum FieldKind {
    Id,
    String,
    Text,
    Email,
    Url,
    Int,
    Number,
    Boolean,
    Date,
    Enum,
    Ref,
    Array,
    Object,
    Other(String),
}

impl FieldDef {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            nullable: false,
            unique: false,
            read_only: false,
            default: None,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
            pattern: None,
            values: vec![],
            target: None,
            items: None,
            shape: IndexMap::new(),
            hint: None,
        }
    }

    pub fn id() -> Self {
        Self::new(FieldKind::Id)
    }

    pub fn string() -> Self {
        Self::new(FieldKind::String)
    }

    pub fn text() -> Self {
        Self::new(FieldKind::Text)
    }

    pub fn email() -> Self {
        Self::new(FieldKind::Email)
    }

    pub fn url() -> Self {
        Self::new(FieldKind::Url)
    }

    pub fn int() -> Self {
        Self::new(FieldKind::Int)
    }

    pub fn number() -> Self {
        Self::new(FieldKind::Number)
    }

    pub fn boolean() -> Self {
        Self::new(FieldKind::Boolean)
    }

    pub fn date() -> Self {
        Self::new(FieldKind::Date)
    }

    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut field = Self::new(FieldKind::Enum);
        field.values = values.into_iter().map(Into::into).collect();
        field
    }

    pub fn reference(target: impl Into<String>) -> Self {
        let mut field = Self::new(FieldKind::Ref);
        field.target = Some(target.into());
        field
    }

    pub fn array(items: FieldDef) -> Self {
        let mut field = Self::new(FieldKind::Array);
        field.items = Some(Box::new(items));
        field
    }

    pub fn object<I, S>(shape: I) -> Self
    where
        I: IntoIterator<Item = (S, FieldDef)>,
        S: Into<String>,
    {
        let mut field = Self::new(FieldKind::Object);
        field.shape = shape
            .into_iter()
            .map(|(name, field)| (name.into(), field))
            .collect();
        field
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn default_value(mut self, value: serde_json::Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn length(mut self, min: Option<u64>, max: Option<u64>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<&str> for FieldKind {
    fn from(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "id" | "uuid" => Self::Id,
            "string" => Self::String,
            "text" => Self::Text,
            "email" => Self::Email,
            "url" => Self::Url,
            "int" | "integer" => Self::Int,
            "number" | "float" | "real" | "double" | "decimal" => Self::Number,
            "boolean" | "bool" => Self::Boolean,
            "date" | "datetime" | "timestamp" => Self::Date,
            "enum" => Self::Enum,
            "ref" | "reference" | "relation" => Self::Ref,
            "array" | "list" => Self::Array,
            "object" | "json" | "jsonb" => Self::Object,
            _ => Self::Other(tag.to_string()),
        }
    }
}

impl From<String> for FieldKind {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}
