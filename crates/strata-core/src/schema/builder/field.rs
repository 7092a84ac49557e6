use crate::schema::{
    app::{Field, FieldTy},
    db,
    def::{FieldDef, FieldKind},
    Name,
};

/// Analyzes one field declaration.
///
/// Never fails: tags outside the vocabulary are stored as short text and
/// the tag itself becomes the generator hint. Reference targets are kept as
/// declared; the builder canonicalizes them once every entity is known.
pub(crate) fn analyze(name: &str, def: &FieldDef) -> Field {
    let ty = FieldTy::from_kind(&def.kind);

    let item = match (ty, &def.items) {
        (FieldTy::Array, Some(items)) => Some(Box::new(analyze("item", items))),
        _ => None,
    };

    let shape: Vec<_> = match ty {
        FieldTy::Object => def
            .shape
            .iter()
            .map(|(name, member)| analyze(name, member))
            .collect(),
        _ => vec![],
    };

    let hint = match (&def.hint, &def.kind) {
        (Some(hint), _) => hint.clone(),
        (None, FieldKind::Other(tag)) => tag.clone(),
        (None, _) => ty.default_hint().to_string(),
    };

    let mut client_ty = client_ty(ty, &def.values, item.as_deref(), &shape);
    if def.nullable {
        client_ty.push_str(" | null");
    }

    Field {
        name: name.to_string(),
        ident: Name::new(name).ident(),
        ty,
        client_ty,
        storage_ty: db::Type::from_app(ty, def.max_length),
        hint: Some(hint),
        nullable: def.nullable,
        unique: def.unique,
        read_only: def.read_only || ty.is_id(),
        primary_key: false,
        default: def.default.clone(),
        reference: match ty {
            FieldTy::Reference => def.target.clone(),
            _ => None,
        },
        values: match ty {
            FieldTy::Enum => def.values.clone(),
            _ => vec![],
        },
        is_array: ty == FieldTy::Array,
        is_object: ty == FieldTy::Object,
        item,
        shape,
        min: def.min,
        max: def.max,
        min_length: def.min_length,
        max_length: def.max_length,
        pattern: def.pattern.clone(),
    }
}

/// Index of the field identifying records: the first `id`-typed field,
/// otherwise a field named `id`.
pub(crate) fn primary_key(fields: &[Field]) -> Option<usize> {
    fields
        .iter()
        .position(|field| field.ty.is_id())
        .or_else(|| fields.iter().position(|field| field.name == "id"))
}

fn client_ty(ty: FieldTy, values: &[String], item: Option<&Field>, shape: &[Field]) -> String {
    match ty {
        FieldTy::Enum if !values.is_empty() => values
            .iter()
            .map(|value| format!("'{}'", value.replace('\'', "\\'")))
            .collect::<Vec<_>>()
            .join(" | "),
        FieldTy::Array => match item {
            Some(item) => format!("Array<{}>", item.client_ty),
            None => ty.scalar_client_ty().to_string(),
        },
        FieldTy::Object if !shape.is_empty() => {
            let members = shape
                .iter()
                .map(|member| match member.nullable {
                    true => format!("{}?: {}", member.ident, member.client_ty),
                    false => format!("{}: {}", member.ident, member.client_ty),
                })
                .collect::<Vec<_>>();
            format!("{{ {} }}", members.join("; "))
        }
        _ => ty.scalar_client_ty().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_types() {
        let field = analyze("title", &FieldDef::string().length(None, Some(120)));
        assert_eq!(field.ident, "title");
        assert_eq!(field.client_ty, "string");
        assert_eq!(field.storage_ty.to_string(), "VARCHAR(120)");
        assert_eq!(field.hint.as_deref(), Some("word"));

        let field = analyze("published_at", &FieldDef::date().nullable());
        assert_eq!(field.ident, "publishedAt");
        assert_eq!(field.client_ty, "Date | null");
        assert_eq!(field.storage_ty.to_string(), "TIMESTAMPTZ");

        let field = analyze("score", &FieldDef::number());
        assert_eq!(field.client_ty, "number");
        assert_eq!(field.storage_ty.to_string(), "DOUBLE PRECISION");
    }

    #[test]
    fn unknown_tag_degrades_to_string() {
        let field = analyze("phone", &FieldDef::new(FieldKind::from("phone")));
        assert_eq!(field.ty, FieldTy::String);
        assert_eq!(field.hint.as_deref(), Some("phone"));
        assert_eq!(field.storage_ty.to_string(), "TEXT");

        let field = analyze(
            "phone",
            &FieldDef::new(FieldKind::from("phone")).hint("phoneNumber"),
        );
        assert_eq!(field.hint.as_deref(), Some("phoneNumber"));
    }

    #[test]
    fn id_is_read_only() {
        let field = analyze("id", &FieldDef::id());
        assert!(field.read_only);
        assert_eq!(field.storage_ty.to_string(), "UUID");
        assert!(!field.primary_key);
    }

    #[test]
    fn enum_union() {
        let field = analyze("status", &FieldDef::enumeration(["draft", "published"]));
        assert_eq!(field.client_ty, "'draft' | 'published'");
        assert_eq!(field.values, ["draft", "published"]);
        assert_eq!(field.storage_ty.to_string(), "TEXT");
    }

    #[test]
    fn nested_composites() {
        let def = FieldDef::array(FieldDef::object([
            ("label", FieldDef::string()),
            ("weight", FieldDef::number().nullable()),
        ]));
        let field = analyze("options", &def);

        assert!(field.is_array);
        let item = field.item.as_deref().unwrap();
        assert_eq!(item.name, "item");
        assert!(item.is_object);
        assert_eq!(item.member("weight").unwrap().client_ty, "number | null");
        assert_eq!(
            field.client_ty,
            "Array<{ label: string; weight?: number | null }>"
        );
        assert_eq!(field.storage_ty.to_string(), "JSONB");
    }

    #[test]
    fn bare_array() {
        let field = analyze("tags", &FieldDef::new(FieldKind::Array));
        assert_eq!(field.client_ty, "unknown[]");
        assert!(field.item.is_none());
    }

    #[test]
    fn reference_keeps_declared_target() {
        let field = analyze("authorId", &FieldDef::reference("users"));
        assert_eq!(field.reference.as_deref(), Some("users"));
        assert_eq!(field.client_ty, "string");
        assert_eq!(field.storage_ty.to_string(), "UUID");
    }

    #[test]
    fn primary_key_selection() {
        let fields = vec![
            analyze("slug", &FieldDef::string()),
            analyze("key", &FieldDef::id()),
            analyze("id", &FieldDef::int()),
        ];
        assert_eq!(primary_key(&fields), Some(1));

        let fields = vec![analyze("id", &FieldDef::int())];
        assert_eq!(primary_key(&fields), Some(0));

        let fields = vec![analyze("slug", &FieldDef::string())];
        assert_eq!(primary_key(&fields), None);
    }
}
