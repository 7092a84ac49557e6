use super::{EntityLookup, EntityNames};
use crate::schema::{
    app::{FieldTy, Procedure, ProcedureArg, ReturnShape, ReturnTarget, Returns},
    db,
    def::{FieldKind, ProcedureDef},
};

/// Resolves a procedure signature against the entity set.
///
/// Type names that are not entities fall back to the scalar vocabulary, so
/// analysis never fails.
pub(crate) fn analyze(
    name: &str,
    def: &ProcedureDef,
    lookup: &EntityLookup,
    names: &[EntityNames],
) -> Procedure {
    let args = def
        .args
        .iter()
        .map(|arg| {
            let (base, array) = split_array(&arg.ty);
            let (ty, mut client_ty, mut storage_ty) = match lookup.resolve(base) {
                // Entities are passed by identifier
                Some(_) => (FieldTy::Reference, "string".to_string(), db::Type::Uuid),
                None => scalar(base),
            };

            if array {
                client_ty.push_str("[]");
                storage_ty = storage_ty.array_of();
            }

            ProcedureArg {
                name: arg.name.clone(),
                declared: arg.ty.clone(),
                ty,
                client_ty,
                storage_ty,
                optional: arg.optional,
            }
        })
        .collect();

    Procedure {
        name: name.to_string(),
        args,
        returns: returns(def.returns.as_deref(), lookup, names),
        description: def.description.clone(),
    }
}

fn returns(declared: Option<&str>, lookup: &EntityLookup, names: &[EntityNames]) -> Returns {
    let declared = declared.map(str::trim).unwrap_or_default();

    if declared.is_empty() || declared.eq_ignore_ascii_case("void") {
        return Returns {
            declared: "void".to_string(),
            shape: ReturnShape::Void,
            target: ReturnTarget::None,
            client_ty: "void".to_string(),
            storage_ty: db::Type::Void,
        };
    }

    let (base, array) = split_array(declared);

    let (target, mut client_ty, storage_ty) = match lookup.resolve(base) {
        Some(index) => {
            let entity = &names[index];
            (
                ReturnTarget::Entity {
                    name: lookup.name(index).to_string(),
                    table: entity.table.clone(),
                },
                entity.singular.clone(),
                db::Type::Table(entity.table.clone()),
            )
        }
        None => {
            let (ty, client_ty, storage_ty) = scalar(base);
            (ReturnTarget::Scalar { ty }, client_ty, storage_ty)
        }
    };

    let (shape, storage_ty) = if array {
        client_ty.push_str("[]");
        (ReturnShape::Array, storage_ty.set_of())
    } else {
        (ReturnShape::Single, storage_ty)
    };

    Returns {
        declared: declared.to_string(),
        shape,
        target,
        client_ty,
        storage_ty,
    }
}

fn scalar(name: &str) -> (FieldTy, String, db::Type) {
    let ty = FieldTy::from_kind(&FieldKind::from(name));
    (
        ty,
        ty.scalar_client_ty().to_string(),
        db::Type::from_app(ty, None),
    )
}

/// Splits `T[]` into `(T, true)`.
fn split_array(declared: &str) -> (&str, bool) {
    match declared.trim().strip_suffix("[]") {
        Some(base) => (base.trim(), true),
        None => (declared.trim(), false),
    }
}
