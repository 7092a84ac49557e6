use crate::schema::{
    app::{Bypass, OperationPolicy, Policy, ScopeCondition},
    def::{PolicyDef, Predicate, RuleDef},
};

/// Normalizes authored row-level rules into one descriptor per operation.
///
/// Scope conditions guard all four operations, so declaring any scope
/// enables every operation even without a custom rule.
pub(crate) fn normalize(def: Option<&PolicyDef>) -> Policy {
    let Some(def) = def else {
        return Policy::default();
    };

    let scoped = !def.scope.is_empty();

    Policy {
        scopes: def
            .scope
            .iter()
            .map(|(column, context_key)| ScopeCondition {
                column: column.clone(),
                context_key: context_key.clone(),
            })
            .collect(),
        bypass: def
            .bypass
            .iter()
            .map(|(context_key, values)| Bypass {
                context_key: context_key.clone(),
                values: values.clone(),
            })
            .collect(),
        read: operation(def.read.as_ref(), scoped),
        insert: operation(def.insert.as_ref(), scoped),
        update: operation(def.update.as_ref(), scoped),
        delete: operation(def.delete.as_ref(), scoped),
    }
}

fn operation(rule: Option<&RuleDef>, scoped: bool) -> OperationPolicy {
    let predicate = rule
        .and_then(|rule| rule.predicate.as_ref())
        .map(|predicate| match predicate {
            Predicate::Expr(expr) => expr.trim().to_string(),
            Predicate::Function(source) => function_body(source),
        })
        .filter(|predicate| !predicate.is_empty());

    let sql = rule
        .and_then(|rule| rule.sql.as_deref())
        .map(str::trim)
        .filter(|sql| !sql.is_empty())
        .map(str::to_string);

    OperationPolicy {
        enabled: scoped || predicate.is_some() || sql.is_some(),
        predicate,
        sql,
    }
}

/// Extracts the body of a function given as source text.
///
/// Handles arrow functions with an expression or block body and `function`
/// expressions. A block consisting of a single `return` yields the returned
/// expression; any other block is kept as-is. Text that is not a function is
/// returned trimmed.
pub(crate) fn function_body(source: &str) -> String {
    let source = source.trim();

    let body = if let Some(arrow) = source.find("=>") {
        &source[arrow + 2..]
    } else if source.starts_with("function") || source.starts_with("async function") {
        match source.find('{') {
            Some(open) => &source[open..],
            None => source,
        }
    } else {
        source
    };

    let mut body = body.trim();

    if let Some(block) = body.strip_prefix('{').and_then(|b| b.strip_suffix('}')) {
        body = block.trim();

        let single_return = body
            .strip_prefix("return")
            .filter(|rest| rest.starts_with(char::is_whitespace) || rest.starts_with('('))
            .map(|rest| rest.trim().trim_end_matches(';').trim_end())
            .filter(|expr| !expr.contains(';'));

        if let Some(expr) = single_return {
            return expr.to_string();
        }
    }

    body.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::app::Operation;

    #[test]
    fn absent_policy_disables_everything() {
        let policy = normalize(None);
        assert!(!policy.any_enabled());
        assert!(policy.scopes.is_empty());
    }

    #[test]
    fn scope_enables_every_operation() {
        let def = PolicyDef::new()
            .scope("tenant_id", "tenantId")
            .bypass("role", ["admin", "support"]);
        let policy = normalize(Some(&def));

        for op in Operation::ALL {
            let rule = policy.operation(op);
            assert!(rule.enabled, "{op} should be enabled");
            assert!(rule.predicate.is_none());
        }

        assert_eq!(policy.scopes[0].column, "tenant_id");
        assert_eq!(policy.scopes[0].context_key, "tenantId");
        assert_eq!(policy.bypass[0].values, ["admin", "support"]);
    }

    #[test]
    fn custom_rules_are_independent() {
        let def = PolicyDef::new()
            .read(RuleDef::expr("  published = true "))
            .delete(RuleDef::sql("owner_id = current_user_id()"));
        let policy = normalize(Some(&def));

        assert_eq!(policy.read.predicate.as_deref(), Some("published = true"));
        assert!(policy.read.enabled);
        assert!(!policy.insert.enabled);
        assert!(!policy.update.enabled);
        assert_eq!(
            policy.delete.sql.as_deref(),
            Some("owner_id = current_user_id()")
        );
        assert!(policy.delete.enabled);
    }

    #[test]
    fn function_predicate_keeps_body() {
        let def = PolicyDef::new().update(RuleDef::function(
            "(ctx, row) => row.ownerId === ctx.userId",
        ));
        let policy = normalize(Some(&def));

        assert_eq!(
            policy.update.predicate.as_deref(),
            Some("row.ownerId === ctx.userId")
        );
    }

    #[test]
    fn extract_function_bodies() {
        assert_eq!(function_body("ctx => ctx.admin"), "ctx.admin");
        assert_eq!(
            function_body("(ctx) => { return ctx.role === 'admin'; }"),
            "ctx.role === 'admin'"
        );
        assert_eq!(
            function_body("function (ctx) {\n  return ctx.userId != null;\n}"),
            "ctx.userId != null"
        );
        assert_eq!(
            function_body("(ctx) => { const id = ctx.userId; return id != null; }"),
            "const id = ctx.userId; return id != null;"
        );
        assert_eq!(function_body("  row.public  "), "row.public");
    }
}
