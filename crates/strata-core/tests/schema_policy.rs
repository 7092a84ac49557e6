use pretty_assertions::assert_eq;
use std_util::assert_ok;
use strata_core::schema::app::{Operation, OperationPolicy};
use strata_core::schema::def::{EntityDef, PolicyDef, RuleDef};
use strata_core::Schema;

#[test]
fn entity_without_policy_is_open() {
    let analysis = assert_ok!(Schema::builder().build(&[EntityDef::new("Tag")]));
    let tag = analysis.schema.entity("Tag").unwrap();

    assert!(!tag.policy.any_enabled());
}

#[test]
fn scopes_and_rules_combine() {
    let policy = PolicyDef::new()
        .scope("org_id", "orgId")
        .bypass("role", ["admin"])
        .update(RuleDef::function("(ctx, row) => { return row.ownerId === ctx.userId; }"))
        .delete(RuleDef::sql("locked = false"));

    let analysis = assert_ok!(Schema::builder().build(&[EntityDef::new("Document").policy(policy)]));
    let policy = &analysis.schema.entity("Document").unwrap().policy;

    for op in Operation::ALL {
        assert!(policy.is_enabled(op), "{op}");
    }

    assert_eq!(policy.scopes.len(), 1);
    assert_eq!(policy.scopes[0].column, "org_id");
    assert_eq!(policy.bypass[0].context_key, "role");

    assert_eq!(
        policy.read,
        OperationPolicy {
            enabled: true,
            predicate: None,
            sql: None,
        }
    );
    assert_eq!(
        policy.update.predicate.as_deref(),
        Some("row.ownerId === ctx.userId")
    );
    assert_eq!(policy.delete.sql.as_deref(), Some("locked = false"));
}

#[test]
fn operations_are_independent() {
    let policy = PolicyDef::new().insert(RuleDef::expr("ctx.role = 'editor'"));

    let analysis = assert_ok!(Schema::builder().build(&[EntityDef::new("Article").policy(policy)]));
    let policy = &analysis.schema.entity("Article").unwrap().policy;

    assert!(policy.is_enabled(Operation::Insert));
    assert!(!policy.is_enabled(Operation::Read));
    assert!(!policy.is_enabled(Operation::Update));
    assert!(!policy.is_enabled(Operation::Delete));
}
