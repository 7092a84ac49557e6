use pretty_assertions::assert_eq;
use std_util::assert_ok;
use strata_core::schema::app::{KeySource, RelationKind};
use strata_core::schema::def::{self, EntityDef, FieldDef, RelationDef};
use strata_core::{DiagnosticKind, Schema};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn explicit_key_always_wins() {
    init_tracing();

    let analysis = assert_ok!(Schema::builder().build(&[
        EntityDef::new("User").relation("posts", RelationDef::has_many("Post").foreign_key("ownerId")),
        EntityDef::new("Post")
            .field("userId", FieldDef::reference("User"))
            .relation("author", RelationDef::belongs_to("User").foreign_key("userId")),
    ]));

    let user = analysis.schema.entity("User").unwrap();
    let posts = user.relation("posts").unwrap();
    assert_eq!(posts.foreign_key, "ownerId");
    assert_eq!(posts.key_source, KeySource::Explicit);

    let post = analysis.schema.entity("Post").unwrap();
    let author = post.relation("author").unwrap();
    assert_eq!(author.foreign_key, "userId");
    assert_eq!(author.key_source, KeySource::Explicit);
    assert!(analysis.diagnostics.is_empty());
}

#[test]
fn missing_key_falls_back_with_one_warning() {
    init_tracing();

    let analysis = assert_ok!(Schema::builder().build(&[
        EntityDef::new("User"),
        EntityDef::new("Post").relation("author", RelationDef::belongs_to("User")),
    ]));

    let author = analysis
        .schema
        .entity("Post")
        .unwrap()
        .relation("author")
        .unwrap();
    assert_eq!(author.foreign_key, "userId");
    assert_eq!(author.key_source, KeySource::Defaulted);

    let diagnostics: Vec<_> = analysis.diagnostics.iter().collect();
    assert_eq!(diagnostics.len(), 1);

    let diagnostic = diagnostics[0];
    assert_eq!(diagnostic.kind, DiagnosticKind::ForeignKeyDefaulted);
    assert_eq!(diagnostic.entity, "Post");
    assert_eq!(diagnostic.relation.as_deref(), Some("author"));
    assert_eq!(diagnostic.relation_kind, Some(def::RelationKind::BelongsTo));
    assert_eq!(diagnostic.target.as_deref(), Some("User"));
    assert!(diagnostic.fix.as_deref().unwrap().contains("foreignKey"));
}

#[test]
fn has_many_without_back_reference_warns_once() {
    init_tracing();

    let analysis = assert_ok!(Schema::builder().build(&[
        EntityDef::new("Author").relation("books", RelationDef::has_many("Book")),
        EntityDef::new("Book"),
    ]));

    let books = analysis
        .schema
        .entity("Author")
        .unwrap()
        .relation("books")
        .unwrap();
    assert_eq!(books.kind, RelationKind::HasMany);
    assert_eq!(books.foreign_key, "authorId");
    assert_eq!(books.key_source, KeySource::Defaulted);
    assert_eq!(analysis.diagnostics.len(), 1);
}

#[test]
fn has_many_options_are_kept() {
    init_tracing();

    let analysis = assert_ok!(Schema::builder().build(&[
        EntityDef::new("User").relation(
            "posts",
            RelationDef::has_many("posts")
                .order_by("createdAt", def::Direction::Desc)
                .limit(20)
                .eager(),
        ),
        EntityDef::new("Post").field("userId", FieldDef::reference("User")),
    ]));

    let posts = analysis
        .schema
        .entity("User")
        .unwrap()
        .relation("posts")
        .unwrap();
    assert_eq!(posts.target, "Post");
    assert_eq!(posts.foreign_key, "userId");
    assert_eq!(posts.limit, Some(20));
    assert!(posts.eager);

    let order_by = posts.order_by.as_ref().unwrap();
    assert_eq!(order_by.field, "createdAt");
    assert_eq!(order_by.direction, def::Direction::Desc);
}

#[test]
fn many_to_many_marks_join_entity() {
    init_tracing();

    let analysis = assert_ok!(Schema::builder().build(&[
        EntityDef::new("Post").relation("tags", RelationDef::many_to_many("Tag").through("PostTag")),
        EntityDef::new("Tag").relation("posts", RelationDef::many_to_many("Post").through("post_tags")),
        EntityDef::new("PostTag")
            .relation("post", RelationDef::belongs_to("Post"))
            .relation("tag", RelationDef::belongs_to("Tag"))
            .field("postId", FieldDef::reference("Post"))
            .field("tagId", FieldDef::reference("Tag")),
    ]));

    let schema = &analysis.schema;
    assert!(schema.entity("PostTag").unwrap().junction);
    assert!(!schema.entity("Post").unwrap().junction);
    assert_eq!(schema.order().last(), Some(&"PostTag"));

    let tags = schema.entity("Post").unwrap().relation("tags").unwrap();
    assert!(tags.is_many_to_many());
    assert_eq!(tags.foreign_key, "postId");
    let join = tags.many_to_many.as_ref().unwrap();
    assert_eq!(join.through, "PostTag");
    assert_eq!(join.other_key, "tagId");

    let posts = schema.entity("Tag").unwrap().relation("posts").unwrap();
    assert_eq!(posts.foreign_key, "tagId");
    assert_eq!(posts.many_to_many.as_ref().unwrap().through, "PostTag");
    assert_eq!(posts.many_to_many.as_ref().unwrap().other_key, "postId");

    assert!(analysis.diagnostics.is_empty());
}

#[test]
fn unknown_join_entity_is_reported() {
    init_tracing();

    let analysis = assert_ok!(Schema::builder().build(&[
        EntityDef::new("Post").relation("tags", RelationDef::many_to_many("Tag").through("Tagging")),
        EntityDef::new("Tag").field("postId", FieldDef::reference("Post")),
    ]));

    let kinds: Vec<_> = analysis.diagnostics.iter().map(|d| d.kind).collect();
    assert_eq!(kinds, [DiagnosticKind::UnknownJoinEntity]);

    let tags = analysis.schema.entity("Post").unwrap().relation("tags").unwrap();
    assert_eq!(tags.foreign_key, "postId");
    assert_eq!(tags.many_to_many.as_ref().unwrap().through, "Tagging");
}

#[test]
fn unresolved_back_references_warn_once() {
    init_tracing();

    let analysis = assert_ok!(Schema::builder().build(&[
        EntityDef::new("User").relation("posts", RelationDef::has_many("Post")),
        EntityDef::new("Post")
            .relation("author", RelationDef::belongs_to("User"))
            .relation("editor", RelationDef::belongs_to("User")),
    ]));

    let posts: Vec<_> = analysis
        .diagnostics
        .iter()
        .filter(|diagnostic| diagnostic.relation.as_deref() == Some("posts"))
        .collect();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].kind, DiagnosticKind::ForeignKeyDefaulted);
    assert_eq!(
        analysis
            .diagnostics
            .of_kind(DiagnosticKind::AmbiguousForeignKey)
            .count(),
        0
    );
}
