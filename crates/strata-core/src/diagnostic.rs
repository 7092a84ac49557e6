//! Advisory diagnostics produced while analyzing a schema.
//!
//! Diagnostics never abort a run. They travel next to the analyzed schema in
//! [`Analysis`](crate::Analysis) and are mirrored as `tracing` events.

use crate::schema::def::RelationKind;

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub kind: DiagnosticKind,

    /// Entity the diagnostic was raised for
    pub entity: String,

    /// Relation (or field) the diagnostic concerns, if any
    pub relation: Option<String>,

    /// Declared kind of that relation
    pub relation_kind: Option<RelationKind>,

    /// The other entity involved
    pub target: Option<String>,

    /// What went wrong and what the analyzer did about it
    pub reason: String,

    /// How the author can silence the diagnostic
    pub fix: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// No field carried the foreign key; the documented default was used.
    ForeignKeyDefaulted,

    /// Several relations on the target point back at the source.
    AmbiguousForeignKey,

    /// A many-to-many relation names a join entity that does not exist.
    UnknownJoinEntity,

    /// A reference field targets an entity that does not exist.
    UnknownReference,

    /// Two or more entities depend on each other.
    DependencyCycle,
}

/// Append-only list of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostic {
    pub(crate) fn new(kind: DiagnosticKind, entity: &str, reason: impl Into<String>) -> Self {
        Self {
            kind,
            entity: entity.to_string(),
            relation: None,
            relation_kind: None,
            target: None,
            reason: reason.into(),
            fix: None,
        }
    }

    pub(crate) fn relation(mut self, name: &str, kind: RelationKind) -> Self {
        self.relation = Some(name.to_string());
        self.relation_kind = Some(kind);
        self
    }

    pub(crate) fn target(mut self, target: &str) -> Self {
        self.target = Some(target.to_string());
        self
    }

    pub(crate) fn fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = Some(fix.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.entity)?;

        if let Some(relation) = &self.relation {
            write!(f, ".{relation}")?;
        }

        match (self.relation_kind, &self.target) {
            (Some(kind), Some(target)) => write!(f, " ({kind} {target})")?,
            (None, Some(target)) => write!(f, " ({target})")?,
            _ => {}
        }

        write!(f, ": {}", self.reason)?;

        if let Some(fix) = &self.fix {
            write!(f, "; fix: {fix}")?;
        }

        Ok(())
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ForeignKeyDefaulted => "foreign-key-defaulted",
            Self::AmbiguousForeignKey => "ambiguous-foreign-key",
            Self::UnknownJoinEntity => "unknown-join-entity",
            Self::UnknownReference => "unknown-reference",
            Self::DependencyCycle => "dependency-cycle",
        })
    }
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(
            kind = %diagnostic.kind,
            entity = %diagnostic.entity,
            relation = diagnostic.relation.as_deref(),
            target = diagnostic.target.as_deref(),
            "{}",
            diagnostic.reason
        );
        self.items.push(diagnostic);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    /// Diagnostics of the given kind, in emission order.
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.items.iter().filter(move |diagnostic| diagnostic.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.items
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
