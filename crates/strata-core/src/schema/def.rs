//! Authored entity definitions.
//!
//! These are the inputs of the analysis stage. They derive `Deserialize` so a
//! surrounding tool can materialize them from JSON or YAML, and expose
//! builder-style constructors for in-memory use.

mod computed;
pub use computed::ComputedDef;

mod entity;
pub use entity::EntityDef;

mod field;
pub use field::{FieldDef, FieldKind};

mod index;
pub use index::IndexDef;

mod policy;
pub use policy::{PolicyDef, Predicate, RuleDef};

mod procedure;
pub use procedure::{ArgDef, ProcedureDef};

mod relation;
pub use relation::{Direction, OrderBy, RelationDef, RelationKind};
