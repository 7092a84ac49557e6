//! The analyzed schema handed to emitters

mod computed;
pub use computed::{Computed, ComputedTy};

mod entity;
pub use entity::Entity;

mod field;
pub use field::{Field, FieldTy};

mod index;
pub use index::{Index, IndexSource};

mod policy;
pub use policy::{Bypass, Operation, OperationPolicy, Policy, ScopeCondition};

mod procedure;
pub use procedure::{Procedure, ProcedureArg, ReturnShape, ReturnTarget, Returns};

mod relation;
pub use relation::{KeySource, ManyToMany, Relation, RelationKind};

mod schema;
pub use schema::Schema;
