pub mod app;
pub use app::Schema;

mod builder;
pub use builder::Builder;

pub mod db;

pub mod def;

mod name;
pub use name::{Inflector, Name};

mod verify;

use crate::Diagnostics;

/// The analyzed schema together with every diagnostic raised while
/// producing it.
#[derive(Debug)]
pub struct Analysis {
    /// Entities in creation-safe order
    pub schema: Schema,

    /// Advisory diagnostics, in emission order
    pub diagnostics: Diagnostics,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::default()
    }
}
