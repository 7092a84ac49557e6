mod config;
pub use config::Config;

pub mod diagnostic;
pub use diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};

mod error;
pub use error::Error;

pub mod schema;
pub use schema::{Analysis, Schema};

/// A Result type alias that uses strata's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Analyze a set of entity definitions into an ordered [`Schema`].
///
/// Shorthand for `Schema::builder().config(config.clone()).build(entities)`.
pub fn analyze(entities: &[schema::def::EntityDef], config: &Config) -> Result<Analysis> {
    Schema::builder().config(config.clone()).build(entities)
}
