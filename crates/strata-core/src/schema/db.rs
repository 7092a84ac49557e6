//! Storage-level schema types

mod ty;
pub use ty::Type;
