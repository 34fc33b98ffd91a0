//! Schema rows, alias table and the builder that turns them into DDL

mod alias;
mod builder;
mod row;

pub use alias::{AliasKind, AliasTable};
pub use builder::{GeneratedSchema, SchemaBuilder};
pub use row::{ingest, is_truthy, ColumnSpec, Ingested, Located, SchemaRow};
