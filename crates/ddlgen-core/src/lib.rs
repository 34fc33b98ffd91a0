//! ddlgen-core: schema CSV to MySQL DDL generator
//!
//! Reads rows tagged as database, table or column and turns them into a DDL
//! script plus a `KEY=value` mapping of the (optionally randomized) physical
//! names and provisioned credentials.

pub mod context;
pub mod ddl;
pub mod dialect;
pub mod error;
pub mod ident;
pub mod schema;
pub mod source;
pub mod types;

pub use context::{GeneratorSettings, Profile, RunContext};
pub use ddl::{Statement, VariableDef};
pub use error::{Diagnostic, DiagnosticKind, Error, Result, Severity};
pub use ident::{Credential, IdentifierGenerator, NamingMode};
pub use schema::{GeneratedSchema, SchemaBuilder, SchemaRow};
pub use types::ColumnType;

/// Decode `input`, build the schema and collect every diagnostic along the way
///
/// Fails when the input cannot be decoded or holds no usable row.
pub fn generate(ctx: &mut RunContext, input: &[u8]) -> Result<(GeneratedSchema, Vec<Diagnostic>)> {
    let records = source::read_records(input)?;
    let ingested = schema::ingest(&records);
    if ingested.rows.is_empty() {
        return Err(Error::NoUsableRows);
    }

    let mut builder = SchemaBuilder::new(ctx);
    builder.extend(&ingested.rows);
    let (generated, mut diagnostics) = builder.finish();

    let mut all = ingested.diagnostics;
    all.append(&mut diagnostics);
    all.sort_by_key(|d| d.line);

    Ok((generated, all))
}
