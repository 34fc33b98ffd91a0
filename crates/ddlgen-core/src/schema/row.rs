//! Typed schema rows, decided once at ingestion

use crate::error::{Diagnostic, DiagnosticKind};
use crate::source::Record;
use crate::types::ColumnType;

/// A row that survived ingestion, with the line it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located<T> {
    pub line: usize,
    pub value: T,
}

/// One input row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaRow {
    Database { name: String },
    Table { name: String, depends: String },
    Column(ColumnSpec),
}

/// Column attributes taken from a `column` row
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnSpec {
    pub name: String,
    pub data_type: ColumnType,
    /// Raw `valtype` when it was not in the whitelist and fell back
    pub unrecognized_type: Option<String>,
    pub length: Option<String>,
    pub not_null: bool,
    pub default: Option<String>,
    pub comment: Option<String>,
    pub primary_key: bool,
    pub unique: bool,
    pub auto_increment: bool,
}

impl SchemaRow {
    pub fn name(&self) -> &str {
        match self {
            SchemaRow::Database { name } | SchemaRow::Table { name, .. } => name,
            SchemaRow::Column(spec) => &spec.name,
        }
    }

    /// Classify a record; rows that can never produce DDL come back as a diagnostic
    pub fn from_record(record: &Record) -> Result<Self, Diagnostic> {
        let kind = record.get("type").trim().to_lowercase();
        let name = record.get("name").trim().to_string();

        if name.is_empty() {
            return Err(Diagnostic::info(
                DiagnosticKind::EmptyName,
                record.line,
                "row has no name and was skipped",
            ));
        }

        match kind.as_str() {
            "database" | "db" => Ok(SchemaRow::Database { name }),
            "table" => Ok(SchemaRow::Table {
                name,
                depends: record.get("depends").trim().to_string(),
            }),
            "column" => Ok(SchemaRow::Column(ColumnSpec::from_record(name, record))),
            _ => Err(Diagnostic::info(
                DiagnosticKind::UnknownRowKind,
                record.line,
                format!("row '{}' has unknown type '{}' and was skipped", name, kind),
            )
            .with_help("use one of: database, table, column")),
        }
    }
}

impl ColumnSpec {
    fn from_record(name: String, record: &Record) -> Self {
        let raw_type = record.get("valtype").trim();
        let (data_type, unrecognized_type) = if raw_type.is_empty() {
            (ColumnType::default(), None)
        } else {
            match ColumnType::lookup(raw_type) {
                Some(t) => (t, None),
                None => (ColumnType::default(), Some(raw_type.to_string())),
            }
        };

        Self {
            name,
            data_type,
            unrecognized_type,
            length: non_empty(record.get("length")),
            not_null: is_truthy(record.get("nn")),
            default: non_empty(record.get("default")),
            comment: non_empty(record.get("comment")),
            primary_key: is_truthy(record.get("pk")),
            unique: is_truthy(record.get("uq")),
            auto_increment: is_truthy(record.get("ai")),
        }
    }
}

/// `1`, `true` or `x`, ignoring case and surrounding whitespace
pub fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "x")
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Result of turning raw records into typed rows
#[derive(Debug, Default)]
pub struct Ingested {
    pub rows: Vec<Located<SchemaRow>>,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn ingest(records: &[Record]) -> Ingested {
    let mut ingested = Ingested::default();
    for record in records {
        match SchemaRow::from_record(record) {
            Ok(value) => ingested.rows.push(Located {
                line: record.line,
                value,
            }),
            Err(diag) => {
                tracing::debug!(line = record.line, "{}", diag.message);
                ingested.diagnostics.push(diag);
            }
        }
    }
    ingested
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn record(pairs: &[(&str, &str)]) -> Record {
        Record {
            line: 2,
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<IndexMap<_, _>>(),
        }
    }

    #[test]
    fn test_truthy_flags() {
        for value in ["1", "true", "TRUE", " x ", "X"] {
            assert!(is_truthy(value), "{value:?} should be truthy");
        }
        for value in ["", "0", "yes", "false", "y"] {
            assert!(!is_truthy(value), "{value:?} should not be truthy");
        }
    }

    #[test]
    fn test_db_alias_for_database() {
        let row = SchemaRow::from_record(&record(&[("type", " DB "), ("name", "Shop")])).unwrap();
        assert_eq!(
            row,
            SchemaRow::Database {
                name: "Shop".to_string()
            }
        );
    }

    #[test]
    fn test_empty_name_is_skipped() {
        let diag = SchemaRow::from_record(&record(&[("type", "table"), ("name", "  ")]))
            .unwrap_err();
        assert_eq!(diag.kind, DiagnosticKind::EmptyName);
        assert_eq!(diag.line, 2);
    }

    #[test]
    fn test_unknown_kind_is_skipped() {
        let diag =
            SchemaRow::from_record(&record(&[("type", "view"), ("name", "v")])).unwrap_err();
        assert_eq!(diag.kind, DiagnosticKind::UnknownRowKind);
    }

    #[test]
    fn test_column_attributes() {
        let row = SchemaRow::from_record(&record(&[
            ("type", "column"),
            ("name", "Id"),
            ("valtype", "INT"),
            ("length", "11"),
            ("nn", "x"),
            ("pk", "1"),
            ("ai", "true"),
            ("comment", " primary id "),
        ]))
        .unwrap();

        let SchemaRow::Column(spec) = row else {
            panic!("expected a column row");
        };
        assert_eq!(spec.data_type, ColumnType::Int);
        assert_eq!(spec.length.as_deref(), Some("11"));
        assert!(spec.not_null);
        assert!(spec.primary_key);
        assert!(spec.auto_increment);
        assert!(!spec.unique);
        assert_eq!(spec.default, None);
        assert_eq!(spec.comment.as_deref(), Some("primary id"));
    }

    #[test]
    fn test_blank_valtype_defaults_quietly() {
        let row = SchemaRow::from_record(&record(&[("type", "column"), ("name", "Note")])).unwrap();
        let SchemaRow::Column(spec) = row else {
            panic!("expected a column row");
        };
        assert_eq!(spec.data_type, ColumnType::Varchar);
        assert_eq!(spec.unrecognized_type, None);
    }

    #[test]
    fn test_unknown_valtype_falls_back() {
        let row = SchemaRow::from_record(&record(&[
            ("type", "column"),
            ("name", "Amount"),
            ("valtype", "money"),
        ]))
        .unwrap();
        let SchemaRow::Column(spec) = row else {
            panic!("expected a column row");
        };
        assert_eq!(spec.data_type, ColumnType::Varchar);
        assert_eq!(spec.unrecognized_type.as_deref(), Some("money"));
    }

    #[test]
    fn test_ingest_keeps_order_and_lines() {
        let records = vec![
            Record {
                line: 2,
                ..record(&[("type", "database"), ("name", "Shop")])
            },
            Record {
                line: 3,
                ..record(&[("type", "column"), ("name", "")])
            },
            Record {
                line: 4,
                ..record(&[("type", "table"), ("name", "Orders"), ("depends", "Shop")])
            },
        ];

        let ingested = ingest(&records);
        assert_eq!(ingested.rows.len(), 2);
        assert_eq!(ingested.rows[0].line, 2);
        assert_eq!(ingested.rows[1].line, 4);
        assert_eq!(ingested.rows[1].value.name(), "Orders");
        assert_eq!(ingested.diagnostics.len(), 1);
        assert_eq!(ingested.diagnostics[0].line, 3);
    }
}
