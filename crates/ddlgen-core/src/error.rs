//! Error and diagnostic types

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors that abort a generation run
#[derive(Debug, Error, miette::Diagnostic)]
pub enum Error {
    #[error("error processing CSV file: {0}")]
    #[diagnostic(code(ddlgen::csv))]
    Csv(#[from] csv::Error),

    #[error("the CSV file contains no valid data")]
    #[diagnostic(
        code(ddlgen::no_usable_rows),
        help("every row needs a `type` of database, table or column and a non-empty `name`")
    )]
    NoUsableRows,

    #[error("invalid setting `{name}`: {reason}")]
    #[diagnostic(code(ddlgen::invalid_setting))]
    InvalidSetting { name: &'static str, reason: String },
}

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Info,
}

/// Non-fatal note about a row that was dropped or defaulted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
    /// Source line of the row (1-indexed, header is line 1)
    pub line: usize,
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn warning(kind: DiagnosticKind, line: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: Severity::Warning,
            message: message.into(),
            line,
            help: None,
        }
    }

    pub fn info(kind: DiagnosticKind, line: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: Severity::Info,
            message: message.into(),
            line,
            help: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Get the code string (e.g., "W0001")
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

/// Conditions under which a row is skipped or a field is defaulted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// W0001: Row has an empty name
    EmptyName,
    /// W0002: Row type is not database, table or column
    UnknownRowKind,
    /// W0003: Table depends on a database that was not declared before it
    UnresolvedDependency,
    /// W0004: Column appears while no table is open
    NoOpenTable,
    /// W0005: Column type is not in the whitelist
    UnknownColumnType,
    /// W0006: Table was closed without any columns
    EmptyTable,
    /// W0007: Logical name was declared twice
    DuplicateName,
}

impl DiagnosticKind {
    pub fn code(&self) -> &'static str {
        match self {
            DiagnosticKind::EmptyName => "W0001",
            DiagnosticKind::UnknownRowKind => "W0002",
            DiagnosticKind::UnresolvedDependency => "W0003",
            DiagnosticKind::NoOpenTable => "W0004",
            DiagnosticKind::UnknownColumnType => "W0005",
            DiagnosticKind::EmptyTable => "W0006",
            DiagnosticKind::DuplicateName => "W0007",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DiagnosticKind::EmptyName => "empty-name",
            DiagnosticKind::UnknownRowKind => "unknown-row-kind",
            DiagnosticKind::UnresolvedDependency => "unresolved-dependency",
            DiagnosticKind::NoOpenTable => "no-open-table",
            DiagnosticKind::UnknownColumnType => "unknown-column-type",
            DiagnosticKind::EmptyTable => "empty-table",
            DiagnosticKind::DuplicateName => "duplicate-name",
        }
    }
}
