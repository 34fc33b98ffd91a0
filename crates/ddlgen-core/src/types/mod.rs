//! Column type whitelist

use serde::{Deserialize, Serialize};

/// Column types accepted in the `valtype` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Date,
    Datetime,
    Timestamp,
    #[default]
    Varchar,
    Text,
    Int,
    TinyInt,
    Boolean,
    Float,
    Double,
    Char,
    Blob,
}

impl ColumnType {
    pub const ALL: [ColumnType; 12] = [
        ColumnType::Date,
        ColumnType::Datetime,
        ColumnType::Timestamp,
        ColumnType::Varchar,
        ColumnType::Text,
        ColumnType::Int,
        ColumnType::TinyInt,
        ColumnType::Boolean,
        ColumnType::Float,
        ColumnType::Double,
        ColumnType::Char,
        ColumnType::Blob,
    ];

    /// Look up a type name, ignoring case and surrounding whitespace
    pub fn lookup(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|t| t.keyword() == name)
    }

    /// Whether a `(length)` suffix may follow the type keyword
    pub fn accepts_length(&self) -> bool {
        use ColumnType::*;
        match self {
            Varchar | Int | TinyInt | Float | Double | Char => true,
            Date | Datetime | Timestamp | Text | Boolean | Blob => false,
        }
    }

    /// Uppercase keyword as written in DDL
    pub fn sql_name(&self) -> String {
        self.keyword().to_uppercase()
    }

    fn keyword(&self) -> &'static str {
        match self {
            ColumnType::Date => "date",
            ColumnType::Datetime => "datetime",
            ColumnType::Timestamp => "timestamp",
            ColumnType::Varchar => "varchar",
            ColumnType::Text => "text",
            ColumnType::Int => "int",
            ColumnType::TinyInt => "tinyint",
            ColumnType::Boolean => "boolean",
            ColumnType::Float => "float",
            ColumnType::Double => "double",
            ColumnType::Char => "char",
            ColumnType::Blob => "blob",
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.sql_name())
    }
}
