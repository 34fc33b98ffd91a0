//! MySQL dialect details: quoting and table/database options

use serde::{Deserialize, Serialize};

/// Storage and character set options written into the generated DDL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DdlOptions {
    pub engine: String,
    pub table_charset: String,
    pub database_charset: String,
    pub database_collation: String,
}

impl Default for DdlOptions {
    fn default() -> Self {
        Self {
            engine: "InnoDB".to_string(),
            table_charset: "utf8mb4".to_string(),
            database_charset: "utf8".to_string(),
            database_collation: "utf8_bin".to_string(),
        }
    }
}

/// Quote an identifier with backticks
pub fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Quote a string literal with single quotes
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_ident() {
        assert_eq!(quote_ident("users"), "`users`");
        assert_eq!(quote_ident("we`ird"), "`we``ird`");
    }

    #[test]
    fn test_quote_literal() {
        assert_eq!(quote_literal("order total"), "'order total'");
        assert_eq!(quote_literal("it's"), "'it''s'");
        assert_eq!(quote_literal(r"C:\tmp"), r"'C:\\tmp'");
    }
}
