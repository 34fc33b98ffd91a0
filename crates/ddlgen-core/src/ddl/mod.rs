//! Structured DDL statements and their rendering
//!
//! Statements are built as values during the schema pass and only turned into
//! text here, so quoting lives in one place.

use std::fmt;

use crate::dialect::{quote_ident, quote_literal};
use crate::types::ColumnType;

/// Host part used for provisioned accounts
pub const ANY_HOST: &str = "%";

/// One DDL statement in the generated script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    CreateDatabase {
        name: String,
        charset: String,
        collation: String,
    },
    Use {
        database: String,
    },
    CreateTable(TableDdl),
    CreateUser {
        user: String,
        host: String,
        password: String,
    },
    GrantAll {
        database: String,
        user: String,
        host: String,
    },
    FlushPrivileges,
}

/// CREATE TABLE statement with its columns and key clauses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDdl {
    pub database: String,
    pub name: String,
    pub columns: Vec<ColumnDdl>,
    pub primary_key: Vec<String>,
    pub unique: Vec<String>,
    pub engine: String,
    pub charset: String,
}

/// Column definition line inside CREATE TABLE
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDdl {
    pub name: String,
    pub data_type: ColumnType,
    pub length: Option<String>,
    pub not_null: bool,
    pub auto_increment: bool,
    /// Written verbatim, so expressions like CURRENT_TIMESTAMP pass through
    pub default: Option<String>,
    pub comment: Option<String>,
}

/// `KEY=value` line of the variable mapping file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDef {
    pub key: String,
    pub value: String,
}

impl VariableDef {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::CreateDatabase {
                name,
                charset,
                collation,
            } => write!(
                f,
                "CREATE DATABASE IF NOT EXISTS {} DEFAULT CHARACTER SET {} COLLATE {} ;",
                quote_ident(name),
                charset,
                collation
            ),
            Statement::Use { database } => write!(f, "USE {};", quote_ident(database)),
            Statement::CreateTable(table) => write!(f, "{}", table),
            Statement::CreateUser {
                user,
                host,
                password,
            } => write!(
                f,
                "CREATE USER IF NOT EXISTS {}@{} IDENTIFIED BY {};",
                quote_literal(user),
                quote_literal(host),
                quote_literal(password)
            ),
            Statement::GrantAll {
                database,
                user,
                host,
            } => write!(
                f,
                "GRANT ALL PRIVILEGES ON {}.* TO {}@{};",
                quote_ident(database),
                quote_literal(user),
                quote_literal(host)
            ),
            Statement::FlushPrivileges => write!(f, "FLUSH PRIVILEGES;"),
        }
    }
}

impl fmt::Display for TableDdl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "CREATE TABLE IF NOT EXISTS {}.{} (",
            quote_ident(&self.database),
            quote_ident(&self.name)
        )?;

        let mut lines: Vec<String> = self.columns.iter().map(|c| c.to_string()).collect();
        if !self.primary_key.is_empty() {
            lines.push(format!("  PRIMARY KEY ({})", self.primary_key.join(", ")));
        }
        for column in &self.unique {
            lines.push(format!("  UNIQUE INDEX ({})", column));
        }

        writeln!(f, "{}", lines.join(",\n"))?;
        write!(
            f,
            ") ENGINE={} DEFAULT CHARSET={};",
            self.engine, self.charset
        )
    }
}

impl fmt::Display for ColumnDdl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  {} {}", quote_ident(&self.name), self.data_type)?;
        if let Some(length) = &self.length {
            write!(f, "({})", length)?;
        }
        f.write_str(if self.not_null { " NOT NULL" } else { " NULL" })?;
        if self.auto_increment {
            f.write_str(" AUTO_INCREMENT")?;
        }
        if let Some(default) = &self.default {
            write!(f, " DEFAULT {}", default)?;
        }
        if let Some(comment) = &self.comment {
            write!(f, " COMMENT {}", quote_literal(comment))?;
        }
        Ok(())
    }
}

impl fmt::Display for VariableDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn column(name: &str, data_type: ColumnType) -> ColumnDdl {
        ColumnDdl {
            name: name.to_string(),
            data_type,
            length: None,
            not_null: false,
            auto_increment: false,
            default: None,
            comment: None,
        }
    }

    #[test]
    fn test_render_create_database() {
        let stmt = Statement::CreateDatabase {
            name: "shop".to_string(),
            charset: "utf8".to_string(),
            collation: "utf8_bin".to_string(),
        };
        assert_eq!(
            stmt.to_string(),
            "CREATE DATABASE IF NOT EXISTS `shop` DEFAULT CHARACTER SET utf8 COLLATE utf8_bin ;"
        );
    }

    #[test]
    fn test_render_full_column() {
        let col = ColumnDdl {
            length: Some("11".to_string()),
            not_null: true,
            auto_increment: true,
            default: Some("0".to_string()),
            comment: Some("row id".to_string()),
            ..column("id", ColumnType::Int)
        };
        assert_eq!(
            col.to_string(),
            "  `id` INT(11) NOT NULL AUTO_INCREMENT DEFAULT 0 COMMENT 'row id'"
        );
    }

    #[test]
    fn test_render_table_with_keys() {
        let table = TableDdl {
            database: "shop".to_string(),
            name: "users".to_string(),
            columns: vec![
                column("id", ColumnType::Int),
                column("email", ColumnType::Varchar),
            ],
            primary_key: vec!["id".to_string()],
            unique: vec!["email".to_string()],
            engine: "InnoDB".to_string(),
            charset: "utf8mb4".to_string(),
        };
        let expected = "\
CREATE TABLE IF NOT EXISTS `shop`.`users` (
  `id` INT NULL,
  `email` VARCHAR NULL,
  PRIMARY KEY (id),
  UNIQUE INDEX (email)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4;";
        assert_eq!(table.to_string(), expected);
    }

    #[test]
    fn test_render_user_block() {
        let create = Statement::CreateUser {
            user: "abc".to_string(),
            host: ANY_HOST.to_string(),
            password: "Xy1-z".to_string(),
        };
        let grant = Statement::GrantAll {
            database: "shop".to_string(),
            user: "abc".to_string(),
            host: ANY_HOST.to_string(),
        };
        assert_eq!(
            create.to_string(),
            "CREATE USER IF NOT EXISTS 'abc'@'%' IDENTIFIED BY 'Xy1-z';"
        );
        assert_eq!(
            grant.to_string(),
            "GRANT ALL PRIVILEGES ON `shop`.* TO 'abc'@'%';"
        );
        assert_eq!(Statement::FlushPrivileges.to_string(), "FLUSH PRIVILEGES;");
    }

    #[test]
    fn test_render_variable() {
        assert_eq!(VariableDef::new("DB_SHOP", "q1w2e3r4").to_string(), "DB_SHOP=q1w2e3r4");
    }
}
