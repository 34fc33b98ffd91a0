//! Schema builder - walks schema rows in order and emits DDL plus variables

use crate::context::RunContext;
use crate::ddl::{ColumnDdl, Statement, TableDdl, VariableDef, ANY_HOST};
use crate::error::{Diagnostic, DiagnosticKind};
use crate::ident::Credential;
use crate::schema::alias::{AliasKind, AliasTable};
use crate::schema::row::{ColumnSpec, Located, SchemaRow};

/// Output of one builder pass
#[derive(Debug, Clone, Default)]
pub struct GeneratedSchema {
    pub statements: Vec<Statement>,
    pub variables: Vec<VariableDef>,
    pub aliases: AliasTable,
}

impl GeneratedSchema {
    /// Statements rendered and joined by newlines
    pub fn sql_script(&self) -> String {
        self.statements
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// `KEY=value` lines joined by newlines
    pub fn variable_file(&self) -> String {
        self.variables
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn database_count(&self) -> usize {
        self.statements
            .iter()
            .filter(|s| matches!(s, Statement::CreateDatabase { .. }))
            .count()
    }

    pub fn table_count(&self) -> usize {
        self.statements
            .iter()
            .filter(|s| matches!(s, Statement::CreateTable(_)))
            .count()
    }
}

/// Table currently receiving columns
#[derive(Debug)]
struct TableBuffer {
    /// Index of the reserved CREATE TABLE in the statement list
    slot: usize,
    line: usize,
    ddl: TableDdl,
}

/// Builder for turning schema rows into a [`GeneratedSchema`]
pub struct SchemaBuilder<'a> {
    ctx: &'a mut RunContext,
    aliases: AliasTable,
    statements: Vec<Statement>,
    /// CREATE USER / GRANT blocks, appended after all schema statements
    provisioning: Vec<Statement>,
    variables: Vec<VariableDef>,
    /// Provisioned credentials with the variable index right after their entries
    credentials: Vec<(usize, Credential)>,
    open: Option<TableBuffer>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> SchemaBuilder<'a> {
    pub fn new(ctx: &'a mut RunContext) -> Self {
        Self {
            ctx,
            aliases: AliasTable::new(),
            statements: Vec::new(),
            provisioning: Vec::new(),
            variables: Vec::new(),
            credentials: Vec::new(),
            open: None,
            diagnostics: Vec::new(),
        }
    }

    /// Whether a table is open for columns
    pub fn is_building_table(&self) -> bool {
        self.open.is_some()
    }

    /// Process rows in order
    pub fn extend<'r>(&mut self, rows: impl IntoIterator<Item = &'r Located<SchemaRow>>) {
        for row in rows {
            self.push_row(row);
        }
    }

    /// Process a single row
    pub fn push_row(&mut self, row: &Located<SchemaRow>) {
        match &row.value {
            SchemaRow::Database { name } => self.add_database(row.line, name),
            SchemaRow::Table { name, depends } => self.add_table(row.line, name, depends),
            SchemaRow::Column(spec) => self.add_column(row.line, spec),
        }
    }

    /// Flush the open table and return everything generated so far
    pub fn finish(mut self) -> (GeneratedSchema, Vec<Diagnostic>) {
        self.close_table();
        self.statements.append(&mut self.provisioning);

        // A single database also gets the unprefixed keys older mapping consumers read
        if let [(index, credential)] = self.credentials.as_slice() {
            self.variables
                .insert(*index, VariableDef::new("DB_USER", &credential.user));
            self.variables.insert(
                *index + 1,
                VariableDef::new("DB_PASSWORD", &credential.password),
            );
        }

        tracing::info!(
            statements = self.statements.len(),
            variables = self.variables.len(),
            "schema pass completed"
        );

        let schema = GeneratedSchema {
            statements: self.statements,
            variables: self.variables,
            aliases: self.aliases,
        };
        (schema, self.diagnostics)
    }

    fn add_database(&mut self, line: usize, name: &str) {
        let physical = self.ctx.names.object_name(name);
        self.register(line, name, &physical, AliasKind::Database);

        let ddl = &self.ctx.settings.ddl;
        self.statements.push(Statement::CreateDatabase {
            name: physical.clone(),
            charset: ddl.database_charset.clone(),
            collation: ddl.database_collation.clone(),
        });
        self.statements.push(Statement::Use {
            database: physical.clone(),
        });
        self.variables
            .push(VariableDef::new(format!("DB_{}", name.to_uppercase()), &physical));
        tracing::info!("Database created: {}", physical);

        if self.ctx.settings.profile.provisions_users() {
            let credential = self.ctx.names.credential();
            self.provisioning.push(Statement::CreateUser {
                user: credential.user.clone(),
                host: ANY_HOST.to_string(),
                password: credential.password.clone(),
            });
            self.provisioning.push(Statement::GrantAll {
                database: physical.clone(),
                user: credential.user.clone(),
                host: ANY_HOST.to_string(),
            });
            self.provisioning.push(Statement::FlushPrivileges);

            let prefix = format!("DB_{}", name.to_uppercase());
            self.variables
                .push(VariableDef::new(format!("{}_USER", prefix), &credential.user));
            self.variables.push(VariableDef::new(
                format!("{}_PASSWORD", prefix),
                &credential.password,
            ));
            self.credentials.push((self.variables.len(), credential));
            tracing::info!("User provisioned for database: {}", physical);
        }
    }

    fn add_table(&mut self, line: usize, name: &str, depends: &str) {
        // The previous table is flushed even when this one is rejected
        self.close_table();

        let Some(database) = self.aliases.resolve_database(depends).map(str::to_string) else {
            let diag = Diagnostic::warning(
                DiagnosticKind::UnresolvedDependency,
                line,
                format!(
                    "table '{}' depends on '{}', which is not a database declared earlier",
                    name, depends
                ),
            )
            .with_help("declare the database row before its tables");
            tracing::debug!(line, "{}", diag.message);
            self.diagnostics.push(diag);
            return;
        };

        let physical = self.ctx.names.object_name(name);
        self.register(line, name, &physical, AliasKind::Table);

        let ddl = &self.ctx.settings.ddl;
        let table = TableDdl {
            database: database.clone(),
            name: physical.clone(),
            columns: Vec::new(),
            primary_key: Vec::new(),
            unique: Vec::new(),
            engine: ddl.engine.clone(),
            charset: ddl.table_charset.clone(),
        };

        self.open = Some(TableBuffer {
            slot: self.statements.len(),
            line,
            ddl: table.clone(),
        });
        self.statements.push(Statement::CreateTable(table));
        self.variables
            .push(VariableDef::new(format!("TB_{}", name.to_uppercase()), &physical));
        tracing::info!("Table created: {} in {}", physical, database);
    }

    fn add_column(&mut self, line: usize, spec: &ColumnSpec) {
        if self.open.is_none() {
            let diag = Diagnostic::warning(
                DiagnosticKind::NoOpenTable,
                line,
                format!("column '{}' appears before any table and was skipped", spec.name),
            );
            tracing::debug!(line, "{}", diag.message);
            self.diagnostics.push(diag);
            return;
        }

        if let Some(raw) = &spec.unrecognized_type {
            self.diagnostics.push(
                Diagnostic::warning(
                    DiagnosticKind::UnknownColumnType,
                    line,
                    format!(
                        "column '{}' has unknown type '{}', using {}",
                        spec.name, raw, spec.data_type
                    ),
                )
                .with_help(
                    "supported types: date, datetime, timestamp, varchar, text, int, tinyint, boolean, float, double, char, blob",
                ),
            );
        }

        let physical = self.ctx.names.object_name(&spec.name);
        let column = ColumnDdl {
            name: physical.clone(),
            data_type: spec.data_type,
            length: spec
                .length
                .clone()
                .filter(|_| spec.data_type.accepts_length()),
            not_null: spec.not_null,
            auto_increment: spec.auto_increment
                && self.ctx.settings.profile.supports_auto_increment(),
            default: spec.default.clone(),
            comment: spec.comment.clone(),
        };

        if let Some(buffer) = self.open.as_mut() {
            buffer.ddl.columns.push(column);
            if spec.primary_key {
                buffer.ddl.primary_key.push(physical.clone());
            }
            if spec.unique {
                buffer.ddl.unique.push(physical);
            }
        }
    }

    fn close_table(&mut self) {
        let Some(buffer) = self.open.take() else {
            return;
        };

        if buffer.ddl.columns.is_empty() {
            self.statements.remove(buffer.slot);
            tracing::warn!(
                "Table {} has no columns and was left out of the script",
                buffer.ddl.name
            );
            self.diagnostics.push(Diagnostic::warning(
                DiagnosticKind::EmptyTable,
                buffer.line,
                format!("table '{}' has no columns", buffer.ddl.name),
            ));
            return;
        }

        tracing::info!("Table completed: {}", buffer.ddl.name);
        self.statements[buffer.slot] = Statement::CreateTable(buffer.ddl);
    }

    fn register(&mut self, line: usize, logical: &str, physical: &str, kind: AliasKind) {
        if let Some(previous) = self.aliases.register(logical, physical, kind) {
            let kind = match kind {
                AliasKind::Database => "database",
                AliasKind::Table => "table",
            };
            tracing::warn!(
                "{} {} declared again, replacing alias {}",
                kind,
                logical,
                previous
            );
            self.diagnostics.push(Diagnostic::info(
                DiagnosticKind::DuplicateName,
                line,
                format!(
                    "{} '{}' was already declared; later references use the new alias",
                    kind, logical
                ),
            ));
        }
    }
}
