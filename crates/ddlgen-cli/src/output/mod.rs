//! Artifact writing and operator-facing output

use std::fs;
use std::path::{Path, PathBuf};

use ddlgen_core::{Diagnostic, GeneratedSchema, Severity};
use miette::{IntoDiagnostic, Result, WrapErr};

use crate::args::OutputFormat;

/// Write the SQL script and the variable mapping, skipping empty ones
///
/// Returns the paths that were written, in order.
pub fn write_artifacts(
    schema: &GeneratedSchema,
    sql_path: &Path,
    vars_path: &Path,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    if !schema.statements.is_empty() {
        fs::write(sql_path, schema.sql_script())
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to write {}", sql_path.display()))?;
        tracing::info!("SQL script written to {}", sql_path.display());
        written.push(sql_path.to_path_buf());
    }

    if !schema.variables.is_empty() {
        fs::write(vars_path, schema.variable_file())
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to write {}", vars_path.display()))?;
        tracing::info!("Variable mapping written to {}", vars_path.display());
        written.push(vars_path.to_path_buf());
    }

    Ok(written)
}

/// Output formatter for the run summary
pub struct OutputFormatter {
    format: OutputFormat,
    input_name: String,
    verbose: bool,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, input_name: String) -> Self {
        Self {
            format,
            input_name,
            verbose: false,
            quiet: false,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Print the outcome of a run in the configured format
    pub fn print_summary(
        &self,
        schema: &GeneratedSchema,
        written: &[PathBuf],
        diagnostics: &[Diagnostic],
    ) {
        match self.format {
            OutputFormat::Human => self.print_human(written, diagnostics),
            OutputFormat::Json => println!("{}", self.render_json(schema, written, diagnostics)),
        }
    }

    fn print_human(&self, written: &[PathBuf], diagnostics: &[Diagnostic]) {
        if self.quiet {
            return;
        }

        if self.verbose {
            for diag in diagnostics {
                let severity_str = match diag.severity {
                    Severity::Warning => "\x1b[33mwarning\x1b[0m",
                    Severity::Info => "\x1b[34minfo\x1b[0m",
                };
                eprintln!("{}[{}]: {}", severity_str, diag.code(), diag.message);
                eprintln!("  --> {}:{}", self.input_name, diag.line);
                if let Some(help) = &diag.help {
                    eprintln!("   = help: {}", help);
                }
            }
        }

        for path in written {
            println!("File '{}' successfully created.", path.display());
        }
    }

    fn render_json(
        &self,
        schema: &GeneratedSchema,
        written: &[PathBuf],
        diagnostics: &[Diagnostic],
    ) -> String {
        let files: Vec<String> = written.iter().map(|p| p.display().to_string()).collect();
        let diagnostics: Vec<serde_json::Value> = diagnostics
            .iter()
            .map(|d| {
                serde_json::json!({
                    "code": d.code(),
                    "name": d.kind.name(),
                    "severity": d.severity,
                    "line": d.line,
                    "message": d.message,
                    "help": d.help,
                })
            })
            .collect();

        let output = serde_json::json!({
            "input": self.input_name,
            "files": files,
            "databases": schema.database_count(),
            "tables": schema.table_count(),
            "variables": schema.variables.len(),
            "diagnostics": diagnostics,
        });
        serde_json::to_string_pretty(&output).unwrap_or_else(|_| output.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddlgen_core::{generate, GeneratorSettings, NamingMode, Profile, RunContext};

    fn schema(input: &str) -> (GeneratedSchema, Vec<Diagnostic>) {
        let mut ctx = RunContext::new(GeneratorSettings {
            naming: NamingMode::Passthrough,
            profile: Profile::Standard,
            ..Default::default()
        })
        .unwrap();
        generate(&mut ctx, input.as_bytes()).unwrap()
    }

    #[test]
    fn test_write_both_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let sql = dir.path().join("database_structure.sql");
        let vars = dir.path().join("variable_mapping.txt");
        let (schema, _) = schema("type,name,depends\ndatabase,Shop,\ntable,Orders,Shop\ncolumn,Id,\n");

        let written = write_artifacts(&schema, &sql, &vars).unwrap();

        assert_eq!(written, vec![sql.clone(), vars.clone()]);
        assert_eq!(fs::read_to_string(&sql).unwrap(), schema.sql_script());
        assert_eq!(
            fs::read_to_string(&vars).unwrap(),
            "DB_SHOP=Shop\nTB_ORDERS=Orders"
        );
    }

    #[test]
    fn test_empty_lists_are_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let sql = dir.path().join("out.sql");
        let vars = dir.path().join("vars.txt");

        let written = write_artifacts(&GeneratedSchema::default(), &sql, &vars).unwrap();

        assert!(written.is_empty());
        assert!(!sql.exists());
        assert!(!vars.exists());
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let sql = dir.path().join("missing").join("out.sql");
        let vars = dir.path().join("vars.txt");
        let (schema, _) = schema("type,name\ndatabase,Shop\n");

        assert!(write_artifacts(&schema, &sql, &vars).is_err());
    }

    #[test]
    fn test_json_summary() {
        let (schema, diagnostics) =
            schema("type,name,depends\ndatabase,Shop,\ntable,Orders,Nowhere\n");
        let formatter = OutputFormatter::new(OutputFormat::Json, "schema.csv".to_string());

        let json = formatter.render_json(&schema, &[PathBuf::from("out.sql")], &diagnostics);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["input"], "schema.csv");
        assert_eq!(value["databases"], 1);
        assert_eq!(value["tables"], 0);
        assert_eq!(value["files"][0], "out.sql");
        assert_eq!(value["diagnostics"][0]["code"], "W0003");
        assert_eq!(value["diagnostics"][0]["severity"], "warning");
        assert_eq!(value["diagnostics"][0]["line"], 3);
    }
}
