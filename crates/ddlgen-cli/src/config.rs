//! Configuration file handling

use std::path::{Path, PathBuf};

use ddlgen_core::dialect::DdlOptions;
use ddlgen_core::{GeneratorSettings, NamingMode, Profile};
use miette::{IntoDiagnostic, Result};
use serde::{Deserialize, Serialize};

use crate::args::{Args, OutputFormat};

pub const CONFIG_FILE_NAME: &str = "ddlgen.toml";

/// Configuration for ddlgen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQL script path
    pub sql_output: PathBuf,

    /// Variable mapping path
    pub variables_output: PathBuf,

    /// Operational log path
    pub log_file: PathBuf,

    /// Log level when RUST_LOG is unset (error, warn, info, debug, trace)
    pub log_level: String,

    /// random or passthrough
    pub naming: NamingMode,

    /// standard or provisioning
    pub profile: Profile,

    pub name_length: usize,
    pub user_length: usize,
    pub password_length: usize,

    /// Fixed seed for reproducible names
    pub seed: Option<u64>,

    /// Output format (human, json)
    pub format: Option<String>,

    pub ddl: DdlOptions,
}

impl Default for Config {
    fn default() -> Self {
        let settings = GeneratorSettings::default();
        Self {
            sql_output: PathBuf::from("database_structure.sql"),
            variables_output: PathBuf::from("variable_mapping.txt"),
            log_file: PathBuf::from("db_generation.log"),
            log_level: "info".to_string(),
            naming: settings.naming,
            profile: settings.profile,
            name_length: settings.name_length,
            user_length: settings.user_length,
            password_length: settings.password_length,
            seed: settings.seed,
            format: None,
            ddl: settings.ddl,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).into_diagnostic()?;
        let config: Config = toml::from_str(&contents).into_diagnostic()?;
        Ok(config)
    }

    /// Try to find and load ddlgen.toml in current directory or parent directories
    pub fn find_and_load() -> Result<Option<Self>> {
        let current_dir = std::env::current_dir().into_diagnostic()?;
        Self::find_and_load_from(current_dir)
    }

    pub fn find_and_load_from(mut dir: PathBuf) -> Result<Option<Self>> {
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Ok(Some(Self::from_file(&config_path)?));
            }

            // Try parent directory
            if !dir.pop() {
                break;
            }
        }

        Ok(None)
    }

    /// Merge CLI arguments into configuration
    /// CLI arguments take precedence over config file values
    pub fn merge_with_args(mut self, args: &Args) -> Self {
        if args.not_random {
            self.naming = NamingMode::Passthrough;
        }

        if let Some(profile) = args.profile {
            self.profile = profile;
        }

        if let Some(path) = &args.sql_out {
            self.sql_output = path.clone();
        }

        if let Some(path) = &args.vars_out {
            self.variables_output = path.clone();
        }

        if let Some(path) = &args.log_file {
            self.log_file = path.clone();
        }

        if args.seed.is_some() {
            self.seed = args.seed;
        }

        if let Some(fmt) = args.format {
            self.format = Some(format!("{:?}", fmt).to_lowercase());
        }

        match args.verbose {
            0 => {}
            1 => self.log_level = "debug".to_string(),
            _ => self.log_level = "trace".to_string(),
        }

        self
    }

    pub fn output_format(&self) -> OutputFormat {
        match self.format.as_deref() {
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Human,
        }
    }

    pub fn generator_settings(&self) -> GeneratorSettings {
        GeneratorSettings {
            naming: self.naming,
            profile: self.profile,
            name_length: self.name_length,
            user_length: self.user_length,
            password_length: self.password_length,
            seed: self.seed,
            ddl: self.ddl.clone(),
        }
    }
}
