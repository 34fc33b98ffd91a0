//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser)]
#[command(name = "ddlgen")]
#[command(author, version, about = "Random database structure generator")]
pub struct Args {
    /// Path to input CSV file
    #[arg(long, value_name = "FILE")]
    pub csv: PathBuf,

    /// Do not generate random names for database objects
    #[arg(long)]
    pub not_random: bool,

    /// Script flavour (standard: schema only, provisioning: schema plus users)
    ///
    /// Provisioned credentials are written as DB_<NAME>_USER and DB_<NAME>_PASSWORD;
    /// with a single database DB_USER and DB_PASSWORD are written as well.
    #[arg(long, value_parser = parse_profile)]
    pub profile: Option<ddlgen_core::Profile>,

    /// Configuration file (defaults to ddlgen.toml in this or a parent directory)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Where to write the SQL script
    #[arg(long, value_name = "FILE")]
    pub sql_out: Option<PathBuf>,

    /// Where to write the variable mapping
    #[arg(long, value_name = "FILE")]
    pub vars_out: Option<PathBuf>,

    /// Operational log file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Seed for reproducible random names
    #[arg(long, env = "DDLGEN_SEED")]
    pub seed: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

fn parse_profile(s: &str) -> Result<ddlgen_core::Profile, String> {
    s.parse()
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable messages
    #[default]
    Human,
    /// JSON summary
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_csv_is_required() {
        assert!(Args::try_parse_from(["ddlgen"]).is_err());
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "ddlgen",
            "--csv",
            "schema.csv",
            "--not-random",
            "--profile",
            "standard",
            "--format",
            "json",
            "-vv",
        ])
        .unwrap();

        assert_eq!(args.csv, PathBuf::from("schema.csv"));
        assert!(args.not_random);
        assert_eq!(args.profile, Some(ddlgen_core::Profile::Standard));
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert_eq!(args.verbose, 2);
    }
}
