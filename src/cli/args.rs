//! CLI argument definitions using clap
//!
//! Commands:
//! - sqli-lab init --config <path>
//! - sqli-lab start --config <path>
//! - sqli-lab query --config <path> [--firstname ..] [--lastname ..] [--insurance-provider ..]
//! - sqli-lab settings --config <path>
//! - sqli-lab toggle <parameterized|validation> --config <path>

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::search::PolicyField;

/// Default configuration file location
pub const DEFAULT_CONFIG: &str = "./sqli-lab.json";

/// sqli-lab - A runtime-toggleable SQL injection demonstration server
#[derive(Parser, Debug)]
#[command(name = "sqli-lab")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the database file, its tables and the demo data
    Init {
        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },

    /// Start the HTTP server
    Start {
        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run one patient search and exit
    Query {
        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,

        /// First-name filter
        #[arg(long)]
        firstname: Option<String>,

        /// Last-name filter
        #[arg(long)]
        lastname: Option<String>,

        /// Insurance-provider filter
        #[arg(long)]
        insurance_provider: Option<String>,
    },

    /// Print the current policy toggles
    Settings {
        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },

    /// Flip one policy toggle
    Toggle {
        /// Toggle to flip
        #[arg(value_enum)]
        field: ToggleArg,

        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },
}

/// Toggle names accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleArg {
    Parameterized,
    Validation,
}

impl From<ToggleArg> for PolicyField {
    fn from(arg: ToggleArg) -> Self {
        match arg {
            ToggleArg::Parameterized => PolicyField::Parameterized,
            ToggleArg::Validation => PolicyField::Validation,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
