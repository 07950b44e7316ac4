//! Command-line interface

use std::path::PathBuf;

use aerosweep_core::Variant;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "aerosweep")]
#[command(about = "Sweep a legacy aerodynamics solver across flight conditions")]
pub struct Cli {
    /// Path to the data directory holding the log (default: ~/.aerosweep/)
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the solver at every grid point and write coefficient tables
    Sweep {
        #[command(flatten)]
        config: ConfigArgs,

        /// Abort when a report lacks a block instead of filling NaN
        #[arg(long)]
        strict: bool,

        /// Directory the CSV tables are written to
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Parse one report and print its coefficients
    Parse {
        /// Report file produced by the solver
        report: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List the grid points a sweep would visit
    Grid {
        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Write the default configuration as YAML
    InitConfig {
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Options shared by commands that build a sweep configuration
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// YAML configuration file; defaults apply when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the configured variant
    #[arg(long, value_enum)]
    pub variant: Option<VariantArg>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantArg {
    TwoAxis,
    FourAxis,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::TwoAxis => Variant::TwoAxis,
            VariantArg::FourAxis => Variant::FourAxis,
        }
    }
}

pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".aerosweep")
}
