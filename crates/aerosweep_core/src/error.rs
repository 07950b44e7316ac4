use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::grid::GridPoint;
use crate::report::Block;

/// Errors raised while validating sweep configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("axis {axis}: step must be positive and finite (got {step})")]
    InvalidStep { axis: &'static str, step: f64 },

    #[error("axis {axis}: bounds must be finite (min={min}, max={max})")]
    NonFiniteBounds {
        axis: &'static str,
        min: f64,
        max: f64,
    },

    #[error("axis {axis}: max {max} is below min {min}")]
    InvertedBounds {
        axis: &'static str,
        min: f64,
        max: f64,
    },

    #[error("axis {axis}: more than {limit} values between {min} and {max} at step {step}")]
    TooManyValues {
        axis: &'static str,
        min: f64,
        max: f64,
        step: f64,
        limit: usize,
    },

    #[error("grid has more than {limit} points")]
    TooManyPoints { limit: usize },
}

/// Errors raised when a parsed report cannot yield a full coefficient set
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("{block} block not found in report")]
    BlockNotFound { block: Block },

    #[error("{block} block holds {found} values, expected {expected}")]
    BlockWidth {
        block: Block,
        expected: usize,
        found: usize,
    },
}

/// Errors related to the request template
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read request template {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("template line {line}: {keyword} assignment has no `=` separator")]
    MissingSeparator { line: usize, keyword: &'static str },
}

/// Errors from invoking the external prediction program
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited unsuccessfully ({})", exit_code_label(.code))]
    ExitStatus { program: String, code: Option<i32> },
}

fn exit_code_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

/// Fatal errors that abort a sweep
#[derive(Debug, Error)]
pub enum SweepError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("failed to write request deck {path}: {source}")]
    WriteRequest {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("solver failed at {point}: {source}")]
    Solver {
        point: GridPoint,
        #[source]
        source: SolverError,
    },

    #[error("failed to read report {path} at {point}: {source}")]
    ReadReport {
        point: GridPoint,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("report at {point} is incomplete: {source}")]
    Parse {
        point: GridPoint,
        #[source]
        source: ParseError,
    },
}

/// Errors writing the partitioned CSV tables
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove existing {path} (is it open elsewhere?): {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
