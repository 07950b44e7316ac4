//! Aerodynamic coefficient sweep library
//!
//! This crate drives a legacy aerodynamics prediction program across a grid of
//! flight conditions and turns its fixed-format text reports into coefficient
//! tables. It supports:
//! - A single-pass report parser extracting dynamic pressure and five
//!   coefficient blocks (26 coefficients total)
//! - Two-axis (alpha, mach) and four-axis (alpha, mach, xcg, delta) grids
//! - Request deck rewriting that preserves every untouched byte
//! - Sequential sweeps through a pluggable solver runner
//! - Partitioned CSV output (per alpha, or per xcg and alpha)
//!
//! # Example
//!
//! ```ignore
//! use aerosweep_core::{CommandRunner, SweepConfig, SweepDriver, output};
//!
//! let config = SweepConfig::default();
//! let runner = CommandRunner::new(&config.program, &config.paths.working_dir);
//! let table = SweepDriver::new(config.clone(), runner)?.run()?;
//! let report = output::write_partitions(&table, &config.paths.output_path())?;
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod error;
pub mod output;
pub mod report;
pub mod runner;
pub mod sweep;
pub mod table;
pub mod template;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod coefficients;
pub mod config;
pub mod grid;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use coefficients::{COEFFICIENT_COUNT, COEFFICIENT_NAMES, CoefficientSet};
pub use config::{AxisSet, MissingBlockPolicy, SweepConfig, SweepPaths, Variant};
pub use error::{ConfigError, OutputError, ParseError, SolverError, SweepError, TemplateError};
pub use grid::{Axis, GridPoint, MAX_AXIS_VALUES, MAX_GRID_POINTS, SweepGrid};
pub use report::{Block, ParsedReport, ReportParser, parse_report};
pub use runner::{CommandRunner, SolverRunner};
pub use sweep::{ProgressCallback, SweepDriver, run_sweep};
pub use table::{Partition, PartitionKey, ResultTable, SweepRecord};
pub use template::RequestTemplate;
