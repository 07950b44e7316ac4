//! Subcommand implementations
//!
//! Each command writes its human-facing output to the given writer; logging
//! goes through `tracing`.

use std::fs;
use std::io::Write;
use std::path::Path;

use aerosweep_core::output::{WriteReport, write_partitions};
use aerosweep_core::{
    Block, CoefficientSet, CommandRunner, ParsedReport, SolverRunner, SweepConfig, SweepDriver,
    SweepGrid, parse_report,
};
use color_eyre::eyre::{WrapErr, bail};
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::Command;
use crate::config::{Overrides, load_config, write_default_config};

// ============================================================================
// Dispatch
// ============================================================================

pub fn run(command: Command, out: &mut impl Write) -> color_eyre::Result<()> {
    match command {
        Command::Sweep {
            config,
            strict,
            output_dir,
        } => {
            let mut sweep_config = load_config(config.config.as_deref())?;
            Overrides {
                variant: config.variant.map(Into::into),
                strict,
                output_dir,
            }
            .apply(&mut sweep_config);

            let runner = CommandRunner::new(&sweep_config.program, &sweep_config.paths.working_dir);
            let report = sweep(sweep_config, runner, out)?;
            if !report.is_success() {
                bail!("{} output table(s) could not be written", report.failed.len());
            }
            Ok(())
        }
        Command::Parse { report, json } => parse(&report, json, out),
        Command::Grid { config } => {
            let mut sweep_config = load_config(config.config.as_deref())?;
            Overrides {
                variant: config.variant.map(Into::into),
                ..Default::default()
            }
            .apply(&mut sweep_config);
            grid(&sweep_config, out)
        }
        Command::InitConfig { path, force } => {
            write_default_config(&path, force)?;
            writeln!(out, "wrote default configuration to {}", path.display())?;
            Ok(())
        }
    }
}

// ============================================================================
// Sweep
// ============================================================================

/// Run the sweep and write its tables. Output failures are listed and
/// returned in the report; everything before that aborts with an error.
pub fn sweep<R: SolverRunner>(
    config: SweepConfig,
    runner: R,
    out: &mut impl Write,
) -> color_eyre::Result<WriteReport> {
    let output_dir = config.paths.output_path();

    let table = SweepDriver::new(config, runner)?
        .run()
        .wrap_err("sweep aborted")?;

    let report = write_partitions(&table, &output_dir)?;

    writeln!(
        out,
        "{} grid points evaluated, {} with missing blocks",
        table.len(),
        table.incomplete_count()
    )?;
    writeln!(
        out,
        "{} tables written to {}",
        report.written.len(),
        output_dir.display()
    )?;
    for err in &report.failed {
        writeln!(out, "  failed: {err}")?;
    }

    info!(
        points = table.len(),
        tables = report.written.len(),
        "sweep complete"
    );
    Ok(report)
}

// ============================================================================
// Parse
// ============================================================================

/// JSON shape of a parsed report
#[derive(Debug, Serialize)]
struct ReportSummary {
    dynamic_pressure: Option<f64>,
    coefficients: CoefficientSet,
    missing_blocks: Vec<Block>,
}

impl From<&ParsedReport> for ReportSummary {
    fn from(report: &ParsedReport) -> Self {
        let (coefficients, missing_blocks) = report.coefficients_lenient();
        Self {
            dynamic_pressure: report.dynamic_pressure,
            coefficients,
            missing_blocks,
        }
    }
}

pub fn parse(path: &Path, json: bool, out: &mut impl Write) -> color_eyre::Result<()> {
    let bytes = fs::read(path).wrap_err_with(|| format!("failed to read {}", path.display()))?;
    let report = parse_report(&String::from_utf8_lossy(&bytes));
    let summary = ReportSummary::from(&report);

    for block in &summary.missing_blocks {
        warn!(%block, "block not found in {}", path.display());
    }

    if json {
        serde_json::to_writer_pretty(&mut *out, &summary)?;
        writeln!(out)?;
        return Ok(());
    }

    match summary.dynamic_pressure {
        Some(q) => writeln!(out, "{:<6} {q:>12.4}", "Q")?,
        None => writeln!(out, "{:<6} {:>12}", "Q", "not found")?,
    }
    for (name, value) in summary.coefficients.iter_named() {
        writeln!(out, "{name:<6} {value:>12.4}")?;
    }
    if !summary.missing_blocks.is_empty() {
        let names: Vec<String> = summary.missing_blocks.iter().map(Block::to_string).collect();
        writeln!(out, "missing blocks: {}", names.join(", "))?;
    }
    Ok(())
}

// ============================================================================
// Grid
// ============================================================================

pub fn grid(config: &SweepConfig, out: &mut impl Write) -> color_eyre::Result<()> {
    let grid = SweepGrid::from_config(config)?;
    let points = grid.points();
    let width = points.len().to_string().len();

    for (index, point) in points.iter().enumerate() {
        writeln!(out, "{:>width$}  {point}", index + 1)?;
    }
    writeln!(out, "{} points ({:?})", points.len(), grid.variant())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerosweep_core::{Axis, AxisSet, SolverError, SweepPaths, Variant};
    use tempfile::tempdir;

    const REPORT: &str = include_str!("../../aerosweep_core/testdata/for006_sample.dat");

    const TEMPLATE: &str = "\
 $FLTCON NMACH=1.0, NALPHA=1.0,
  MACH = 0.00,
  ALPHA = 0.00,
 $
CASEID BODY ALONE
";

    fn small_config(dir: &Path) -> SweepConfig {
        SweepConfig {
            axes: AxisSet {
                alpha: Axis::new(-2.0, 0.0, 2.0),
                mach: Axis::new(0.5, 1.0, 0.5),
                ..Default::default()
            },
            paths: SweepPaths {
                working_dir: dir.to_path_buf(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn output_text(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_sweep_writes_tables() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("for005.dat"), TEMPLATE).unwrap();
        let report_path = dir.path().join("for006.dat");
        let runner = move || -> Result<(), SolverError> {
            fs::write(&report_path, REPORT).unwrap();
            Ok(())
        };

        let mut out = Vec::new();
        let report = sweep(small_config(dir.path()), runner, &mut out).unwrap();

        assert!(report.is_success());
        assert!(dir.path().join("coef_output/alpha-2.00.csv").is_file());
        assert!(dir.path().join("coef_output/alpha0.00.csv").is_file());
        let text = output_text(out);
        assert!(text.contains("4 grid points evaluated, 0 with missing blocks"));
        assert!(text.contains("2 tables written"));
    }

    #[test]
    fn test_sweep_solver_failure_aborts() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("for005.dat"), TEMPLATE).unwrap();
        let runner = || -> Result<(), SolverError> {
            Err(SolverError::ExitStatus {
                program: "solver".to_string(),
                code: Some(3),
            })
        };

        let mut out = Vec::new();
        assert!(sweep(small_config(dir.path()), runner, &mut out).is_err());
        assert!(!dir.path().join("coef_output").exists());
    }

    #[test]
    fn test_parse_table_output() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("for006.dat");
        fs::write(&path, REPORT).unwrap();

        let mut out = Vec::new();
        parse(&path, false, &mut out).unwrap();
        let text = output_text(out);

        assert!(text.starts_with("Q          532.9700\n"));
        assert!(text.contains("CMQ        -24.5190\n"));
        assert_eq!(text.lines().count(), 27);
        assert!(!text.contains("missing blocks"));
    }

    #[test]
    fn test_parse_json_output() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("for006.dat");
        fs::write(&path, REPORT).unwrap();

        let mut out = Vec::new();
        parse(&path, true, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["dynamic_pressure"], 532.97);
        assert_eq!(value["coefficients"]["CN"], -0.1503);
        assert_eq!(value["coefficients"].as_object().unwrap().len(), 26);
        assert_eq!(value["missing_blocks"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_parse_reports_missing_blocks() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("for006.dat");
        fs::write(&path, "DYNAMIC PRESSURE = 1.0E+02 LB/FT**2\n").unwrap();

        let mut out = Vec::new();
        parse(&path, false, &mut out).unwrap();
        let text = output_text(out);

        assert!(text.contains("CN              NaN\n"));
        assert!(text.contains("missing blocks: "));
    }

    #[test]
    fn test_parse_json_names_missing_blocks() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("for006.dat");
        fs::write(&path, "").unwrap();

        let mut out = Vec::new();
        parse(&path, true, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert!(value["dynamic_pressure"].is_null());
        assert_eq!(value["missing_blocks"][0], "longitudinal");
        assert_eq!(value["missing_blocks"][4], "dynamic_yaw_roll");
    }

    #[test]
    fn test_parse_missing_file() {
        let dir = tempdir().unwrap();
        let mut out = Vec::new();
        assert!(parse(&dir.path().join("nope.dat"), false, &mut out).is_err());
    }

    #[test]
    fn test_grid_lists_default_points() {
        let mut out = Vec::new();
        grid(&SweepConfig::default(), &mut out).unwrap();
        let text = output_text(out);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 17 * 11 + 1);
        assert_eq!(lines[0], "  1  alpha=-16, mach=0.01");
        assert_eq!(lines[187], "187 points (TwoAxis)");
    }

    #[test]
    fn test_grid_rejects_bad_axis() {
        let config = SweepConfig {
            variant: Variant::TwoAxis,
            axes: AxisSet {
                alpha: Axis::new(0.0, 1.0, 0.0),
                ..Default::default()
            },
            ..Default::default()
        };
        let mut out = Vec::new();
        assert!(grid(&config, &mut out).is_err());
    }

    #[test]
    fn test_grid_rejects_oversized_axis_from_yaml() {
        let config = crate::config::parse_config(
            "axes:\n  alpha:\n    min: 0.0\n    max: 1.0e300\n    step: 1.0e-300\n",
        )
        .unwrap();
        let mut out = Vec::new();
        let err = grid(&config, &mut out).unwrap_err();
        assert!(err.to_string().contains("axis alpha"));
        assert!(out.is_empty());
    }
}
