//! CSV output of partitioned sweep results
//!
//! Layout on disk:
//! - two-axis: `<out>/alpha<alpha:.2>.csv`
//! - four-axis: `<out>/xcg<xcg:.3>/alpha<alpha:.2>.csv`, each xcg directory
//!   cleared before writing
//!
//! Existing files are deleted before being rewritten. Deletion and writing
//! are not atomic together: an interruption in between leaves that table
//! missing until the next run.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::coefficients::COEFFICIENT_NAMES;
use crate::config::Variant;
use crate::error::OutputError;
use crate::table::{PartitionKey, ResultTable, SweepRecord};

/// Outcome of writing all partitions. Failures are per file; other files
/// are still written.
#[derive(Debug, Default)]
pub struct WriteReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<OutputError>,
}

impl WriteReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Column header: 29 columns for two-axis, 31 for four-axis
pub fn header(variant: Variant) -> Vec<&'static str> {
    let leading: &[&'static str] = match variant {
        Variant::TwoAxis => &["ALPHA", "MACH", "Q"],
        Variant::FourAxis => &["XCG", "ALPHA", "MACH", "DELTA", "Q"],
    };
    leading
        .iter()
        .copied()
        .chain(COEFFICIENT_NAMES.iter().copied())
        .collect()
}

/// Three decimals; NaN renders as `nan`
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        format!("{value:.3}")
    }
}

pub fn record_row(variant: Variant, record: &SweepRecord) -> Vec<String> {
    let point = &record.point;
    let leading = match variant {
        Variant::TwoAxis => vec![point.alpha, point.mach, record.dynamic_pressure],
        Variant::FourAxis => vec![
            point.xcg.unwrap_or(f64::NAN),
            point.alpha,
            point.mach,
            point.delta.unwrap_or(f64::NAN),
            record.dynamic_pressure,
        ],
    };
    leading
        .into_iter()
        .chain(record.coefficients.values().iter().copied())
        .map(format_value)
        .collect()
}

fn xcg_dir(out_dir: &Path, xcg: f64) -> PathBuf {
    out_dir.join(format!("xcg{xcg:.3}"))
}

/// File a partition is written to
pub fn partition_path(out_dir: &Path, key: &PartitionKey) -> PathBuf {
    let file = format!("alpha{:.2}.csv", key.alpha);
    match key.xcg {
        Some(xcg) => xcg_dir(out_dir, xcg).join(file),
        None => out_dir.join(file),
    }
}

/// Write one CSV per partition under `out_dir`.
///
/// Only failure to create `out_dir` itself is returned as an error.
pub fn write_partitions(table: &ResultTable, out_dir: &Path) -> Result<WriteReport, OutputError> {
    fs::create_dir_all(out_dir).map_err(|source| OutputError::CreateDir {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let variant = table.variant();
    let header = header(variant);
    let mut report = WriteReport::default();
    let mut prepared_dirs: Vec<(PathBuf, bool)> = Vec::new();

    for partition in table.partition() {
        let path = partition_path(out_dir, &partition.key);

        if let Some(xcg) = partition.key.xcg {
            let dir = xcg_dir(out_dir, xcg);
            let ready = match prepared_dirs.iter().find(|(d, _)| *d == dir) {
                Some((_, ready)) => *ready,
                None => {
                    let ready = match reset_dir(&dir) {
                        Ok(()) => true,
                        Err(err) => {
                            warn!("{err}");
                            report.failed.push(err);
                            false
                        }
                    };
                    prepared_dirs.push((dir, ready));
                    ready
                }
            };
            if !ready {
                continue;
            }
        }

        if let Err(err) = remove_existing(&path) {
            warn!("{err}");
            report.failed.push(err);
            continue;
        }

        let rows = partition.records.iter().map(|r| record_row(variant, r));
        match write_csv(&path, &header, rows) {
            Ok(()) => report.written.push(path),
            Err(err) => {
                warn!("{err}");
                report.failed.push(err);
            }
        }
    }

    info!(
        written = report.written.len(),
        failed = report.failed.len(),
        dir = %out_dir.display(),
        "CSV tables written"
    );
    Ok(report)
}

/// Remove and recreate a per-xcg directory
fn reset_dir(dir: &Path) -> Result<(), OutputError> {
    if dir.is_dir() {
        fs::remove_dir_all(dir).map_err(|source| OutputError::Remove {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    fs::create_dir_all(dir).map_err(|source| OutputError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

fn remove_existing(path: &Path) -> Result<(), OutputError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(OutputError::Remove {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn write_csv<I>(path: &Path, header: &[&str], rows: I) -> Result<(), OutputError>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let to_err = |source: csv::Error| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(to_err)?;
    writer.write_record(header).map_err(to_err)?;
    for row in rows {
        writer.write_record(&row).map_err(to_err)?;
    }
    writer
        .flush()
        .map_err(|source| to_err(csv::Error::from(source)))
}
