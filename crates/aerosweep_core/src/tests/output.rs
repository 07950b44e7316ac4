//! Partitioning and CSV layout tests

use std::fs;
use std::path::Path;

use super::fixtures::SAMPLE_COEFFICIENTS;
use crate::coefficients::CoefficientSet;
use crate::config::Variant;
use crate::error::OutputError;
use crate::grid::GridPoint;
use crate::output::{format_value, header, partition_path, record_row, write_partitions};
use crate::report::Block;
use crate::table::{PartitionKey, ResultTable, SweepRecord};

// ============================================================================
// Helpers
// ============================================================================

fn record(point: GridPoint) -> SweepRecord {
    SweepRecord {
        point,
        dynamic_pressure: 532.97,
        coefficients: CoefficientSet::from_array(SAMPLE_COEFFICIENTS),
        missing_blocks: Vec::new(),
    }
}

fn two_axis_table() -> ResultTable {
    let mut table = ResultTable::new(Variant::TwoAxis);
    for alpha in [-16.0, -14.0] {
        for mach in [0.01, 0.51, 1.01] {
            table.push(record(GridPoint::new(alpha, mach)));
        }
    }
    table
}

fn four_axis_table() -> ResultTable {
    let mut table = ResultTable::new(Variant::FourAxis);
    for xcg in [2.1, 2.2] {
        for alpha in [0.0, 2.0] {
            for delta in [-1.0, 1.0] {
                let point = GridPoint::new(alpha, 0.8).with_xcg(xcg).with_delta(delta);
                table.push(record(point));
            }
        }
    }
    table
}

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|l| l.split(',').map(str::to_string).collect())
        .collect()
}

// ============================================================================
// Row layout
// ============================================================================

#[test]
fn test_header_columns() {
    let two = header(Variant::TwoAxis);
    assert_eq!(two.len(), 29);
    assert_eq!(&two[..4], &["ALPHA", "MACH", "Q", "CN"]);
    assert_eq!(two[28], "CLLP");

    let four = header(Variant::FourAxis);
    assert_eq!(four.len(), 31);
    assert_eq!(&four[..5], &["XCG", "ALPHA", "MACH", "DELTA", "Q"]);
}

#[test]
fn test_format_value() {
    assert_eq!(format_value(-16.0), "-16.000");
    assert_eq!(format_value(0.01), "0.010");
    assert_eq!(format_value(532.97), "532.970");
    assert_eq!(format_value(f64::NAN), "nan");
}

#[test]
fn test_record_row_matches_header() {
    let row = record_row(Variant::TwoAxis, &record(GridPoint::new(-2.0, 0.51)));
    assert_eq!(row.len(), 29);
    assert_eq!(&row[..4], &["-2.000", "0.510", "532.970", "-0.150"]);

    let point = GridPoint::new(4.0, 0.8).with_xcg(2.3).with_delta(-5.0);
    let row = record_row(Variant::FourAxis, &record(point));
    assert_eq!(row.len(), 31);
    assert_eq!(&row[..5], &["2.300", "4.000", "0.800", "-5.000", "532.970"]);
}

#[test]
fn test_missing_values_render_as_nan() {
    let mut rec = record(GridPoint::new(0.0, 0.5));
    rec.dynamic_pressure = f64::NAN;
    rec.coefficients = CoefficientSet::missing();
    rec.missing_blocks = Block::ALL.to_vec();

    let row = record_row(Variant::TwoAxis, &rec);
    assert!(row[2..].iter().all(|v| v == "nan"));
}

#[test]
fn test_partition_paths() {
    let out = Path::new("out");
    let key = PartitionKey {
        xcg: None,
        alpha: -16.0,
    };
    assert_eq!(partition_path(out, &key), out.join("alpha-16.00.csv"));

    let key = PartitionKey {
        xcg: Some(2.1),
        alpha: 0.0,
    };
    assert_eq!(
        partition_path(out, &key),
        out.join("xcg2.100").join("alpha0.00.csv")
    );
}

// ============================================================================
// Partitioning
// ============================================================================

#[test]
fn test_partition_by_alpha_in_visitation_order() {
    let table = two_axis_table();
    let partitions = table.partition();

    assert_eq!(partitions.len(), 2);
    assert_eq!(partitions[0].key.alpha, -16.0);
    let machs: Vec<f64> = partitions[0].records.iter().map(|r| r.point.mach).collect();
    assert_eq!(machs, vec![0.01, 0.51, 1.01]);
    assert!(partitions[1].records.iter().all(|r| r.point.alpha == -14.0));
}

#[test]
fn test_partition_absorbs_float_noise() {
    let mut table = ResultTable::new(Variant::TwoAxis);
    table.push(record(GridPoint::new(0.1 + 0.2, 0.5)));
    table.push(record(GridPoint::new(0.3, 1.0)));
    assert_eq!(table.partition().len(), 1);
}

#[test]
fn test_four_axis_partition_by_xcg_and_alpha() {
    let table = four_axis_table();
    let partitions = table.partition();

    assert_eq!(partitions.len(), 4);
    let keys: Vec<(Option<f64>, f64)> = partitions
        .iter()
        .map(|p| (p.key.xcg, p.key.alpha))
        .collect();
    assert_eq!(
        keys,
        vec![
            (Some(2.1), 0.0),
            (Some(2.1), 2.0),
            (Some(2.2), 0.0),
            (Some(2.2), 2.0)
        ]
    );
    let deltas: Vec<Option<f64>> = partitions[0].records.iter().map(|r| r.point.delta).collect();
    assert_eq!(deltas, vec![Some(-1.0), Some(1.0)]);
}

// ============================================================================
// Writing
// ============================================================================

#[test]
fn test_write_two_axis_tables() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("coef_output");

    let report = write_partitions(&two_axis_table(), &out).unwrap();
    assert!(report.is_success());
    assert_eq!(report.written.len(), 2);

    let rows = read_rows(&out.join("alpha-16.00.csv"));
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].len(), 29);
    assert_eq!(rows[0][0], "ALPHA");
    let machs: Vec<&str> = rows[1..].iter().map(|r| r[1].as_str()).collect();
    assert_eq!(machs, vec!["0.010", "0.510", "1.010"]);
    assert!(rows[1..].iter().all(|r| r[0] == "-16.000"));

    let rows = read_rows(&out.join("alpha-14.00.csv"));
    assert!(rows[1..].iter().all(|r| r[0] == "-14.000"));
}

#[test]
fn test_existing_table_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path();
    fs::write(out.join("alpha-16.00.csv"), "stale contents\n").unwrap();

    write_partitions(&two_axis_table(), out).unwrap();

    let text = fs::read_to_string(out.join("alpha-16.00.csv")).unwrap();
    assert!(!text.contains("stale"));
    assert_eq!(text.lines().count(), 4);
}

#[test]
fn test_write_four_axis_tables_clears_xcg_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path();
    let xcg_dir = out.join("xcg2.100");
    fs::create_dir_all(&xcg_dir).unwrap();
    fs::write(xcg_dir.join("alpha9.00.csv"), "left over\n").unwrap();

    let report = write_partitions(&four_axis_table(), out).unwrap();
    assert!(report.is_success());
    assert_eq!(report.written.len(), 4);

    assert!(!xcg_dir.join("alpha9.00.csv").exists());
    let rows = read_rows(&xcg_dir.join("alpha0.00.csv"));
    assert_eq!(rows[0].len(), 31);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1][0], "2.100");
    assert_eq!(rows[1][3], "-1.000");
    assert!(out.join("xcg2.200").join("alpha2.00.csv").is_file());
}

#[test]
fn test_failed_removal_does_not_stop_other_tables() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path();
    // A directory where the table should go cannot be removed as a file
    let blocked = out.join("alpha-16.00.csv");
    fs::create_dir_all(&blocked).unwrap();
    fs::write(blocked.join("keep"), "x").unwrap();

    let report = write_partitions(&two_axis_table(), out).unwrap();

    assert!(!report.is_success());
    assert_eq!(report.failed.len(), 1);
    assert!(matches!(&report.failed[0], OutputError::Remove { path, .. } if *path == blocked));
    assert_eq!(report.written, vec![out.join("alpha-14.00.csv")]);
    assert!(blocked.join("keep").exists());
}

#[test]
fn test_uncreatable_output_dir_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("not_a_dir");
    fs::write(&file, "x").unwrap();

    let err = write_partitions(&two_axis_table(), &file.join("out")).unwrap_err();
    assert!(matches!(err, OutputError::CreateDir { .. }));
}
