//! Sweep results and their partitioning into output groups

use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::warn;

use crate::coefficients::CoefficientSet;
use crate::config::{MissingBlockPolicy, Variant};
use crate::error::SweepError;
use crate::grid::GridPoint;
use crate::report::{Block, ParsedReport};

/// Result for one grid point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepRecord {
    pub point: GridPoint,
    /// NaN when the report never stated it
    pub dynamic_pressure: f64,
    pub coefficients: CoefficientSet,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_blocks: Vec<Block>,
}

impl SweepRecord {
    /// Build a record from a parsed report under the given policy.
    ///
    /// `Sentinel` logs a warning per missing block and fills those slots with
    /// NaN; `Strict` returns the first missing block as an error.
    pub fn from_report(
        point: GridPoint,
        report: &ParsedReport,
        policy: MissingBlockPolicy,
    ) -> Result<Self, SweepError> {
        let (coefficients, missing_blocks) = match policy {
            MissingBlockPolicy::Strict => {
                let coefficients = report
                    .coefficients()
                    .map_err(|source| SweepError::Parse { point, source })?;
                (coefficients, Vec::new())
            }
            MissingBlockPolicy::Sentinel => {
                let (coefficients, missing) = report.coefficients_lenient();
                for block in &missing {
                    warn!(%point, %block, "block not found in report, filling with NaN");
                }
                (coefficients, missing)
            }
        };

        if report.dynamic_pressure.is_none() {
            warn!(%point, "dynamic pressure not found in report");
        }

        Ok(Self {
            point,
            dynamic_pressure: report.dynamic_pressure_or_nan(),
            coefficients,
            missing_blocks,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.missing_blocks.is_empty()
    }
}

/// Identifies one output table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartitionKey {
    pub xcg: Option<f64>,
    pub alpha: f64,
}

impl PartitionKey {
    pub fn for_record(variant: Variant, record: &SweepRecord) -> Self {
        match variant {
            Variant::TwoAxis => Self {
                xcg: None,
                alpha: record.point.alpha,
            },
            Variant::FourAxis => Self {
                xcg: record.point.xcg,
                alpha: record.point.alpha,
            },
        }
    }

    /// Grouping identity. Values compare by their 3-decimal rendering so
    /// accumulated float noise does not split a group.
    fn identity(&self) -> String {
        match self.xcg {
            Some(xcg) => format!("{xcg:.3}/{:.3}", self.alpha),
            None => format!("{:.3}", self.alpha),
        }
    }
}

/// Records that share one output table, in visitation order
#[derive(Debug, Clone)]
pub struct Partition<'a> {
    pub key: PartitionKey,
    pub records: Vec<&'a SweepRecord>,
}

/// All records of a sweep, in visitation order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultTable {
    variant: Variant,
    records: Vec<SweepRecord>,
}

impl ResultTable {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            records: Vec::new(),
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn push(&mut self, record: SweepRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[SweepRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn incomplete_count(&self) -> usize {
        self.records.iter().filter(|r| !r.is_complete()).count()
    }

    /// Groups records per alpha (two-axis) or per (xcg, alpha) (four-axis).
    /// Groups appear in order of first occurrence.
    pub fn partition(&self) -> Vec<Partition<'_>> {
        let mut index: FxHashMap<String, usize> = FxHashMap::default();
        let mut partitions: Vec<Partition<'_>> = Vec::new();

        for record in &self.records {
            let key = PartitionKey::for_record(self.variant, record);
            let slot = *index.entry(key.identity()).or_insert_with(|| {
                partitions.push(Partition {
                    key,
                    records: Vec::new(),
                });
                partitions.len() - 1
            });
            partitions[slot].records.push(record);
        }

        partitions
    }
}
