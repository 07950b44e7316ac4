//! Sequential sweep over the grid
//!
//! For every grid point, in visitation order:
//! 1. render the request template and write it to the request deck path
//! 2. run the external program and wait for it
//! 3. read and parse the report
//! 4. append one record to the result table
//!
//! A template, solver or report I/O failure aborts the whole sweep. Missing
//! report blocks are handled per [`MissingBlockPolicy`].

use std::fs;
use std::path::PathBuf;

use tracing::{info, instrument};

use crate::config::{MissingBlockPolicy, SweepConfig};
use crate::error::SweepError;
use crate::grid::{GridPoint, SweepGrid};
use crate::report::ReportParser;
use crate::runner::SolverRunner;
use crate::table::{ResultTable, SweepRecord};
use crate::template::RequestTemplate;

/// Called before each solver run with (zero-based index, total points, point)
pub type ProgressCallback = Box<dyn FnMut(usize, usize, &GridPoint)>;

pub struct SweepDriver<R> {
    grid: SweepGrid,
    runner: R,
    parser: ReportParser,
    policy: MissingBlockPolicy,
    template_path: PathBuf,
    request_path: PathBuf,
    report_path: PathBuf,
    progress: Option<ProgressCallback>,
}

impl<R: SolverRunner> SweepDriver<R> {
    pub fn new(config: SweepConfig, runner: R) -> Result<Self, SweepError> {
        let grid = SweepGrid::from_config(&config)?;
        Ok(Self {
            grid,
            runner,
            parser: ReportParser::new(),
            policy: config.missing_blocks,
            template_path: config.paths.template_path(),
            request_path: config.paths.request_path(),
            report_path: config.paths.report_path(),
            progress: None,
        })
    }

    pub fn with_parser(mut self, parser: ReportParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_progress(mut self, progress: ProgressCallback) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn grid(&self) -> &SweepGrid {
        &self.grid
    }

    /// Run every grid point and return the accumulated table
    #[instrument(skip(self), fields(points = self.grid.len(), variant = ?self.grid.variant()))]
    pub fn run(mut self) -> Result<ResultTable, SweepError> {
        let template = RequestTemplate::load(&self.template_path)?;
        let points = self.grid.points();
        let total = points.len();
        let mut table = ResultTable::new(self.grid.variant());

        for (index, point) in points.into_iter().enumerate() {
            info!("[{}/{}] running solver with {point}", index + 1, total);
            if let Some(progress) = self.progress.as_mut() {
                progress(index, total, &point);
            }
            let record = self.evaluate(&template, point)?;
            table.push(record);
        }

        info!(
            records = table.len(),
            incomplete = table.incomplete_count(),
            "sweep finished"
        );
        Ok(table)
    }

    fn evaluate(
        &mut self,
        template: &RequestTemplate,
        point: GridPoint,
    ) -> Result<SweepRecord, SweepError> {
        let deck = template.render(&point)?;
        fs::write(&self.request_path, deck).map_err(|source| SweepError::WriteRequest {
            path: self.request_path.clone(),
            source,
        })?;

        self.runner
            .run()
            .map_err(|source| SweepError::Solver { point, source })?;

        let bytes = fs::read(&self.report_path).map_err(|source| SweepError::ReadReport {
            point,
            path: self.report_path.clone(),
            source,
        })?;
        let report = self.parser.parse(&String::from_utf8_lossy(&bytes));

        SweepRecord::from_report(point, &report, self.policy)
    }
}

/// Build a driver for `config` and run it to completion
pub fn run_sweep<R: SolverRunner>(
    config: SweepConfig,
    runner: R,
) -> Result<ResultTable, SweepError> {
    SweepDriver::new(config, runner)?.run()
}
