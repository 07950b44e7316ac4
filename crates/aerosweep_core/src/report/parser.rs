//! Single-pass report scanner
//!
//! Rules, applied to each trimmed line in order:
//! 1. While no dynamic pressure has been captured, a line carrying both
//!    `DYNAMIC PRESSURE` and `LB/FT**2` is searched for `= <number>`.
//!    This never consumes the line.
//! 2. Headings are checked in block-table order. A heading whose block is not
//!    yet consumed arms that block and the line is skipped.
//! 3. Blank lines, lines containing the header token (`ALPHA`) and lines with
//!    any non-numeric token are skipped.
//! 4. A numeric row fills the first armed block whose minimum token count it
//!    meets. That block is then consumed for good.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::block::{Block, BlockSpec, BlockState, default_block_specs};
use crate::coefficients::CoefficientSet;
use crate::error::ParseError;

static DYNAMIC_PRESSURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"DYNAMIC PRESSURE\s*=\s*([0-9Ee.+-]+)").expect("dynamic pressure pattern")
});

const PRESSURE_MARKER: &str = "DYNAMIC PRESSURE";
const PRESSURE_UNITS: &str = "LB/FT**2";

/// Tunable parts of the scanner
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Blocks in heading-check and dispatch order
    pub blocks: Vec<BlockSpec>,
    /// Rows containing this token are column labels, never data
    pub header_token: &'static str,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            blocks: default_block_specs(),
            header_token: "ALPHA",
        }
    }
}

/// Stateless report parser; every call to [`ReportParser::parse`] starts fresh
#[derive(Debug, Clone, Default)]
pub struct ReportParser {
    config: ParserConfig,
}

impl ReportParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn parse(&self, text: &str) -> ParsedReport {
        let mut scan = Scan::new(&self.config);
        for line in text.lines() {
            scan.feed(line.trim());
        }
        scan.report
    }
}

/// Parse a report with the default block table
pub fn parse_report(text: &str) -> ParsedReport {
    ReportParser::new().parse(text)
}

/// Parse a report and require every block.
///
/// Returns the dynamic pressure (NaN when the report never states one) and the
/// full coefficient set.
pub fn extract_coefficients(text: &str) -> Result<(f64, CoefficientSet), ParseError> {
    let report = parse_report(text);
    let coefficients = report.coefficients()?;
    Ok((report.dynamic_pressure_or_nan(), coefficients))
}

/// What one scan of a report found
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedReport {
    pub dynamic_pressure: Option<f64>,
    blocks: [Option<Vec<f64>>; Block::COUNT],
}

impl ParsedReport {
    pub fn dynamic_pressure_or_nan(&self) -> f64 {
        self.dynamic_pressure.unwrap_or(f64::NAN)
    }

    pub fn block(&self, block: Block) -> Option<&[f64]> {
        self.blocks[block.index()].as_deref()
    }

    pub fn missing_blocks(&self) -> Vec<Block> {
        Block::ALL
            .into_iter()
            .filter(|b| self.blocks[b.index()].is_none())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.blocks.iter().all(Option::is_some)
    }

    /// Raw concatenation in block order. Shorter than 26 values when a block
    /// is missing, so positions can no longer be trusted; prefer
    /// [`ParsedReport::coefficients`].
    pub fn flatten(&self) -> Vec<f64> {
        self.blocks.iter().flatten().flatten().copied().collect()
    }

    /// Full coefficient set, or an error naming the first missing block
    pub fn coefficients(&self) -> Result<CoefficientSet, ParseError> {
        let mut set = CoefficientSet::missing();
        for block in Block::ALL {
            let values = self
                .block(block)
                .ok_or(ParseError::BlockNotFound { block })?;
            if values.len() != block.width() {
                return Err(ParseError::BlockWidth {
                    block,
                    expected: block.width(),
                    found: values.len(),
                });
            }
            set.fill_block(block, values);
        }
        Ok(set)
    }

    /// Coefficient set with NaN in the slots of missing blocks, plus the
    /// blocks that were missing
    pub fn coefficients_lenient(&self) -> (CoefficientSet, Vec<Block>) {
        let mut set = CoefficientSet::missing();
        for block in Block::ALL {
            if let Some(values) = self.block(block) {
                set.fill_block(block, values);
            }
        }
        (set, self.missing_blocks())
    }
}

struct Scan<'a> {
    config: &'a ParserConfig,
    states: [BlockState; Block::COUNT],
    report: ParsedReport,
}

impl<'a> Scan<'a> {
    fn new(config: &'a ParserConfig) -> Self {
        Self {
            config,
            states: [BlockState::Idle; Block::COUNT],
            report: ParsedReport::default(),
        }
    }

    fn state(&self, block: Block) -> BlockState {
        self.states[block.index()]
    }

    fn feed(&mut self, line: &str) {
        if self.report.dynamic_pressure.is_none() {
            self.report.dynamic_pressure = capture_dynamic_pressure(line);
        }

        if self.try_arm(line) {
            return;
        }

        if line.is_empty() || line.contains(self.config.header_token) {
            return;
        }

        if let Some(row) = parse_numeric_row(line) {
            self.dispatch(&row);
        }
    }

    /// Arms the first unconsumed block whose heading matches. Returns true
    /// when the line was a heading.
    fn try_arm(&mut self, line: &str) -> bool {
        for spec in &self.config.blocks {
            if self.state(spec.block) == BlockState::Consumed || !spec.heading.matches(line) {
                continue;
            }
            if let Some(prior) = spec.after
                && self.state(prior) != BlockState::Consumed
            {
                continue;
            }
            debug!(block = %spec.block, "armed by heading");
            self.states[spec.block.index()] = BlockState::Armed;
            return true;
        }
        false
    }

    fn dispatch(&mut self, row: &[f64]) {
        for spec in &self.config.blocks {
            if self.state(spec.block) != BlockState::Armed || row.len() < spec.min_tokens {
                continue;
            }
            let Some(values) = row.get(spec.columns()) else {
                continue;
            };
            debug!(block = %spec.block, tokens = row.len(), "block filled");
            self.report.blocks[spec.block.index()] = Some(values.to_vec());
            self.states[spec.block.index()] = BlockState::Consumed;
            return;
        }
    }
}

/// Finite dynamic pressure stated on this line, if any
fn capture_dynamic_pressure(line: &str) -> Option<f64> {
    if !line.contains(PRESSURE_MARKER) || !line.contains(PRESSURE_UNITS) {
        return None;
    }
    DYNAMIC_PRESSURE
        .captures(line)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

/// All tokens as floats, or None if any token is not a number
fn parse_numeric_row(line: &str) -> Option<Vec<f64>> {
    let row = line
        .split_whitespace()
        .map(str::parse::<f64>)
        .collect::<Result<Vec<_>, _>>()
        .ok()?;
    (!row.is_empty()).then_some(row)
}
