//! Parsing of the prediction program's text report
//!
//! The report is scanned once, top to bottom. Section headings arm blocks and
//! the first qualifying numeric row after a heading fills the armed block.
//! See [`parser::ReportParser`] for the exact rules.

mod block;
mod parser;

pub use block::{
    Block, BlockSpec, BlockState, DERIVATIVES_HEADING, DYNAMIC_DERIVATIVES_HEADING, Heading,
    LATERAL_HEADING_COLUMNS, LONGITUDINAL_HEADING, default_block_specs,
};
pub use parser::{ParsedReport, ParserConfig, ReportParser, extract_coefficients, parse_report};
