//! Report blocks and the table that describes how each one is located
//!
//! Every block is found the same way: a heading line arms it, and the first
//! numeric row with enough tokens afterwards fills it. Only the heading text,
//! the minimum token count and the slice taken from the row differ, so those
//! live in [`BlockSpec`] rather than in per-block branches.

use std::fmt;
use std::ops::Range;

use serde::Serialize;

/// One coefficient block of the report, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Block {
    Longitudinal,
    Lateral,
    Derivatives,
    DynamicDerivatives,
    DynamicYawRoll,
}

impl Block {
    pub const COUNT: usize = 5;

    pub const ALL: [Block; Block::COUNT] = [
        Block::Longitudinal,
        Block::Lateral,
        Block::Derivatives,
        Block::DynamicDerivatives,
        Block::DynamicYawRoll,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Number of coefficients this block contributes
    pub fn width(self) -> usize {
        match self {
            Block::Longitudinal => 6,
            Block::Lateral => 4,
            Block::Derivatives => 5,
            Block::DynamicDerivatives => 5,
            Block::DynamicYawRoll => 6,
        }
    }

    /// Slots this block occupies in the 26-coefficient layout
    pub fn slots(self) -> Range<usize> {
        let start: usize = Block::ALL[..self.index()].iter().map(|b| b.width()).sum();
        start..start + self.width()
    }

    pub fn name(self) -> &'static str {
        match self {
            Block::Longitudinal => "longitudinal",
            Block::Lateral => "lateral",
            Block::Derivatives => "derivatives",
            Block::DynamicDerivatives => "dynamic derivatives",
            Block::DynamicYawRoll => "dynamic yaw/roll",
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-block scan state. A consumed block never returns to `Armed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockState {
    #[default]
    Idle,
    Armed,
    Consumed,
}

/// How a heading line is recognised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    /// Line contains this substring
    Contains(&'static str),
    /// Line contains every one of these substrings
    ContainsAll(&'static [&'static str]),
}

impl Heading {
    pub fn matches(&self, line: &str) -> bool {
        match self {
            Heading::Contains(needle) => line.contains(needle),
            Heading::ContainsAll(needles) => needles.iter().all(|n| line.contains(n)),
        }
    }
}

/// Where a block's heading is and which part of its first data row to keep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSpec {
    pub block: Block,
    pub heading: Heading,
    /// Heading is only honoured once this block has been consumed.
    /// Used when two blocks share the same heading text.
    pub after: Option<Block>,
    /// Minimum whitespace-separated tokens a data row needs
    pub min_tokens: usize,
    /// First token kept; token 0 echoes the independent variable
    pub offset: usize,
}

impl BlockSpec {
    pub fn new(block: Block, heading: Heading, min_tokens: usize) -> Self {
        Self {
            block,
            heading,
            after: None,
            min_tokens,
            offset: 1,
        }
    }

    pub fn after(mut self, block: Block) -> Self {
        self.after = Some(block);
        self
    }

    /// Token range copied out of a qualifying row
    pub fn columns(&self) -> Range<usize> {
        self.offset..self.offset + self.block.width()
    }
}

pub const LONGITUDINAL_HEADING: &str = "LONGITUDINAL";
pub const LATERAL_HEADING_COLUMNS: &[&str] = &["ALPHA", "CL", "CD", "CL/CD", "X-C.P."];
pub const DERIVATIVES_HEADING: &str = "DERIVATIVES (PER RADIAN)";
pub const DYNAMIC_DERIVATIVES_HEADING: &str = "DYNAMIC DERIVATIVES (PER RADIAN)";

/// Block table for the report layout, in heading-check and dispatch order
pub fn default_block_specs() -> Vec<BlockSpec> {
    vec![
        BlockSpec::new(
            Block::Longitudinal,
            Heading::Contains(LONGITUDINAL_HEADING),
            7,
        ),
        BlockSpec::new(
            Block::Lateral,
            Heading::ContainsAll(LATERAL_HEADING_COLUMNS),
            5,
        ),
        BlockSpec::new(
            Block::Derivatives,
            Heading::Contains(DERIVATIVES_HEADING),
            6,
        ),
        BlockSpec::new(
            Block::DynamicDerivatives,
            Heading::Contains(DYNAMIC_DERIVATIVES_HEADING),
            6,
        ),
        // The yaw/roll table reuses the dynamic derivatives heading
        BlockSpec::new(
            Block::DynamicYawRoll,
            Heading::Contains(DYNAMIC_DERIVATIVES_HEADING),
            7,
        )
        .after(Block::DynamicDerivatives),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_cover_layout() {
        assert_eq!(Block::Longitudinal.slots(), 0..6);
        assert_eq!(Block::Lateral.slots(), 6..10);
        assert_eq!(Block::Derivatives.slots(), 10..15);
        assert_eq!(Block::DynamicDerivatives.slots(), 15..20);
        assert_eq!(Block::DynamicYawRoll.slots(), 20..26);
    }

    #[test]
    fn test_default_specs_fit_min_tokens() {
        for spec in default_block_specs() {
            assert!(
                spec.columns().end <= spec.min_tokens,
                "{} slice exceeds its minimum row length",
                spec.block
            );
        }
    }

    #[test]
    fn test_lateral_heading_requires_all_columns() {
        let heading = Heading::ContainsAll(LATERAL_HEADING_COLUMNS);
        assert!(heading.matches("ALPHA     CL        CD      CL/CD     X-C.P."));
        assert!(!heading.matches("ALPHA     CL        CD      CL/CD"));
    }
}
