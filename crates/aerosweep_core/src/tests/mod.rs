//! Integration tests for the sweep pipeline
//!
//! Tests are organized by topic:
//! - `parser` - Report scanning, block arming and dispatch
//! - `template` - Request deck rewriting
//! - `sweep` - Driver runs against a fake solver
//! - `output` - Partitioning and CSV layout

mod output;
