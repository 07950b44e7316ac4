//! Command-line front end for aerosweep
//!
//! Loads YAML sweep configurations, sets up logging and runs the core
//! sweep, parse and grid operations.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod util;

pub use cli::{Cli, Command};
pub use logging::init_logging;
