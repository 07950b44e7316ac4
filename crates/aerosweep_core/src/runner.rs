//! Invocation of the external prediction program
//!
//! The driver only needs "run once and tell me whether it worked", so the
//! program sits behind [`SolverRunner`]. [`CommandRunner`] is the real
//! implementation; tests substitute closures that write a canned report.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::SolverError;

/// Runs the external program once, blocking until it exits
pub trait SolverRunner {
    fn run(&mut self) -> Result<(), SolverError>;
}

impl<F> SolverRunner for F
where
    F: FnMut() -> Result<(), SolverError>,
{
    fn run(&mut self) -> Result<(), SolverError> {
        self()
    }
}

/// Launches a program with no arguments from a fixed working directory
#[derive(Debug, Clone)]
pub struct CommandRunner {
    program: String,
    working_dir: PathBuf,
}

impl CommandRunner {
    pub fn new(program: impl Into<String>, working_dir: impl AsRef<Path>) -> Self {
        Self {
            program: program.into(),
            working_dir: working_dir.as_ref().to_path_buf(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Path to launch. A bare program name that exists as a file in the
    /// working directory runs from there; anything else goes to the usual
    /// `PATH` lookup.
    fn resolve_program(&self) -> PathBuf {
        let program = Path::new(&self.program);
        let bare = program.components().count() == 1 && !self.program.contains(['/', '\\']);
        if bare {
            let local = self.working_dir.join(program);
            if local.is_file() {
                return std::path::absolute(&local).unwrap_or(local);
            }
        }
        program.to_path_buf()
    }
}

impl SolverRunner for CommandRunner {
    fn run(&mut self) -> Result<(), SolverError> {
        let program = self.resolve_program();
        debug!(program = %program.display(), dir = %self.working_dir.display(), "launching solver");

        let status = Command::new(&program)
            .current_dir(&self.working_dir)
            .status()
            .map_err(|source| SolverError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(SolverError::ExitStatus {
                program: self.program.clone(),
                code: status.code(),
            })
        }
    }
}
