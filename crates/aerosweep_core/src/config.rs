//! Sweep configuration
//!
//! `SweepConfig` carries everything the driver needs: which variant to run,
//! the axis definitions, where the request deck and report live, which
//! program to invoke and how to treat incomplete reports. Defaults reproduce
//! the historic DATCOM setup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::grid::Axis;

/// Which independent variables the sweep steps through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Alpha and mach; one output table per alpha
    #[default]
    TwoAxis,
    /// Alpha, mach, xcg and control deflection; one table per (xcg, alpha)
    FourAxis,
}

/// What to do when a report lacks one or more blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingBlockPolicy {
    /// Fill the missing slots with NaN, log a warning and keep going
    #[default]
    Sentinel,
    /// Abort the sweep
    Strict,
}

fn default_alpha() -> Axis {
    Axis::new(-16.0, 16.0, 2.0)
}

fn default_mach() -> Axis {
    Axis::new(0.01, 5.0, 0.5)
}

fn default_xcg() -> Axis {
    Axis::new(2.1, 2.4, 0.1)
}

fn default_delta() -> Axis {
    Axis::new(-15.0, 15.0, 1.0)
}

/// Axis definitions. `xcg` and `delta` are only read by the four-axis variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSet {
    #[serde(default = "default_alpha")]
    pub alpha: Axis,
    #[serde(default = "default_mach")]
    pub mach: Axis,
    #[serde(default = "default_xcg")]
    pub xcg: Axis,
    #[serde(default = "default_delta")]
    pub delta: Axis,
}

impl Default for AxisSet {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            mach: default_mach(),
            xcg: default_xcg(),
            delta: default_delta(),
        }
    }
}

/// File locations. Relative paths resolve against `working_dir`, which is
/// also where the external program runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepPaths {
    pub working_dir: PathBuf,
    /// Template source; the request deck itself when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
    pub request: PathBuf,
    pub report: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for SweepPaths {
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from("."),
            template: None,
            request: PathBuf::from("for005.dat"),
            report: PathBuf::from("for006.dat"),
            output_dir: PathBuf::from("coef_output"),
        }
    }
}

impl SweepPaths {
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.working_dir.join(path)
    }

    pub fn template_path(&self) -> PathBuf {
        self.resolve(self.template.as_deref().unwrap_or(&self.request))
    }

    pub fn request_path(&self) -> PathBuf {
        self.resolve(&self.request)
    }

    pub fn report_path(&self) -> PathBuf {
        self.resolve(&self.report)
    }

    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.output_dir)
    }
}

fn default_program() -> String {
    "datcom97.exe".to_string()
}

/// Complete sweep configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    #[serde(default)]
    pub variant: Variant,

    #[serde(default)]
    pub axes: AxisSet,

    /// External program, invoked with no arguments
    #[serde(default = "default_program")]
    pub program: String,

    #[serde(default)]
    pub paths: SweepPaths,

    #[serde(default)]
    pub missing_blocks: MissingBlockPolicy,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            axes: AxisSet::default(),
            program: default_program(),
            paths: SweepPaths::default(),
            missing_blocks: MissingBlockPolicy::default(),
        }
    }
}
