use std::fmt;

use serde::{Deserialize, Serialize};

/// One combination of flight conditions. `xcg` and `delta` are set only in
/// the four-axis variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    pub alpha: f64,
    pub mach: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xcg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<f64>,
}

impl GridPoint {
    pub fn new(alpha: f64, mach: f64) -> Self {
        Self {
            alpha,
            mach,
            xcg: None,
            delta: None,
        }
    }

    pub fn with_xcg(mut self, xcg: f64) -> Self {
        self.xcg = Some(xcg);
        self
    }

    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = Some(delta);
        self
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "alpha={}, mach={}", self.alpha, self.mach)?;
        if let Some(xcg) = self.xcg {
            write!(f, ", xcg={xcg}")?;
        }
        if let Some(delta) = self.delta {
            write!(f, ", delta={delta}")?;
        }
        Ok(())
    }
}
