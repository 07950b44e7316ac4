//! The fixed 26-coefficient layout produced for every grid point

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::report::Block;

pub const COEFFICIENT_COUNT: usize = 26;

/// Column names in layout order: longitudinal, lateral, derivatives,
/// dynamic derivatives, dynamic yaw/roll
#[rustfmt::skip]
pub const COEFFICIENT_NAMES: [&str; COEFFICIENT_COUNT] = [
    // Longitudinal
    "CN", "CM", "CA", "CY", "CLN", "CLL",
    // Lateral
    "CL", "CD", "CLCD", "XCP",
    // Derivatives
    "CNA", "CMA", "CYB", "CLNB", "CLLB",
    // Dynamic derivatives
    "CNQ", "CMQ", "CAQ", "CNAD", "CMAD",
    // Dynamic yaw/roll
    "CYR", "CLNR", "CLLR", "CYP", "CLNP", "CLLP",
];

/// One full coefficient vector. Slots for blocks missing from the report
/// hold NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoefficientSet([f64; COEFFICIENT_COUNT]);

impl CoefficientSet {
    /// All slots set to the missing sentinel
    pub fn missing() -> Self {
        Self([f64::NAN; COEFFICIENT_COUNT])
    }

    pub fn from_array(values: [f64; COEFFICIENT_COUNT]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64; COEFFICIENT_COUNT] {
        &self.0
    }

    pub fn block(&self, block: Block) -> &[f64] {
        &self.0[block.slots()]
    }

    /// Copies a block's values into its slots. Extra values are ignored.
    pub(crate) fn fill_block(&mut self, block: Block, values: &[f64]) {
        for (slot, value) in self.0[block.slots()].iter_mut().zip(values) {
            *slot = *value;
        }
    }

    /// Look up a coefficient by its column name (e.g. "CMQ")
    pub fn get(&self, name: &str) -> Option<f64> {
        COEFFICIENT_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| self.0[i])
    }

    pub fn iter_named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        COEFFICIENT_NAMES.iter().copied().zip(self.0.iter().copied())
    }

    pub fn has_missing(&self) -> bool {
        self.0.iter().any(|v| v.is_nan())
    }
}

impl Default for CoefficientSet {
    fn default() -> Self {
        Self::missing()
    }
}

impl Serialize for CoefficientSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(COEFFICIENT_COUNT))?;
        for (name, value) in self.iter_named() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}
