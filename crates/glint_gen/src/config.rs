//! Generator configuration

use crate::generator::GenerateError;
use glint_core::Random;
use serde::{Deserialize, Serialize};

/// Half-open range one depth term is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthRange {
    pub min: i32,
    pub max: i32,
}

impl Default for DepthRange {
    fn default() -> Self {
        Self { min: 3, max: 7 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// The maximum depth is the sum of two draws from this range.
    pub depth_range: DepthRange,
    /// Include the time-driven terminals.
    pub animate: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            depth_range: DepthRange::default(),
            animate: true,
        }
    }
}

impl GeneratorConfig {
    /// Draw a maximum depth: two independent draws from `depth_range`, summed.
    pub fn draw_depth(&self, rng: &mut Random) -> Result<u32, GenerateError> {
        let DepthRange { min, max } = self.depth_range;
        let first = rng.int_between(min, max)?;
        let second = rng.int_between(min, max)?;
        let depth = first.saturating_add(second);
        u32::try_from(depth).map_err(|_| GenerateError::NegativeDepth(depth))
    }
}
