use std::path::Path;

use aimpoint_quad::bilinear::CalibrationParams;
use serde::{Deserialize, Serialize};

use crate::{PointerError, ScreenMapper, TrackerConfig};

/// All tunable parameters of the pointer pipeline.
///
/// Every field falls back to its default when missing from a config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Device side tracking parameters.
    pub tracker: TrackerConfig,
    /// Calibration target positions and solver criteria.
    pub calibration: CalibrationParams,
    /// Side of the on-screen corner markers, in pixels.
    pub marker_size: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            calibration: CalibrationParams::default(),
            marker_size: ScreenMapper::DEFAULT_MARKER_SIZE,
        }
    }
}

impl PipelineConfig {
    /// Parses a configuration from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, PointerError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Reads a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PointerError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        log::debug!("loaded pipeline config from {}", path.display());
        Ok(config)
    }

    /// A screen mapper for a `width` x `height` screen with the configured marker size.
    pub fn screen_mapper(&self, width: f64, height: f64) -> ScreenMapper {
        ScreenMapper {
            width,
            height,
            marker_size: self.marker_size,
        }
    }
}
