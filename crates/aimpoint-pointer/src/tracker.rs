use aimpoint_quad::{
    affine::{calc_sanitized, AffineParams},
    compensate::{compensate, detected_count, CompensationParams},
    MarkerObservation,
};
use serde::{Deserialize, Serialize};

use crate::{PointerError, PointerSample, SampleSink, Viewport};

/// Configuration for the per-frame tracking pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Occluded corner reconstruction parameters.
    pub compensation: CompensationParams,
    /// Affine mapping parameters.
    pub affine: AffineParams,
    /// Minimum number of detected markers for a frame to produce a sample.
    ///
    /// Frames below this are treated as tracking lost. Set to 0 to always
    /// produce a sample.
    pub min_detected: usize,
    /// Log one published sample every `log_every` samples. 0 disables it.
    pub log_every: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            compensation: CompensationParams::default(),
            affine: AffineParams::default(),
            min_detected: 2,
            log_every: 100,
        }
    }
}

/// Turns marker observations of one pointing device into pointer samples.
#[derive(Debug, Clone)]
pub struct Tracker {
    id: String,
    name: String,
    config: TrackerConfig,
    published: usize,
}

impl Tracker {
    /// Creates a tracker for the device `id` held by the player `name`.
    pub fn new(id: impl Into<String>, name: impl Into<String>, config: TrackerConfig) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            config,
            published: 0,
        }
    }

    /// Returns a reference to the tracker configuration.
    #[inline]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Device identifier.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Player display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of samples delivered through [`Tracker::publish`].
    #[inline]
    pub fn published(&self) -> usize {
        self.published
    }

    /// Computes the pointer sample for one frame.
    ///
    /// The markers are completed with [`compensate`] and the viewport center
    /// is localized in the resulting quad. NaN components are replaced with
    /// [`AffineParams::nan_fallback`].
    ///
    /// # Arguments
    ///
    /// * `markers` - The four detector observations for this frame.
    /// * `viewport` - The camera viewport size.
    /// * `fire` - Whether the trigger was pulled on this frame.
    ///
    /// # Returns
    ///
    /// `None` if fewer than [`TrackerConfig::min_detected`] markers were detected.
    pub fn process(
        &self,
        markers: &[MarkerObservation; 4],
        viewport: Viewport,
        fire: bool,
    ) -> Option<PointerSample> {
        let detected = detected_count(markers);
        if detected < self.config.min_detected {
            log::trace!("{}: tracking lost, {detected} markers detected", self.id);
            return None;
        }

        let corners = compensate(markers, &self.config.compensation);
        let uv = calc_sanitized(
            &corners,
            viewport.width,
            viewport.height,
            &self.config.affine,
        );

        Some(PointerSample {
            id: self.id.clone(),
            name: self.name.clone(),
            x: uv.x,
            y: uv.y,
            fire,
        })
    }

    /// Computes the sample for one frame and delivers it to `sink`.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if a sample was delivered, `Ok(false)` if tracking was lost.
    pub fn publish<S: SampleSink>(
        &mut self,
        markers: &[MarkerObservation; 4],
        viewport: Viewport,
        fire: bool,
        sink: &mut S,
    ) -> Result<bool, PointerError> {
        let Some(sample) = self.process(markers, viewport, fire) else {
            return Ok(false);
        };

        self.published += 1;
        if self.config.log_every > 0 && self.published % self.config.log_every == 0 {
            log::debug!("publish #{}: {:?}", self.published, sample);
        }

        sink.send_sample(sample)?;
        Ok(true)
    }
}
