//! Viewer adjustment state
//!
//! ## Baseline plus pending adjustments
//!
//! The session keeps two things apart:
//! - `baseline`: the image adjustments are computed from. Only `rotate`,
//!   `commit` and `open` replace it.
//! - pending factors: brightness and contrast as last set by the user.
//!
//! [`AdjustmentSession::rendered`] always recomputes from the baseline, so
//! moving a slider back and forth never compounds earlier results.

use image::DynamicImage;

use super::{adjust_brightness_contrast, rotate_clockwise_90};

/// Smallest zoom factor
const MIN_ZOOM: f32 = 0.1;
/// Largest zoom factor
const MAX_ZOOM: f32 = 5.0;
/// Zoom multiplier per step in
const ZOOM_IN_STEP: f32 = 1.1;
/// Zoom multiplier per step out
const ZOOM_OUT_STEP: f32 = 0.9;

/// An opened image with its pending adjustments
#[derive(Clone, Debug)]
pub struct AdjustmentSession {
    baseline: DynamicImage,
    brightness: f32,
    contrast: f32,
    zoom: f32,
}

impl AdjustmentSession {
    /// Start a session on a freshly opened image
    pub fn new(image: DynamicImage) -> Self {
        Self {
            baseline: image,
            brightness: 1.0,
            contrast: 1.0,
            zoom: 1.0,
        }
    }

    /// Replace the image, resetting adjustments and zoom
    pub fn open(&mut self, image: DynamicImage) {
        *self = Self::new(image);
    }

    /// The image adjustments are computed from
    pub fn baseline(&self) -> &DynamicImage {
        &self.baseline
    }

    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    pub fn contrast(&self) -> f32 {
        self.contrast
    }

    pub fn set_brightness(&mut self, factor: f32) {
        self.brightness = factor;
    }

    pub fn set_contrast(&mut self, factor: f32) {
        self.contrast = factor;
    }

    /// Whether any pending factor differs from identity
    pub fn is_adjusted(&self) -> bool {
        self.brightness != 1.0 || self.contrast != 1.0
    }

    /// The baseline with the pending adjustments applied
    pub fn rendered(&self) -> DynamicImage {
        adjust_brightness_contrast(&self.baseline, self.brightness, self.contrast)
    }

    /// Rotate the baseline clockwise; pending factors carry over
    pub fn rotate(&mut self) {
        self.baseline = rotate_clockwise_90(&self.baseline);
    }

    /// Bake the pending adjustments into a new baseline
    pub fn commit(&mut self) {
        if self.is_adjusted() {
            self.baseline = self.rendered();
        }
        self.reset();
    }

    /// Drop the pending adjustments
    pub fn reset(&mut self) {
        self.brightness = 1.0;
        self.contrast = 1.0;
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_IN_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom * ZOOM_OUT_STEP);
    }

    /// Set the zoom factor, clamped to the supported range
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = if zoom.is_finite() {
            zoom.clamp(MIN_ZOOM, MAX_ZOOM)
        } else {
            1.0
        };
    }

    /// On-screen size of the rendered image at the current zoom
    pub fn display_size(&self) -> (u32, u32) {
        let scale = |v: u32| (v as f32 * self.zoom) as u32;
        (scale(self.baseline.width()), scale(self.baseline.height()))
    }
}
