use crate::foundation::core::{DataBounds, Point, Rgba8};
use crate::foundation::error::{BloomError, BloomResult};

/// Figure side length, in inches, the point-based line widths are relative to.
pub const REFERENCE_FIGURE_INCHES: f64 = 10.0;

/// Visual attributes of the plot and its three primitives.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneStyle {
    pub bounds: DataBounds,
    pub background: Rgba8,

    pub stem_color: Rgba8,
    /// Stroke width in points on a [`REFERENCE_FIGURE_INCHES`] figure.
    pub stem_width_pt: f64,
    pub stem_z: i32,

    pub flower_color: Rgba8,
    pub flower_alpha: f32,
    pub flower_z: i32,

    pub marker_color: Rgba8,
    pub marker_center: Point,
    pub marker_radius: f64,
    pub marker_z: i32,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            bounds: DataBounds {
                x_min: -2.0,
                x_max: 2.0,
                y_min: -2.5,
                y_max: 1.5,
            },
            background: Rgba8::BLACK,
            stem_color: Rgba8::opaque(0x00, 0x80, 0x00),
            stem_width_pt: 2.0,
            stem_z: 1,
            flower_color: Rgba8::opaque(0xFF, 0x00, 0xFF),
            flower_alpha: 0.6,
            flower_z: 2,
            marker_color: Rgba8::opaque(0xFF, 0xA5, 0x00),
            marker_center: Point::ORIGIN,
            marker_radius: 0.2,
            marker_z: 3,
        }
    }
}

impl SceneStyle {
    pub fn validate(&self) -> BloomResult<()> {
        self.bounds.validate()?;
        if !self.background.is_opaque() {
            return Err(BloomError::validation("background must be fully opaque"));
        }
        if !(self.stem_width_pt.is_finite() && self.stem_width_pt > 0.0) {
            return Err(BloomError::validation("stem_width_pt must be finite and > 0"));
        }
        if !(0.0..=1.0).contains(&self.flower_alpha) {
            return Err(BloomError::validation("flower_alpha must be in [0, 1]"));
        }
        if !(self.marker_radius.is_finite() && self.marker_radius > 0.0) {
            return Err(BloomError::validation("marker_radius must be finite and > 0"));
        }
        Ok(())
    }

    /// Stem stroke width in pixels for a canvas whose shorter side is `min_side_px`.
    pub fn stem_width_px(&self, min_side_px: f64) -> f64 {
        let dpi = min_side_px / REFERENCE_FIGURE_INCHES;
        self.stem_width_pt * dpi / 72.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/style.rs"]
mod tests;
