use crate::foundation::error::{BloomError, BloomResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Zero-based tick index.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Rational frames-per-second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    pub fn new(num: u32, den: u32) -> BloomResult<Self> {
        if den == 0 {
            return Err(BloomError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(BloomError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frame rate matching one frame per timer tick of `interval`.
    pub fn from_interval(interval: std::time::Duration) -> BloomResult<Self> {
        let micros = u32::try_from(interval.as_micros())
            .map_err(|_| BloomError::validation("tick interval is too long"))?;
        Self::new(1_000_000, micros)
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }
}

/// Output surface size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }

    pub fn validate(self) -> BloomResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(BloomError::validation("canvas width/height must be > 0"));
        }
        // vello_cpu surfaces are addressed with u16 dimensions.
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(BloomError::validation(format!(
                "canvas {}x{} exceeds the maximum surface size of {}",
                self.width,
                self.height,
                u16::MAX
            )));
        }
        Ok(())
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = Self::opaque(0, 0, 0);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn is_opaque(self) -> bool {
        self.a == 255
    }
}

/// Visible data-space rectangle of the plot.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DataBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl DataBounds {
    pub fn validate(self) -> BloomResult<()> {
        let finite = [self.x_min, self.x_max, self.y_min, self.y_max]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.x_min >= self.x_max || self.y_min >= self.y_max {
            return Err(BloomError::validation(
                "data bounds must be finite with min < max on both axes",
            ));
        }
        Ok(())
    }

    pub fn width(self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(self) -> f64 {
        self.y_max - self.y_min
    }

    /// Data-to-pixel transform with equal aspect: the bounds are scaled uniformly to fit
    /// `canvas`, centered, with the y axis pointing up.
    pub fn to_canvas_affine(self, canvas: Canvas) -> Affine {
        let (cw, ch) = (f64::from(canvas.width), f64::from(canvas.height));
        let scale = (cw / self.width()).min(ch / self.height());
        let pad_x = (cw - self.width() * scale) * 0.5;
        let pad_y = (ch - self.height() * scale) * 0.5;

        // Canonical order:
        // T(padding) * S(scale, -scale) * T(-x_min, -y_max)
        Affine::translate(Vec2::new(pad_x, pad_y))
            * Affine::scale_non_uniform(scale, -scale)
            * Affine::translate(Vec2::new(-self.x_min, -self.y_max))
    }

    /// Pixels per data unit under [`DataBounds::to_canvas_affine`].
    pub fn pixels_per_unit(self, canvas: Canvas) -> f64 {
        (f64::from(canvas.width) / self.width()).min(f64::from(canvas.height) / self.height())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
