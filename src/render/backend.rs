use crate::foundation::core::Canvas;
use crate::foundation::error::BloomResult;
use crate::scene::model::Scene;
use crate::scene::style::SceneStyle;

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**; the flag makes this explicit at API boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA8 bytes of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// A renderer that rasterizes the retained [`Scene`] into a [`FrameRGBA`].
pub trait RenderBackend {
    /// Draw `scene` with `style` onto a fresh `canvas`-sized frame.
    fn render_scene(
        &mut self,
        scene: &Scene,
        style: &SceneStyle,
        canvas: Canvas,
    ) -> BloomResult<FrameRGBA>;
}
