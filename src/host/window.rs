use anyhow::Context as _;
use minifb::{Key, ScaleMode, Window, WindowOptions};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{BloomError, BloomResult};
use crate::render::backend::FrameRGBA;

/// Redraw rate while the finished flower is held on screen.
const HOLD_FPS: usize = 30;

/// Presents frames in a desktop window titled after the run.
///
/// The window opens in `begin`, sized from the canvas and freely resizable (the image
/// keeps its aspect ratio). Closing it or pressing Escape ends playback early. After the
/// last frame the window stays up, showing the finished flower, until the user closes it.
pub struct WindowSink {
    window: Option<Window>,
    buffer: Vec<u32>,
    size: (usize, usize),
    hold_on_end: bool,
}

impl Default for WindowSink {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowSink {
    pub fn new() -> Self {
        Self {
            window: None,
            buffer: Vec::new(),
            size: (0, 0),
            hold_on_end: true,
        }
    }

    /// Close the window as soon as the last frame is shown instead of waiting for the user.
    pub fn close_on_end(mut self) -> Self {
        self.hold_on_end = false;
        self
    }
}

fn user_closed(window: &Window) -> bool {
    !window.is_open() || window.is_key_down(Key::Escape)
}

impl FrameSink for WindowSink {
    fn begin(&mut self, cfg: SinkConfig) -> BloomResult<()> {
        let size = (cfg.width as usize, cfg.height as usize);
        let mut window = Window::new(
            &cfg.title,
            size.0,
            size.1,
            WindowOptions {
                resize: true,
                scale_mode: ScaleMode::AspectRatioStretch,
                ..WindowOptions::default()
            },
        )
        .context("open animation window")?;
        // The player's timer paces frames; the window must not add its own limit.
        window.set_target_fps(0);

        tracing::debug!(title = %cfg.title, width = cfg.width, height = cfg.height, "window opened");
        self.window = Some(window);
        self.size = size;
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, frame: &FrameRGBA) -> BloomResult<()> {
        let Some(window) = self.window.as_mut() else {
            return Err(BloomError::encode("window sink received a frame before begin"));
        };
        if (frame.width as usize, frame.height as usize) != self.size {
            return Err(BloomError::validation(format!(
                "frame is {}x{}, window was opened at {}x{}",
                frame.width, frame.height, self.size.0, self.size.1
            )));
        }
        to_window_buffer(&mut self.buffer, &frame.data)?;
        window
            .update_with_buffer(&self.buffer, self.size.0, self.size.1)
            .context("present frame")?;
        Ok(())
    }

    fn end(&mut self) -> BloomResult<()> {
        let Some(mut window) = self.window.take() else {
            return Ok(());
        };
        if self.hold_on_end {
            window.set_target_fps(HOLD_FPS);
            while !user_closed(&window) {
                window.update();
            }
        }
        tracing::debug!("window closed");
        Ok(())
    }

    fn wants_more(&self) -> bool {
        self.window.as_ref().is_none_or(|w| !user_closed(w))
    }
}

/// Pack RGBA8 pixels into the `0RGB` words a window buffer expects.
///
/// Frames are opaque, so premultiplied and straight color agree and alpha is dropped.
pub fn to_window_buffer(dst: &mut Vec<u32>, rgba: &[u8]) -> BloomResult<()> {
    if !rgba.len().is_multiple_of(4) {
        return Err(BloomError::validation("rgba buffer length is not a multiple of 4"));
    }
    dst.clear();
    dst.extend(rgba.chunks_exact(4).map(|px| {
        (u32::from(px[0]) << 16) | (u32::from(px[1]) << 8) | u32::from(px[2])
    }));
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/host/window.rs"]
mod tests;
