use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{BloomError, BloomResult};
use crate::render::backend::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Human-readable name of the run; windowed sinks use it as the title.
    pub title: String,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: Fps,
}

/// Sink contract for consuming rendered frames in tick order.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order,
/// one frame per tick, with no gaps.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> BloomResult<()>;
    /// Push one frame in strictly increasing tick order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> BloomResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> BloomResult<()>;

    /// Whether the sink still accepts frames. Checked before every tick.
    fn wants_more(&self) -> bool {
        true
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    finished: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg.clone()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// Whether `end` has been called since the last `begin`.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> BloomResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> BloomResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> BloomResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Writes every frame as `frame_NNNNN.png` into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    last_idx: Option<FrameIndex>,
    written: u64,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            last_idx: None,
            written: 0,
        }
    }

    pub fn frame_path(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!("frame_{:05}.png", idx.0))
    }

    pub fn frames_written(&self) -> u64 {
        self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, _cfg: SinkConfig) -> BloomResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create frame directory '{}'", self.dir.display()))?;
        self.last_idx = None;
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> BloomResult<()> {
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(BloomError::encode(
                "png sequence sink received out-of-order frame index",
            ));
        }
        self.last_idx = Some(idx);

        let path = self.frame_path(idx);
        write_png(&path, frame)?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> BloomResult<()> {
        tracing::debug!(frames = self.written, dir = %self.dir.display(), "png sequence complete");
        Ok(())
    }
}

/// Encode `frame` as a PNG at `path`, un-premultiplying alpha first.
pub fn write_png(path: &Path, frame: &FrameRGBA) -> BloomResult<()> {
    ensure_parent_dir(path)?;
    let straight = if frame.premultiplied {
        unpremultiply(&frame.data)
    } else {
        frame.data.clone()
    };
    image::save_buffer_with_format(
        path,
        &straight,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

/// Create the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &Path) -> BloomResult<()> {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    std::fs::create_dir_all(parent)
        .with_context(|| format!("create output directory '{}'", parent.display()))?;
    Ok(())
}

fn unpremultiply(src: &[u8]) -> Vec<u8> {
    let mut out = src.to_vec();
    for px in out.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
