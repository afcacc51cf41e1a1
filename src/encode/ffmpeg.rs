use std::ffi::OsString;
use std::io::{Read as _, Write as _};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use crate::encode::sink::{FrameSink, SinkConfig, ensure_parent_dir};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{BloomError, BloomResult};
use crate::render::backend::FrameRGBA;

/// Where an MP4 run is written.
#[derive(Clone, Debug)]
pub struct Mp4Output {
    pub path: PathBuf,
    /// Replace `path` if it already exists. When unset, an existing file is an error.
    pub overwrite: bool,
}

impl Mp4Output {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            overwrite: false,
        }
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

/// Command line for an `ffmpeg` that reads packed RGB24 frames on stdin and writes an
/// H.264 MP4.
///
/// The frames the renderer produces are opaque, so alpha is stripped before piping.
pub fn encoder_args(cfg: &SinkConfig, out: &Mp4Output) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        OsString::from(if out.overwrite { "-y" } else { "-n" }),
        "-hide_banner".into(),
        "-loglevel".into(),
        "error".into(),
        "-f".into(),
        "rawvideo".into(),
        "-pix_fmt".into(),
        "rgb24".into(),
        "-video_size".into(),
        format!("{}x{}", cfg.width, cfg.height).into(),
        "-framerate".into(),
        format!("{}/{}", cfg.fps.num, cfg.fps.den).into(),
        "-i".into(),
        "-".into(),
        "-c:v".into(),
        "libx264".into(),
        "-pix_fmt".into(),
        "yuv420p".into(),
        "-movflags".into(),
        "+faststart".into(),
    ];
    if !cfg.title.is_empty() {
        args.push("-metadata".into());
        args.push(format!("title={}", cfg.title).into());
    }
    args.push(out.path.clone().into_os_string());
    args
}

/// Copy the RGB channels of opaque RGBA8 pixels into `dst`.
///
/// Fails on any pixel that is not fully opaque; the scene background never is.
pub fn pack_rgb24(dst: &mut Vec<u8>, rgba: &[u8]) -> BloomResult<()> {
    if !rgba.len().is_multiple_of(4) {
        return Err(BloomError::validation("rgba buffer length is not a multiple of 4"));
    }
    dst.clear();
    dst.reserve(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        if px[3] != 255 {
            return Err(BloomError::encode(
                "frame has translucent pixels; mp4 output needs an opaque background",
            ));
        }
        dst.extend_from_slice(&px[..3]);
    }
    Ok(())
}

/// A running `ffmpeg` child with its stdin pipe and a thread collecting stderr.
struct Encoder {
    child: Child,
    stdin: ChildStdin,
    stderr: JoinHandle<std::io::Result<String>>,
}

impl Encoder {
    fn spawn(args: Vec<OsString>) -> BloomResult<Self> {
        let mut child = Command::new("ffmpeg")
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    BloomError::encode("ffmpeg was not found on PATH; it is needed for mp4 output")
                }
                _ => BloomError::encode(format!("could not start ffmpeg: {e}")),
            })?;

        let (Some(stdin), Some(mut pipe)) = (child.stdin.take(), child.stderr.take()) else {
            let _ = child.kill();
            return Err(BloomError::encode("ffmpeg started without stdio pipes"));
        };
        let stderr = std::thread::spawn(move || {
            let mut bytes = Vec::new();
            pipe.read_to_end(&mut bytes)?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        });
        Ok(Self {
            child,
            stdin,
            stderr,
        })
    }

    fn write(&mut self, bytes: &[u8]) -> BloomResult<()> {
        self.stdin
            .write_all(bytes)
            .map_err(|e| BloomError::encode(format!("ffmpeg stdin closed early: {e}")))
    }

    fn finish(self) -> BloomResult<()> {
        let Self {
            mut child,
            stdin,
            stderr,
        } = self;
        drop(stdin);

        let status = child
            .wait()
            .map_err(|e| BloomError::encode(format!("waiting for ffmpeg: {e}")))?;
        let log = stderr
            .join()
            .map_err(|_| BloomError::encode("ffmpeg stderr reader panicked"))?
            .unwrap_or_default();
        if status.success() {
            return Ok(());
        }
        Err(BloomError::encode(format!(
            "ffmpeg failed ({status}): {}",
            log.trim()
        )))
    }
}

/// Streams frames into a system `ffmpeg` that encodes an MP4.
pub struct FfmpegSink {
    out: Mp4Output,
    encoder: Option<Encoder>,
    size: (u32, u32),
    next_idx: u64,
    rgb: Vec<u8>,
}

impl FfmpegSink {
    pub fn new(out: Mp4Output) -> Self {
        Self {
            out,
            encoder: None,
            size: (0, 0),
            next_idx: 0,
            rgb: Vec::new(),
        }
    }

    pub fn output(&self) -> &Mp4Output {
        &self.out
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> BloomResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(BloomError::validation("mp4 frame size must be non-zero"));
        }
        if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
            return Err(BloomError::validation(format!(
                "mp4 frame size must be even for yuv420p, got {}x{}",
                cfg.width, cfg.height
            )));
        }
        if !self.out.overwrite && self.out.path.exists() {
            return Err(BloomError::validation(format!(
                "output file '{}' already exists (pass --overwrite to replace it)",
                self.out.path.display()
            )));
        }
        ensure_parent_dir(&self.out.path)?;

        let encoder = Encoder::spawn(encoder_args(&cfg, &self.out))?;
        tracing::debug!(
            out = %self.out.path.display(),
            width = cfg.width,
            height = cfg.height,
            fps = cfg.fps.as_f64(),
            "ffmpeg encoder started"
        );
        self.encoder = Some(encoder);
        self.size = (cfg.width, cfg.height);
        self.next_idx = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> BloomResult<()> {
        let Some(encoder) = self.encoder.as_mut() else {
            return Err(BloomError::encode("mp4 sink received a frame before begin"));
        };
        if idx.0 != self.next_idx {
            return Err(BloomError::encode(format!(
                "mp4 sink expected frame {}, got {}",
                self.next_idx, idx.0
            )));
        }
        if (frame.width, frame.height) != self.size {
            return Err(BloomError::validation(format!(
                "frame is {}x{}, encoder was started at {}x{}",
                frame.width, frame.height, self.size.0, self.size.1
            )));
        }

        pack_rgb24(&mut self.rgb, &frame.data)?;
        encoder.write(&self.rgb)?;
        self.next_idx += 1;
        Ok(())
    }

    fn end(&mut self) -> BloomResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| BloomError::encode("mp4 sink ended before begin"))?;
        encoder.finish()?;
        tracing::debug!(frames = self.next_idx, out = %self.out.path.display(), "mp4 written");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
