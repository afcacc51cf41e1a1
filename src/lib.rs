//! bloom plays a one-shot decorative animation: a stem grows, a six-petal flower fills
//! in, and a center disc appears once everything is drawn.
//!
//! # Pipeline overview
//!
//! 1. **Advance**: [`AnimationDriver`] maps the frame counter to a [`DrawCommand`] or
//!    [`Advance::Done`]. It is pure and never touches pixels.
//! 2. **Apply**: [`apply_advance`] applies the command to a [`DrawTarget`], usually the
//!    retained [`Scene`].
//! 3. **Render**: a [`RenderBackend`] rasterizes the scene into a [`FrameRGBA`].
//! 4. **Present**: a [`Player`] runs the above once per [`Timer`] tick and streams frames
//!    into a [`FrameSink`]: a live [`WindowSink`], memory, a PNG sequence, or MP4 through
//!    `ffmpeg`.
#![forbid(unsafe_code)]

mod driver;
mod encode;
mod foundation;
mod host;
mod render;
mod scene;

pub use driver::animator::{
    Advance, AnimationDriver, DrawCommand, MAX_PHASE_SAMPLES, Phase, phase_for_frame,
};
pub use driver::tables::{
    FLOWER_T_RANGE, PETAL_AMPLITUDE, PETALS, STEM_X_RANGE, SampleTables, petal_radius,
    stem_height,
};
pub use encode::ffmpeg::{FfmpegSink, Mp4Output, encoder_args, pack_rgb24};
pub use encode::sink::{
    FrameSink, InMemorySink, PngSequenceSink, SinkConfig, ensure_parent_dir, write_png,
};
pub use foundation::core::{
    Affine, BezPath, Canvas, DataBounds, Fps, FrameIndex, Point, Rect, Rgba8, Vec2,
};
pub use foundation::error::{BloomError, BloomResult};
pub use host::app::{
    AppContext, DEFAULT_CANVAS_SIDE, DEFAULT_FLOWER_SAMPLES, DEFAULT_STEM_SAMPLES, Timing,
    WINDOW_TITLE,
};
pub use host::player::{PlaybackReport, Player};
pub use host::timer::{
    PacedTimer, TickControl, Timer, TimerSchedule, UnpacedTimer, next_deadline,
};
pub use host::window::{WindowSink, to_window_buffer};
pub use render::backend::{FrameRGBA, RenderBackend};
pub use render::cpu::CpuBackend;
pub use scene::adapter::{DrawTarget, apply_advance};
pub use scene::model::{
    FlowerFill, MIN_FILL_POINTS, MIN_STEM_POINTS, Scene, SceneSnapshot, StemLine,
};
pub use scene::style::{REFERENCE_FIGURE_INCHES, SceneStyle};
