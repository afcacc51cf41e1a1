use std::time::{Duration, Instant};

use crate::driver::animator::{Advance, AnimationDriver, DrawCommand};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::BloomResult;
use crate::host::app::AppContext;
use crate::host::timer::{TickControl, Timer};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::scene::adapter::apply_advance;
use crate::scene::model::{Scene, SceneSnapshot};

/// Summary of one completed run.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PlaybackReport {
    pub ticks: u64,
    pub frames_pushed: u64,
    pub stem_frames: u64,
    pub flower_frames: u64,
    pub final_scene: SceneSnapshot,
    pub elapsed: Duration,
}

/// Drives one animation run: timer ticks in, rendered frames out.
///
/// Frame `N` is the scene after tick `N` has been applied. The tick that yields
/// [`Advance::Done`] reveals the center marker, pushes the terminal frame, and stops the
/// timer, so a run pushes `total_frames + 1` frames. A sink that reports it no longer
/// wants frames (a closed window) stops the run early.
#[derive(Clone, Debug)]
pub struct Player {
    ctx: AppContext,
}

impl Player {
    pub fn new(ctx: AppContext) -> BloomResult<Self> {
        ctx.validate()?;
        Ok(Self { ctx })
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    /// Frames a full run pushes to its sink.
    pub fn frame_count(&self) -> u64 {
        self.ctx.total_frames() + 1
    }

    #[tracing::instrument(skip_all, fields(title = %self.ctx.title))]
    pub fn run(
        &self,
        timer: &mut dyn Timer,
        backend: &mut dyn RenderBackend,
        sink: &mut dyn FrameSink,
    ) -> BloomResult<PlaybackReport> {
        let started = Instant::now();
        let mut driver = AnimationDriver::try_new(self.ctx.stem_samples, self.ctx.flower_samples)?;
        let mut scene = Scene::new();

        sink.begin(SinkConfig {
            title: self.ctx.title.clone(),
            width: self.ctx.canvas.width,
            height: self.ctx.canvas.height,
            fps: Fps::from_interval(self.ctx.timing.interval)?,
        })?;
        tracing::info!(
            total_frames = driver.total_frames(),
            width = self.ctx.canvas.width,
            height = self.ctx.canvas.height,
            "playback started"
        );

        let mut next_idx = 0u64;
        let (mut stem_frames, mut flower_frames) = (0u64, 0u64);
        let ticks = timer.run(self.ctx.timing.schedule(), &mut || {
            if !sink.wants_more() {
                tracing::info!(frame = next_idx, "sink closed, stopping playback");
                return Ok(TickControl::Stop);
            }

            let advance = driver.advance();
            let done = advance.is_done();
            match &advance {
                Advance::Draw(DrawCommand::SetStem { .. }) => stem_frames += 1,
                Advance::Draw(DrawCommand::ReplaceFlower { .. }) => flower_frames += 1,
                Advance::Done => {}
            }
            apply_advance(&mut scene, advance);

            let frame = backend.render_scene(&scene, &self.ctx.style, self.ctx.canvas)?;
            sink.push_frame(FrameIndex(next_idx), &frame)?;
            next_idx += 1;

            Ok(if done {
                TickControl::Stop
            } else {
                TickControl::Continue
            })
        })?;
        sink.end()?;

        let report = PlaybackReport {
            ticks,
            frames_pushed: next_idx,
            stem_frames,
            flower_frames,
            final_scene: scene.snapshot(),
            elapsed: started.elapsed(),
        };
        tracing::info!(
            ticks = report.ticks,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "playback finished"
        );
        Ok(report)
    }

    /// Scene state after tick `idx`, replayed deterministically from the start.
    ///
    /// Indices past the end clamp to the terminal state.
    pub fn scene_at(&self, idx: FrameIndex) -> Scene {
        let mut driver = AnimationDriver::new(self.ctx.stem_samples, self.ctx.flower_samples);
        let mut scene = Scene::new();
        for _ in 0..=idx.0.min(driver.total_frames()) {
            apply_advance(&mut scene, driver.advance());
        }
        scene
    }

    /// Render the frame a full run would push at `idx`.
    pub fn render_frame_at(
        &self,
        idx: FrameIndex,
        backend: &mut dyn RenderBackend,
    ) -> BloomResult<FrameRGBA> {
        let scene = self.scene_at(idx);
        backend.render_scene(&scene, &self.ctx.style, self.ctx.canvas)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/player.rs"]
mod tests;
