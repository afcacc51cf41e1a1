use std::time::Duration;

use crate::driver::animator::MAX_PHASE_SAMPLES;
use crate::foundation::core::Canvas;
use crate::foundation::error::{BloomError, BloomResult};
use crate::host::timer::TimerSchedule;
use crate::scene::style::SceneStyle;

pub const WINDOW_TITLE: &str = "Filled Flower Animation with Center";
pub const DEFAULT_STEM_SAMPLES: usize = 500;
pub const DEFAULT_FLOWER_SAMPLES: usize = 1000;
/// Side of the default square canvas: a 10 inch figure at 100 dpi.
pub const DEFAULT_CANVAS_SIDE: u32 = 1000;

/// Start delay and tick interval of the animation timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Timing {
    pub start_delay: Duration,
    pub interval: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            start_delay: Duration::from_millis(50),
            interval: Duration::from_millis(5),
        }
    }
}

impl Timing {
    pub fn schedule(self) -> TimerSchedule {
        TimerSchedule {
            start_delay: self.start_delay,
            interval: self.interval,
        }
    }
}

/// The single application context: everything the player needs, built once up front.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AppContext {
    pub title: String,
    pub canvas: Canvas,
    pub style: SceneStyle,
    pub timing: Timing,
    pub stem_samples: usize,
    pub flower_samples: usize,
}

impl Default for AppContext {
    fn default() -> Self {
        Self {
            title: WINDOW_TITLE.to_string(),
            canvas: Canvas::square(DEFAULT_CANVAS_SIDE),
            style: SceneStyle::default(),
            timing: Timing::default(),
            stem_samples: DEFAULT_STEM_SAMPLES,
            flower_samples: DEFAULT_FLOWER_SAMPLES,
        }
    }
}

impl AppContext {
    pub fn with_canvas(mut self, canvas: Canvas) -> Self {
        self.canvas = canvas;
        self
    }

    pub fn with_samples(mut self, stem_samples: usize, flower_samples: usize) -> Self {
        self.stem_samples = stem_samples;
        self.flower_samples = flower_samples;
        self
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Reject configurations that cannot start.
    pub fn validate(&self) -> BloomResult<()> {
        if self.title.trim().is_empty() {
            return Err(BloomError::validation("window title must not be empty"));
        }
        self.canvas.validate()?;
        self.style.validate()?;
        if self.timing.interval.is_zero() {
            return Err(BloomError::validation("tick interval must be > 0"));
        }
        for (name, n) in [
            ("stem", self.stem_samples),
            ("flower", self.flower_samples),
        ] {
            if n > MAX_PHASE_SAMPLES {
                return Err(BloomError::validation(format!(
                    "{name} sample count {n} exceeds the maximum of {MAX_PHASE_SAMPLES}"
                )));
            }
        }
        Ok(())
    }

    /// Ticks that produce geometry; one more tick follows to finish the run.
    pub fn total_frames(&self) -> u64 {
        (self.stem_samples as u64).saturating_add(self.flower_samples as u64)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/app.rs"]
mod tests;
