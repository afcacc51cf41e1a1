use crate::driver::tables::SampleTables;
use crate::foundation::core::{FrameIndex, Point};
use crate::foundation::error::{BloomError, BloomResult};

/// Largest per-phase sample count accepted by [`AnimationDriver::try_new`].
pub const MAX_PHASE_SAMPLES: usize = 1 << 24;

/// Segment of the animation a frame belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// The stem curve is growing.
    Stem,
    /// The flower fill is growing.
    Flower,
    /// Terminal: nothing left to reveal.
    Done,
}

/// Phase of `frame` for a run with `stem_samples` stem frames and `flower_samples` flower
/// frames. Empty phases are skipped.
pub fn phase_for_frame(frame: FrameIndex, stem_samples: usize, flower_samples: usize) -> Phase {
    let stem = stem_samples as u64;
    let total = stem.saturating_add(flower_samples as u64);
    if frame.0 >= total {
        Phase::Done
    } else if frame.0 < stem {
        Phase::Stem
    } else {
        Phase::Flower
    }
}

/// What a renderer must change for one tick.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Replace the stem line's data with `points`.
    SetStem { points: Vec<Point> },
    /// Discard the previous flower fill and create a new one from `contour`.
    ///
    /// The contour always carries every revealed point, never a delta.
    ReplaceFlower { contour: Vec<Point> },
}

impl DrawCommand {
    pub fn phase(&self) -> Phase {
        match self {
            Self::SetStem { .. } => Phase::Stem,
            Self::ReplaceFlower { .. } => Phase::Flower,
        }
    }

    pub fn points(&self) -> &[Point] {
        match self {
            Self::SetStem { points } => points,
            Self::ReplaceFlower { contour } => contour,
        }
    }
}

/// Result of one tick.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Advance {
    Draw(DrawCommand),
    /// The caller must stop ticking and reveal the center marker.
    Done,
}

impl Advance {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// Frame-advance state machine: `Stem -> Flower -> Done`.
///
/// Owns the frame counter and the immutable sample tables. It never touches pixels; the
/// returned [`Advance`] is applied to a scene by [`crate::apply_advance`].
#[derive(Clone, Debug)]
pub struct AnimationDriver {
    tables: SampleTables,
    frame: FrameIndex,
    total_frames: u64,
    last_phase: Option<Phase>,
}

impl AnimationDriver {
    /// Build the sample tables and start at frame 0.
    ///
    /// A zero count skips the corresponding phase.
    #[tracing::instrument]
    pub fn new(stem_samples: usize, flower_samples: usize) -> Self {
        let tables = SampleTables::new(stem_samples, flower_samples);
        let total_frames = (stem_samples as u64).saturating_add(flower_samples as u64);
        tracing::debug!(total_frames, "animation driver initialized");
        Self {
            tables,
            frame: FrameIndex(0),
            total_frames,
            last_phase: None,
        }
    }

    /// Like [`AnimationDriver::new`], rejecting counts too large to tabulate.
    pub fn try_new(stem_samples: usize, flower_samples: usize) -> BloomResult<Self> {
        for (name, n) in [("stem", stem_samples), ("flower", flower_samples)] {
            if n > MAX_PHASE_SAMPLES {
                return Err(BloomError::validation(format!(
                    "{name} sample count {n} exceeds the maximum of {MAX_PHASE_SAMPLES}"
                )));
            }
        }
        Ok(Self::new(stem_samples, flower_samples))
    }

    /// Produce the draw command for the current frame and move to the next one.
    ///
    /// Once the counter reaches [`AnimationDriver::total_frames`] this returns
    /// [`Advance::Done`] forever and the counter stays put.
    pub fn advance(&mut self) -> Advance {
        let phase = self.phase();
        self.note_phase(phase);

        let command = match phase {
            Phase::Done => return Advance::Done,
            Phase::Stem => DrawCommand::SetStem {
                points: self.tables.stem_prefix(self.frame.0 as usize),
            },
            Phase::Flower => {
                let revealed = self.frame.0 - self.tables.stem_samples() as u64;
                DrawCommand::ReplaceFlower {
                    contour: self.tables.flower_prefix(revealed as usize),
                }
            }
        };

        self.frame = FrameIndex(self.frame.0 + 1);
        Advance::Draw(command)
    }

    fn note_phase(&mut self, phase: Phase) {
        if self.last_phase == Some(phase) {
            return;
        }
        tracing::debug!(
            frame = self.frame.0,
            from = ?self.last_phase,
            to = ?phase,
            "phase transition"
        );
        self.last_phase = Some(phase);
    }

    /// Index of the frame the next [`AnimationDriver::advance`] call will produce.
    pub fn frame(&self) -> FrameIndex {
        self.frame
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Phase of the frame the next call will produce.
    pub fn phase(&self) -> Phase {
        phase_for_frame(
            self.frame,
            self.tables.stem_samples(),
            self.tables.flower_samples(),
        )
    }

    pub fn is_done(&self) -> bool {
        self.phase() == Phase::Done
    }

    pub fn stem_samples(&self) -> usize {
        self.tables.stem_samples()
    }

    pub fn flower_samples(&self) -> usize {
        self.tables.flower_samples()
    }

    pub fn tables(&self) -> &SampleTables {
        &self.tables
    }
}

#[cfg(test)]
#[path = "../../tests/unit/driver/animator.rs"]
mod tests;
