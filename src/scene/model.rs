use crate::foundation::core::Point;

/// Fewest contour points that enclose any area.
pub const MIN_FILL_POINTS: usize = 3;
/// Fewest line points that produce a visible segment.
pub const MIN_STEM_POINTS: usize = 2;

/// The growing stem: a polyline whose data is replaced wholesale.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StemLine {
    points: Vec<Point>,
}

impl StemLine {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_drawable(&self) -> bool {
        self.points.len() >= MIN_STEM_POINTS
    }
}

/// One filled flower polygon. Never mutated in place; the scene drops and recreates it.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowerFill {
    contour: Vec<Point>,
}

impl FlowerFill {
    pub fn contour(&self) -> &[Point] {
        &self.contour
    }

    /// Contours with fewer than [`MIN_FILL_POINTS`] points have no visible geometry.
    pub fn is_drawable(&self) -> bool {
        self.contour.len() >= MIN_FILL_POINTS
    }
}

/// Retained state of the three visual primitives.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    stem: StemLine,
    flower: Option<FlowerFill>,
    marker_visible: bool,
    fill_generation: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stem(&self) -> &StemLine {
        &self.stem
    }

    pub fn flower(&self) -> Option<&FlowerFill> {
        self.flower.as_ref()
    }

    pub fn marker_visible(&self) -> bool {
        self.marker_visible
    }

    /// Number of flower fills created so far in this scene.
    pub fn fill_generation(&self) -> u64 {
        self.fill_generation
    }

    pub(crate) fn replace_stem(&mut self, points: Vec<Point>) {
        self.stem.points = points;
    }

    pub(crate) fn drop_flower(&mut self) {
        self.flower = None;
    }

    pub(crate) fn insert_flower(&mut self, contour: Vec<Point>) {
        self.flower = Some(FlowerFill { contour });
        self.fill_generation += 1;
    }

    pub(crate) fn reveal_marker(&mut self, visible: bool) {
        // Once shown the marker stays up for the rest of the run.
        self.marker_visible |= visible;
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            stem_points: self.stem.points.len(),
            stem_visible: self.stem.is_drawable(),
            flower_points: self.flower.as_ref().map_or(0, |f| f.contour.len()),
            flower_visible: self.flower.as_ref().is_some_and(FlowerFill::is_drawable),
            fill_generation: self.fill_generation,
            marker_visible: self.marker_visible,
        }
    }
}

/// Serializable summary of a [`Scene`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SceneSnapshot {
    pub stem_points: usize,
    pub stem_visible: bool,
    pub flower_points: usize,
    pub flower_visible: bool,
    pub fill_generation: u64,
    pub marker_visible: bool,
}
