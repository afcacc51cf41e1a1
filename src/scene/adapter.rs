use crate::driver::animator::{Advance, DrawCommand};
use crate::foundation::core::Point;
use crate::scene::model::Scene;

/// Mutable primitives a host toolkit must provide for the animation.
pub trait DrawTarget {
    /// Replace the stem line's data with `points`.
    fn set_stem_data(&mut self, points: Vec<Point>);
    /// Remove the current flower fill, if any.
    fn remove_flower_fill(&mut self);
    /// Create a new flower fill from `contour`.
    fn create_flower_fill(&mut self, contour: Vec<Point>);
    /// Toggle center marker visibility.
    fn set_center_visible(&mut self, visible: bool);
}

impl DrawTarget for Scene {
    fn set_stem_data(&mut self, points: Vec<Point>) {
        self.replace_stem(points);
    }

    fn remove_flower_fill(&mut self) {
        self.drop_flower();
    }

    fn create_flower_fill(&mut self, contour: Vec<Point>) {
        self.insert_flower(contour);
    }

    fn set_center_visible(&mut self, visible: bool) {
        self.reveal_marker(visible);
    }
}

/// Apply one driver step to `target`.
///
/// Flower commands remove the previous fill before creating the new one; `Done` reveals
/// the center marker and may be applied any number of times.
pub fn apply_advance<T: DrawTarget + ?Sized>(target: &mut T, advance: Advance) {
    match advance {
        Advance::Draw(DrawCommand::SetStem { points }) => target.set_stem_data(points),
        Advance::Draw(DrawCommand::ReplaceFlower { contour }) => {
            target.remove_flower_fill();
            target.create_flower_fill(contour);
        }
        Advance::Done => target.set_center_visible(true),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/adapter.rs"]
mod tests;
