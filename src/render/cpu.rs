use kurbo::Shape as _;

use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rgba8};
use crate::foundation::error::{BloomError, BloomResult};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::scene::model::Scene;
use crate::scene::style::SceneStyle;

/// Flattening tolerance for the center marker, in pixels.
const CIRCLE_TOLERANCE_PX: f64 = 0.1;

/// CPU raster backend powered by `vello_cpu`.
#[derive(Debug, Default)]
pub struct CpuBackend;

impl CpuBackend {
    pub fn new() -> Self {
        Self
    }
}

enum Layer {
    Stem(vello_cpu::kurbo::BezPath),
    Flower(vello_cpu::kurbo::BezPath),
    Marker(vello_cpu::kurbo::BezPath),
}

impl RenderBackend for CpuBackend {
    fn render_scene(
        &mut self,
        scene: &Scene,
        style: &SceneStyle,
        canvas: Canvas,
    ) -> BloomResult<FrameRGBA> {
        canvas.validate()?;
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| BloomError::render("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| BloomError::render("canvas height exceeds u16"))?;

        let to_px = style.bounds.to_canvas_affine(canvas);
        let mut layers = collect_layers(scene, style, canvas, to_px);
        layers.sort_by_key(|(z, _)| *z);

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(cpu_color(style.background));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        ));

        let min_side = f64::from(canvas.width.min(canvas.height));
        for (_, layer) in &layers {
            match layer {
                Layer::Stem(path) => {
                    ctx.set_paint(cpu_color(style.stem_color));
                    ctx.set_stroke(
                        vello_cpu::kurbo::Stroke::new(style.stem_width_px(min_side))
                            .with_join(vello_cpu::kurbo::Join::Round)
                            .with_caps(vello_cpu::kurbo::Cap::Butt),
                    );
                    ctx.stroke_path(path);
                }
                Layer::Flower(path) => {
                    ctx.set_paint(cpu_color(style.flower_color));
                    if style.flower_alpha < 1.0 {
                        ctx.push_opacity_layer(style.flower_alpha);
                    }
                    ctx.fill_path(path);
                    if style.flower_alpha < 1.0 {
                        ctx.pop_layer();
                    }
                }
                Layer::Marker(path) => {
                    ctx.set_paint(cpu_color(style.marker_color));
                    ctx.fill_path(path);
                }
            }
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn collect_layers(
    scene: &Scene,
    style: &SceneStyle,
    canvas: Canvas,
    to_px: Affine,
) -> Vec<(i32, Layer)> {
    let mut layers = Vec::with_capacity(3);

    if scene.stem().is_drawable() {
        layers.push((
            style.stem_z,
            Layer::Stem(polyline_to_cpu(scene.stem().points(), to_px, false)),
        ));
    }

    if let Some(fill) = scene.flower().filter(|f| f.is_drawable()) {
        layers.push((
            style.flower_z,
            Layer::Flower(polyline_to_cpu(fill.contour(), to_px, true)),
        ));
    }

    if scene.marker_visible() {
        let center = to_px * style.marker_center;
        let radius = style.marker_radius * style.bounds.pixels_per_unit(canvas);
        let circle = kurbo::Circle::new(center, radius).to_path(CIRCLE_TOLERANCE_PX);
        layers.push((style.marker_z, Layer::Marker(bezpath_to_cpu(&circle))));
    }

    layers
}

fn polyline_to_cpu(points: &[Point], to_px: Affine, close: bool) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    let mut iter = points.iter().map(|&p| point_to_cpu(to_px * p));
    if let Some(first) = iter.next() {
        out.move_to(first);
        for p in iter {
            out.line_to(p);
        }
        if close {
            out.close_path();
        }
    }
    out
}

fn cpu_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
