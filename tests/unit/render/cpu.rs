use super::*;
use crate::driver::animator::AnimationDriver;
use crate::scene::adapter::{DrawTarget, apply_advance};

fn render(scene: &Scene, side: u32) -> FrameRGBA {
    let mut backend = CpuBackend::new();
    backend
        .render_scene(scene, &SceneStyle::default(), Canvas::square(side))
        .unwrap()
}

fn assert_near(px: [u8; 4], want: [u8; 4]) {
    for (got, want) in px.iter().zip(want) {
        assert!(
            (i16::from(*got) - i16::from(want)).abs() <= 2,
            "pixel {px:?} != {want:?}"
        );
    }
}

fn play_all(stem: usize, flower: usize) -> Scene {
    let mut scene = Scene::new();
    let mut driver = AnimationDriver::new(stem, flower);
    loop {
        let adv = driver.advance();
        let done = adv.is_done();
        apply_advance(&mut scene, adv);
        if done {
            return scene;
        }
    }
}

#[test]
fn empty_scene_is_background_only() {
    let frame = render(&Scene::new(), 64);
    assert_eq!(frame.width, 64);
    assert_eq!(frame.data.len(), 64 * 64 * 4);
    assert!(frame.premultiplied);
    assert!(frame.data.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}

#[test]
fn background_comes_from_style() {
    let style = SceneStyle {
        background: Rgba8::opaque(18, 20, 28),
        ..SceneStyle::default()
    };
    let frame = CpuBackend::new()
        .render_scene(&Scene::new(), &style, Canvas::square(16))
        .unwrap();
    assert_eq!(frame.pixel(3, 3), Some([18, 20, 28, 255]));
}

#[test]
fn finished_scene_draws_marker_over_flower() {
    let frame = render(&play_all(50, 200), 200);
    // Data origin lands at (100, 75) on a 200px canvas.
    assert_near(frame.pixel(100, 75).unwrap(), [255, 165, 0, 255]);
    // Inside the petals but outside the marker: magenta at 60% over black.
    assert_near(frame.pixel(125, 75).unwrap(), [153, 0, 153, 255]);
    // Corner stays background.
    assert_eq!(frame.pixel(2, 2), Some([0, 0, 0, 255]));
}

#[test]
fn stem_is_stroked_in_green() {
    let mut scene = Scene::new();
    let mut driver = AnimationDriver::new(500, 0);
    for _ in 0..500 {
        apply_advance(&mut scene, driver.advance());
    }
    let frame = render(&scene, 1000);
    // (1.0, 1 - e) maps to roughly (750, 804.6).
    let px = frame.pixel(750, 804).unwrap();
    assert_eq!(px[0], 0);
    assert!(px[1] > 40, "expected green coverage, got {px:?}");
    assert!(!scene.marker_visible());
    assert_eq!(frame.pixel(500, 375), Some([0, 0, 0, 255]));
}

#[test]
fn degenerate_geometry_draws_nothing() {
    let mut scene = Scene::new();
    scene.set_stem_data(vec![Point::new(0.0, 0.0)]);
    scene.create_flower_fill(vec![Point::new(1.3, 0.0), Point::new(1.2, 0.1)]);
    let frame = render(&scene, 48);
    assert!(frame.data.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}

#[test]
fn rejects_zero_canvas() {
    let mut backend = CpuBackend::new();
    let err = backend
        .render_scene(&Scene::new(), &SceneStyle::default(), Canvas::square(0))
        .unwrap_err();
    assert!(err.to_string().contains("validation error"));
}
