use super::*;

#[test]
fn defaults_describe_the_flower_window() {
    let ctx = AppContext::default();
    assert_eq!(ctx.title, "Filled Flower Animation with Center");
    assert_eq!(ctx.canvas, Canvas::square(1000));
    assert_eq!(ctx.total_frames(), 1500);
    assert_eq!(ctx.timing.interval, Duration::from_millis(5));
    assert_eq!(ctx.timing.start_delay, Duration::from_millis(50));
    ctx.validate().unwrap();
}

#[test]
fn zero_phases_are_valid() {
    AppContext::default().with_samples(0, 0).validate().unwrap();
    AppContext::default().with_samples(0, 10).validate().unwrap();
}

#[test]
fn misconfiguration_fails_at_startup() {
    let zero_canvas = AppContext::default().with_canvas(Canvas::square(0));
    assert!(zero_canvas.validate().is_err());

    let zero_interval = AppContext::default().with_timing(Timing {
        start_delay: Duration::ZERO,
        interval: Duration::ZERO,
    });
    assert!(zero_interval.validate().is_err());

    let huge = AppContext::default().with_samples(MAX_PHASE_SAMPLES + 1, 1);
    assert!(huge.validate().is_err());

    let mut untitled = AppContext::default();
    untitled.title = "  ".to_string();
    assert!(untitled.validate().is_err());

    let mut bad_alpha = AppContext::default();
    bad_alpha.style.flower_alpha = 1.5;
    assert!(bad_alpha.validate().is_err());
}

#[test]
fn context_serializes_to_json() {
    let json = serde_json::to_value(AppContext::default()).unwrap();
    assert_eq!(json["stem_samples"], 500);
    assert_eq!(json["style"]["marker_radius"], 0.2);
    let back: AppContext = serde_json::from_value(json).unwrap();
    assert_eq!(back.canvas, Canvas::square(1000));
    assert_eq!(back.timing, Timing::default());
    assert_eq!(back.flower_samples, 1000);
}
