use super::*;

#[test]
fn tables_have_requested_lengths() {
    let t = SampleTables::new(500, 1000);
    assert_eq!(t.stem_samples(), 500);
    assert_eq!(t.flower_samples(), 1000);
    assert_eq!(t.flower_r().len(), 1000);
    assert_eq!(t.stem_x()[0], 0.0);
    assert_eq!(t.stem_x()[499], 1.5);
}

#[test]
fn radius_table_matches_petal_formula() {
    let t = SampleTables::new(0, 64);
    for (&theta, &r) in t.flower_t().iter().zip(t.flower_r()) {
        assert!((r - (1.0 + 0.3 * (6.0 * theta).cos())).abs() < 1e-12);
    }
    // Petal tips at t = 0 and troughs half a petal later.
    assert!((petal_radius(0.0) - 1.3).abs() < 1e-12);
    assert!((petal_radius(std::f64::consts::PI / 6.0) - 0.7).abs() < 1e-12);
}

#[test]
fn stem_starts_at_origin_and_droops() {
    let pts = SampleTables::new(10, 0).stem_prefix(10);
    assert_eq!(pts[0], Point::new(0.0, 0.0));
    assert!(pts.windows(2).all(|w| w[1].y < w[0].y));
    assert!((pts[9].y - (1.0 - 1.5f64.exp())).abs() < 1e-12);
}

#[test]
fn prefixes_clamp_to_table_length() {
    let t = SampleTables::new(3, 4);
    assert_eq!(t.stem_prefix(10).len(), 3);
    assert_eq!(t.flower_prefix(10).len(), 4);
    assert!(t.stem_prefix(0).is_empty());
}

#[test]
fn flower_prefix_is_polar_to_cartesian() {
    let t = SampleTables::new(0, 1000);
    let pts = t.flower_prefix(1000);
    for (j, p) in pts.iter().enumerate().step_by(97) {
        let (theta, r) = (t.flower_t()[j], t.flower_r()[j]);
        assert!((p.x - r * theta.cos()).abs() < 1e-12);
        assert!((p.y - r * theta.sin()).abs() < 1e-12);
    }
    assert!((pts[0].x - 1.3).abs() < 1e-12);
}
