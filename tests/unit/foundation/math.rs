use super::*;

#[test]
fn linspace_includes_both_endpoints() {
    let xs = linspace(0.0, 1.5, 4);
    assert_eq!(xs, vec![0.0, 0.5, 1.0, 1.5]);
}

#[test]
fn linspace_degenerate_counts() {
    assert!(linspace(0.0, 1.0, 0).is_empty());
    assert_eq!(linspace(3.0, 7.0, 1), vec![3.0]);
}

#[test]
fn linspace_is_strictly_increasing_for_large_tables() {
    let ts = linspace(0.0, std::f64::consts::TAU, 1000);
    assert_eq!(ts.len(), 1000);
    assert!(ts.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(*ts.last().unwrap(), std::f64::consts::TAU);
}
