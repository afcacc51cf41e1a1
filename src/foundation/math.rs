/// `n` evenly spaced samples over `[start, end]`, both endpoints included.
///
/// `n == 1` yields `[start]`; `n == 0` yields an empty table.
pub(crate) fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            // Pin the last sample so accumulated rounding never overshoots the range.
            out[n - 1] = end;
            out
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
