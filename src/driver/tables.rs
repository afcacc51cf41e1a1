use crate::foundation::core::Point;
use crate::foundation::math::linspace;

/// Stem parameter range `x ∈ [0, 1.5]`.
pub const STEM_X_RANGE: (f64, f64) = (0.0, 1.5);
/// Flower angle range `t ∈ [0, 2π]`.
pub const FLOWER_T_RANGE: (f64, f64) = (0.0, std::f64::consts::TAU);
/// Number of petals in `r(t) = 1 + A·cos(P·t)`.
pub const PETALS: f64 = 6.0;
/// Petal amplitude in `r(t) = 1 + A·cos(P·t)`.
pub const PETAL_AMPLITUDE: f64 = 0.3;

/// Stem curve `y = 1 - e^x`.
pub fn stem_height(x: f64) -> f64 {
    1.0 - x.exp()
}

/// Flower radius `r(t) = 1 + 0.3·cos(6t)`.
pub fn petal_radius(t: f64) -> f64 {
    1.0 + PETAL_AMPLITUDE * (PETALS * t).cos()
}

/// Immutable sample tables backing the progressive reveal.
///
/// Built once per run; the driver only ever reads prefixes of them.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleTables {
    stem_x: Vec<f64>,
    flower_t: Vec<f64>,
    flower_r: Vec<f64>,
}

impl SampleTables {
    /// Build tables with `stem_samples` stem parameters and `flower_samples` flower angles.
    pub fn new(stem_samples: usize, flower_samples: usize) -> Self {
        let stem_x = linspace(STEM_X_RANGE.0, STEM_X_RANGE.1, stem_samples);
        let flower_t = linspace(FLOWER_T_RANGE.0, FLOWER_T_RANGE.1, flower_samples);
        let flower_r = flower_t.iter().map(|&t| petal_radius(t)).collect();
        Self {
            stem_x,
            flower_t,
            flower_r,
        }
    }

    pub fn stem_samples(&self) -> usize {
        self.stem_x.len()
    }

    pub fn flower_samples(&self) -> usize {
        self.flower_t.len()
    }

    pub fn stem_x(&self) -> &[f64] {
        &self.stem_x
    }

    pub fn flower_t(&self) -> &[f64] {
        &self.flower_t
    }

    pub fn flower_r(&self) -> &[f64] {
        &self.flower_r
    }

    /// First `n` stem points `(x_i, 1 - e^{x_i})`, clamped to the table length.
    pub fn stem_prefix(&self, n: usize) -> Vec<Point> {
        self.stem_x[..n.min(self.stem_x.len())]
            .iter()
            .map(|&x| Point::new(x, stem_height(x)))
            .collect()
    }

    /// First `k` flower points `(r_j·cos t_j, r_j·sin t_j)`, clamped to the table length.
    pub fn flower_prefix(&self, k: usize) -> Vec<Point> {
        let k = k.min(self.flower_t.len());
        self.flower_t[..k]
            .iter()
            .zip(&self.flower_r[..k])
            .map(|(&t, &r)| Point::new(r * t.cos(), r * t.sin()))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/driver/tables.rs"]
mod tests;
