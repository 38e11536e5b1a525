//! 2D Gaussian kernel density estimation.
//!
//! Used by the pair grid to color scatter points by local sample
//! concentration. The estimator uses Scott's rule for the bandwidth
//! (factor `n^(-1/6)` for two dimensions) applied to the sample
//! covariance, matching the conventional fixed-bandwidth Gaussian KDE.
//!
//! Fitting is fallible: degenerate input (too few points, a constant
//! coordinate, exactly collinear samples) has a singular covariance and
//! cannot support a 2D estimate. Callers decide how to degrade; the pair
//! grid logs the failure and falls back to flat coloring.

use crate::error::{Result, VisplotError};

/// A fitted 2D Gaussian kernel density estimator.
#[derive(Debug, Clone)]
pub struct GaussianKde2 {
    points: Vec<(f64, f64)>,
    /// Inverse of the bandwidth-scaled covariance: [ixx, ixy, iyy].
    inv: [f64; 3],
    /// 1 / (n * 2π * sqrt(det)) so evaluations integrate to one.
    norm: f64,
}

impl GaussianKde2 {
    /// Fit an estimator to paired samples.
    pub fn fit(x: &[f64], y: &[f64]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(density_error(format!(
                "coordinate lengths differ: {} vs {}",
                x.len(),
                y.len()
            )));
        }
        let n = x.len();
        if n < 3 {
            return Err(density_error(format!(
                "need at least 3 points, got {}",
                n
            )));
        }
        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(density_error("non-finite coordinate".to_string()));
        }

        let nf = n as f64;
        let mean_x = x.iter().sum::<f64>() / nf;
        let mean_y = y.iter().sum::<f64>() / nf;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        let mut syy = 0.0;
        for i in 0..n {
            let dx = x[i] - mean_x;
            let dy = y[i] - mean_y;
            sxx += dx * dx;
            sxy += dx * dy;
            syy += dy * dy;
        }
        let denom = nf - 1.0;
        sxx /= denom;
        sxy /= denom;
        syy /= denom;

        // Scott's rule, d = 2.
        let factor = nf.powf(-1.0 / 6.0);
        let f2 = factor * factor;
        let cxx = sxx * f2;
        let cxy = sxy * f2;
        let cyy = syy * f2;

        let det = cxx * cyy - cxy * cxy;
        let scale = cxx.abs().max(cyy.abs());
        if !det.is_finite() || det <= scale * scale * 1e-12 {
            return Err(density_error(
                "singular covariance (degenerate or collinear samples)".to_string(),
            ));
        }

        let inv = [cyy / det, -cxy / det, cxx / det];
        let norm = 1.0 / (nf * std::f64::consts::TAU * det.sqrt());
        let points = x.iter().copied().zip(y.iter().copied()).collect();

        Ok(Self { points, inv, norm })
    }

    /// Estimated density at a single point.
    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        let [ixx, ixy, iyy] = self.inv;
        let mut acc = 0.0;
        for &(px, py) in &self.points {
            let dx = x - px;
            let dy = y - py;
            let q = dx * dx * ixx + 2.0 * dx * dy * ixy + dy * dy * iyy;
            acc += (-0.5 * q).exp();
        }
        acc * self.norm
    }

    /// Estimated densities at each paired coordinate.
    pub fn evaluate_many(&self, x: &[f64], y: &[f64]) -> Vec<f64> {
        x.iter()
            .zip(y.iter())
            .map(|(&a, &b)| self.evaluate(a, b))
            .collect()
    }

    /// Number of fitted sample points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

fn density_error(message: String) -> VisplotError {
    VisplotError::Density { message }
}
