//! Deterministic sample inputs for the integration tests.
//!
//! Everything here is seeded or closed-form so figure output stays
//! stable across runs.

use ndarray::Array2;
use rand::{rngs::StdRng, Rng, SeedableRng};
use visplot::{ParameterSet, Result};

/// Three named parameters over fifty samples. The columns are related
/// but not collinear, so density estimates succeed on every pair.
pub fn three_param_fifty_samples() -> Result<ParameterSet> {
    let m = 50;
    let mut values = Array2::zeros((m, 3));
    for i in 0..m {
        let t = i as f64;
        values[[i, 0]] = t;
        values[[i, 1]] = (t * 0.37).sin() * 3.0 + t * 0.1;
        values[[i, 2]] = t.sqrt() + (t * 0.71).cos();
    }
    ParameterSet::new(
        vec!["alpha".to_string(), "beta".to_string(), "gamma".to_string()],
        values,
    )
}

/// A seeded random table, matching how the demo binary builds its input.
pub fn seeded_params(n: usize, m: usize, seed: u64) -> Result<ParameterSet> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut values = Array2::zeros((m, n));
    for i in 0..m {
        let latent: f64 = rng.gen_range(0.0..1.0);
        for j in 0..n {
            let noise: f64 = rng.gen_range(-0.5..0.5);
            values[[i, j]] = j as f64 + latent + noise;
        }
    }
    let names = (0..n).map(|j| format!("p{}", j)).collect();
    ParameterSet::new(names, values)
}

/// Two exactly collinear columns; any 2-d density estimate over the
/// pair is singular.
pub fn collinear_pair() -> Result<ParameterSet> {
    let m = 50;
    let mut values = Array2::zeros((m, 2));
    for i in 0..m {
        values[[i, 0]] = i as f64;
        values[[i, 1]] = 2.0 * i as f64;
    }
    ParameterSet::new(vec!["x".to_string(), "y".to_string()], values)
}

/// A per-sample metric to drive data coloring: the row sums.
pub fn row_sums(params: &ParameterSet) -> Vec<f64> {
    let values = params.values();
    (0..values.nrows())
        .map(|i| values.row(i).sum())
        .collect()
}

/// A coarse land ring covering part of the northern hemisphere.
pub fn land_rings() -> Vec<Vec<(f64, f64)>> {
    vec![vec![
        (-10.0, 36.0),
        (30.0, 45.0),
        (100.0, 35.0),
        (140.0, 50.0),
        (140.0, 72.0),
        (40.0, 68.0),
        (-5.0, 48.0),
    ]]
}
