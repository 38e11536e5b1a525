//! Named parameter sample sets.
//!
//! A [`ParameterSet`] couples N parameter names with an M×N sample matrix
//! (M samples per parameter, one column per parameter). Shape and value
//! validation happens at construction so downstream plotting code can rely
//! on a consistent, finite matrix.

use ndarray::{Array2, ArrayView1, ArrayView2};

use crate::error::{Result, VisplotError};

/// An ordered set of named parameters with M samples per parameter.
///
/// Immutable after construction.
#[derive(Debug, Clone)]
pub struct ParameterSet {
    names: Vec<String>,
    values: Array2<f64>,
}

impl ParameterSet {
    /// Build a parameter set from names and an M×N sample matrix.
    ///
    /// Fails when the name count does not match the column count, when the
    /// matrix has no sample rows, or when any value is NaN or infinite.
    pub fn new(names: Vec<String>, values: Array2<f64>) -> Result<Self> {
        if names.len() != values.ncols() {
            return Err(VisplotError::ShapeMismatch {
                names: names.len(),
                columns: values.ncols(),
            });
        }
        if values.nrows() == 0 {
            return Err(VisplotError::InvalidParameter {
                param: "values".to_string(),
                message: "sample matrix has no rows".to_string(),
            });
        }
        for (j, name) in names.iter().enumerate() {
            if let Some(i) = values.column(j).iter().position(|v| !v.is_finite()) {
                return Err(VisplotError::InvalidParameter {
                    param: name.clone(),
                    message: format!("non-finite value at sample {}", i),
                });
            }
        }
        Ok(Self { names, values })
    }

    /// Number of parameters (the grid size N).
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of samples per parameter (M).
    pub fn samples(&self) -> usize {
        self.values.nrows()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    /// Raw samples of the j-th parameter.
    pub fn column(&self, j: usize) -> ArrayView1<'_, f64> {
        self.values.column(j)
    }

    /// Min and max of the j-th parameter's raw samples.
    pub fn column_extent(&self, j: usize) -> (f64, f64) {
        extent(self.values.column(j))
    }

    /// Rescale every column to [0, 1] using that column's own min and max.
    ///
    /// The extremes map exactly: the column minimum becomes 0.0 and the
    /// maximum becomes 1.0. A column whose min equals its max cannot be
    /// rescaled and fails with [`VisplotError::ConstantColumn`].
    pub fn normalized(&self) -> Result<Array2<f64>> {
        let mut out = self.values.clone();
        for (j, name) in self.names.iter().enumerate() {
            let (min, max) = extent(self.values.column(j));
            if min == max {
                return Err(VisplotError::ConstantColumn { name: name.clone() });
            }
            let span = max - min;
            out.column_mut(j).mapv_inplace(|v| (v - min) / span);
        }
        Ok(out)
    }
}

fn extent(col: ArrayView1<'_, f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in col.iter() {
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }
    (min, max)
}
