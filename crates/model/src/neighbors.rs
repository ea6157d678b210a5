//! Brute-force nearest-neighbor lookup over the raw feature matrix.

use ndarray::{Array2, ArrayView1};

use crate::ModelError;

/// Exact k-nearest-neighbor index under Euclidean distance.
///
/// Features are compared unscaled; ties are broken by row order so
/// queries are fully deterministic.
#[derive(Debug, Clone)]
pub struct NearestNeighbors {
    data: Array2<f64>,
}

impl NearestNeighbors {
    /// Index the rows of `data`.
    ///
    /// # Errors
    /// [`ModelError::InsufficientData`] when `data` has no rows.
    pub fn fit(data: Array2<f64>) -> Result<Self, ModelError> {
        if data.nrows() == 0 {
            return Err(ModelError::InsufficientData);
        }
        Ok(Self { data })
    }

    /// Indices of the `k` rows closest to `point`, nearest first. Fewer
    /// than `k` rows are returned when the index is smaller than `k`.
    ///
    /// # Errors
    /// [`ModelError::DimensionMismatch`] when `point` has the wrong
    /// length.
    pub fn query(&self, point: ArrayView1<'_, f64>, k: usize) -> Result<Vec<usize>, ModelError> {
        if point.len() != self.data.ncols() {
            return Err(ModelError::DimensionMismatch {
                expected: self.data.ncols(),
                actual: point.len(),
            });
        }

        let mut distances: Vec<(f64, usize)> = self
            .data
            .rows()
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                let d = row.iter().zip(point.iter()).map(|(a, b)| (a - b) * (a - b)).sum::<f64>();
                (d, i)
            })
            .collect();
        distances.sort_by(|a, b| {
            a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal).then(a.1.cmp(&b.1))
        });

        Ok(distances.into_iter().take(k).map(|(_, i)| i).collect())
    }
}
