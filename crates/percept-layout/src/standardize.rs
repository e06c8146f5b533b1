use nalgebra::DMatrix;

/// Per-column mean and population standard deviation over the active rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    pub mean: Vec<f64>,
    /// Population std-dev, already floored: a constant column reports `1.0`.
    pub std: Vec<f64>,
}

pub fn column_stats(values: &DMatrix<f64>, active: &[usize]) -> ColumnStats {
    let cols = values.ncols();
    // An empty active set falls back to the full row count as the divisor.
    let denom = if active.is_empty() {
        values.nrows() as f64
    } else {
        active.len() as f64
    };

    let mut mean = vec![0.0; cols];
    let mut std = vec![0.0; cols];
    for a in 0..cols {
        let mut s = 0.0;
        for &b in active {
            s += values[(b, a)];
        }
        mean[a] = s / denom;

        let mut sq = 0.0;
        for &b in active {
            let d = values[(b, a)] - mean[a];
            sq += d * d;
        }
        let sd = (sq / denom).sqrt();
        std[a] = if sd == 0.0 || !sd.is_finite() { 1.0 } else { sd };
    }

    ColumnStats { mean, std }
}

/// Z-scores every row (active or not) against the statistics of the active rows.
///
/// Keeps one attribute with a wide spread from dominating the MDS distances.
pub fn standardize(values: &DMatrix<f64>, active: &[usize]) -> DMatrix<f64> {
    let stats = column_stats(values, active);
    DMatrix::from_fn(values.nrows(), values.ncols(), |b, a| {
        (values[(b, a)] - stats.mean[a]) / stats.std[a]
    })
}
