use nalgebra::DMatrix;

/// Pairwise Euclidean distances between the rows of `standardized`.
///
/// The result is symmetric with an exact zero diagonal; each pair is computed once and mirrored.
pub fn distance_matrix(standardized: &DMatrix<f64>) -> DMatrix<f64> {
    let n = standardized.nrows();
    let cols = standardized.ncols();
    let mut dist = DMatrix::<f64>::zeros(n, n);
    for i in 0..n {
        for j in (i + 1)..n {
            let mut s = 0.0;
            for a in 0..cols {
                let d = standardized[(i, a)] - standardized[(j, a)];
                s += d * d;
            }
            let d = s.sqrt();
            dist[(i, j)] = d;
            dist[(j, i)] = d;
        }
    }
    dist
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric_with_zero_diagonal() {
        let x = DMatrix::from_row_slice(3, 2, &[0.0, 0.0, 3.0, 4.0, -1.0, 2.0]);
        let d = distance_matrix(&x);
        for i in 0..3 {
            assert_eq!(d[(i, i)], 0.0);
            for j in 0..3 {
                assert_eq!(d[(i, j)], d[(j, i)]);
            }
        }
        assert!((d[(0, 1)] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn no_columns_means_all_zero() {
        let x = DMatrix::<f64>::zeros(4, 0);
        let d = distance_matrix(&x);
        assert!(d.iter().all(|v| *v == 0.0));
    }
}
