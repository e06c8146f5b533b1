//! Classical (Torgerson) multidimensional scaling.
//!
//! The two leading eigenpairs of the double-centered squared-distance matrix are extracted with
//! a fixed-budget power iteration plus one deflation step. This is an approximation: spectra with
//! nearly equal leading eigenvalues are not resolved exactly.

use nalgebra::{DMatrix, DVector};

use crate::geom::{Point, point};
use crate::options::MdsOptions;
use crate::rng::XorShift64Star;

#[derive(Debug, Clone, PartialEq)]
pub struct Eigenpair {
    /// Rayleigh-quotient estimate. Forced to `0.0` when the iterate collapsed.
    pub value: f64,
    pub vector: DVector<f64>,
    /// Iterations actually performed (less than the budget only when the iterate collapsed).
    pub iterations: usize,
    pub collapsed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    pub coords: Vec<Point>,
    pub axes: Option<[Eigenpair; 2]>,
}

/// `B = -1/2 * J D² J`, written out with row, column and grand means of the squared distances.
pub fn double_center(dist: &DMatrix<f64>) -> DMatrix<f64> {
    let n = dist.nrows();
    let d2 = DMatrix::from_fn(n, n, |i, j| dist[(i, j)] * dist[(i, j)]);

    let mut row_mean = vec![0.0; n];
    let mut col_mean = vec![0.0; n];
    let mut grand_mean = 0.0;
    for i in 0..n {
        for j in 0..n {
            row_mean[i] += d2[(i, j)];
            col_mean[j] += d2[(i, j)];
            grand_mean += d2[(i, j)];
        }
    }
    let nf = n as f64;
    for m in &mut row_mean {
        *m /= nf;
    }
    for m in &mut col_mean {
        *m /= nf;
    }
    grand_mean /= nf * nf;

    DMatrix::from_fn(n, n, |i, j| {
        -0.5 * (d2[(i, j)] - row_mean[i] - col_mean[j] + grand_mean)
    })
}

/// Runs `iterations` rounds of `v <- Bv / |Bv|` from a unit `start` vector.
///
/// If `|Bv|` underflows to zero the axis is frozen at the last valid vector with eigenvalue 0.
pub fn power_iteration(b: &DMatrix<f64>, start: DVector<f64>, iterations: usize) -> Eigenpair {
    let mut v = start;
    let mut value = 0.0;

    for it in 0..iterations {
        let w = b * &v;
        let norm = w.norm();
        if !(norm.is_finite() && norm > 0.0) {
            return Eigenpair {
                value: 0.0,
                vector: v,
                iterations: it,
                collapsed: true,
            };
        }
        value = v.dot(&w);
        v = w / norm;
    }

    Eigenpair {
        value,
        vector: v,
        iterations,
        collapsed: false,
    }
}

/// `B - λ v vᵀ`
pub fn deflate(b: &DMatrix<f64>, pair: &Eigenpair) -> DMatrix<f64> {
    let v = &pair.vector;
    let n = b.nrows();
    DMatrix::from_fn(n, n, |i, j| b[(i, j)] - pair.value * v[i] * v[j])
}

fn start_vector(rng: &mut XorShift64Star, n: usize) -> DVector<f64> {
    // The constant vector lies in the null space of a double-centered matrix, so the start
    // vector is drawn from the seeded generator instead.
    let mut v = DVector::<f64>::from_fn(n, |_, _| rng.next_f64_unit());
    let norm = v.norm();
    if norm.is_finite() && norm > 0.0 {
        v /= norm;
    } else {
        v.fill(1.0 / (n as f64).sqrt());
    }
    v
}

/// Recovers 2D coordinates from a symmetric distance matrix.
///
/// Negative eigenvalues contribute zero on their axis.
pub fn classical_mds(dist: &DMatrix<f64>, opts: &MdsOptions) -> Embedding {
    let n = dist.nrows();
    if n == 0 {
        return Embedding {
            coords: Vec::new(),
            axes: None,
        };
    }
    if n == 1 {
        return Embedding {
            coords: vec![point(0.0, 0.0)],
            axes: None,
        };
    }

    let b = double_center(dist);
    let mut rng = XorShift64Star::new(opts.seed);
    let start1 = start_vector(&mut rng, n);
    let start2 = start_vector(&mut rng, n);

    let first = power_iteration(&b, start1, opts.iterations);
    let b2 = deflate(&b, &first);
    let second = power_iteration(&b2, start2, opts.iterations);

    tracing::debug!(
        n,
        lambda1 = first.value,
        lambda2 = second.value,
        collapsed1 = first.collapsed,
        collapsed2 = second.collapsed,
        "classical mds eigenpairs"
    );

    let s1 = axis_scale(&first);
    let s2 = axis_scale(&second);
    let coords = (0..n)
        .map(|i| point(first.vector[i] * s1, second.vector[i] * s2))
        .collect();

    Embedding {
        coords,
        axes: Some([first, second]),
    }
}

fn axis_scale(pair: &Eigenpair) -> f64 {
    if pair.collapsed || pair.value <= 0.0 {
        0.0
    } else {
        pair.value.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_center_rows_sum_to_zero() {
        let d = DMatrix::from_row_slice(3, 3, &[0.0, 1.0, 2.0, 1.0, 0.0, 1.5, 2.0, 1.5, 0.0]);
        let b = double_center(&d);
        for i in 0..3 {
            let s: f64 = (0..3).map(|j| b[(i, j)]).sum();
            assert!(s.abs() < 1e-12, "row {i} sums to {s}");
        }
    }

    #[test]
    fn power_iteration_finds_dominant_eigenvalue() {
        let b = DMatrix::from_row_slice(2, 2, &[3.0, 0.0, 0.0, 1.0]);
        let start = DVector::from_vec(vec![0.6, 0.8]);
        let pair = power_iteration(&b, start, 100);
        assert!((pair.value - 3.0).abs() < 1e-9);
        assert!((pair.vector[0].abs() - 1.0).abs() < 1e-9);
        assert!(!pair.collapsed);
    }

    #[test]
    fn power_iteration_freezes_on_zero_matrix() {
        let b = DMatrix::<f64>::zeros(3, 3);
        let start = DVector::from_vec(vec![1.0, 0.0, 0.0]);
        let pair = power_iteration(&b, start.clone(), 100);
        assert!(pair.collapsed);
        assert_eq!(pair.value, 0.0);
        assert_eq!(pair.iterations, 0);
        assert_eq!(pair.vector, start);
    }

    #[test]
    fn single_point_sits_at_origin() {
        let d = DMatrix::<f64>::zeros(1, 1);
        let e = classical_mds(&d, &MdsOptions::default());
        assert_eq!(e.coords, vec![point(0.0, 0.0)]);
        assert!(e.axes.is_none());
    }

    #[test]
    fn empty_input_yields_empty_embedding() {
        let d = DMatrix::<f64>::zeros(0, 0);
        assert!(classical_mds(&d, &MdsOptions::default()).coords.is_empty());
    }

    #[test]
    fn negative_eigenvalue_contributes_nothing() {
        let pair = Eigenpair {
            value: -2.0,
            vector: DVector::from_vec(vec![1.0]),
            iterations: 1,
            collapsed: false,
        };
        assert_eq!(axis_scale(&pair), 0.0);
    }
}
