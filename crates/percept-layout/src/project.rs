//! Attribute marker placement.
//!
//! This is a visualization heuristic, not a statistical embedding. Each attribute is pulled
//! toward the brands that score well on it (weighted centroid), shifted along the
//! center-to-benchmark direction by how much the benchmark out-scores the other brands, and
//! finally relaxed apart from its neighbours with a few rounds of pairwise repulsion.

use nalgebra::DMatrix;

use crate::geom::{Point, point};
use crate::options::{EPSILON, ProjectorParams, SCORE_FLOOR};

/// Places one marker per performance-matrix column.
///
/// `brands` are the post-MDS brand coordinates (one per performance row).
pub fn project_attributes(
    performance: &DMatrix<f64>,
    brands: &[Point],
    benchmark: Option<usize>,
    params: &ProjectorParams,
) -> Vec<Point> {
    let brand_count = brands.len();
    let attr_count = performance.ncols();
    let mut attrs = vec![point(0.0, 0.0); attr_count];
    if attr_count == 0 || brand_count == 0 {
        return attrs;
    }

    let ideal = benchmark.filter(|&i| i < brand_count);
    let is_other = |b: usize| ideal != Some(b);

    let mut center = (0.0, 0.0);
    let mut center_count = 0usize;
    for (b, p) in brands.iter().enumerate() {
        if !is_other(b) {
            continue;
        }
        center.0 += p.x;
        center.1 += p.y;
        center_count += 1;
    }
    if center_count > 0 {
        center.0 /= center_count as f64;
        center.1 /= center_count as f64;
    }

    let dir = match ideal {
        Some(i) => {
            let dx = brands[i].x - center.0;
            let dy = brands[i].y - center.1;
            let len = (dx * dx + dy * dy).sqrt();
            let len = if len == 0.0 { 1.0 } else { len };
            (dx / len, dy / len)
        }
        None => (0.0, 0.0),
    };

    for (a, slot) in attrs.iter_mut().enumerate() {
        let mut cx = 0.0;
        let mut cy = 0.0;
        let mut sum_w = 0.0;
        let mut sum_others = 0.0;
        let mut count_others = 0usize;

        for (b, p) in brands.iter().enumerate() {
            if !is_other(b) {
                continue;
            }
            let score = performance[(b, a)];
            let w = (score - 1.0).max(SCORE_FLOOR).powf(params.weight_gamma);
            cx += w * p.x;
            cy += w * p.y;
            sum_w += w;
            sum_others += score;
            count_others += 1;
        }

        if sum_w > 0.0 {
            cx /= sum_w;
            cy /= sum_w;
        }

        let mut offset = (0.0, 0.0);
        if let Some(i) = ideal {
            if count_others > 0 {
                let mean_others = sum_others / count_others as f64;
                let diff = performance[(i, a)] - mean_others;
                offset = (
                    dir.0 * diff * params.beta_ideal,
                    dir.1 * diff * params.beta_ideal,
                );
            }
        }

        *slot = point(cx * params.stretch + offset.0, cy * params.stretch + offset.1);
    }

    repel(&mut attrs, params);
    attrs
}

/// Pushes apart every pair closer than `repel_radius`, symmetrically along their connecting line.
///
/// Pairs are visited in `(i, j)` order with `i < j`, and each push is applied immediately.
/// Exactly coincident markers stay put: their connecting direction is undefined.
pub fn repel(attrs: &mut [Point], params: &ProjectorParams) {
    let n = attrs.len();
    for _ in 0..params.repel_iterations {
        for i in 0..n {
            for j in (i + 1)..n {
                let mut dx = attrs[j].x - attrs[i].x;
                let mut dy = attrs[j].y - attrs[i].y;
                let dist = (dx * dx + dy * dy).sqrt();
                let dist = if dist == 0.0 { EPSILON } else { dist };
                if dist >= params.repel_radius {
                    continue;
                }

                let force =
                    (params.repel_radius - dist) / params.repel_radius * params.repel_strength;
                dx /= dist;
                dy /= dist;

                attrs[i].x -= dx * force;
                attrs[i].y -= dy * force;
                attrs[j].x += dx * force;
                attrs[j].y += dy * force;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_repel() -> ProjectorParams {
        ProjectorParams {
            repel_iterations: 0,
            ..Default::default()
        }
    }

    #[test]
    fn empty_inputs_give_zero_markers() {
        let perf = DMatrix::<f64>::zeros(0, 3);
        let out = project_attributes(&perf, &[], None, &ProjectorParams::default());
        assert_eq!(out, vec![point(0.0, 0.0); 3]);
    }

    #[test]
    fn centroid_follows_the_high_scorer() {
        let perf = DMatrix::from_row_slice(2, 1, &[5.0, 1.0]);
        let brands = [point(1.0, 0.0), point(-1.0, 0.0)];
        let out = project_attributes(&perf, &brands, None, &no_repel());
        // w = [2, 0.01]; cx = (2 - 0.01) / 2.01
        let expected = (2.0 - 0.01) / 2.01 * 1.15;
        assert!((out[0].x - expected).abs() < 1e-12, "got {:?}", out[0]);
        assert_eq!(out[0].y, 0.0);
    }

    #[test]
    fn benchmark_offset_points_toward_ideal() {
        // Brands 0 and 1 straddle the origin; brand 2 is the benchmark above them.
        let perf = DMatrix::from_row_slice(3, 1, &[3.0, 3.0, 5.0]);
        let brands = [point(-1.0, 0.0), point(1.0, 0.0), point(0.0, 2.0)];
        let out = project_attributes(&perf, &brands, Some(2), &no_repel());
        // Centroid is (0,0); dir = (0,1); diff = 5 - 3 = 2.
        assert!(out[0].x.abs() < 1e-12);
        assert!((out[0].y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn benchmark_only_project_has_no_centroid() {
        let perf = DMatrix::from_row_slice(1, 2, &[4.0, 2.0]);
        let brands = [point(0.0, 0.0)];
        let out = project_attributes(&perf, &brands, Some(0), &no_repel());
        assert_eq!(out, vec![point(0.0, 0.0); 2]);
    }

    #[test]
    fn repulsion_separates_close_pairs_symmetrically() {
        let params = ProjectorParams {
            repel_iterations: 1,
            ..Default::default()
        };
        let mut attrs = vec![point(0.0, 0.0), point(1.0, 0.0)];
        repel(&mut attrs, &params);
        let force = (7.0 - 1.0) / 7.0 * 0.7;
        assert!((attrs[0].x + force).abs() < 1e-12);
        assert!((attrs[1].x - 1.0 - force).abs() < 1e-12);
    }

    #[test]
    fn coincident_markers_are_not_moved() {
        let mut attrs = vec![point(0.5, 0.5), point(0.5, 0.5)];
        repel(&mut attrs, &ProjectorParams::default());
        assert_eq!(attrs, vec![point(0.5, 0.5), point(0.5, 0.5)]);
    }

    #[test]
    fn distant_pairs_are_left_alone() {
        let mut attrs = vec![point(0.0, 0.0), point(10.0, 0.0)];
        repel(&mut attrs, &ProjectorParams::default());
        assert_eq!(attrs, vec![point(0.0, 0.0), point(10.0, 0.0)]);
    }
}
