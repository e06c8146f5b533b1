#![forbid(unsafe_code)]

//! Headless perceptual-map geometry.
//!
//! Turns a brand × attribute matrix of mean ratings into 2D positions for brands (classical MDS
//! over z-scored rows) and attributes (weighted-centroid projection), normalized together into
//! the unit disc. [`viewport::MapTransform`] is the shared pixel mapping for renderers and
//! pointer hit-testing.
//!
//! Every stage is a pure, deterministic function; identical inputs and options reproduce
//! identical outputs.

pub mod distance;
pub mod error;
pub mod geom;
pub mod mds;
pub mod normalize;
pub mod options;
pub mod project;
mod rng;
pub mod standardize;
pub mod viewport;

use nalgebra::DMatrix;
use serde::Serialize;

pub use error::{Error, Result};
pub use geom::{MapSpace, Point, ScreenPoint, ScreenSize, ScreenSpace};
pub use options::{LayoutOptions, MdsOptions, ProjectorParams};
pub use viewport::{MapTransform, Viewport};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    /// Normalized brand positions, one per performance row.
    pub brands: Vec<Point>,
    /// Normalized attribute positions, one per performance column.
    pub attributes: Vec<Point>,
    /// Shared normalization divisor (pre-normalization radius of the farthest point).
    pub max_radius: f64,
    /// Leading eigenvalues recovered by MDS, when MDS ran.
    pub eigenvalues: Option<[f64; 2]>,
}

/// Runs the full geometry pipeline over a performance matrix.
///
/// All rows take part in standardization and MDS, including the benchmark row.
pub fn layout(
    performance: &DMatrix<f64>,
    benchmark: Option<usize>,
    opts: &LayoutOptions,
) -> Result<Layout> {
    let brand_count = performance.nrows();
    if let Some(index) = benchmark {
        if index >= brand_count {
            return Err(Error::BenchmarkOutOfRange {
                index,
                brands: brand_count,
            });
        }
    }
    for b in 0..brand_count {
        for a in 0..performance.ncols() {
            if !performance[(b, a)].is_finite() {
                return Err(Error::NonFinitePerformance {
                    brand: b,
                    attribute: a,
                });
            }
        }
    }

    let active: Vec<usize> = (0..brand_count).collect();

    let mut brands = vec![geom::point(0.0, 0.0); brand_count];
    let mut eigenvalues = None;
    if active.len() >= 2 {
        let z = standardize::standardize(performance, &active);
        let dist = distance::distance_matrix(&z);
        let embedding = mds::classical_mds(&dist, &opts.mds);
        eigenvalues = embedding
            .axes
            .as_ref()
            .map(|[first, second]| [first.value, second.value]);
        for (slot, &b) in active.iter().enumerate() {
            brands[b] = embedding.coords[slot];
        }
    } else {
        tracing::debug!(brand_count, "fewer than two brands; skipping mds");
    }

    let attributes =
        project::project_attributes(performance, &brands, benchmark, &opts.projector);
    let normalized = normalize::normalize_to_unit_radius(&brands, &attributes);
    tracing::debug!(
        brands = brand_count,
        attributes = attributes.len(),
        max_radius = normalized.max_radius,
        "layout complete"
    );

    Ok(Layout {
        brands: normalized.brands,
        attributes: normalized.attributes,
        max_radius: normalized.max_radius,
        eigenvalues,
    })
}
