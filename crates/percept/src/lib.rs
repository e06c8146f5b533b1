#![forbid(unsafe_code)]

//! `percept` computes perceptual positioning maps from brand survey data.
//!
//! [`position`] runs the whole pipeline: validate and aggregate responses
//! (`percept-core`), then standardize, embed with classical MDS, project attributes and
//! normalize (`percept-layout`). The returned [`PositioningResult`] is an immutable snapshot;
//! recompute it on any input change and hand it to renderers through [`cache::ResultCache`].

pub mod cache;
pub mod direct;
pub mod error;
pub mod options;
pub mod tables;

use nalgebra::DMatrix;
use serde::Serialize;

pub use percept_core::*;
pub use percept_layout::{
    Layout, LayoutOptions, MapSpace, MapTransform, MdsOptions, Point, ProjectorParams,
    ScreenPoint, ScreenSize, ScreenSpace, Viewport, geom, normalize, viewport,
};

pub use cache::{ResultCache, Snapshot};
pub use direct::{AttributeSelection, DirectMap, DirectPoint, attribute_pairs, direct_map};
pub use error::{Error, Result};
pub use options::{PositioningOptions, ViewportOptions};
pub use tables::Tables;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositioningResult {
    pub brands: Vec<String>,
    pub attribute_ids: Vec<String>,
    /// Normalized `[x, y]` per brand.
    pub brand_coords: Vec<Point>,
    /// Normalized `[x, y]` per attribute, on the same scale as the brands.
    pub attr_coords: Vec<Point>,
    pub ideal_index: Option<usize>,
    pub max_radius: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eigenvalues: Option<[f64; 2]>,
    pub tables: Tables,
    /// Mean ratings the layout was computed from; direct maps read from here.
    #[serde(skip)]
    pub performance: PerformanceMatrix,
}

impl PositioningResult {
    fn empty(performance: PerformanceMatrix) -> Self {
        Self {
            brands: Vec::new(),
            attribute_ids: Vec::new(),
            brand_coords: Vec::new(),
            attr_coords: Vec::new(),
            ideal_index: None,
            max_radius: 0.0,
            eigenvalues: None,
            tables: Tables::default(),
            performance,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.brand_coords.is_empty() && self.attr_coords.is_empty()
    }

    /// Brand under `pointer`, using the same transform the renderer draws with.
    pub fn hit_brand(
        &self,
        transform: &MapTransform,
        pointer: ScreenPoint,
        radius: f64,
    ) -> Option<usize> {
        transform.hit_test(&self.brand_coords, pointer, radius)
    }

    pub fn direct_map(&self, x_attr: &str, y_attr: &str) -> Result<DirectMap> {
        direct_map(&self.performance, x_attr, y_attr, self.ideal_index)
    }
}

/// Validates, aggregates and lays out `project`.
pub fn position(project: &Project, opts: &PositioningOptions) -> Result<PositioningResult> {
    let survey = Survey::from_project(project)?;
    let performance = aggregate_performance(&survey);
    let preference = aggregate_preference(&survey);
    let ideal = resolve_benchmark(project.brand_names(), opts.benchmark_name(project));
    tracing::debug!(
        brands = performance.nrows(),
        attributes = performance.ncols(),
        responses = survey.records.len(),
        ideal = ?ideal,
        "aggregated survey"
    );

    position_matrix(
        performance,
        &preference,
        &survey.attributes,
        ideal,
        opts.lang_for(project),
        &opts.layout,
    )
}

/// Lays out an already-aggregated matrix.
///
/// `attributes` supplies the table labels and must line up with the matrix columns; the
/// result is empty when the matrix has no brands or no attributes.
pub fn position_matrix(
    performance: PerformanceMatrix,
    preference: &[f64],
    attributes: &[Attribute],
    ideal: Option<usize>,
    lang: Lang,
    layout_opts: &LayoutOptions,
) -> Result<PositioningResult> {
    let rows = performance.nrows();
    let cols = performance.ncols();
    if rows == 0 || cols == 0 {
        return Ok(PositioningResult::empty(performance));
    }

    let values = DMatrix::from_row_slice(rows, cols, performance.as_slice());
    let layout = percept_layout::layout(&values, ideal, layout_opts)?;

    let tables = tables::build_tables(&tables::TableInputs {
        performance: &performance,
        preference,
        attributes,
        lang,
        brand_coords: &layout.brands,
        attr_coords: &layout.attributes,
        ideal,
    });

    Ok(PositioningResult {
        brands: performance.brands.clone(),
        attribute_ids: performance.attribute_ids.clone(),
        brand_coords: layout.brands,
        attr_coords: layout.attributes,
        ideal_index: ideal,
        max_radius: layout.max_radius,
        eigenvalues: layout.eigenvalues,
        tables,
        performance,
    })
}
