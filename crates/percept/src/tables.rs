//! Summary tables shipped alongside the coordinates.

use percept_core::{Attribute, Lang, PerformanceMatrix};
use percept_layout::Point;
use percept_layout::geom::{distance, radius};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tables {
    pub performance_means: Vec<PerformanceMean>,
    pub attribute_sensitivity: Vec<AttributeSensitivity>,
    pub distances_to_ideal: Vec<IdealDistance>,
    pub preference_means: Vec<PreferenceMean>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceMean {
    pub brand: String,
    pub values: Vec<f64>,
}

/// How strongly an attribute differentiates brands: its normalized position and that
/// position's distance from the origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeSensitivity {
    pub attribute_id: String,
    pub attribute: String,
    pub loading_x: f64,
    pub loading_y: f64,
    pub magnitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdealDistance {
    pub brand: String,
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreferenceMean {
    pub brand: String,
    pub value: f64,
}

pub(crate) struct TableInputs<'a> {
    pub performance: &'a PerformanceMatrix,
    pub preference: &'a [f64],
    pub attributes: &'a [Attribute],
    pub lang: Lang,
    pub brand_coords: &'a [Point],
    pub attr_coords: &'a [Point],
    pub ideal: Option<usize>,
}

pub(crate) fn build_tables(input: &TableInputs<'_>) -> Tables {
    let brands = &input.performance.brands;

    let performance_means = brands
        .iter()
        .enumerate()
        .map(|(b, name)| PerformanceMean {
            brand: name.clone(),
            values: input.performance.row(b).to_vec(),
        })
        .collect();

    let attribute_sensitivity = input
        .attributes
        .iter()
        .zip(input.attr_coords)
        .map(|(attr, &p)| AttributeSensitivity {
            attribute_id: attr.id.clone(),
            attribute: attr.label(input.lang).to_string(),
            loading_x: p.x,
            loading_y: p.y,
            magnitude: radius(p),
        })
        .collect();

    let mut distances_to_ideal = Vec::new();
    if let Some(ideal) = input.ideal {
        let anchor = input.brand_coords[ideal];
        for (b, (name, &p)) in brands.iter().zip(input.brand_coords).enumerate() {
            if b == ideal {
                continue;
            }
            distances_to_ideal.push(IdealDistance {
                brand: name.clone(),
                distance: distance(p, anchor),
            });
        }
    }

    let preference_means = brands
        .iter()
        .zip(input.preference)
        .map(|(name, &value)| PreferenceMean {
            brand: name.clone(),
            value,
        })
        .collect();

    Tables {
        performance_means,
        attribute_sensitivity,
        distances_to_ideal,
        preference_means,
    }
}
