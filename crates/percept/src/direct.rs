//! Two-attribute scatter maps read straight off the mean ratings, no MDS involved.

use percept_core::{MAX_RATING, MIN_RATING, PerformanceMatrix};
use serde::Serialize;

use crate::error::{Error, Result};

/// At most this many attributes can be picked for pairwise direct maps.
pub const MAX_SELECTED_ATTRIBUTES: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectPoint {
    pub brand: String,
    /// `(rating - 1) / 4`, so the 1–5 scale spans `[0, 1]`.
    pub x: f64,
    pub y: f64,
    pub is_ideal: bool,
    /// Distance to the ideal brand's point; `None` for the ideal itself or when there is none.
    pub distance_to_ideal: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectMap {
    pub x_attribute: String,
    pub y_attribute: String,
    pub points: Vec<DirectPoint>,
}

impl DirectMap {
    pub fn ideal(&self) -> Option<&DirectPoint> {
        self.points.iter().find(|p| p.is_ideal)
    }
}

fn unit_scale(rating: f64) -> f64 {
    (rating - MIN_RATING) / (MAX_RATING - MIN_RATING)
}

/// Places every brand at its scaled `(x_attr, y_attr)` ratings.
///
/// Points falling outside the unit square are dropped rather than clamped.
pub fn direct_map(
    performance: &PerformanceMatrix,
    x_attr: &str,
    y_attr: &str,
    ideal: Option<usize>,
) -> Result<DirectMap> {
    let xi = performance
        .attribute_index(x_attr)
        .ok_or_else(|| Error::UnknownAttribute {
            id: x_attr.to_string(),
        })?;
    let yi = performance
        .attribute_index(y_attr)
        .ok_or_else(|| Error::UnknownAttribute {
            id: y_attr.to_string(),
        })?;

    let mut points: Vec<DirectPoint> = performance
        .brands
        .iter()
        .enumerate()
        .map(|(b, name)| DirectPoint {
            brand: name.clone(),
            x: unit_scale(performance.get(b, xi)),
            y: unit_scale(performance.get(b, yi)),
            is_ideal: ideal == Some(b),
            distance_to_ideal: None,
        })
        .filter(|p| (0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y))
        .collect();

    if let Some((ix, iy)) = points.iter().find(|p| p.is_ideal).map(|p| (p.x, p.y)) {
        for p in points.iter_mut().filter(|p| !p.is_ideal) {
            p.distance_to_ideal = Some(((p.x - ix).powi(2) + (p.y - iy).powi(2)).sqrt());
        }
    }

    tracing::trace!(x_attr, y_attr, points = points.len(), "direct map built");
    Ok(DirectMap {
        x_attribute: x_attr.to_string(),
        y_attribute: y_attr.to_string(),
        points,
    })
}

/// Unordered pairs `(ids[i], ids[j])` with `i < j`, in selection order.
pub fn attribute_pairs<S: AsRef<str>>(ids: &[S]) -> Vec<(&str, &str)> {
    let mut out = Vec::new();
    for i in 0..ids.len() {
        for j in i + 1..ids.len() {
            out.push((ids[i].as_ref(), ids[j].as_ref()));
        }
    }
    out
}

/// Ordered pick of up to [`MAX_SELECTED_ATTRIBUTES`] attribute ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSelection {
    ids: Vec<String>,
}

impl AttributeSelection {
    /// Adds `id`, or removes it if already picked. Returns `false` when the selection is full.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(pos) = self.ids.iter().position(|x| x == id) {
            self.ids.remove(pos);
            return true;
        }
        if self.ids.len() >= MAX_SELECTED_ATTRIBUTES {
            return false;
        }
        self.ids.push(id.to_string());
        true
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn pairs(&self) -> Vec<(&str, &str)> {
        attribute_pairs(&self.ids)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}
