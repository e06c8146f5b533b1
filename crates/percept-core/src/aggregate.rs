use serde::Serialize;

use crate::survey::{NEUTRAL_RATING, Survey};

/// Brand × attribute matrix of mean ratings, stored row-major.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMatrix {
    pub brands: Vec<String>,
    pub attribute_ids: Vec<String>,
    values: Vec<f64>,
}

impl PerformanceMatrix {
    pub fn from_rows(brands: Vec<String>, attribute_ids: Vec<String>, rows: &[Vec<f64>]) -> Self {
        let cols = attribute_ids.len();
        let mut values = Vec::with_capacity(brands.len() * cols);
        for b in 0..brands.len() {
            for a in 0..cols {
                let v = rows
                    .get(b)
                    .and_then(|row| row.get(a))
                    .copied()
                    .unwrap_or(NEUTRAL_RATING);
                values.push(v);
            }
        }
        Self {
            brands,
            attribute_ids,
            values,
        }
    }

    pub fn nrows(&self) -> usize {
        self.brands.len()
    }

    pub fn ncols(&self) -> usize {
        self.attribute_ids.len()
    }

    pub fn get(&self, brand: usize, attribute: usize) -> f64 {
        self.values[brand * self.ncols() + attribute]
    }

    pub fn row(&self, brand: usize) -> &[f64] {
        let cols = self.ncols();
        &self.values[brand * cols..(brand + 1) * cols]
    }

    pub fn attribute_index(&self, id: &str) -> Option<usize> {
        self.attribute_ids.iter().position(|a| a == id)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

/// Unweighted mean of every response per (brand, attribute) cell.
///
/// A blank answer counts as [`NEUTRAL_RATING`]; with no responses at all, every cell is neutral.
pub fn aggregate_performance(survey: &Survey) -> PerformanceMatrix {
    let brand_count = survey.brand_count();
    let attr_count = survey.attribute_count();
    let n = survey.records.len();

    let mut values = Vec::with_capacity(brand_count * attr_count);
    for b in 0..brand_count {
        for a in 0..attr_count {
            if n == 0 {
                values.push(NEUTRAL_RATING);
                continue;
            }
            let sum: f64 = survey
                .records
                .iter()
                .map(|r| r.performance[b][a].unwrap_or(NEUTRAL_RATING))
                .sum();
            values.push(sum / n as f64);
        }
    }

    PerformanceMatrix {
        brands: survey.brands.iter().map(|b| b.name.clone()).collect(),
        attribute_ids: survey.attributes.iter().map(|a| a.id.clone()).collect(),
        values,
    }
}

/// Mean overall-preference rating per brand, with the same blank-as-neutral policy.
pub fn aggregate_preference(survey: &Survey) -> Vec<f64> {
    let n = survey.records.len();
    (0..survey.brand_count())
        .map(|b| {
            if n == 0 {
                return NEUTRAL_RATING;
            }
            let sum: f64 = survey
                .records
                .iter()
                .map(|r| r.preference[b].unwrap_or(NEUTRAL_RATING))
                .sum();
            sum / n as f64
        })
        .collect()
}
