use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::model::{Attribute, Brand, Project};

pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 5.0;
/// Stand-in for a rating a respondent left blank. Counted like any other answer.
pub const NEUTRAL_RATING: f64 = 3.0;

/// One validated response, indexed by brand/attribute position instead of by name.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingRecord {
    /// `performance[brand][attribute]`, `None` where the respondent left it blank.
    pub performance: Vec<Vec<Option<f64>>>,
    pub preference: Vec<Option<f64>>,
}

/// A project whose responses passed boundary validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Survey {
    pub brands: Vec<Brand>,
    pub attributes: Vec<Attribute>,
    pub records: Vec<RatingRecord>,
}

impl Survey {
    /// Checks identities and ratings and resolves names to indices.
    ///
    /// Finite ratings outside `[1, 5]` are clamped into range; non-finite ratings, unknown
    /// brands/attributes and duplicate identities are rejected.
    pub fn from_project(project: &Project) -> Result<Self> {
        let mut brand_index: FxHashMap<&str, usize> = FxHashMap::default();
        for (i, b) in project.brands.iter().enumerate() {
            if b.name.trim().is_empty() {
                return Err(Error::EmptyBrandName { index: i });
            }
            if brand_index.insert(b.name.as_str(), i).is_some() {
                return Err(Error::DuplicateBrand {
                    name: b.name.clone(),
                });
            }
        }

        let mut attr_index: FxHashMap<&str, usize> = FxHashMap::default();
        for (i, a) in project.attributes.iter().enumerate() {
            if attr_index.insert(a.id.as_str(), i).is_some() {
                return Err(Error::DuplicateAttribute { id: a.id.clone() });
            }
        }

        let brand_count = project.brands.len();
        let attr_count = project.attributes.len();
        let mut records = Vec::with_capacity(project.responses.len());
        let mut clamped = 0usize;

        for (r, response) in project.responses.iter().enumerate() {
            let mut performance = vec![vec![None; attr_count]; brand_count];
            for (brand, ratings) in &response.performance {
                let Some(&b) = brand_index.get(brand.as_str()) else {
                    return Err(Error::UnknownBrand {
                        response: r,
                        brand: brand.clone(),
                    });
                };
                for (attribute, &rating) in ratings {
                    let Some(&a) = attr_index.get(attribute.as_str()) else {
                        return Err(Error::UnknownAttribute {
                            response: r,
                            brand: brand.clone(),
                            attribute: attribute.clone(),
                        });
                    };
                    let v = checked_rating(rating, r, brand, attribute, &mut clamped)?;
                    performance[b][a] = Some(v);
                }
            }

            let mut preference = vec![None; brand_count];
            for (brand, &rating) in &response.preference {
                let Some(&b) = brand_index.get(brand.as_str()) else {
                    return Err(Error::UnknownBrand {
                        response: r,
                        brand: brand.clone(),
                    });
                };
                let v = checked_rating(rating, r, brand, "preference", &mut clamped)?;
                preference[b] = Some(v);
            }

            records.push(RatingRecord {
                performance,
                preference,
            });
        }

        if clamped > 0 {
            tracing::warn!(clamped, "ratings outside 1..=5 were clamped");
        }
        tracing::debug!(
            brands = brand_count,
            attributes = attr_count,
            responses = records.len(),
            "survey validated"
        );

        Ok(Self {
            brands: project.brands.clone(),
            attributes: project.attributes.clone(),
            records,
        })
    }

    pub fn brand_count(&self) -> usize {
        self.brands.len()
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }
}

fn checked_rating(
    rating: f64,
    response: usize,
    brand: &str,
    field: &str,
    clamped: &mut usize,
) -> Result<f64> {
    if !rating.is_finite() {
        return Err(Error::NonFiniteRating {
            response,
            brand: brand.to_string(),
            field: field.to_string(),
        });
    }
    let v = rating.clamp(MIN_RATING, MAX_RATING);
    if v != rating {
        *clamped += 1;
    }
    Ok(v)
}
