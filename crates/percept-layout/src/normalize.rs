use crate::geom::{Point, point, radius};
use crate::options::EPSILON;

#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub brands: Vec<Point>,
    pub attributes: Vec<Point>,
    /// The divisor applied to both sets (never below [`EPSILON`]).
    pub max_radius: f64,
}

/// Rescales brands and attributes by one shared factor so the farthest point lands on the unit
/// circle.
///
/// Renderers rely on both sets sharing the scale; never normalize them separately.
pub fn normalize_to_unit_radius(brands: &[Point], attributes: &[Point]) -> Normalized {
    let max_radius = brands
        .iter()
        .chain(attributes)
        .map(|p| radius(*p))
        .fold(EPSILON, |acc, r| if r > acc { r } else { acc });

    let scale = |p: &Point| point(p.x / max_radius, p.y / max_radius);
    Normalized {
        brands: brands.iter().map(scale).collect(),
        attributes: attributes.iter().map(scale).collect(),
        max_radius,
    }
}

/// Translates `points` so the smallest x and the smallest y both become zero.
pub fn shift_to_positive_quadrant(points: &[Point]) -> Vec<Point> {
    if points.is_empty() {
        return Vec::new();
    }
    let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    points
        .iter()
        .map(|p| point(p.x - min_x, p.y - min_y))
        .collect()
}
