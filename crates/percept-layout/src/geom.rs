//! Coordinate spaces used by the engine.
//!
//! Map coordinates live in [`MapSpace`] (MDS units before normalization, unit disc after).
//! Pixel coordinates live in [`ScreenSpace`]; the only bridge between the two is
//! [`crate::viewport::MapTransform`].

/// Brand/attribute positions on the perceptual map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MapSpace;

/// Canvas pixels, y pointing down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenSpace;

pub type Point = euclid::Point2D<f64, MapSpace>;
pub type ScreenPoint = euclid::Point2D<f64, ScreenSpace>;
pub type ScreenSize = euclid::Size2D<f64, ScreenSpace>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn screen_point(x: f64, y: f64) -> ScreenPoint {
    euclid::point2(x, y)
}

/// Euclidean distance from the origin.
pub fn radius(p: Point) -> f64 {
    (p.x * p.x + p.y * p.y).sqrt()
}

pub fn distance(a: Point, b: Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}
