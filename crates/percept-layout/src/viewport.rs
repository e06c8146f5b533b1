//! The one mapping between normalized map coordinates and canvas pixels.
//!
//! Drawing and pointer hit-testing must both go through [`MapTransform`]; a second copy of the
//! formula anywhere else is how hover targets drift away from the drawn markers.

use crate::geom::{Point, ScreenPoint, ScreenSize, point, screen_point};

/// Fraction of the shorter canvas side covered by the unit radius at zoom 1.
pub const BASE_SCALE: f64 = 0.45;
pub const BRAND_MARKER_RADIUS: f64 = 5.0;
/// Pointer slack around a brand marker, in pixels.
pub const DEFAULT_HOVER_RADIUS: f64 = BRAND_MARKER_RADIUS + 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub size: ScreenSize,
    pub zoom: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, zoom: f64) -> Self {
        Self {
            size: ScreenSize::new(width, height),
            zoom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapTransform {
    pub center: ScreenPoint,
    /// Pixels per normalized unit.
    pub scale: f64,
}

impl MapTransform {
    pub fn new(viewport: &Viewport, base_scale: f64) -> Self {
        let w = viewport.size.width;
        let h = viewport.size.height;
        Self {
            center: screen_point(w / 2.0, h / 2.0),
            scale: w.min(h) * base_scale * viewport.zoom,
        }
    }

    pub fn for_viewport(viewport: &Viewport) -> Self {
        Self::new(viewport, BASE_SCALE)
    }

    /// `(W/2 + x*s, H/2 - y*s)`; map y points up, screen y points down.
    pub fn to_screen(&self, p: Point) -> ScreenPoint {
        screen_point(self.center.x + p.x * self.scale, self.center.y - p.y * self.scale)
    }

    /// Inverse of [`Self::to_screen`]. A degenerate (zero) scale maps everything to the origin.
    pub fn to_map(&self, s: ScreenPoint) -> Point {
        if self.scale == 0.0 || !self.scale.is_finite() {
            return point(0.0, 0.0);
        }
        point(
            (s.x - self.center.x) / self.scale,
            (self.center.y - s.y) / self.scale,
        )
    }

    /// Index of the point whose marker lies within `radius` pixels of `pointer`.
    ///
    /// When markers overlap, the last one in input order wins (it is drawn on top).
    pub fn hit_test(&self, points: &[Point], pointer: ScreenPoint, radius: f64) -> Option<usize> {
        let mut found = None;
        for (i, p) in points.iter().enumerate() {
            let s = self.to_screen(*p);
            let dx = pointer.x - s.x;
            let dy = pointer.y - s.y;
            if (dx * dx + dy * dy).sqrt() <= radius {
                found = Some(i);
            }
        }
        found
    }
}

/// Free-function form of the shared transform for collaborators that hold no state.
pub fn to_screen(p: Point, viewport: &Viewport) -> ScreenPoint {
    MapTransform::for_viewport(viewport).to_screen(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_maps_to_canvas_center() {
        let vp = Viewport::new(900.0, 350.0, 1.0);
        assert_eq!(to_screen(point(0.0, 0.0), &vp), screen_point(450.0, 175.0));
    }

    #[test]
    fn unit_x_uses_shorter_side() {
        let vp = Viewport::new(900.0, 350.0, 2.0);
        let t = MapTransform::for_viewport(&vp);
        assert_eq!(t.scale, 350.0 * 0.45 * 2.0);
        let s = t.to_screen(point(1.0, 1.0));
        assert_eq!(s.x, 450.0 + t.scale);
        assert_eq!(s.y, 175.0 - t.scale);
    }

    #[test]
    fn to_map_inverts_to_screen() {
        let t = MapTransform::for_viewport(&Viewport::new(640.0, 480.0, 1.3));
        let p = point(0.25, -0.75);
        let back = t.to_map(t.to_screen(p));
        assert!((back.x - p.x).abs() < 1e-12);
        assert!((back.y - p.y).abs() < 1e-12);
    }

    #[test]
    fn hit_test_prefers_the_last_overlapping_marker() {
        let t = MapTransform::for_viewport(&Viewport::new(400.0, 400.0, 1.0));
        let pts = [point(0.0, 0.0), point(0.01, 0.0), point(0.9, 0.9)];
        let hit = t.hit_test(&pts, screen_point(200.0, 200.0), DEFAULT_HOVER_RADIUS);
        assert_eq!(hit, Some(1));
    }

    #[test]
    fn hit_test_misses_outside_radius() {
        let t = MapTransform::for_viewport(&Viewport::new(400.0, 400.0, 1.0));
        let pts = [point(0.0, 0.0)];
        assert_eq!(
            t.hit_test(&pts, screen_point(208.0, 200.0), DEFAULT_HOVER_RADIUS),
            None
        );
        assert_eq!(
            t.hit_test(&pts, screen_point(207.0, 200.0), DEFAULT_HOVER_RADIUS),
            Some(0)
        );
    }
}
