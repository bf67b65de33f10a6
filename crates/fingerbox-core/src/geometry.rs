//! 2D geometry primitives for panel outlines

use serde::{Deserialize, Serialize};

/// Points closer than this on both axes are treated as the same vertex.
pub const POINT_EPSILON: f64 = 1e-6;

/// A point in sheet coordinates (millimetres, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point shifted by `(dx, dy)`.
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn approx_eq(&self, other: &Point) -> bool {
        (self.x - other.x).abs() < POINT_EPSILON && (self.y - other.y).abs() < POINT_EPSILON
    }
}

/// Append `point` unless it repeats the last vertex of `path`.
pub fn push_unique_point(path: &mut Vec<Point>, point: Point) {
    if let Some(last) = path.last() {
        if last.approx_eq(&point) {
            return;
        }
    }
    path.push(point);
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Bounding box of `points`, or `None` when there are no finite points.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point>,
    {
        let mut bounds: Option<Self> = None;
        for p in points {
            if !p.x.is_finite() || !p.y.is_finite() {
                continue;
            }
            bounds = Some(match bounds {
                None => Self {
                    min_x: p.x,
                    min_y: p.y,
                    max_x: p.x,
                    max_y: p.y,
                },
                Some(b) => Self {
                    min_x: b.min_x.min(p.x),
                    min_y: b.min_y.min(p.y),
                    max_x: b.max_x.max(p.x),
                    max_y: b.max_y.max(p.y),
                },
            });
        }
        bounds
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// True when the interiors of the two boxes overlap.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.min_x < other.max_x - POINT_EPSILON
            && other.min_x < self.max_x - POINT_EPSILON
            && self.min_y < other.max_y - POINT_EPSILON
            && other.min_y < self.max_y - POINT_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_unique_point_skips_repeats() {
        let mut path = Vec::new();
        push_unique_point(&mut path, Point::new(0.0, 0.0));
        push_unique_point(&mut path, Point::new(0.0, 0.0));
        push_unique_point(&mut path, Point::new(1.0, 0.0));
        push_unique_point(&mut path, Point::new(1.0, 1e-9));
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_bounding_box() {
        let points = [
            Point::new(1.0, 2.0),
            Point::new(-3.0, 5.0),
            Point::new(4.0, -1.0),
            Point::new(f64::NAN, 100.0),
        ];
        let bounds = BoundingBox::from_points(&points).unwrap();
        assert_eq!(bounds.min_x, -3.0);
        assert_eq!(bounds.max_x, 4.0);
        assert_eq!(bounds.min_y, -1.0);
        assert_eq!(bounds.max_y, 5.0);
        assert_eq!((bounds.width(), bounds.height()), (7.0, 6.0));

        assert!(BoundingBox::from_points(&[]).is_none());
    }

    #[test]
    fn test_overlap_excludes_touching_edges() {
        let a = BoundingBox {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 10.0,
            max_y: 10.0,
        };
        let touching = BoundingBox {
            min_x: 10.0,
            min_y: 0.0,
            max_x: 20.0,
            max_y: 10.0,
        };
        let inside = BoundingBox {
            min_x: 5.0,
            min_y: 5.0,
            max_x: 6.0,
            max_y: 6.0,
        };
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
    }
}
