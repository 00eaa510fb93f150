//! Planar geometry: points, closed rings and linear blending.

use serde::{Deserialize, Serialize};

/// Linear interpolation between two scalars.
///
/// `t = 0` yields `a` exactly.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// A map coordinate, serialized as `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Blend toward `other` by `t`.
    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point::new(lerp(self.x, other.x, t), lerp(self.y, other.y, t))
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// A closed ring of points (first point == last point).
///
/// Built through [`Ring::closed`], which also runs on deserialization, so an
/// open input ring gets its first point appended. An empty ring is allowed and
/// stands for "no drawn boundary".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Point>", into = "Vec<Point>")]
pub struct Ring {
    points: Vec<Point>,
}

impl Ring {
    /// Build a ring, closing it if the input is open.
    pub fn closed(mut points: Vec<Point>) -> Self {
        if let (Some(first), Some(last)) = (points.first().copied(), points.last().copied()) {
            if points.len() == 1 || first != last {
                points.push(first);
            }
        }
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of stored vertices, including the closing duplicate.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => self.points.len() > 1 && first == last,
            _ => true,
        }
    }

    /// Vertex-wise blend toward `other`.
    ///
    /// Vertices are matched by index, so both rings must have the same
    /// vertex count. Returns `None` when they differ.
    pub fn lerp(&self, other: &Ring, t: f64) -> Option<Ring> {
        if self.points.len() != other.points.len() {
            return None;
        }
        let points = self
            .points
            .iter()
            .zip(&other.points)
            .map(|(a, b)| a.lerp(b, t))
            .collect();
        Some(Ring { points })
    }

    /// Centroid of the distinct vertices (the closing duplicate is skipped).
    pub fn centroid(&self) -> Option<Point> {
        let distinct = match self.points.len() {
            0 => return None,
            1 => &self.points[..],
            n => &self.points[..n - 1],
        };
        let n = distinct.len() as f64;
        let (sx, sy) = distinct
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Some(Point::new(sx / n, sy / n))
    }

    /// Unsigned area by the shoelace formula.
    pub fn area(&self) -> f64 {
        let twice: f64 = self
            .points
            .windows(2)
            .map(|w| w[0].x * w[1].y - w[1].x * w[0].y)
            .sum();
        twice.abs() / 2.0
    }
}

impl From<Vec<Point>> for Ring {
    fn from(points: Vec<Point>) -> Self {
        Ring::closed(points)
    }
}

impl From<Ring> for Vec<Point> {
    fn from(ring: Ring) -> Self {
        ring.points
    }
}
