use serde::Serialize;
use serde_json::Value;

use crate::raw::{present, to_f64};

/// A point in page-relative coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Ordered vertices locating a field on its page. Empty when unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Polygon {
    pub points: Vec<Point>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Parse `[[x, y], ...]`. Any malformed vertex yields an empty polygon.
    pub fn from_json(raw: &Value) -> Self {
        let Some(vertices) = raw.as_array() else {
            return Self::default();
        };
        let points: Option<Vec<Point>> = vertices
            .iter()
            .map(|v| match v.as_array().map(Vec::as_slice) {
                Some([x, y]) => Some(Point {
                    x: to_f64(x)?,
                    y: to_f64(y)?,
                }),
                _ => None,
            })
            .collect();
        points.map(Self::new).unwrap_or_default()
    }

    /// Position of a raw record: `polygon`, else `bounding_box`.
    /// A missing or empty `polygon` falls through to `bounding_box`.
    pub fn from_record(record: &Value) -> Self {
        ["polygon", "bounding_box"]
            .iter()
            .filter_map(|key| present(record, key))
            .map(Self::from_json)
            .find(|poly| !poly.is_empty())
            .unwrap_or_default()
    }

    /// Axis-aligned box enclosing the polygon, clockwise from top-left.
    pub fn bounding_box(&self) -> Self {
        let Some(first) = self.points.first() else {
            return Self::default();
        };
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &self.points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Self::new(vec![
            Point { x: min_x, y: min_y },
            Point { x: max_x, y: min_y },
            Point { x: max_x, y: max_y },
            Point { x: min_x, y: max_y },
        ])
    }
}
